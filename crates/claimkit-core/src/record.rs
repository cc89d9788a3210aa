//! The decoded claim model.
//!
//! A claim is either a stream claim (content metadata, optionally signed by a
//! publisher) or a certificate claim (a publisher identity holding a public
//! key). The model mirrors the wire schema exactly, including field presence:
//! an optional field that was present-but-empty on the wire stays
//! present-but-empty here, and fields the schema does not know are retained
//! raw so re-encoding is byte-exact.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::CoreError;
use crate::types::ClaimId;
use crate::wire::RawField;

/// The current claim schema version.
pub const CLAIM_VERSION: u64 = 1;
/// The current stream record version.
pub const STREAM_VERSION: u64 = 1;
/// The current metadata revision (schema 0.1.0).
pub const METADATA_VERSION: u64 = 4;
/// The current source descriptor version.
pub const SOURCE_VERSION: u64 = 1;
/// The current fee descriptor version.
pub const FEE_VERSION: u64 = 1;
/// The current certificate record version.
pub const CERTIFICATE_VERSION: u64 = 1;
/// The current signature record version.
pub const SIGNATURE_VERSION: u64 = 1;

/// Language code for English in the wire's fixed language enumeration.
pub const LANGUAGE_EN: u64 = 1;

/// What kind of record a claim is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    /// No type declared; neither stream nor certificate is populated.
    Unset,
    /// Content metadata.
    Stream,
    /// Publisher identity.
    Certificate,
}

impl ClaimType {
    /// Convert to the wire enumeration value.
    pub fn to_u64(self) -> u64 {
        match self {
            Self::Unset => 0,
            Self::Stream => 1,
            Self::Certificate => 2,
        }
    }

    /// Try to parse from the wire enumeration value.
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::Unset),
            1 => Some(Self::Stream),
            2 => Some(Self::Certificate),
            _ => None,
        }
    }
}

/// Key and signature algorithm codes.
///
/// The same enumeration backs a certificate's `keyType` and a signature's
/// `signatureType`. All four wire values decode so that records carrying an
/// algorithm we cannot verify still round-trip; verification gates on
/// [`KeyType::Secp256k1`] and rejects the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    UnknownPublicKeyType,
    Nist256p,
    Nist384p,
    Secp256k1,
}

impl KeyType {
    /// Convert to the wire enumeration value.
    pub fn to_u64(self) -> u64 {
        match self {
            Self::UnknownPublicKeyType => 0,
            Self::Nist256p => 1,
            Self::Nist384p => 2,
            Self::Secp256k1 => 3,
        }
    }

    /// Try to parse from the wire enumeration value.
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::UnknownPublicKeyType),
            1 => Some(Self::Nist256p),
            2 => Some(Self::Nist384p),
            3 => Some(Self::Secp256k1),
            _ => None,
        }
    }
}

/// Fee currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    UnknownCurrency,
    Lbc,
    Btc,
    Usd,
}

impl Currency {
    /// Convert to the wire enumeration value.
    pub fn to_u64(self) -> u64 {
        match self {
            Self::UnknownCurrency => 0,
            Self::Lbc => 1,
            Self::Btc => 2,
            Self::Usd => 3,
        }
    }

    /// Try to parse from the wire enumeration value.
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::UnknownCurrency),
            1 => Some(Self::Lbc),
            2 => Some(Self::Btc),
            3 => Some(Self::Usd),
            _ => None,
        }
    }
}

/// Source descriptor types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    UnknownSourceType,
    /// Content-hash descriptor of the published blob stream.
    SdHash,
}

impl SourceType {
    /// Convert to the wire enumeration value.
    pub fn to_u64(self) -> u64 {
        match self {
            Self::UnknownSourceType => 0,
            Self::SdHash => 1,
        }
    }

    /// Try to parse from the wire enumeration value.
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::UnknownSourceType),
            1 => Some(Self::SdHash),
            _ => None,
        }
    }
}

/// Content metadata carried by a stream claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: u64,
    /// Code from the wire's fixed language enumeration ([`LANGUAGE_EN`] = English).
    pub language: u64,
    pub title: String,
    pub description: String,
    pub author: String,
    pub license: String,
    pub nsfw: bool,
    pub fee: Option<Fee>,
    pub thumbnail: Option<String>,
    pub preview: Option<String>,
    pub license_url: Option<String>,
    /// Well-formed fields outside the schema, preserved for re-encoding.
    pub unknown: Vec<RawField>,
}

/// Fee descriptor: what a consumer pays to access the content.
///
/// Opaque to this crate beyond round-trip; the amount keeps its exact 32-bit
/// pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub version: u64,
    pub currency: Currency,
    pub address: Bytes,
    pub amount: f32,
    pub unknown: Vec<RawField>,
}

/// Source descriptor: where the content item lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub version: u64,
    pub source_type: SourceType,
    /// Content hash of the published blob stream.
    pub source: Bytes,
    pub content_type: String,
    pub unknown: Vec<RawField>,
}

/// A stream claim: content metadata plus its source descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamClaim {
    pub version: u64,
    pub metadata: Metadata,
    pub source: Source,
    pub unknown: Vec<RawField>,
}

/// A certificate claim: a publisher identity holding a public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateClaim {
    pub version: u64,
    pub key_type: KeyType,
    /// DER-encoded SubjectPublicKeyInfo.
    pub public_key: Bytes,
    pub unknown: Vec<RawField>,
}

/// Proof that a stream claim was published under a certificate's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherSignature {
    pub version: u64,
    pub signature_type: KeyType,
    /// 64-byte compact r||s signature over the canonical unsigned claim bytes.
    pub signature: Bytes,
    /// Identifier of the certificate claiming authorship.
    pub certificate_id: ClaimId,
    pub unknown: Vec<RawField>,
}

/// A fully decoded claim record.
///
/// Exactly one of `stream` / `certificate` is populated, matching
/// `claim_type`; both are absent for [`ClaimType::Unset`]. The publisher
/// signature rides at the top level of the record, next to the stream it
/// endorses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub version: u64,
    pub claim_type: ClaimType,
    pub stream: Option<StreamClaim>,
    pub certificate: Option<CertificateClaim>,
    pub publisher_signature: Option<PublisherSignature>,
    /// The exact bytes this record was decoded from; empty for records built
    /// in memory.
    pub raw: Bytes,
    pub unknown: Vec<RawField>,
}

impl ClaimRecord {
    /// Decode a claim from wire bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        codec::decode_claim(bytes)
    }

    /// Re-encode this record to wire bytes.
    ///
    /// For a record decoded from bytes `b` and not mutated since, the result
    /// equals `b`.
    pub fn encode(&self) -> Vec<u8> {
        codec::encode_claim(self)
    }

    /// True when this is a stream claim.
    pub fn is_stream(&self) -> bool {
        self.claim_type == ClaimType::Stream
    }

    /// True when this is a certificate claim.
    pub fn is_certificate(&self) -> bool {
        self.claim_type == ClaimType::Certificate
    }

    /// The stream record, if this is a stream claim.
    pub fn stream(&self) -> Option<&StreamClaim> {
        self.stream.as_ref()
    }

    /// The certificate record, if this is a certificate claim.
    pub fn certificate(&self) -> Option<&CertificateClaim> {
        self.certificate.as_ref()
    }

    /// The publisher signature, if one is attached.
    pub fn signature(&self) -> Option<&PublisherSignature> {
        self.publisher_signature.as_ref()
    }
}
