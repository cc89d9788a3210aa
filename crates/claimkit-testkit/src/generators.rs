//! Deterministic claim generators.
//!
//! Build fully-populated stream and certificate records from a seed, and
//! attach real secp256k1 signatures over the canonical unsigned bytes, so
//! end-to-end verification is testable without network fixtures.

use bytes::Bytes;

use claimkit_core::record::{
    CERTIFICATE_VERSION, CLAIM_VERSION, FEE_VERSION, LANGUAGE_EN, METADATA_VERSION,
    SIGNATURE_VERSION, SOURCE_VERSION, STREAM_VERSION,
};
use claimkit_core::{
    CertificateClaim, ClaimRecord, ClaimType, CoreError, Currency, Fee, Keypair, KeyType,
    Metadata, PublisherSignature, Sha256Hash, Source, SourceType, StreamClaim,
};

/// Parameters for generating a stream claim.
#[derive(Debug, Clone)]
pub struct StreamParams {
    pub title: String,
    pub description: String,
    pub author: String,
    pub license: String,
    pub content_type: String,
    pub nsfw: bool,
    /// Fee amount in LBC; `None` publishes without a fee.
    pub fee_amount: Option<f32>,
}

impl Default for StreamParams {
    fn default() -> Self {
        Self {
            title: "Game of life".into(),
            description: "Game of life gif".into(),
            author: "John Conway".into(),
            license: "Public Domain".into(),
            content_type: "image/gif".into(),
            nsfw: false,
            fee_amount: Some(1.0),
        }
    }
}

/// A deterministic keypair for tests.
pub fn test_keypair(seed_byte: u8) -> Keypair {
    Keypair::from_seed(&[seed_byte.max(1); 32]).expect("constant test seed is a valid scalar")
}

/// Build an unsigned stream claim from parameters.
///
/// The source hash is derived from the title so the same parameters always
/// produce the same record.
pub fn stream_claim(params: &StreamParams) -> ClaimRecord {
    let source_digest = Sha256Hash::hash(params.title.as_bytes());
    let mut source_hash = Vec::with_capacity(48);
    source_hash.extend_from_slice(source_digest.as_bytes());
    source_hash.extend_from_slice(&source_digest.as_bytes()[..16]);

    ClaimRecord {
        version: CLAIM_VERSION,
        claim_type: ClaimType::Stream,
        stream: Some(StreamClaim {
            version: STREAM_VERSION,
            metadata: Metadata {
                version: METADATA_VERSION,
                language: LANGUAGE_EN,
                title: params.title.clone(),
                description: params.description.clone(),
                author: params.author.clone(),
                license: params.license.clone(),
                nsfw: params.nsfw,
                fee: params.fee_amount.map(|amount| Fee {
                    version: FEE_VERSION,
                    currency: Currency::Lbc,
                    address: Bytes::from(vec![0x55; 25]),
                    amount,
                    unknown: Vec::new(),
                }),
                thumbnail: None,
                preview: None,
                license_url: None,
                unknown: Vec::new(),
            },
            source: Source {
                version: SOURCE_VERSION,
                source_type: SourceType::SdHash,
                source: Bytes::from(source_hash),
                content_type: params.content_type.clone(),
                unknown: Vec::new(),
            },
            unknown: Vec::new(),
        }),
        certificate: None,
        publisher_signature: None,
        raw: Bytes::new(),
        unknown: Vec::new(),
    }
}

/// Build a certificate claim for a keypair.
pub fn certificate_claim(keypair: &Keypair) -> ClaimRecord {
    ClaimRecord {
        version: CLAIM_VERSION,
        claim_type: ClaimType::Certificate,
        stream: None,
        certificate: Some(CertificateClaim {
            version: CERTIFICATE_VERSION,
            key_type: KeyType::Secp256k1,
            public_key: keypair.public_key_der().clone(),
            unknown: Vec::new(),
        }),
        publisher_signature: None,
        raw: Bytes::new(),
        unknown: Vec::new(),
    }
}

/// Attach a publisher signature to an unsigned stream claim.
///
/// The signature covers the SHA-256 of the claim's current encoding, which
/// for an unsigned claim is exactly its canonical unsigned form.
pub fn sign_stream_claim(record: &ClaimRecord, keypair: &Keypair) -> Result<ClaimRecord, CoreError> {
    if record.claim_type != ClaimType::Stream {
        return Err(CoreError::NotApplicable);
    }
    if record.publisher_signature.is_some() {
        return Err(CoreError::AlreadyInitialized);
    }

    let digest = Sha256Hash::hash(&record.encode());
    let mut signed = record.clone();
    signed.publisher_signature = Some(PublisherSignature {
        version: SIGNATURE_VERSION,
        signature_type: KeyType::Secp256k1,
        signature: Bytes::from(keypair.sign_digest(&digest).to_vec()),
        certificate_id: keypair.certificate_id(),
        unknown: Vec::new(),
    });
    Ok(signed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimkit_core::{unsigned_claim_bytes, verify_stream_signature};

    #[test]
    fn test_generators_are_deterministic() {
        let params = StreamParams::default();
        assert_eq!(stream_claim(&params), stream_claim(&params));

        let keypair = test_keypair(0x42);
        let signed1 = sign_stream_claim(&stream_claim(&params), &keypair).unwrap();
        let signed2 = sign_stream_claim(&stream_claim(&params), &keypair).unwrap();
        assert_eq!(signed1.encode(), signed2.encode());
    }

    #[test]
    fn test_signed_claim_strips_to_unsigned_encoding() {
        let keypair = test_keypair(0x42);
        let unsigned = stream_claim(&StreamParams::default());
        let signed = sign_stream_claim(&unsigned, &keypair).unwrap();

        assert_eq!(unsigned_claim_bytes(&signed).unwrap(), unsigned.encode());
    }

    #[test]
    fn test_generated_claims_verify() {
        let keypair = test_keypair(0x42);
        let signed = sign_stream_claim(&stream_claim(&StreamParams::default()), &keypair).unwrap();
        let certificate = certificate_claim(&keypair);

        verify_stream_signature(&signed, &certificate, &keypair.certificate_id())
            .expect("generated claim should verify");
    }

    #[test]
    fn test_signing_twice_is_rejected() {
        let keypair = test_keypair(0x42);
        let signed = sign_stream_claim(&stream_claim(&StreamParams::default()), &keypair).unwrap();
        assert!(sign_stream_claim(&signed, &keypair).is_err());
    }

    #[test]
    fn test_generated_claims_roundtrip() {
        let keypair = test_keypair(0x42);
        let signed = sign_stream_claim(&stream_claim(&StreamParams::default()), &keypair).unwrap();

        let bytes = signed.encode();
        let decoded = ClaimRecord::decode(&bytes).unwrap();
        assert_eq!(decoded.encode(), bytes);
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let keypair = test_keypair(0x42);
        let signed = sign_stream_claim(&stream_claim(&StreamParams::default()), &keypair).unwrap();

        let json = serde_json::to_string(&signed).unwrap();
        let back: ClaimRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, signed);
    }
}
