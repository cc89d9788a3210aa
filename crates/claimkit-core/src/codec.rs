//! Schema-aware claim transcoding.
//!
//! Decoding walks the tag-length-value fields of each message and lifts them
//! into the typed model; encoding is the exact inverse. Two rules make the
//! round-trip byte-exact:
//!
//! - Field numbers must be non-decreasing within a message. Standard encoders
//!   always emit fields in schema order, so a claim that violates this was
//!   not produced by a compliant encoder and is rejected as malformed. A
//!   repeated occurrence of a singular field is rejected for the same reason.
//! - Unknown fields are retained raw and re-emitted merged into schema order,
//!   which under the ordering rule reproduces their original position.

use bytes::Bytes;

use crate::error::CoreError;
use crate::record::{
    CertificateClaim, ClaimRecord, ClaimType, Currency, Fee, KeyType, Metadata,
    PublisherSignature, Source, SourceType, StreamClaim,
};
use crate::types::ClaimId;
use crate::wire::{
    put_bytes_field, put_fixed32_field, put_raw_field, put_varint_field, RawField, WireReader,
    WireValue,
};

/// Field numbers, per message.
mod field {
    pub mod claim {
        pub const VERSION: u64 = 1;
        pub const CLAIM_TYPE: u64 = 2;
        pub const STREAM: u64 = 3;
        pub const CERTIFICATE: u64 = 4;
        pub const PUBLISHER_SIGNATURE: u64 = 5;
    }
    pub mod stream {
        pub const VERSION: u64 = 1;
        pub const METADATA: u64 = 2;
        pub const SOURCE: u64 = 3;
    }
    pub mod metadata {
        pub const VERSION: u64 = 1;
        pub const LANGUAGE: u64 = 2;
        pub const TITLE: u64 = 3;
        pub const DESCRIPTION: u64 = 4;
        pub const AUTHOR: u64 = 5;
        pub const LICENSE: u64 = 6;
        pub const NSFW: u64 = 7;
        pub const FEE: u64 = 8;
        pub const THUMBNAIL: u64 = 9;
        pub const PREVIEW: u64 = 10;
        pub const LICENSE_URL: u64 = 11;
    }
    pub mod fee {
        pub const VERSION: u64 = 1;
        pub const CURRENCY: u64 = 2;
        pub const ADDRESS: u64 = 3;
        pub const AMOUNT: u64 = 4;
    }
    pub mod source {
        pub const VERSION: u64 = 1;
        pub const SOURCE_TYPE: u64 = 2;
        pub const SOURCE: u64 = 3;
        pub const CONTENT_TYPE: u64 = 4;
    }
    pub mod certificate {
        pub const VERSION: u64 = 1;
        pub const KEY_TYPE: u64 = 2;
        // field 3 is unassigned in the wire schema
        pub const PUBLIC_KEY: u64 = 4;
    }
    pub mod signature {
        pub const VERSION: u64 = 1;
        pub const SIGNATURE_TYPE: u64 = 2;
        pub const SIGNATURE: u64 = 3;
        pub const CERTIFICATE_ID: u64 = 4;
    }
}

/// Field iterator that enforces the non-decreasing ordering rule.
struct MessageReader<'a> {
    reader: WireReader<'a>,
    last: u64,
}

impl<'a> MessageReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            reader: WireReader::new(bytes),
            last: 0,
        }
    }

    fn next(&mut self) -> Result<Option<RawField>, CoreError> {
        if self.reader.is_at_end() {
            return Ok(None);
        }
        let field = self.reader.read_field()?;
        if field.number < self.last {
            return Err(CoreError::Malformed(format!(
                "field {} out of order",
                field.number
            )));
        }
        self.last = field.number;
        Ok(Some(field))
    }
}

fn expect_varint(field: &RawField, what: &str) -> Result<u64, CoreError> {
    match field.value {
        WireValue::Varint(v) => Ok(v),
        _ => Err(CoreError::Malformed(format!("{what} is not a varint"))),
    }
}

fn expect_bytes(field: RawField, what: &str) -> Result<Vec<u8>, CoreError> {
    match field.value {
        WireValue::Bytes(b) => Ok(b),
        _ => Err(CoreError::Malformed(format!(
            "{what} is not length-delimited"
        ))),
    }
}

fn expect_string(field: RawField, what: &str) -> Result<String, CoreError> {
    let bytes = expect_bytes(field, what)?;
    String::from_utf8(bytes).map_err(|_| CoreError::Malformed(format!("{what} is not utf-8")))
}

fn expect_bool(field: &RawField, what: &str) -> Result<bool, CoreError> {
    match expect_varint(field, what)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(CoreError::Malformed(format!(
            "{what} is not a bool: {other}"
        ))),
    }
}

fn expect_fixed32(field: &RawField, what: &str) -> Result<u32, CoreError> {
    match field.value {
        WireValue::Fixed32(bits) => Ok(bits),
        _ => Err(CoreError::Malformed(format!("{what} is not a fixed32"))),
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, what: &str) -> Result<(), CoreError> {
    if slot.is_some() {
        return Err(CoreError::Malformed(format!("duplicate {what}")));
    }
    *slot = Some(value);
    Ok(())
}

fn require<T>(slot: Option<T>, what: &str) -> Result<T, CoreError> {
    slot.ok_or_else(|| CoreError::Malformed(format!("missing {what}")))
}

/// Decode a claim from wire bytes.
pub fn decode_claim(bytes: &[u8]) -> Result<ClaimRecord, CoreError> {
    use field::claim::*;

    let mut fields = MessageReader::new(bytes);
    let mut version = None;
    let mut claim_type = None;
    let mut stream = None;
    let mut certificate = None;
    let mut publisher_signature = None;
    let mut unknown = Vec::new();

    while let Some(f) = fields.next()? {
        match f.number {
            VERSION => set_once(&mut version, expect_varint(&f, "claim version")?, "claim version")?,
            CLAIM_TYPE => {
                let value = expect_varint(&f, "claim type")?;
                let parsed = ClaimType::from_u64(value)
                    .ok_or_else(|| CoreError::Malformed(format!("unknown claim type {value}")))?;
                set_once(&mut claim_type, parsed, "claim type")?;
            }
            STREAM => {
                let body = expect_bytes(f, "stream")?;
                set_once(&mut stream, decode_stream(&body)?, "stream")?;
            }
            CERTIFICATE => {
                let body = expect_bytes(f, "certificate")?;
                set_once(&mut certificate, decode_certificate(&body)?, "certificate")?;
            }
            PUBLISHER_SIGNATURE => {
                let body = expect_bytes(f, "publisher signature")?;
                set_once(
                    &mut publisher_signature,
                    decode_signature(&body)?,
                    "publisher signature",
                )?;
            }
            _ => unknown.push(f),
        }
    }

    let claim_type = require(claim_type, "claim type")?;
    match claim_type {
        ClaimType::Stream => {
            if stream.is_none() {
                return Err(CoreError::Malformed("stream claim without stream".into()));
            }
            if certificate.is_some() {
                return Err(CoreError::Malformed(
                    "stream claim carries a certificate".into(),
                ));
            }
        }
        ClaimType::Certificate => {
            if certificate.is_none() {
                return Err(CoreError::Malformed(
                    "certificate claim without certificate".into(),
                ));
            }
            if stream.is_some() {
                return Err(CoreError::Malformed(
                    "certificate claim carries a stream".into(),
                ));
            }
        }
        ClaimType::Unset => {
            if stream.is_some() || certificate.is_some() {
                return Err(CoreError::Malformed(
                    "unset claim carries a stream or certificate".into(),
                ));
            }
        }
    }

    Ok(ClaimRecord {
        version: require(version, "claim version")?,
        claim_type,
        stream,
        certificate,
        publisher_signature,
        raw: Bytes::copy_from_slice(bytes),
        unknown,
    })
}

fn decode_stream(bytes: &[u8]) -> Result<StreamClaim, CoreError> {
    use field::stream::*;

    let mut fields = MessageReader::new(bytes);
    let mut version = None;
    let mut metadata = None;
    let mut source = None;
    let mut unknown = Vec::new();

    while let Some(f) = fields.next()? {
        match f.number {
            VERSION => set_once(&mut version, expect_varint(&f, "stream version")?, "stream version")?,
            METADATA => {
                let body = expect_bytes(f, "metadata")?;
                set_once(&mut metadata, decode_metadata(&body)?, "metadata")?;
            }
            SOURCE => {
                let body = expect_bytes(f, "source")?;
                set_once(&mut source, decode_source(&body)?, "source")?;
            }
            _ => unknown.push(f),
        }
    }

    Ok(StreamClaim {
        version: require(version, "stream version")?,
        metadata: require(metadata, "metadata")?,
        source: require(source, "source")?,
        unknown,
    })
}

fn decode_metadata(bytes: &[u8]) -> Result<Metadata, CoreError> {
    use field::metadata::*;

    let mut fields = MessageReader::new(bytes);
    let mut version = None;
    let mut language = None;
    let mut title = None;
    let mut description = None;
    let mut author = None;
    let mut license = None;
    let mut nsfw = None;
    let mut fee = None;
    let mut thumbnail = None;
    let mut preview = None;
    let mut license_url = None;
    let mut unknown = Vec::new();

    while let Some(f) = fields.next()? {
        match f.number {
            VERSION => set_once(&mut version, expect_varint(&f, "metadata version")?, "metadata version")?,
            LANGUAGE => set_once(&mut language, expect_varint(&f, "language")?, "language")?,
            TITLE => set_once(&mut title, expect_string(f, "title")?, "title")?,
            DESCRIPTION => set_once(&mut description, expect_string(f, "description")?, "description")?,
            AUTHOR => set_once(&mut author, expect_string(f, "author")?, "author")?,
            LICENSE => set_once(&mut license, expect_string(f, "license")?, "license")?,
            NSFW => set_once(&mut nsfw, expect_bool(&f, "nsfw")?, "nsfw")?,
            FEE => {
                let body = expect_bytes(f, "fee")?;
                set_once(&mut fee, decode_fee(&body)?, "fee")?;
            }
            THUMBNAIL => set_once(&mut thumbnail, expect_string(f, "thumbnail")?, "thumbnail")?,
            PREVIEW => set_once(&mut preview, expect_string(f, "preview")?, "preview")?,
            LICENSE_URL => set_once(&mut license_url, expect_string(f, "license url")?, "license url")?,
            _ => unknown.push(f),
        }
    }

    Ok(Metadata {
        version: require(version, "metadata version")?,
        language: require(language, "language")?,
        title: require(title, "title")?,
        description: require(description, "description")?,
        author: require(author, "author")?,
        license: require(license, "license")?,
        nsfw: require(nsfw, "nsfw")?,
        fee,
        thumbnail,
        preview,
        license_url,
        unknown,
    })
}

fn decode_fee(bytes: &[u8]) -> Result<Fee, CoreError> {
    use field::fee::*;

    let mut fields = MessageReader::new(bytes);
    let mut version = None;
    let mut currency = None;
    let mut address = None;
    let mut amount = None;
    let mut unknown = Vec::new();

    while let Some(f) = fields.next()? {
        match f.number {
            VERSION => set_once(&mut version, expect_varint(&f, "fee version")?, "fee version")?,
            CURRENCY => {
                let value = expect_varint(&f, "currency")?;
                let parsed = Currency::from_u64(value)
                    .ok_or_else(|| CoreError::Malformed(format!("unknown currency {value}")))?;
                set_once(&mut currency, parsed, "currency")?;
            }
            ADDRESS => set_once(&mut address, expect_bytes(f, "fee address")?, "fee address")?,
            AMOUNT => set_once(&mut amount, expect_fixed32(&f, "fee amount")?, "fee amount")?,
            _ => unknown.push(f),
        }
    }

    Ok(Fee {
        version: require(version, "fee version")?,
        currency: require(currency, "currency")?,
        address: Bytes::from(require(address, "fee address")?),
        amount: f32::from_bits(require(amount, "fee amount")?),
        unknown,
    })
}

fn decode_source(bytes: &[u8]) -> Result<Source, CoreError> {
    use field::source::*;

    let mut fields = MessageReader::new(bytes);
    let mut version = None;
    let mut source_type = None;
    let mut source = None;
    let mut content_type = None;
    let mut unknown = Vec::new();

    while let Some(f) = fields.next()? {
        match f.number {
            VERSION => set_once(&mut version, expect_varint(&f, "source version")?, "source version")?,
            SOURCE_TYPE => {
                let value = expect_varint(&f, "source type")?;
                let parsed = SourceType::from_u64(value)
                    .ok_or_else(|| CoreError::Malformed(format!("unknown source type {value}")))?;
                set_once(&mut source_type, parsed, "source type")?;
            }
            SOURCE => set_once(&mut source, expect_bytes(f, "source hash")?, "source hash")?,
            CONTENT_TYPE => set_once(&mut content_type, expect_string(f, "content type")?, "content type")?,
            _ => unknown.push(f),
        }
    }

    Ok(Source {
        version: require(version, "source version")?,
        source_type: require(source_type, "source type")?,
        source: Bytes::from(require(source, "source hash")?),
        content_type: require(content_type, "content type")?,
        unknown,
    })
}

fn decode_certificate(bytes: &[u8]) -> Result<CertificateClaim, CoreError> {
    use field::certificate::*;

    let mut fields = MessageReader::new(bytes);
    let mut version = None;
    let mut key_type = None;
    let mut public_key = None;
    let mut unknown = Vec::new();

    while let Some(f) = fields.next()? {
        match f.number {
            VERSION => set_once(&mut version, expect_varint(&f, "certificate version")?, "certificate version")?,
            KEY_TYPE => {
                let value = expect_varint(&f, "key type")?;
                let parsed = KeyType::from_u64(value)
                    .ok_or_else(|| CoreError::Malformed(format!("unknown key type {value}")))?;
                set_once(&mut key_type, parsed, "key type")?;
            }
            PUBLIC_KEY => set_once(&mut public_key, expect_bytes(f, "public key")?, "public key")?,
            _ => unknown.push(f),
        }
    }

    Ok(CertificateClaim {
        version: require(version, "certificate version")?,
        key_type: require(key_type, "key type")?,
        public_key: Bytes::from(require(public_key, "public key")?),
        unknown,
    })
}

fn decode_signature(bytes: &[u8]) -> Result<PublisherSignature, CoreError> {
    use field::signature::*;

    let mut fields = MessageReader::new(bytes);
    let mut version = None;
    let mut signature_type = None;
    let mut signature = None;
    let mut certificate_id = None;
    let mut unknown = Vec::new();

    while let Some(f) = fields.next()? {
        match f.number {
            VERSION => set_once(&mut version, expect_varint(&f, "signature version")?, "signature version")?,
            SIGNATURE_TYPE => {
                let value = expect_varint(&f, "signature type")?;
                let parsed = KeyType::from_u64(value)
                    .ok_or_else(|| CoreError::Malformed(format!("unknown signature type {value}")))?;
                set_once(&mut signature_type, parsed, "signature type")?;
            }
            SIGNATURE => set_once(&mut signature, expect_bytes(f, "signature bytes")?, "signature bytes")?,
            CERTIFICATE_ID => {
                let body = expect_bytes(f, "certificate id")?;
                let id = ClaimId::try_from(body.as_slice())
                    .map_err(|_| CoreError::Malformed("certificate id is not 20 bytes".into()))?;
                set_once(&mut certificate_id, id, "certificate id")?;
            }
            _ => unknown.push(f),
        }
    }

    Ok(PublisherSignature {
        version: require(version, "signature version")?,
        signature_type: require(signature_type, "signature type")?,
        signature: Bytes::from(require(signature, "signature bytes")?),
        certificate_id: require(certificate_id, "certificate id")?,
        unknown,
    })
}

/// Render a message from its fields, merged into field-number order.
///
/// Rendering each field first and then stably sorting keeps unknown fields in
/// their original positions relative to the schema fields.
fn render_message(mut parts: Vec<(u64, Vec<u8>)>, unknown: &[RawField]) -> Vec<u8> {
    for f in unknown {
        let mut buf = Vec::new();
        put_raw_field(&mut buf, f);
        parts.push((f.number, buf));
    }
    parts.sort_by_key(|(number, _)| *number);
    parts.into_iter().flat_map(|(_, bytes)| bytes).collect()
}

fn varint_part(number: u64, value: u64) -> (u64, Vec<u8>) {
    let mut buf = Vec::new();
    put_varint_field(&mut buf, number, value);
    (number, buf)
}

fn bytes_part(number: u64, bytes: &[u8]) -> (u64, Vec<u8>) {
    let mut buf = Vec::new();
    put_bytes_field(&mut buf, number, bytes);
    (number, buf)
}

fn fixed32_part(number: u64, bits: u32) -> (u64, Vec<u8>) {
    let mut buf = Vec::new();
    put_fixed32_field(&mut buf, number, bits);
    (number, buf)
}

/// Encode a claim record to wire bytes.
pub fn encode_claim(record: &ClaimRecord) -> Vec<u8> {
    use field::claim::*;

    let mut parts = vec![
        varint_part(VERSION, record.version),
        varint_part(CLAIM_TYPE, record.claim_type.to_u64()),
    ];
    if let Some(stream) = &record.stream {
        parts.push(bytes_part(STREAM, &encode_stream(stream)));
    }
    if let Some(certificate) = &record.certificate {
        parts.push(bytes_part(CERTIFICATE, &encode_certificate(certificate)));
    }
    if let Some(signature) = &record.publisher_signature {
        parts.push(bytes_part(PUBLISHER_SIGNATURE, &encode_signature(signature)));
    }
    render_message(parts, &record.unknown)
}

fn encode_stream(stream: &StreamClaim) -> Vec<u8> {
    use field::stream::*;

    let parts = vec![
        varint_part(VERSION, stream.version),
        bytes_part(METADATA, &encode_metadata(&stream.metadata)),
        bytes_part(SOURCE, &encode_source(&stream.source)),
    ];
    render_message(parts, &stream.unknown)
}

fn encode_metadata(metadata: &Metadata) -> Vec<u8> {
    use field::metadata::*;

    let mut parts = vec![
        varint_part(VERSION, metadata.version),
        varint_part(LANGUAGE, metadata.language),
        bytes_part(TITLE, metadata.title.as_bytes()),
        bytes_part(DESCRIPTION, metadata.description.as_bytes()),
        bytes_part(AUTHOR, metadata.author.as_bytes()),
        bytes_part(LICENSE, metadata.license.as_bytes()),
        varint_part(NSFW, u64::from(metadata.nsfw)),
    ];
    if let Some(fee) = &metadata.fee {
        parts.push(bytes_part(FEE, &encode_fee(fee)));
    }
    if let Some(thumbnail) = &metadata.thumbnail {
        parts.push(bytes_part(THUMBNAIL, thumbnail.as_bytes()));
    }
    if let Some(preview) = &metadata.preview {
        parts.push(bytes_part(PREVIEW, preview.as_bytes()));
    }
    if let Some(license_url) = &metadata.license_url {
        parts.push(bytes_part(LICENSE_URL, license_url.as_bytes()));
    }
    render_message(parts, &metadata.unknown)
}

fn encode_fee(fee: &Fee) -> Vec<u8> {
    use field::fee::*;

    let parts = vec![
        varint_part(VERSION, fee.version),
        varint_part(CURRENCY, fee.currency.to_u64()),
        bytes_part(ADDRESS, &fee.address),
        fixed32_part(AMOUNT, fee.amount.to_bits()),
    ];
    render_message(parts, &fee.unknown)
}

fn encode_source(source: &Source) -> Vec<u8> {
    use field::source::*;

    let parts = vec![
        varint_part(VERSION, source.version),
        varint_part(SOURCE_TYPE, source.source_type.to_u64()),
        bytes_part(SOURCE, &source.source),
        bytes_part(CONTENT_TYPE, source.content_type.as_bytes()),
    ];
    render_message(parts, &source.unknown)
}

fn encode_certificate(certificate: &CertificateClaim) -> Vec<u8> {
    use field::certificate::*;

    let parts = vec![
        varint_part(VERSION, certificate.version),
        varint_part(KEY_TYPE, certificate.key_type.to_u64()),
        bytes_part(PUBLIC_KEY, &certificate.public_key),
    ];
    render_message(parts, &certificate.unknown)
}

fn encode_signature(signature: &PublisherSignature) -> Vec<u8> {
    use field::signature::*;

    let parts = vec![
        varint_part(VERSION, signature.version),
        varint_part(SIGNATURE_TYPE, signature.signature_type.to_u64()),
        bytes_part(SIGNATURE, &signature.signature),
        bytes_part(CERTIFICATE_ID, signature.certificate_id.as_bytes()),
    ];
    render_message(parts, &signature.unknown)
}
