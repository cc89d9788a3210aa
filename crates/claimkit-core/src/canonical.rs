//! Canonical unsigned claim bytes.
//!
//! The canonical form of a signed stream claim is its encoding with the
//! publisher signature field removed from the wire entirely — the field's
//! tag and length footprint disappear rather than being zero-filled. This is
//! the exact payload that was hashed and signed at publish time, so it must
//! be reproducible byte-for-byte: any deviation silently breaks every
//! signature check built on top of it.

use crate::error::CoreError;
use crate::record::{ClaimRecord, ClaimType};

/// Encode a stream claim with its publisher signature omitted.
///
/// All other fields, the stream metadata included, are byte-identical to the
/// claim's own encoding. Fails with [`CoreError::NotApplicable`] when the
/// claim is not a stream claim or carries no publisher signature.
pub fn unsigned_claim_bytes(record: &ClaimRecord) -> Result<Vec<u8>, CoreError> {
    if record.claim_type != ClaimType::Stream {
        return Err(CoreError::NotApplicable);
    }
    if record.publisher_signature.is_none() {
        return Err(CoreError::NotApplicable);
    }

    let mut unsigned = record.clone();
    unsigned.publisher_signature = None;
    unsigned.raw = bytes::Bytes::new();
    Ok(unsigned.encode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ClaimRecord;

    const SIGNED_HEX: &str = "080110011ad7010801128f01080410011a0c47616d65206f66206c696665221047616d65206f66206c696665206769662a0b4a6f686e20436f6e776179322e437265617469766520436f6d6d6f6e73204174747269627574696f6e20342e3020496e7465726e6174696f6e616c38004224080110011a195569c917f18bf5d2d67f1346aa467b218ba90cdbf2795676da250000803f4a0052005a001a41080110011a30b6adf6e2a62950407ea9fb045a96127b67d39088678d2f738c359894c88d95698075ee6203533d3c204330713aa7acaf2209696d6167652f6769662a5c080110031a40c73fe1be4f1743c2996102eec6ce0509e03744ab940c97d19ddb3b25596206367ab1a3d2583b16c04d2717eeb983ae8f84fee2a46621ffa5c4726b30174c6ff82214251305ca93d4dbedb50dceb282ebcb7b07b7ac65";
    const STRIPPED_HEX: &str = "080110011ad7010801128f01080410011a0c47616d65206f66206c696665221047616d65206f66206c696665206769662a0b4a6f686e20436f6e776179322e437265617469766520436f6d6d6f6e73204174747269627574696f6e20342e3020496e7465726e6174696f6e616c38004224080110011a195569c917f18bf5d2d67f1346aa467b218ba90cdbf2795676da250000803f4a0052005a001a41080110011a30b6adf6e2a62950407ea9fb045a96127b67d39088678d2f738c359894c88d95698075ee6203533d3c204330713aa7acaf2209696d6167652f676966";
    const CERT_HEX: &str = "08011002225e0801100322583056301006072a8648ce3d020106052b8104000a03420004d015365a40f3e5c03c87227168e5851f44659837bcf6a3398ae633bc37d04ee19baeb26dc888003bd728146dbea39f5344bf8c52cedaf1a3a1623a0166f4a367";

    fn decode(hex_claim: &str) -> ClaimRecord {
        ClaimRecord::decode(&hex::decode(hex_claim).unwrap()).unwrap()
    }

    #[test]
    fn test_strip_matches_published_unsigned_form() {
        let record = decode(SIGNED_HEX);
        let unsigned = unsigned_claim_bytes(&record).unwrap();
        assert_eq!(hex::encode(&unsigned), STRIPPED_HEX);
    }

    #[test]
    fn test_strip_is_deterministic() {
        let record = decode(SIGNED_HEX);
        assert_eq!(
            unsigned_claim_bytes(&record).unwrap(),
            unsigned_claim_bytes(&record).unwrap()
        );
    }

    #[test]
    fn test_stripped_form_decodes_without_signature() {
        let record = decode(SIGNED_HEX);
        let unsigned = unsigned_claim_bytes(&record).unwrap();

        let reparsed = ClaimRecord::decode(&unsigned).unwrap();
        assert!(reparsed.publisher_signature.is_none());
        assert_eq!(reparsed.stream, record.stream);
    }

    #[test]
    fn test_strip_rejects_certificate_claim() {
        let record = decode(CERT_HEX);
        assert!(matches!(
            unsigned_claim_bytes(&record),
            Err(CoreError::NotApplicable)
        ));
    }

    #[test]
    fn test_strip_rejects_unsigned_stream_claim() {
        let record = decode(STRIPPED_HEX);
        assert!(matches!(
            unsigned_claim_bytes(&record),
            Err(CoreError::NotApplicable)
        ));
    }
}
