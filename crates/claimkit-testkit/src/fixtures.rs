//! Golden fixtures: claims published on the network, as hex.
//!
//! Three records form the fixture set: a certificate claim, a stream claim
//! signed under it, and the signed claim's canonical unsigned form. Every
//! implementation must round-trip each of them byte-exactly and must strip
//! the signed claim to exactly the unsigned form.

use claimkit_core::{Claim, ClaimId, ClaimRecord, CoreError};

/// A certificate claim holding a secp256k1 public key.
pub const CERT_CLAIM_HEX: &str = "08011002225e0801100322583056301006072a8648ce3d020106052b8104000a03420004d015365a40f3e5c03c87227168e5851f44659837bcf6a3398ae633bc37d04ee19baeb26dc888003bd728146dbea39f5344bf8c52cedaf1a3a1623a0166f4a367";

/// A stream claim signed under [`CERT_CLAIM_HEX`]'s identity.
pub const SIGNED_CLAIM_HEX: &str = "080110011ad7010801128f01080410011a0c47616d65206f66206c696665221047616d65206f66206c696665206769662a0b4a6f686e20436f6e776179322e437265617469766520436f6d6d6f6e73204174747269627574696f6e20342e3020496e7465726e6174696f6e616c38004224080110011a195569c917f18bf5d2d67f1346aa467b218ba90cdbf2795676da250000803f4a0052005a001a41080110011a30b6adf6e2a62950407ea9fb045a96127b67d39088678d2f738c359894c88d95698075ee6203533d3c204330713aa7acaf2209696d6167652f6769662a5c080110031a40c73fe1be4f1743c2996102eec6ce0509e03744ab940c97d19ddb3b25596206367ab1a3d2583b16c04d2717eeb983ae8f84fee2a46621ffa5c4726b30174c6ff82214251305ca93d4dbedb50dceb282ebcb7b07b7ac65";

/// The canonical unsigned form of [`SIGNED_CLAIM_HEX`]: the same record with
/// its publisher signature field removed from the wire.
pub const STRIPPED_CLAIM_HEX: &str = "080110011ad7010801128f01080410011a0c47616d65206f66206c696665221047616d65206f66206c696665206769662a0b4a6f686e20436f6e776179322e437265617469766520436f6d6d6f6e73204174747269627574696f6e20342e3020496e7465726e6174696f6e616c38004224080110011a195569c917f18bf5d2d67f1346aa467b218ba90cdbf2795676da250000803f4a0052005a001a41080110011a30b6adf6e2a62950407ea9fb045a96127b67d39088678d2f738c359894c88d95698075ee6203533d3c204330713aa7acaf2209696d6167652f676966";

/// Network identifier of the certificate claim, as embedded in the signed
/// claim's signature.
pub const CERT_CLAIM_ID_HEX: &str = "251305ca93d4dbedb50dceb282ebcb7b07b7ac65";

/// Decode the certificate claim fixture.
pub fn cert_claim() -> ClaimRecord {
    decode_fixture(CERT_CLAIM_HEX)
}

/// Decode the signed stream claim fixture.
pub fn signed_claim() -> ClaimRecord {
    decode_fixture(SIGNED_CLAIM_HEX)
}

/// Decode the stripped (canonical unsigned) fixture.
pub fn stripped_claim() -> ClaimRecord {
    decode_fixture(STRIPPED_CLAIM_HEX)
}

/// The certificate claim's network identifier.
pub fn cert_claim_id() -> ClaimId {
    ClaimId::from_hex(CERT_CLAIM_ID_HEX).expect("fixture claim id is valid hex")
}

/// Load a fixture into a fresh one-shot [`Claim`].
pub fn load_claim(hex_claim: &str) -> Result<Claim, CoreError> {
    let claim = Claim::new();
    claim.load_from_hex(hex_claim)?;
    Ok(claim)
}

fn decode_fixture(hex_claim: &str) -> ClaimRecord {
    let bytes = hex::decode(hex_claim).expect("fixture is valid hex");
    ClaimRecord::decode(&bytes).expect("fixture is a valid claim")
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimkit_core::ClaimType;

    #[test]
    fn test_fixtures_decode() {
        assert_eq!(cert_claim().claim_type, ClaimType::Certificate);
        assert_eq!(signed_claim().claim_type, ClaimType::Stream);
        assert_eq!(stripped_claim().claim_type, ClaimType::Stream);
    }

    #[test]
    fn test_signed_claim_references_cert_fixture() {
        let signature = signed_claim().publisher_signature.unwrap();
        assert_eq!(signature.certificate_id, cert_claim_id());
    }

    #[test]
    fn test_load_claim_helper() {
        let claim = load_claim(CERT_CLAIM_HEX).unwrap();
        assert_eq!(claim.serialized_hex().unwrap(), CERT_CLAIM_HEX);
    }
}
