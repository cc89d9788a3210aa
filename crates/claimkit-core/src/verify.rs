//! Stream claim signature verification.

use crate::canonical::unsigned_claim_bytes;
use crate::crypto::{verify_secp256k1, Sha256Hash};
use crate::error::ValidationError;
use crate::record::{ClaimRecord, KeyType};
use crate::types::ClaimId;

/// Verify that a stream claim's publisher signature was produced by the
/// private key matching a certificate's public key.
///
/// `certificate` is the externally resolved certificate claim and
/// `certificate_id` its network identifier, which must equal the identifier
/// embedded in the stream claim's signature.
///
/// Algorithm gating happens before any cryptographic work: an unsupported
/// signature or key type is rejected without touching the signature bytes.
/// The digest covers exactly the canonical unsigned claim bytes.
pub fn verify_stream_signature(
    claim: &ClaimRecord,
    certificate: &ClaimRecord,
    certificate_id: &ClaimId,
) -> Result<(), ValidationError> {
    // 1. The claim must be a signed stream claim.
    if !claim.is_stream() || claim.stream().is_none() {
        return Err(ValidationError::NotAStream);
    }
    let signature = claim.signature().ok_or(ValidationError::MissingSignature)?;

    // 2. Gate the signature algorithm.
    if signature.signature_type != KeyType::Secp256k1 {
        return Err(ValidationError::UnsupportedSignatureType(
            signature.signature_type.to_u64(),
        ));
    }

    // 3. The certificate must be a certificate claim on the same algorithm.
    let certificate_record = match certificate.certificate() {
        Some(record) if certificate.is_certificate() => record,
        _ => return Err(ValidationError::NotACertificate),
    };
    if certificate_record.key_type != signature.signature_type {
        return Err(ValidationError::UnsupportedKeyType(
            certificate_record.key_type.to_u64(),
        ));
    }

    // 4. The resolved certificate must be the one the signature names.
    if *certificate_id != signature.certificate_id {
        return Err(ValidationError::CertificateMismatch {
            expected: signature.certificate_id,
            got: *certificate_id,
        });
    }

    // 5. Verify over the canonical unsigned form.
    let canonical = unsigned_claim_bytes(claim)?;
    let digest = Sha256Hash::hash(&canonical);
    verify_secp256k1(&certificate_record.public_key, &digest, &signature.signature)
}
