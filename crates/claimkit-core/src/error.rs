//! Error types for the claimkit core.

use thiserror::Error;

use crate::types::ClaimId;

/// Core errors that can occur during claim decoding, encoding, and lifecycle
/// operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("already initialized")]
    AlreadyInitialized,

    #[error("not initialized")]
    NotInitialized,

    #[error("malformed claim: {0}")]
    Malformed(String),

    #[error("claim has no signature to strip")]
    NotApplicable,

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid private key seed")]
    InvalidSeed,
}

/// Validation errors for stream claim signature verification.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("claim is not a stream claim")]
    NotAStream,

    #[error("claim is not a certificate claim")]
    NotACertificate,

    #[error("stream claim carries no publisher signature")]
    MissingSignature,

    #[error("unsupported signature type: {0}")]
    UnsupportedSignatureType(u64),

    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(u64),

    #[error("certificate mismatch: signature names {expected}, resolved certificate is {got}")]
    CertificateMismatch { expected: ClaimId, got: ClaimId },

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("signature verification failed")]
    SignatureFailed,

    #[error("core error: {0}")]
    Core(#[from] CoreError),
}
