//! # Claimkit
//!
//! The unified API for working with signed claims on the content network.
//!
//! ## Overview
//!
//! A claim is a compact, tag-length-value encoded record describing either a
//! content item (stream claim) or a publisher identity (certificate claim).
//! Stream claims may carry a signature proving they were published under a
//! certificate's identity. Claimkit provides:
//!
//! - **Codec**: lossless decode/re-encode of a claim's binary and hex forms
//! - **Canonicalization**: the claim's unsigned form, with the signature
//!   field removed from the wire — the exact payload that was signed
//! - **Verification**: secp256k1 signature checks against an externally
//!   resolved certificate
//! - **Publishing**: name derivation and collision-aware publish retry
//!
//! ## Key Concepts
//!
//! - **Claim**: loaded from bytes exactly once, immutable afterwards.
//! - **Certificate**: an identity record holding a public key; resolved
//!   externally and matched against the signature's certificate id.
//! - **Canonical unsigned form**: reproducible byte-for-byte, or every
//!   signature check built on top of it silently diverges.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use claimkit::{verify_claim_hex, Claim};
//!
//! fn example(signed_hex: &str, cert_hex: &str, cert_id_hex: &str) {
//!     // Decode and re-encode a single claim
//!     let claim = Claim::new();
//!     claim.load_from_hex(signed_hex).unwrap();
//!     assert_eq!(claim.serialized_hex().unwrap(), signed_hex);
//!
//!     // Verify its publisher signature against a resolved certificate
//!     verify_claim_hex(signed_hex, cert_hex, cert_id_hex).unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `claimkit::core` - Core primitives (Claim, ClaimRecord, verification)
//! - `claimkit::publish` - Name derivation and publish retry

pub mod error;

// Re-export component crates
pub use claimkit_core as core;
pub use claimkit_publish as publish;

// Re-export main types for convenience
pub use error::{KitError, Result};

pub use claimkit_core::{
    unsigned_claim_bytes, verify_stream_signature, Claim, ClaimId, ClaimRecord, ClaimType,
    CoreError, Keypair, KeyType, Sha256Hash, ValidationError,
};
pub use claimkit_publish::{
    claim_name_from_title, publish_with_retry, PublishError, PublishOptions, PublishedNames,
    Publisher,
};

/// Verify a hex-encoded stream claim's signature against a hex-encoded
/// certificate claim resolved under `cert_id_hex`.
pub fn verify_claim_hex(
    signed_hex: &str,
    cert_hex: &str,
    cert_id_hex: &str,
) -> Result<()> {
    let claim = Claim::new();
    claim.load_from_hex(signed_hex)?;
    let certificate = Claim::new();
    certificate.load_from_hex(cert_hex)?;

    let certificate_id = ClaimId::from_hex(cert_id_hex).map_err(CoreError::from)?;
    verify_stream_signature(claim.record()?, certificate.record()?, &certificate_id)?;
    Ok(())
}
