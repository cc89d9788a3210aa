//! # Claimkit Core
//!
//! Pure primitives for claimkit: the claim wire codec, canonicalization, and
//! publisher signature verification.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over self-describing, cryptographically signable metadata
//! records ("claims") as published on the content network.
//!
//! ## Key Types
//!
//! - [`Claim`] - A one-shot container: loaded from bytes exactly once, then
//!   immutable and freely shareable
//! - [`ClaimRecord`] - The decoded record, a stream claim or a certificate
//! - [`ClaimId`] - 20-byte network identifier of a published record
//! - [`Keypair`] - secp256k1 signing key for producing publisher signatures
//!
//! ## Canonicalization
//!
//! A signed stream claim's canonical unsigned form is its encoding with the
//! publisher signature field removed from the wire. See [`canonical`].

pub mod canonical;
pub mod claim;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod record;
pub mod types;
pub mod verify;
pub mod wire;

pub use canonical::unsigned_claim_bytes;
pub use claim::Claim;
pub use crypto::{verify_secp256k1, Keypair, Sha256Hash};
pub use error::{CoreError, ValidationError};
pub use record::{
    CertificateClaim, ClaimRecord, ClaimType, Currency, Fee, KeyType, Metadata,
    PublisherSignature, Source, SourceType, StreamClaim,
};
pub use types::ClaimId;
pub use verify::verify_stream_signature;
