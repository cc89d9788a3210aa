//! # Claimkit Testkit
//!
//! Testing utilities for claimkit.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: claims published on the network, as literal hex vectors,
//!   with decoded-record helpers
//! - **Generators**: deterministic stream/certificate builders and a signer
//!   that attaches real secp256k1 signatures over canonical unsigned bytes
//!
//! ## Fixtures
//!
//! ```rust
//! use claimkit_testkit::fixtures::{signed_claim, stripped_claim};
//! use claimkit_core::unsigned_claim_bytes;
//!
//! let signed = signed_claim();
//! assert_eq!(
//!     unsigned_claim_bytes(&signed).unwrap(),
//!     stripped_claim().encode(),
//! );
//! ```
//!
//! ## Generators
//!
//! ```rust
//! use claimkit_testkit::generators::{
//!     certificate_claim, sign_stream_claim, stream_claim, test_keypair, StreamParams,
//! };
//! use claimkit_core::verify_stream_signature;
//!
//! let keypair = test_keypair(0x42);
//! let signed = sign_stream_claim(&stream_claim(&StreamParams::default()), &keypair).unwrap();
//! let certificate = certificate_claim(&keypair);
//! verify_stream_signature(&signed, &certificate, &keypair.certificate_id()).unwrap();
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    cert_claim, cert_claim_id, load_claim, signed_claim, stripped_claim, CERT_CLAIM_HEX,
    CERT_CLAIM_ID_HEX, SIGNED_CLAIM_HEX, STRIPPED_CLAIM_HEX,
};
pub use generators::{
    certificate_claim, sign_stream_claim, stream_claim, test_keypair, StreamParams,
};
