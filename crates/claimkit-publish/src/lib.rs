//! # Claimkit Publish
//!
//! Publishing helpers for claimkit: claim name derivation and the
//! collision-aware publish retry loop.
//!
//! This crate sits at the boundary to a remote publishing daemon. The daemon
//! itself is behind the [`Publisher`] trait; what lives here is the glue the
//! core deliberately excludes:
//!
//! - [`claim_name_from_title`] - derive a URL-safe claim name from a title,
//!   with numbered suffixes for repeated attempts
//! - [`publish_with_retry`] - publish and retry past "name already exists"
//!   collisions, recording confirmed names in an injected [`PublishedNames`]
//!   registry
//!
//! No retry policy exists anywhere else: the collision message is the only
//! non-fatal error, and everything else propagates unchanged.

pub mod error;
pub mod memory;
pub mod naming;
pub mod publisher;

pub use error::{PublishError, Result};
pub use memory::MemoryPublisher;
pub use naming::{claim_name_from_title, MAX_NAME_LEN};
pub use publisher::{publish_with_retry, PublishOptions, PublishOutcome, PublishedNames, Publisher};
