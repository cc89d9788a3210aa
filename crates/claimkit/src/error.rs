//! Error types for the unified claimkit API.

use claimkit_core::{CoreError, ValidationError};
use claimkit_publish::PublishError;
use thiserror::Error;

/// Errors that can occur during claimkit operations.
#[derive(Debug, Error)]
pub enum KitError {
    /// Claim decoding, encoding, or lifecycle error.
    #[error("claim error: {0}")]
    Core(#[from] CoreError),

    /// Signature validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Publishing error.
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),
}

/// Result type for claimkit operations.
pub type Result<T> = std::result::Result<T, KitError>;
