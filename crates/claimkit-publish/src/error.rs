//! Error types for the publish module.

use thiserror::Error;

/// Marker the daemon embeds in its error message when a name resolves to
/// multiple existing claims.
const NAME_COLLISION_MARKER: &str = "Multiple claims (";

/// Errors that can occur while publishing a claim.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The name already resolves to existing claims. Non-fatal: the caller
    /// retries under the next numbered name.
    #[error("name already claimed: {0}")]
    NameTaken(String),

    /// The daemon rejected the publish for any other reason. Fatal.
    #[error("daemon error: {0}")]
    Daemon(String),

    /// The derived claim name was empty (title had no usable characters).
    #[error("title yields an empty claim name: {0:?}")]
    EmptyName(String),
}

impl PublishError {
    /// Classify a raw daemon error message.
    ///
    /// The collision message is the only non-fatal daemon error; everything
    /// else propagates unchanged.
    pub fn from_daemon_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains(NAME_COLLISION_MARKER) {
            Self::NameTaken(message)
        } else {
            Self::Daemon(message)
        }
    }

    /// True when the error is a name collision the caller may retry past.
    pub fn is_name_taken(&self) -> bool {
        matches!(self, Self::NameTaken(_))
    }
}

/// Result type for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;
