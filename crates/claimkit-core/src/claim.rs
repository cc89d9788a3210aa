//! The one-shot claim container.
//!
//! A [`Claim`] starts empty, is loaded from bytes exactly once, and is
//! immutable afterwards. The load transition is an atomic check-and-set, so
//! concurrent loads race safely to a single winner; every read after the
//! transition is lock-free.

use std::sync::OnceLock;

use crate::canonical::unsigned_claim_bytes;
use crate::error::CoreError;
use crate::record::ClaimRecord;

/// A claim that is loaded at most once in its lifetime.
#[derive(Debug, Default)]
pub struct Claim {
    slot: OnceLock<ClaimRecord>,
}

impl Claim {
    /// Create an empty, not-yet-loaded claim.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a record has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Load the claim from a lowercase hex string.
    ///
    /// Fails with [`CoreError::AlreadyInitialized`] if the claim was already
    /// loaded — even with an identical payload — and leaves the loaded state
    /// untouched.
    pub fn load_from_hex(&self, hex_claim: &str) -> Result<(), CoreError> {
        if self.is_loaded() {
            return Err(CoreError::AlreadyInitialized);
        }
        let bytes = hex::decode(hex_claim)?;
        self.load_from_bytes(&bytes)
    }

    /// Load the claim from wire bytes.
    ///
    /// Decoding happens before the state transition, so a malformed payload
    /// never mutates the claim.
    pub fn load_from_bytes(&self, bytes: &[u8]) -> Result<(), CoreError> {
        if self.is_loaded() {
            return Err(CoreError::AlreadyInitialized);
        }
        let record = ClaimRecord::decode(bytes)?;
        self.slot
            .set(record)
            .map_err(|_| CoreError::AlreadyInitialized)
    }

    /// The loaded record.
    pub fn record(&self) -> Result<&ClaimRecord, CoreError> {
        self.slot.get().ok_or(CoreError::NotInitialized)
    }

    /// Re-encode the loaded claim to wire bytes.
    ///
    /// For a claim loaded from bytes `b`, the result equals `b`.
    pub fn serialized_bytes(&self) -> Result<Vec<u8>, CoreError> {
        Ok(self.record()?.encode())
    }

    /// Re-encode the loaded claim to a lowercase hex string.
    pub fn serialized_hex(&self) -> Result<String, CoreError> {
        Ok(hex::encode(self.serialized_bytes()?))
    }

    /// The canonical unsigned form: the claim's encoding with the publisher
    /// signature field removed from the wire.
    pub fn serialized_no_signature(&self) -> Result<Vec<u8>, CoreError> {
        unsigned_claim_bytes(self.record()?)
    }
}
