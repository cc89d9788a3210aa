//! Strong type definitions for claimkit.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 20-byte claim identifier, referencing a specific record on the network.
///
/// Certificate claims are referenced by their ClaimId from the signature block
/// of the stream claims they endorse. The identifier is assigned at publish
/// time and is resolved externally; this crate only transports and compares it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimId(pub [u8; 20]);

impl ClaimId {
    /// Create a new ClaimId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 20 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClaimId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for ClaimId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 20]> for ClaimId {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for ClaimId {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 20] = slice.try_into()?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_hex_roundtrip() {
        let id = ClaimId::from_bytes([0x42; 20]);
        let hex = id.to_hex();
        let recovered = ClaimId::from_hex(&hex).unwrap();
        assert_eq!(id, recovered);
    }

    #[test]
    fn test_claim_id_rejects_wrong_length() {
        assert!(ClaimId::from_hex("abcd").is_err());
        assert!(ClaimId::from_hex(&"ab".repeat(21)).is_err());
    }

    #[test]
    fn test_claim_id_display() {
        let id = ClaimId::from_bytes([0xab; 20]);
        assert_eq!(format!("{}", id), "ab".repeat(20));
    }

    #[test]
    fn test_claim_id_debug() {
        let id = ClaimId::from_bytes([0xcd; 20]);
        assert!(format!("{:?}", id).starts_with("ClaimId("));
    }
}
