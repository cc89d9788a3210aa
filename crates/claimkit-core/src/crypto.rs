//! Cryptographic primitives for claimkit.
//!
//! Wraps secp256k1 ECDSA and SHA-256 with strong types. Public keys travel
//! as DER-encoded SubjectPublicKeyInfo, signatures as 64-byte compact r||s —
//! the forms certificates and publisher signatures carry on the wire.

use bytes::Bytes;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::pkcs8::{DecodePublicKey, EncodePublicKey};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::{CoreError, ValidationError};
use crate::types::ClaimId;

/// A 32-byte SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 digest of the given data.
    pub fn hash(data: &[u8]) -> Self {
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&Sha256::digest(data));
        Self(arr)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Sha256Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Sha256Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Verify a compact secp256k1 ECDSA signature over a digest.
///
/// The public key is parsed from DER SubjectPublicKeyInfo; a key on any other
/// curve fails as [`ValidationError::InvalidPublicKey`]. High-S signature
/// encodings from older signers are normalized before verification.
pub fn verify_secp256k1(
    public_key_der: &[u8],
    digest: &Sha256Hash,
    signature: &[u8],
) -> Result<(), ValidationError> {
    let key = VerifyingKey::from_public_key_der(public_key_der)
        .map_err(|_| ValidationError::InvalidPublicKey)?;
    let parsed =
        Signature::from_slice(signature).map_err(|_| ValidationError::SignatureFailed)?;
    let parsed = parsed.normalize_s().unwrap_or(parsed);
    key.verify_prehash(digest.as_bytes(), &parsed)
        .map_err(|_| ValidationError::SignatureFailed)
}

/// A secp256k1 keypair for signing claims.
///
/// Wraps k256's SigningKey.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
    public_key_der: Bytes,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        Self::wrap(SigningKey::random(&mut rand::thread_rng()))
    }

    /// Create from a 32-byte seed.
    ///
    /// Fails when the seed is not a valid scalar for the curve.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, CoreError> {
        let signing_key = SigningKey::from_slice(seed).map_err(|_| CoreError::InvalidSeed)?;
        Ok(Self::wrap(signing_key))
    }

    fn wrap(signing_key: SigningKey) -> Self {
        let der = signing_key
            .verifying_key()
            .to_public_key_der()
            .expect("SPKI encoding of a valid secp256k1 key");
        Self {
            signing_key,
            public_key_der: Bytes::from(der.as_bytes().to_vec()),
        }
    }

    /// The public key as DER SubjectPublicKeyInfo, as certificates carry it.
    pub fn public_key_der(&self) -> &Bytes {
        &self.public_key_der
    }

    /// Sign a digest, producing a compact 64-byte r||s signature.
    pub fn sign_digest(&self, digest: &Sha256Hash) -> [u8; 64] {
        let signature: Signature = self
            .signing_key
            .sign_prehash(digest.as_bytes())
            .expect("prehash signing of a 32-byte digest");
        let mut out = [0u8; 64];
        out.copy_from_slice(&signature.to_bytes());
        out
    }

    /// A deterministic certificate identifier for this key.
    ///
    /// Real identifiers are assigned by the network at publish time; this
    /// derivation (first 20 bytes of the SHA-256 of the DER key) only needs
    /// to be stable, for building self-consistent certificate records.
    pub fn certificate_id(&self) -> ClaimId {
        let digest = Sha256Hash::hash(&self.public_key_der);
        let mut id = [0u8; 20];
        id.copy_from_slice(&digest.as_bytes()[..20]);
        ClaimId(id)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.certificate_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify_roundtrip() {
        let keypair = Keypair::generate();
        let digest = Sha256Hash::hash(b"canonical claim bytes");
        let signature = keypair.sign_digest(&digest);

        verify_secp256k1(keypair.public_key_der(), &digest, &signature)
            .expect("valid signature should verify");
    }

    #[test]
    fn test_tampered_digest_fails() {
        let keypair = Keypair::generate();
        let digest = Sha256Hash::hash(b"canonical claim bytes");
        let signature = keypair.sign_digest(&digest);

        let other = Sha256Hash::hash(b"canonical claim byteS");
        assert!(matches!(
            verify_secp256k1(keypair.public_key_der(), &other, &signature),
            Err(ValidationError::SignatureFailed)
        ));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let keypair = Keypair::generate();
        let digest = Sha256Hash::hash(b"canonical claim bytes");
        let mut signature = keypair.sign_digest(&digest);
        signature[10] ^= 0x01;

        assert!(matches!(
            verify_secp256k1(keypair.public_key_der(), &digest, &signature),
            Err(ValidationError::SignatureFailed)
        ));
    }

    #[test]
    fn test_wrong_key_fails() {
        let keypair = Keypair::generate();
        let other = Keypair::generate();
        let digest = Sha256Hash::hash(b"canonical claim bytes");
        let signature = keypair.sign_digest(&digest);

        assert!(matches!(
            verify_secp256k1(other.public_key_der(), &digest, &signature),
            Err(ValidationError::SignatureFailed)
        ));
    }

    #[test]
    fn test_garbage_public_key_rejected() {
        let keypair = Keypair::generate();
        let digest = Sha256Hash::hash(b"data");
        let signature = keypair.sign_digest(&digest);

        assert!(matches!(
            verify_secp256k1(&[0xab; 88], &digest, &signature),
            Err(ValidationError::InvalidPublicKey)
        ));
    }

    #[test]
    fn test_malformed_signature_rejected() {
        let keypair = Keypair::generate();
        let digest = Sha256Hash::hash(b"data");

        assert!(matches!(
            verify_secp256k1(keypair.public_key_der(), &digest, &[0u8; 10]),
            Err(ValidationError::SignatureFailed)
        ));
    }

    #[test]
    fn test_keypair_deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let kp1 = Keypair::from_seed(&seed).unwrap();
        let kp2 = Keypair::from_seed(&seed).unwrap();
        assert_eq!(kp1.public_key_der(), kp2.public_key_der());
        assert_eq!(kp1.certificate_id(), kp2.certificate_id());
    }

    #[test]
    fn test_invalid_seed_rejected() {
        // not a valid scalar (the zero scalar)
        assert!(matches!(
            Keypair::from_seed(&[0u8; 32]),
            Err(CoreError::InvalidSeed)
        ));
    }

    #[test]
    fn test_published_certificate_key_parses() {
        // public key from a certificate claim published on the network
        let spki = hex::decode(
            "3056301006072a8648ce3d020106052b8104000a03420004d015365a40f3e5c03c87227168e5851f44659837bcf6a3398ae633bc37d04ee19baeb26dc888003bd728146dbea39f5344bf8c52cedaf1a3a1623a0166f4a367",
        )
        .unwrap();
        assert!(VerifyingKey::from_public_key_der(&spki).is_ok());
    }

    #[test]
    fn test_sha256_hash() {
        let h1 = Sha256Hash::hash(b"test data");
        let h2 = Sha256Hash::hash(b"test data");
        assert_eq!(h1, h2);
        assert_ne!(h1, Sha256Hash::hash(b"different data"));
    }
}
