//! Ed25519 key types shared by the derivation and stealth engines
//!
//! Public keys travel as base58 strings (Solana convention); private seeds
//! as lowercase hex. Secret material is zeroized on drop.

use std::fmt;
use std::str::FromStr;

use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
};
use ed25519_dalek::{ExpandedSecretKey, PublicKey, SecretKey, Signature, Signer, Verifier};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};

/// Length of an Ed25519 public key / private seed
pub const KEY_LENGTH: usize = 32;

// ============================================================================
// Public Key
// ============================================================================

/// A 32-byte Ed25519 public key, displayed as base58.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pubkey([u8; KEY_LENGTH]);

impl Pubkey {
    pub const fn new_from_array(bytes: [u8; KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(self) -> [u8; KEY_LENGTH] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }

    /// Decompress to a curve point usable for key agreement.
    ///
    /// Rejects encodings that are not on the curve and the eight
    /// small-order points, which would collapse any shared secret.
    pub fn to_point(&self) -> Option<EdwardsPoint> {
        let point = CompressedEdwardsY::from_slice(&self.0).decompress()?;
        if point.is_small_order() {
            return None;
        }
        Some(point)
    }

    pub fn is_on_curve(&self) -> bool {
        self.to_point().is_some()
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self)
    }
}

impl FromStr for Pubkey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| CryptoError::InvalidPublicKey(format!("bad base58: {}", e)))?;
        let array: [u8; KEY_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
            CryptoError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                KEY_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }
}

impl TryFrom<String> for Pubkey {
    type Error = CryptoError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Pubkey> for String {
    fn from(key: Pubkey) -> Self {
        key.to_string()
    }
}

// ============================================================================
// Zeroizing Seed Wrapper
// ============================================================================

/// A 32-byte private seed that zeroizes its contents on drop
#[derive(Clone)]
pub struct SecretSeed {
    bytes: [u8; KEY_LENGTH],
}

impl SecretSeed {
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parse a 64-character hex seed
    pub fn from_hex(input: &str) -> Result<Self> {
        let mut bytes = [0u8; KEY_LENGTH];
        hex::decode_to_slice(input, &mut bytes)?;
        Ok(Self { bytes })
    }

    /// Get the raw bytes (use carefully)
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl Drop for SecretSeed {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for SecretSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretSeed(..)")
    }
}

// ============================================================================
// Keypair
// ============================================================================

/// An Ed25519 signing keypair built from a 32-byte seed.
///
/// Equivalent to Solana's `Keypair::from_seed`: the secret key layout is
/// `seed || public_key`.
pub struct Keypair {
    inner: ed25519_dalek::Keypair,
}

impl Keypair {
    /// Expand a 32-byte seed into a keypair (RFC 8032 key generation)
    pub fn from_seed(seed: &[u8; KEY_LENGTH]) -> Result<Self> {
        let secret = SecretKey::from_bytes(seed)
            .map_err(|e| CryptoError::InvalidSecretKey(e.to_string()))?;
        let public = PublicKey::from(&secret);
        Ok(Self {
            inner: ed25519_dalek::Keypair { secret, public },
        })
    }

    /// Generate a fresh keypair from OS entropy
    pub fn generate() -> Result<Self> {
        let mut seed = [0u8; KEY_LENGTH];
        OsRng.try_fill_bytes(&mut seed)?;
        let keypair = Self::from_seed(&seed);
        seed.zeroize();
        keypair
    }

    /// Rebuild from a 64-byte `seed || public_key` secret key
    pub fn from_secret_key_bytes(bytes: &[u8]) -> Result<Self> {
        let inner = ed25519_dalek::Keypair::from_bytes(bytes)
            .map_err(|e| CryptoError::InvalidSecretKey(e.to_string()))?;
        // from_bytes does not check that the halves belong together
        if PublicKey::from(&inner.secret) != inner.public {
            return Err(CryptoError::InvalidSecretKey(
                "public half does not match seed".into(),
            ));
        }
        Ok(Self { inner })
    }

    pub fn pubkey(&self) -> Pubkey {
        Pubkey(self.inner.public.to_bytes())
    }

    /// The 32-byte private seed
    pub fn seed(&self) -> SecretSeed {
        SecretSeed::from_bytes(self.inner.secret.to_bytes())
    }

    pub fn seed_hex(&self) -> String {
        self.seed().to_hex()
    }

    /// 64-byte secret key in Solana layout (`seed || public_key`)
    pub fn secret_key_bytes(&self) -> [u8; 64] {
        self.inner.to_bytes()
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.inner.sign(message).to_bytes()
    }

    /// Clamped Ed25519 secret scalar, used for key agreement
    pub(crate) fn secret_scalar(&self) -> Scalar {
        let expanded = ExpandedSecretKey::from(&self.inner.secret);
        let mut bytes = expanded.to_bytes();
        let mut scalar_bytes = [0u8; 32];
        scalar_bytes.copy_from_slice(&bytes[..32]);
        let scalar = Scalar::from_bytes_mod_order(scalar_bytes);
        bytes.zeroize();
        scalar_bytes.zeroize();
        scalar
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}

/// Check an Ed25519 signature against a public key
pub fn verify_signature(pubkey: &Pubkey, message: &[u8], signature: &[u8]) -> bool {
    let Ok(public) = PublicKey::from_bytes(pubkey.as_bytes()) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };
    public.verify(message, &signature).is_ok()
}
