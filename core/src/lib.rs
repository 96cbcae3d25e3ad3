//! NeonVault wallet cryptographic core
//!
//! Pure functions over keys, seeds and balances used by the wallet front end:
//!
//! - [`hd`]: SLIP-0010 Ed25519 derivation from a BIP-39 seed
//! - [`pedersen`]: balance commitments with range / equality proofs
//! - [`stealth`]: stealth meta-addresses, one-time addresses, scanning
//! - [`arith`]: modular arithmetic behind the commitments
//! - [`keys`]: Ed25519 keypair and base58 public key types
//!
//! Nothing here performs I/O or holds shared state; every call that needs
//! randomness draws it from the OS CSPRNG.

pub mod arith;
pub mod error;
pub mod hd;
pub mod keys;
pub mod pedersen;
pub mod stealth;

#[cfg(test)]
mod tests;

#[cfg(test)]
mod test_vectors;



pub use error::{CryptoError, Result};
pub use hd::{
    derive_keypair, derive_path, derive_path_bytes, generate_mnemonic, keypair_from_mnemonic,
    mnemonic_to_seed, solana_path, DerivationPath, PathSegment,
};
pub use keys::{verify_signature, Keypair, Pubkey, SecretSeed};
pub use pedersen::{
    CommitmentEngine, CommitmentParams, EqualityOpening, EqualityProof, PedersenCommitment,
    RangeProof,
};
pub use stealth::{
    check_stealth_payment, derive_stealth_spending_key, format_meta_address,
    generate_stealth_address, parse_stealth_meta_address, scan_announcements,
    scan_for_stealth_payments, Announcement, StealthAddress, StealthKeys, StealthKeysRecord,
    StealthMetaAddress, StealthPayment,
};

use sha2::{Digest, Sha256};

/// SHA-256 over the concatenation of `parts`
pub(crate) fn sha256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Current Unix time in milliseconds
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
