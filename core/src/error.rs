//! Error types for the wallet cryptographic core

/// Errors raised by derivation, commitment and stealth operations.
///
/// Parsing helpers that treat malformed input as an expected outcome
/// (meta-addresses, out-of-range proofs) return `Option` instead.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// The derivation path string could not be parsed.
    #[error("invalid derivation path '{path}': {reason}")]
    InvalidDerivationPath { path: String, reason: String },

    /// The master seed does not have the BIP-39 length.
    #[error("invalid seed length: expected {expected} bytes, got {actual}")]
    InvalidSeedLength { expected: usize, actual: usize },

    /// A hex string could not be decoded.
    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),

    /// The BIP-39 mnemonic phrase was rejected.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// A public key is not valid base58 or not a usable curve point.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Secret key material could not be turned into a signing key.
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// Commitment parameters are unusable.
    #[error("invalid commitment parameters: {0}")]
    InvalidParams(String),

    /// The OS random number generator failed.
    #[error("secure randomness unavailable: {0}")]
    Randomness(String),
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, CryptoError>;

impl From<hex::FromHexError> for CryptoError {
    fn from(e: hex::FromHexError) -> Self {
        CryptoError::InvalidHex(e.to_string())
    }
}

impl From<rand::Error> for CryptoError {
    fn from(e: rand::Error) -> Self {
        CryptoError::Randomness(e.to_string())
    }
}
