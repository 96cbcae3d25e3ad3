//! Simplified Pedersen commitments over a 256-bit prime field
//!
//! `C = (G^v * H^r) mod P`, published as `SHA-256(hex64(C))`.
//!
//! `G` and `H` are fixed field elements, not curve points with an unknown
//! discrete-log relation, so binding rests on nobody knowing `log_G(H)`.
//! The range and equality "proofs" are hashes over values that include
//! the blinding factors. They demonstrate the interface only: they are not
//! zero-knowledge and anyone holding a blinding factor can forge them. A
//! production build swaps in Bulletproofs / a sigma protocol behind the
//! same types.

use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroize;

use crate::arith::{mod_mul, mod_pow, parse_hex_scalar, random_below, to_hex_padded};
use crate::error::{CryptoError, Result};
use crate::{now_millis, sha256};

/// secp256k1 field prime, 2^256 - 2^32 - 977
const DEFAULT_P: &str = "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";

/// secp256k1 generator x-coordinate, used as the value base
const DEFAULT_G: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

/// secp256k1 generator y-coordinate, used as the blinding base
const DEFAULT_H: &str = "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

// ============================================================================
// Parameters
// ============================================================================

/// Public group parameters of the commitment scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentParams {
    /// Value base
    pub g: BigUint,
    /// Blinding base
    pub h: BigUint,
    /// Prime modulus
    pub p: BigUint,
}

impl CommitmentParams {
    /// Build parameters from hex strings, validating them
    pub fn from_hex(g: &str, h: &str, p: &str) -> Result<Self> {
        let parse = |name: &str, value: &str| {
            parse_hex_scalar(value)
                .ok_or_else(|| CryptoError::InvalidParams(format!("{} is not valid hex", name)))
        };
        let params = Self {
            g: parse("g", g)?,
            h: parse("h", h)?,
            p: parse("p", p)?,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        let two = BigUint::from(2u32);
        if self.p < BigUint::from(3u32) {
            return Err(CryptoError::InvalidParams("modulus must be at least 3".into()));
        }
        for (name, base) in [("g", &self.g), ("h", &self.h)] {
            if base < &two || base >= &self.p {
                return Err(CryptoError::InvalidParams(format!(
                    "{} must lie in [2, p)",
                    name
                )));
            }
        }
        if self.g == self.h {
            return Err(CryptoError::InvalidParams("g and h must differ".into()));
        }
        Ok(())
    }
}

impl Default for CommitmentParams {
    fn default() -> Self {
        let parse = |hex: &str| BigUint::parse_bytes(hex.as_bytes(), 16).unwrap_or_default();
        Self {
            g: parse(DEFAULT_G),
            h: parse(DEFAULT_H),
            p: parse(DEFAULT_P),
        }
    }
}

// ============================================================================
// Commitment Types
// ============================================================================

/// A hiding commitment to a balance together with its opening secret
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedersenCommitment {
    /// SHA-256 of the committed group element (64 hex chars)
    pub commitment: String,
    /// Secret scalar `r` (64 hex chars); the only way to open the commitment
    pub blinding_factor: String,
    /// Creation time, Unix milliseconds
    pub timestamp: i64,
}

impl Drop for PedersenCommitment {
    fn drop(&mut self) {
        self.blinding_factor.zeroize();
    }
}

impl fmt::Debug for PedersenCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PedersenCommitment")
            .field("commitment", &self.commitment)
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}

/// Placeholder proof that a committed balance lies in `[0, range_max]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeProof {
    pub commitment: String,
    pub range_min: u64,
    pub range_max: u64,
    pub proof_hash: String,
    pub timestamp: i64,
}

/// Placeholder proof that two fresh commitments hide the same value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualityProof {
    pub commitment1: String,
    pub commitment2: String,
    pub proof_hash: String,
    pub timestamp: i64,
}

/// Blinding factors opening the two sides of an [`EqualityProof`]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualityOpening {
    pub blinding_factor1: String,
    pub blinding_factor2: String,
}

impl Drop for EqualityOpening {
    fn drop(&mut self) {
        self.blinding_factor1.zeroize();
        self.blinding_factor2.zeroize();
    }
}

impl fmt::Debug for EqualityOpening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EqualityOpening(..)")
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Creates and checks commitments under one fixed parameter set
#[derive(Debug, Clone, Default)]
pub struct CommitmentEngine {
    params: CommitmentParams,
}

impl CommitmentEngine {
    pub fn new(params: CommitmentParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &CommitmentParams {
        &self.params
    }

    /// `G^value * H^blinding mod P`
    fn group_element(&self, value: &BigUint, blinding: &BigUint) -> BigUint {
        let CommitmentParams { g, h, p } = &self.params;
        mod_mul(&mod_pow(g, value, p), &mod_pow(h, blinding, p), p)
    }

    /// Public commitment string for `(value, blinding)`
    fn commitment_hash(&self, value: u64, blinding: &BigUint) -> String {
        let element = self.group_element(&BigUint::from(value), blinding);
        hex::encode(sha256(&[to_hex_padded(&element).as_bytes()]))
    }

    /// Commit to `balance` (lamports) with a fresh uniformly random blinding factor.
    ///
    /// Two calls with the same balance give unrelated commitments.
    pub fn create_commitment(&self, balance: u64) -> Result<PedersenCommitment> {
        let blinding = random_below(&self.params.p)?;
        let commitment = self.commitment_hash(balance, &blinding);
        debug!(commitment = %commitment, "created pedersen commitment");

        Ok(PedersenCommitment {
            commitment,
            blinding_factor: to_hex_padded(&blinding),
            timestamp: now_millis(),
        })
    }

    /// Open a commitment: true iff `(claimed_balance, blinding_factor)` reproduces it.
    ///
    /// Only the holder of the blinding factor can run this check.
    pub fn verify_commitment(
        &self,
        commitment: &str,
        claimed_balance: u64,
        blinding_factor: &str,
    ) -> bool {
        let Some(blinding) = parse_hex_scalar(blinding_factor) else {
            return false;
        };
        let expected = self.commitment_hash(claimed_balance, &blinding);
        hashes_match(commitment, &expected)
    }

    /// Build a range proof for `0 <= balance <= max`.
    ///
    /// Returns `None` when the balance is outside the range; that is an
    /// expected outcome, not an error.
    pub fn create_range_proof(
        &self,
        balance: u64,
        max: u64,
        blinding_factor: &str,
        commitment: &str,
    ) -> Option<RangeProof> {
        if balance > max {
            debug!(max, "balance outside requested range, no proof");
            return None;
        }

        Some(RangeProof {
            commitment: commitment.to_string(),
            range_min: 0,
            range_max: max,
            proof_hash: range_proof_hash(commitment, blinding_factor, max),
            timestamp: now_millis(),
        })
    }

    /// Check a range proof against its opening
    pub fn verify_range_proof(&self, proof: &RangeProof, balance: u64, blinding_factor: &str) -> bool {
        proof.range_min == 0
            && balance <= proof.range_max
            && self.verify_commitment(&proof.commitment, balance, blinding_factor)
            && hashes_match(
                &proof.proof_hash,
                &range_proof_hash(&proof.commitment, blinding_factor, proof.range_max),
            )
    }

    /// Commit to `balance` twice with independent blinding factors and bind
    /// the pair together.
    ///
    /// Both commitments are generated here; caller-held commitments cannot be
    /// proven equal through this interface.
    pub fn create_equality_proof(&self, balance: u64) -> Result<(EqualityProof, EqualityOpening)> {
        let first = self.create_commitment(balance)?;
        let second = self.create_commitment(balance)?;

        let proof = EqualityProof {
            commitment1: first.commitment.clone(),
            commitment2: second.commitment.clone(),
            proof_hash: equality_proof_hash(
                &first.commitment,
                &second.commitment,
                &first.blinding_factor,
                &second.blinding_factor,
            ),
            timestamp: now_millis(),
        };
        let opening = EqualityOpening {
            blinding_factor1: first.blinding_factor.clone(),
            blinding_factor2: second.blinding_factor.clone(),
        };
        Ok((proof, opening))
    }

    /// Check that both sides of an equality proof open to `balance`
    pub fn verify_equality_proof(
        &self,
        proof: &EqualityProof,
        opening: &EqualityOpening,
        balance: u64,
    ) -> bool {
        self.verify_commitment(&proof.commitment1, balance, &opening.blinding_factor1)
            && self.verify_commitment(&proof.commitment2, balance, &opening.blinding_factor2)
            && hashes_match(
                &proof.proof_hash,
                &equality_proof_hash(
                    &proof.commitment1,
                    &proof.commitment2,
                    &opening.blinding_factor1,
                    &opening.blinding_factor2,
                ),
            )
    }
}

/// Constant-time comparison of hex digests, case-insensitive on `supplied`
fn hashes_match(supplied: &str, expected: &str) -> bool {
    let supplied = supplied.to_ascii_lowercase();
    bool::from(supplied.as_bytes().ct_eq(expected.as_bytes()))
}

/// `SHA-256("<commitment>:<blinding>:range:0:<max>:valid")`
fn range_proof_hash(commitment: &str, blinding_factor: &str, max: u64) -> String {
    let preimage = format!("{}:{}:range:0:{}:valid", commitment, blinding_factor, max);
    hex::encode(sha256(&[preimage.as_bytes()]))
}

/// `SHA-256("<c1>:<c2>:<r1>:<r2>:equality:valid")`
fn equality_proof_hash(c1: &str, c2: &str, r1: &str, r2: &str) -> String {
    let preimage = format!("{}:{}:{}:{}:equality:valid", c1, c2, r1, r2);
    hex::encode(sha256(&[preimage.as_bytes()]))
}
