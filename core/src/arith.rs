//! Big-integer modular arithmetic used by the commitment engine

use num_bigint::BigUint;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};

/// Width of a zero-padded 256-bit value in hex characters
pub const SCALAR_HEX_LEN: usize = 64;

/// `base^exp mod modulus` by square-and-multiply.
///
/// The modulus must be non-zero; `CommitmentParams::validate` guarantees
/// that for every modulus reaching this function.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

/// `(a * b) mod modulus`
pub fn mod_mul(a: &BigUint, b: &BigUint, modulus: &BigUint) -> BigUint {
    (a * b) % modulus
}

/// Draw a scalar uniformly from `[0, bound)` using the OS CSPRNG.
///
/// Uses rejection sampling over `bits(bound)` random bits, so the result is
/// unbiased. An RNG failure is returned as an error, never papered over.
pub fn random_below(bound: &BigUint) -> Result<BigUint> {
    let bits = bound.bits();
    if bits == 0 {
        return Err(CryptoError::InvalidParams("sampling bound is zero".into()));
    }

    let len = ((bits + 7) / 8) as usize;
    let mask = 0xffu8 >> ((len as u64) * 8 - bits);
    let mut buf = vec![0u8; len];

    loop {
        OsRng.try_fill_bytes(&mut buf)?;
        buf[0] &= mask;
        let candidate = BigUint::from_bytes_be(&buf);
        // Zero the contents only; Vec::zeroize would also truncate to length 0
        buf.as_mut_slice().zeroize();
        if &candidate < bound {
            return Ok(candidate);
        }
    }
}

/// Lowercase hex, left-padded with zeros to 64 characters
pub fn to_hex_padded(value: &BigUint) -> String {
    format!("{:0>width$}", value.to_str_radix(16), width = SCALAR_HEX_LEN)
}

/// Parse a hex scalar (any case, optional leading zeros).
///
/// Returns `None` for empty input or any non-hex character.
pub fn parse_hex_scalar(input: &str) -> Option<BigUint> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    BigUint::parse_bytes(input.as_bytes(), 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_pow_small_values() {
        let p = BigUint::from(23u32);
        assert_eq!(mod_pow(&BigUint::from(5u32), &BigUint::from(3u32), &p), BigUint::from(10u32));
        // Fermat: a^(p-1) = 1 mod p
        assert_eq!(mod_pow(&BigUint::from(7u32), &BigUint::from(22u32), &p), BigUint::from(1u32));
        // x^0 = 1
        assert_eq!(mod_pow(&BigUint::from(9u32), &BigUint::from(0u32), &p), BigUint::from(1u32));
    }

    #[test]
    fn test_mod_mul_reduces() {
        let p = BigUint::from(17u32);
        assert_eq!(mod_mul(&BigUint::from(16u32), &BigUint::from(16u32), &p), BigUint::from(1u32));
    }

    #[test]
    fn test_random_below_stays_in_range() {
        let bound = BigUint::from(1000u32);
        for _ in 0..200 {
            let r = random_below(&bound).unwrap();
            assert!(r < bound);
        }
    }

    #[test]
    fn test_random_below_survives_rejections() {
        // 17 needs 5 bits, so almost half of all draws are rejected
        let bound = BigUint::from(17u32);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            let r = random_below(&bound).unwrap();
            assert!(r < bound);
            seen.insert(r);
        }
        assert!(seen.len() > 10);
    }

    #[test]
    fn test_random_below_rejects_zero_bound() {
        assert!(random_below(&BigUint::from(0u32)).is_err());
    }

    #[test]
    fn test_hex_padding() {
        let hex = to_hex_padded(&BigUint::from(0xabcu32));
        assert_eq!(hex.len(), SCALAR_HEX_LEN);
        assert!(hex.starts_with("000"));
        assert!(hex.ends_with("abc"));
        assert_eq!(to_hex_padded(&BigUint::from(0u32)), "0".repeat(64));
    }

    #[test]
    fn test_parse_hex_scalar() {
        assert_eq!(parse_hex_scalar("00ff"), Some(BigUint::from(255u32)));
        assert_eq!(parse_hex_scalar("FF"), Some(BigUint::from(255u32)));
        assert_eq!(parse_hex_scalar(""), None);
        assert_eq!(parse_hex_scalar("xyz"), None);
        assert_eq!(parse_hex_scalar("+1"), None);
    }
}
