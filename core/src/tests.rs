//! Behavioural tests for the wallet cryptographic core
//!
//! Tests cover:
//! - Derivation determinism
//! - Commitment hiding, binding and range boundaries
//! - Meta-address encoding/decoding
//! - Stealth unlinkability, derivability and scan consistency

#[cfg(test)]
mod derivation_tests {
    use crate::hd::{derive_path, keypair_from_mnemonic, solana_path};

    const SEED_HEX: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    #[test]
    fn test_derive_path_is_deterministic() {
        let first = derive_path("m/44'/501'/0'/0'", SEED_HEX).unwrap();
        let second = derive_path("m/44'/501'/0'/0'", SEED_HEX).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_mnemonic_same_keypair() {
        let mnemonic = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let a = keypair_from_mnemonic(mnemonic, "", &solana_path(0)).unwrap();
        let b = keypair_from_mnemonic(mnemonic, "", &solana_path(0)).unwrap();
        assert_eq!(a.pubkey(), b.pubkey());
        assert_eq!(a.secret_key_bytes(), b.secret_key_bytes());

        let other_account = keypair_from_mnemonic(mnemonic, "", &solana_path(1)).unwrap();
        assert_ne!(a.pubkey(), other_account.pubkey());

        let with_passphrase = keypair_from_mnemonic(mnemonic, "neon", &solana_path(0)).unwrap();
        assert_ne!(a.pubkey(), with_passphrase.pubkey());
    }

    #[test]
    fn test_malformed_path_segment_errors() {
        assert!(derive_path("m/44'/abc'/0'", SEED_HEX).is_err());
    }
}

#[cfg(test)]
mod commitment_tests {
    use std::collections::HashSet;

    use crate::pedersen::CommitmentEngine;

    #[test]
    fn test_commitment_hiding() {
        let engine = CommitmentEngine::default();
        let mut commitments = HashSet::new();
        let mut blindings = HashSet::new();

        for _ in 0..100 {
            let c = engine.create_commitment(1_500_000_000).unwrap();
            commitments.insert(c.commitment.clone());
            blindings.insert(c.blinding_factor.clone());
        }

        assert_eq!(commitments.len(), 100);
        assert_eq!(blindings.len(), 100);
    }

    #[test]
    fn test_commitment_binding() {
        let engine = CommitmentEngine::default();
        let balance = 2_000_000_000u64;
        let c = engine.create_commitment(balance).unwrap();

        assert!(engine.verify_commitment(&c.commitment, balance, &c.blinding_factor));
        assert!(!engine.verify_commitment(&c.commitment, balance + 1, &c.blinding_factor));

        let other = engine.create_commitment(balance).unwrap();
        assert!(!engine.verify_commitment(&c.commitment, balance, &other.blinding_factor));
    }

    #[test]
    fn test_zero_balance_commitment() {
        let engine = CommitmentEngine::default();
        let c = engine.create_commitment(0).unwrap();
        assert!(engine.verify_commitment(&c.commitment, 0, &c.blinding_factor));
        assert!(!engine.verify_commitment(&c.commitment, 1, &c.blinding_factor));
    }

    #[test]
    fn test_range_proof_boundaries() {
        let engine = CommitmentEngine::default();
        let max = 10_000_000u64;
        let c = engine.create_commitment(max).unwrap();

        assert!(engine
            .create_range_proof(max, max, &c.blinding_factor, &c.commitment)
            .is_some());
        assert!(engine
            .create_range_proof(max + 1, max, &c.blinding_factor, &c.commitment)
            .is_none());
        assert!(engine
            .create_range_proof(0, max, &c.blinding_factor, &c.commitment)
            .is_some());
    }

    #[test]
    fn test_range_proof_with_max_u64() {
        let engine = CommitmentEngine::default();
        let c = engine.create_commitment(u64::MAX).unwrap();
        let proof = engine
            .create_range_proof(u64::MAX, u64::MAX, &c.blinding_factor, &c.commitment)
            .unwrap();
        assert!(engine.verify_range_proof(&proof, u64::MAX, &c.blinding_factor));
    }
}

#[cfg(test)]
mod stealth_tests {
    use std::collections::HashSet;

    use crate::stealth::{
        derive_stealth_spending_key, generate_stealth_address, parse_stealth_meta_address,
        scan_for_stealth_payments, StealthKeys,
    };

    #[test]
    fn test_meta_address_roundtrip() {
        let keys = StealthKeys::generate().unwrap();
        let parsed = parse_stealth_meta_address(&keys.meta_address().meta_address).unwrap();

        assert_eq!(parsed.spending_public_key, keys.spending_public_key());
        assert_eq!(parsed.viewing_public_key, keys.viewing_public_key());
        assert_eq!(parsed.meta_address, keys.meta_address().meta_address);
    }

    #[test]
    fn test_meta_address_rejection() {
        assert!(parse_stealth_meta_address("xx:abc:def").is_none());
        assert!(parse_stealth_meta_address("not-valid").is_none());
    }

    #[test]
    fn test_spending_and_viewing_keys_independent() {
        let keys = StealthKeys::generate().unwrap();
        assert_ne!(keys.spending_public_key(), keys.viewing_public_key());
        assert_ne!(keys.spending_private_key(), keys.viewing_private_key());
    }

    #[test]
    fn test_stealth_unlinkability() {
        let keys = StealthKeys::generate().unwrap();
        let meta = &keys.meta_address().meta_address;

        let first = generate_stealth_address(meta).unwrap().unwrap();
        let second = generate_stealth_address(meta).unwrap().unwrap();

        assert_ne!(first.address, second.address);
        assert_ne!(first.ephemeral_public_key, second.ephemeral_public_key);
        assert_ne!(first.shared_secret_hash, second.shared_secret_hash);
    }

    #[test]
    fn test_many_addresses_all_distinct() {
        let keys = StealthKeys::generate().unwrap();
        let meta = &keys.meta_address().meta_address;

        let addresses: HashSet<_> = (0..50)
            .map(|_| generate_stealth_address(meta).unwrap().unwrap().address)
            .collect();
        assert_eq!(addresses.len(), 50);
    }

    #[test]
    fn test_stealth_derivability() {
        let keys = StealthKeys::generate().unwrap();
        let sent = generate_stealth_address(&keys.meta_address().meta_address)
            .unwrap()
            .unwrap();

        let spending_key =
            derive_stealth_spending_key(&keys, &sent.ephemeral_public_key.to_string()).unwrap();
        assert_eq!(spending_key.pubkey().to_string(), sent.address.to_string());
    }

    #[test]
    fn test_scan_consistency() {
        let keys = StealthKeys::generate().unwrap();
        let sent = generate_stealth_address(&keys.meta_address().meta_address)
            .unwrap()
            .unwrap();

        let payments = scan_for_stealth_payments(&keys, &[sent.ephemeral_public_key.to_string()]);
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].stealth_address, sent.address);
        assert_eq!(payments[0].ephemeral_public_key, sent.ephemeral_public_key);
        assert!(payments[0].amount.is_none());
    }

    #[test]
    fn test_scan_skips_invalid_ephemeral_keys() {
        let keys = StealthKeys::generate().unwrap();
        let sent = generate_stealth_address(&keys.meta_address().meta_address)
            .unwrap()
            .unwrap();

        let candidates = vec![
            "not-base58-0OIl".to_string(),
            sent.ephemeral_public_key.to_string(),
            bs58::encode([1u8; 8]).into_string(),
        ];
        let payments = scan_for_stealth_payments(&keys, &candidates);
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].stealth_address, sent.address);
    }

    #[test]
    fn test_derive_spending_key_invalid_input() {
        let keys = StealthKeys::generate().unwrap();
        assert!(derive_stealth_spending_key(&keys, "garbage!").is_none());
    }

    #[test]
    fn test_wrong_receiver_derives_different_address() {
        let alice = StealthKeys::generate().unwrap();
        let mallory = StealthKeys::generate().unwrap();
        let sent = generate_stealth_address(&alice.meta_address().meta_address)
            .unwrap()
            .unwrap();

        let derived =
            derive_stealth_spending_key(&mallory, &sent.ephemeral_public_key.to_string()).unwrap();
        assert_ne!(derived.pubkey(), sent.address);
    }
}
