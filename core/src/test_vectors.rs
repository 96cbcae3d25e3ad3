//! Known-answer tests
//!
//! SLIP-0010 ed25519 vector 2 (the published vector with a 64-byte seed),
//! the TREZOR BIP-39 seed vectors, and the Solana address wallets derive
//! for the all-`abandon` test mnemonic.
//!
//! Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md

#[cfg(test)]
#[allow(clippy::expect_fun_call)]
mod slip0010_vectors {
    use crate::hd::{derive_path, derive_path_bytes, DerivationPath};
    use crate::keys::Keypair;

    const VECTOR2_SEED: &str = "fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aeaba8a5a29f9c999693908d8a8784817e7b7875726f6c696663605d5a5754514e4b484542";

    fn check(path: &str, expected_private: &str) {
        let derived = derive_path(path, VECTOR2_SEED).expect(&format!("derivation of {} failed", path));
        assert_eq!(hex::encode(derived), expected_private, "private key mismatch at {}", path);
    }

    #[test]
    fn test_vector2_master() {
        check("m", "171cb88b1b3c1db25add599712e36245d75bc65a1a5c9e18d76f9f2b1eab4012");
    }

    #[test]
    fn test_vector2_m_0h() {
        check("m/0'", "1559eb2bbec5790b0c65d8693e4d0875b1747f4970ae8b650486ed7470845635");
    }

    #[test]
    fn test_vector2_m_0h_2147483647h() {
        check(
            "m/0'/2147483647'",
            "ea4f5bfe8694d8bb74b7b59404632fd5968b774ed545e810de9c32a4fb4192f4",
        );
    }

    #[test]
    fn test_vector2_m_0h_2147483647h_1h() {
        check(
            "m/0'/2147483647'/1'",
            "3757c7577170179c7868353ada796c839135b3d30554bbb74a4b1e4a5a58505c",
        );
    }

    #[test]
    fn test_vector2_m_0h_2147483647h_1h_2147483646h() {
        check(
            "m/0'/2147483647'/1'/2147483646'",
            "5837736c89570de861ebc173b1086da4f505d4adb387c6a1b1342d5e4ac9ec72",
        );
    }

    #[test]
    fn test_vector2_full_path() {
        check(
            "m/0h/2147483647h/1h/2147483646h/2h",
            "551d333177df541ad876a60ea71f00447931c0a9da16f227c11ea080d7391b8d",
        );
    }

    #[test]
    fn test_vector2_public_keys() {
        let seed = hex::decode(VECTOR2_SEED).unwrap();

        let path: DerivationPath = "m/0'".parse().unwrap();
        let keypair = Keypair::from_seed(&derive_path_bytes(&path, &seed).unwrap()).unwrap();
        assert_eq!(
            hex::encode(keypair.pubkey().as_bytes()),
            "86fab68dcb57aa196c77c5f264f215a112c22a912c10d123b0d03c3c28ef1037"
        );

        let path: DerivationPath = "m/0'/2147483647'/1'/2147483646'/2'".parse().unwrap();
        let keypair = Keypair::from_seed(&derive_path_bytes(&path, &seed).unwrap()).unwrap();
        assert_eq!(
            hex::encode(keypair.pubkey().as_bytes()),
            "47150c75db263559a70d5778bf36abbab30fb061ad69f69ece61a72b0cfa4fc0"
        );
    }

    #[test]
    fn test_vector1_seed_is_too_short() {
        // Vector 1 uses a 16-byte seed; wallet seeds are always 64 bytes
        assert!(derive_path("m/0'", "000102030405060708090a0b0c0d0e0f").is_err());
    }
}

#[cfg(test)]
mod bip39_vectors {
    use crate::hd::{keypair_from_mnemonic, mnemonic_to_seed, solana_path};

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_abandon_about_seed() {
        let seed = mnemonic_to_seed(ABANDON_ABOUT, "").unwrap();
        assert_eq!(
            hex::encode(seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_trezor_24_word_seed() {
        let mnemonic = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon art";
        let seed = mnemonic_to_seed(mnemonic, "TREZOR").unwrap();
        assert_eq!(
            hex::encode(seed),
            "bda85446c68413707090a52022edd26a1c9462295029f2e60cd7c4f2bbd3097170af7a4d73245cafa9c3cca8d561a7c3de6f5d4a10be8ed2a5e608d68f92fcc8"
        );
    }

    #[test]
    fn test_solana_default_account_address() {
        let keypair = keypair_from_mnemonic(ABANDON_ABOUT, "", &solana_path(0)).unwrap();
        assert_eq!(
            keypair.seed_hex(),
            "37df573b3ac4ad5b522e064e25b63ea16bcbe79d449e81a0268d1047948bb445"
        );
        assert_eq!(
            keypair.pubkey().to_string(),
            "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk"
        );
    }
}
