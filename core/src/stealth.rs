//! Stealth addresses: one-time receiving addresses for a published meta-address
//!
//! A receiver publishes `st:<spendingPub>:<viewingPub>`. For every payment
//! the sender draws an ephemeral keypair `(r, R)` and computes
//!
//! ```text
//! shared      = SHA-256(domain || r·V)        V = viewing public key
//! addressSeed = SHA-256(domain || shared || S) S = spending public key
//! address     = Ed25519 public key of Keypair::from_seed(addressSeed)
//! ```
//!
//! The receiver recomputes `shared` as `v·R` with the viewing secret `v`,
//! which agrees because `r·(v·G) = v·(r·G)`.
//!
//! Note: the one-time key depends on the spending *public* key only, so the
//! viewing secret alone is enough to spend. Treat the viewing key with the
//! same care as the spending key.

use std::fmt;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::error::Result;
use crate::hd::{derive_keypair, mnemonic_to_seed, solana_path_with_change};
use crate::keys::{Keypair, Pubkey, SecretSeed, KEY_LENGTH};
use crate::{now_millis, sha256};

/// Prefix of the textual meta-address
pub const META_ADDRESS_PREFIX: &str = "st";

/// Domain separator for the ECDH shared secret
const SHARED_SECRET_DOMAIN: &[u8] = b"neonvault/stealth/shared/v1";

/// Domain separator for the one-time address seed
const ADDRESS_SEED_DOMAIN: &[u8] = b"neonvault/stealth/address/v1";

/// BIP-44 change index for the spending key when derived from a mnemonic
const SPENDING_CHANGE_INDEX: u32 = 1;

/// BIP-44 change index for the viewing key when derived from a mnemonic
const VIEWING_CHANGE_INDEX: u32 = 2;

// ============================================================================
// Meta-Address
// ============================================================================

/// A receiver's publishable pair of public keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StealthMetaAddress {
    pub spending_public_key: Pubkey,
    pub viewing_public_key: Pubkey,
    /// `st:<spending>:<viewing>`, both base58
    pub meta_address: String,
    pub timestamp: i64,
}

impl StealthMetaAddress {
    pub fn new(spending_public_key: Pubkey, viewing_public_key: Pubkey) -> Self {
        Self {
            spending_public_key,
            viewing_public_key,
            meta_address: format_meta_address(&spending_public_key, &viewing_public_key),
            timestamp: now_millis(),
        }
    }
}

/// Format a meta-address for display
pub fn format_meta_address(spending: &Pubkey, viewing: &Pubkey) -> String {
    format!("{}:{}:{}", META_ADDRESS_PREFIX, spending, viewing)
}

/// Parse `st:<spending>:<viewing>`.
///
/// Returns `None` for a wrong prefix, a field count other than three, or a
/// key that is not a usable curve point.
pub fn parse_stealth_meta_address(input: &str) -> Option<StealthMetaAddress> {
    let fields: Vec<&str> = input.trim().split(':').collect();
    let [prefix, spending, viewing] = fields.as_slice() else {
        return None;
    };
    if *prefix != META_ADDRESS_PREFIX {
        return None;
    }

    let spending: Pubkey = spending.parse().ok()?;
    let viewing: Pubkey = viewing.parse().ok()?;
    if !spending.is_on_curve() || !viewing.is_on_curve() {
        return None;
    }

    Some(StealthMetaAddress::new(spending, viewing))
}

// ============================================================================
// Receiver Keys
// ============================================================================

/// Complete stealth key set for a receiver.
///
/// Losing the viewing key makes incoming payments undetectable; losing the
/// spending key makes them unspendable. Not `Clone` on purpose.
pub struct StealthKeys {
    spending: Keypair,
    viewing: Keypair,
    meta_address: StealthMetaAddress,
}

impl StealthKeys {
    /// Generate two independent random keypairs
    pub fn generate() -> Result<Self> {
        Ok(Self::from_keypairs(Keypair::generate()?, Keypair::generate()?))
    }

    /// Rebuild from the two 32-byte private seeds
    pub fn from_secrets(
        spending_secret: &[u8; KEY_LENGTH],
        viewing_secret: &[u8; KEY_LENGTH],
    ) -> Result<Self> {
        Ok(Self::from_keypairs(
            Keypair::from_seed(spending_secret)?,
            Keypair::from_seed(viewing_secret)?,
        ))
    }

    /// Rebuild from hex-encoded private seeds
    pub fn from_hex_secrets(spending_secret: &str, viewing_secret: &str) -> Result<Self> {
        let spending = SecretSeed::from_hex(spending_secret)?;
        let viewing = SecretSeed::from_hex(viewing_secret)?;
        Self::from_secrets(spending.as_bytes(), viewing.as_bytes())
    }

    /// Derive deterministic stealth keys from a BIP-39 mnemonic.
    ///
    /// Spending key: `m/44'/501'/<account>'/1'`
    /// Viewing key:  `m/44'/501'/<account>'/2'`
    pub fn from_mnemonic(phrase: &str, passphrase: &str, account: u32) -> Result<Self> {
        let mut seed = mnemonic_to_seed(phrase, passphrase)?;
        let spending = derive_keypair(&solana_path_with_change(account, SPENDING_CHANGE_INDEX), &seed);
        let viewing = derive_keypair(&solana_path_with_change(account, VIEWING_CHANGE_INDEX), &seed);
        seed.zeroize();
        Ok(Self::from_keypairs(spending?, viewing?))
    }

    fn from_keypairs(spending: Keypair, viewing: Keypair) -> Self {
        let meta_address = StealthMetaAddress::new(spending.pubkey(), viewing.pubkey());
        Self {
            spending,
            viewing,
            meta_address,
        }
    }

    pub fn meta_address(&self) -> &StealthMetaAddress {
        &self.meta_address
    }

    pub fn spending_public_key(&self) -> Pubkey {
        self.spending.pubkey()
    }

    pub fn viewing_public_key(&self) -> Pubkey {
        self.viewing.pubkey()
    }

    /// Hex-encoded spending seed.
    ///
    /// WARNING: Handle with extreme care!
    pub fn spending_private_key(&self) -> String {
        self.spending.seed_hex()
    }

    /// Hex-encoded viewing seed
    pub fn viewing_private_key(&self) -> String {
        self.viewing.seed_hex()
    }

    /// Export both private seeds (for encrypted storage by the caller)
    pub fn export_secrets(&self) -> (SecretSeed, SecretSeed) {
        (self.spending.seed(), self.viewing.seed())
    }

    /// Serializable snapshot, private halves included
    pub fn to_record(&self) -> StealthKeysRecord {
        StealthKeysRecord {
            spending_private_key: self.spending_private_key(),
            viewing_private_key: self.viewing_private_key(),
            meta_address: self.meta_address.clone(),
        }
    }
}

impl fmt::Debug for StealthKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StealthKeys")
            .field("meta_address", &self.meta_address.meta_address)
            .finish_non_exhaustive()
    }
}

/// Wire form of [`StealthKeys`]
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StealthKeysRecord {
    pub spending_private_key: String,
    pub viewing_private_key: String,
    pub meta_address: StealthMetaAddress,
}

impl Drop for StealthKeysRecord {
    fn drop(&mut self) {
        self.spending_private_key.zeroize();
        self.viewing_private_key.zeroize();
    }
}

// ============================================================================
// Sender Side
// ============================================================================

/// A one-time address derived by a sender for a single payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StealthAddress {
    pub address: Pubkey,
    /// Published with the payment so the receiver can find it
    pub ephemeral_public_key: Pubkey,
    /// `SHA-256(shared secret)`, for auditing; does not reveal the secret
    pub shared_secret_hash: String,
    pub meta_address: String,
    pub timestamp: i64,
}

/// Derive a fresh one-time address for `recipient_meta_address`.
///
/// `Ok(None)` means the meta-address did not parse. An RNG failure while
/// drawing the ephemeral key is an error.
pub fn generate_stealth_address(recipient_meta_address: &str) -> Result<Option<StealthAddress>> {
    let Some(meta) = parse_stealth_meta_address(recipient_meta_address) else {
        debug!("rejected malformed stealth meta-address");
        return Ok(None);
    };

    let ephemeral = Keypair::generate()?;
    let Some(mut shared) = shared_secret(&ephemeral, &meta.viewing_public_key) else {
        return Ok(None);
    };

    let one_time = one_time_keypair(&shared, &meta.spending_public_key);
    let shared_secret_hash = hex::encode(sha256(&[&shared]));
    shared.zeroize();
    let one_time = one_time?;

    Ok(Some(StealthAddress {
        address: one_time.pubkey(),
        ephemeral_public_key: ephemeral.pubkey(),
        shared_secret_hash,
        meta_address: meta.meta_address,
        timestamp: now_millis(),
    }))
}

// ============================================================================
// Receiver Side
// ============================================================================

/// A payment the receiver can claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StealthPayment {
    pub stealth_address: Pubkey,
    pub ephemeral_public_key: Pubkey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub timestamp: i64,
}

/// An on-chain payment announcement observed by a scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub ephemeral_public_key: Pubkey,
    pub stealth_address: Pubkey,
    #[serde(default)]
    pub amount: Option<u64>,
    /// Transaction signature that carried the payment
    #[serde(default)]
    pub signature: Option<String>,
}

/// Derive the one-time address for every ephemeral key.
///
/// Every parsable key yields a payment: without the paid address there is
/// nothing to match against. Use [`scan_announcements`] when the announced
/// address is known. Unparsable keys are skipped.
pub fn scan_for_stealth_payments<S: AsRef<str>>(
    keys: &StealthKeys,
    ephemeral_public_keys: &[S],
) -> Vec<StealthPayment> {
    ephemeral_public_keys
        .iter()
        .filter_map(|encoded| {
            let encoded = encoded.as_ref();
            let Ok(ephemeral) = encoded.parse::<Pubkey>() else {
                warn!(key = encoded, "skipping unparsable ephemeral key");
                return None;
            };
            let Some(one_time) = receiver_keypair(keys, &ephemeral) else {
                warn!(key = encoded, "skipping ephemeral key that is not a curve point");
                return None;
            };
            Some(StealthPayment {
                stealth_address: one_time.pubkey(),
                ephemeral_public_key: ephemeral,
                amount: None,
                signature: None,
                timestamp: now_millis(),
            })
        })
        .collect()
}

/// Recover the full one-time keypair so the receiver can spend.
///
/// Yields the same address as [`scan_for_stealth_payments`] for the same key.
pub fn derive_stealth_spending_key(keys: &StealthKeys, ephemeral_public_key: &str) -> Option<Keypair> {
    let ephemeral: Pubkey = ephemeral_public_key.parse().ok()?;
    receiver_keypair(keys, &ephemeral)
}

/// Check whether one announcement pays this receiver.
///
/// The derived and announced addresses are compared in constant time.
pub fn check_stealth_payment(keys: &StealthKeys, announcement: &Announcement) -> Option<StealthPayment> {
    let one_time = receiver_keypair(keys, &announcement.ephemeral_public_key)?;
    let derived = one_time.pubkey();

    if !bool::from(derived.as_bytes().ct_eq(announcement.stealth_address.as_bytes())) {
        return None;
    }

    Some(StealthPayment {
        stealth_address: derived,
        ephemeral_public_key: announcement.ephemeral_public_key,
        amount: announcement.amount,
        signature: announcement.signature.clone(),
        timestamp: now_millis(),
    })
}

/// Keep only the announcements addressed to this receiver
pub fn scan_announcements(keys: &StealthKeys, announcements: &[Announcement]) -> Vec<StealthPayment> {
    let found: Vec<StealthPayment> = announcements
        .iter()
        .filter_map(|a| check_stealth_payment(keys, a))
        .collect();
    debug!(scanned = announcements.len(), matched = found.len(), "scanned announcements");
    found
}

// ============================================================================
// Shared Derivation
// ============================================================================

/// `SHA-256(domain || compress(a·B))` for our secret `a` and their public `B`
fn shared_secret(ours: &Keypair, theirs: &Pubkey) -> Option<[u8; 32]> {
    let point = theirs.to_point()?;
    let shared_point = ours.secret_scalar() * point;
    let mut compressed = shared_point.compress().to_bytes();
    let secret = sha256(&[SHARED_SECRET_DOMAIN, &compressed]);
    compressed.zeroize();
    Some(secret)
}

/// Keypair seeded by `SHA-256(domain || shared || spending_public_key)`
fn one_time_keypair(shared: &[u8; 32], spending_public_key: &Pubkey) -> Result<Keypair> {
    let mut seed = sha256(&[ADDRESS_SEED_DOMAIN, shared, spending_public_key.as_bytes()]);
    let keypair = Keypair::from_seed(&seed);
    seed.zeroize();
    keypair
}

fn receiver_keypair(keys: &StealthKeys, ephemeral: &Pubkey) -> Option<Keypair> {
    let mut shared = shared_secret(&keys.viewing, ephemeral)?;
    let keypair = one_time_keypair(&shared, &keys.spending.pubkey()).ok();
    shared.zeroize();
    keypair
}
