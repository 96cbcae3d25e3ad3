//! Stealth address commands: keygen, address, scan, spend-key

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;

use neonvault_core::{
    derive_stealth_spending_key, generate_mnemonic, generate_stealth_address, scan_announcements,
    scan_for_stealth_payments, Announcement, StealthKeys, StealthPayment,
};

use super::{format_timestamp, Output};

#[derive(Subcommand)]
pub enum StealthCommand {
    /// Create stealth keys (from a new or existing recovery phrase)
    Keygen {
        /// Derive from this recovery phrase instead of a new one
        #[arg(short, long)]
        mnemonic: Option<String>,

        /// Optional BIP-39 passphrase
        #[arg(long, default_value = "")]
        passphrase: String,

        /// Account index
        #[arg(short, long, default_value_t = 0)]
        account: u32,

        /// Random keys with no recovery phrase
        #[arg(long, conflicts_with = "mnemonic")]
        random: bool,
    },

    /// Derive a one-time address for a recipient's meta-address
    Address {
        /// Recipient meta-address (st:<spending>:<viewing>)
        meta_address: String,
    },

    /// Find payments addressed to you
    Scan {
        #[command(flatten)]
        keys: KeySource,

        /// JSON file holding an array of announcements
        #[arg(long, conflicts_with = "ephemeral")]
        announcements: Option<PathBuf>,

        /// Ephemeral public keys to derive addresses for
        #[arg(long, num_args = 1..)]
        ephemeral: Vec<String>,
    },

    /// Recover the keypair that controls a stealth address
    SpendKey {
        #[command(flatten)]
        keys: KeySource,

        /// Ephemeral public key published with the payment
        #[arg(long)]
        ephemeral: String,
    },
}

/// Where the receiver's stealth keys come from
#[derive(Args)]
pub struct KeySource {
    /// Recovery phrase the stealth keys were derived from
    #[arg(long, conflicts_with_all = ["spending_key", "viewing_key"])]
    mnemonic: Option<String>,

    /// BIP-39 passphrase
    #[arg(long, default_value = "")]
    passphrase: String,

    /// Account index
    #[arg(long, default_value_t = 0)]
    account: u32,

    /// Spending private key (hex)
    #[arg(long, requires = "viewing_key")]
    spending_key: Option<String>,

    /// Viewing private key (hex)
    #[arg(long, requires = "spending_key")]
    viewing_key: Option<String>,
}

impl KeySource {
    fn load(&self) -> Result<StealthKeys> {
        match (&self.mnemonic, &self.spending_key, &self.viewing_key) {
            (Some(phrase), _, _) => StealthKeys::from_mnemonic(phrase, &self.passphrase, self.account)
                .context("Failed to derive stealth keys from recovery phrase"),
            (None, Some(spending), Some(viewing)) => StealthKeys::from_hex_secrets(spending, viewing)
                .context("Invalid stealth private keys"),
            _ => bail!("Provide --mnemonic, or both --spending-key and --viewing-key"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpendKeyResult {
    stealth_address: String,
    private_key: String,
    /// Solana keypair-file layout
    secret_key: Vec<u8>,
}

pub fn run(out: &Output, command: StealthCommand) -> Result<()> {
    match command {
        StealthCommand::Keygen { mnemonic, passphrase, account, random } => {
            keygen(out, mnemonic, &passphrase, account, random)
        }
        StealthCommand::Address { meta_address } => address(out, &meta_address),
        StealthCommand::Scan { keys, announcements, ephemeral } => {
            scan(out, &keys, announcements, &ephemeral)
        }
        StealthCommand::SpendKey { keys, ephemeral } => spend_key(out, &keys, &ephemeral),
    }
}

fn keygen(
    out: &Output,
    mnemonic: Option<String>,
    passphrase: &str,
    account: u32,
    random: bool,
) -> Result<()> {
    let (keys, phrase) = if random {
        (StealthKeys::generate().context("Failed to generate stealth keys")?, None)
    } else {
        let phrase = match mnemonic {
            Some(phrase) => phrase,
            None => generate_mnemonic(24).context("Failed to generate mnemonic")?,
        };
        let keys = StealthKeys::from_mnemonic(&phrase, passphrase, account)
            .context("Failed to derive stealth keys from recovery phrase")?;
        (keys, Some(phrase))
    };

    if out.is_json() {
        let mut value = serde_json::to_value(&keys.to_record())?;
        if let Some(phrase) = &phrase {
            value["mnemonic"] = serde_json::Value::String(phrase.clone());
        }
        return out.json(&value);
    }

    out.heading("=== NeonVault Stealth Keys ===");
    if let Some(phrase) = &phrase {
        out.field(&format!("Recovery Phrase (account {})", account), phrase);
        out.warning("Store this phrase securely OFFLINE. It restores both keys.");
        println!();
    } else {
        out.warning("Random keys: there is no recovery phrase. Back up the private keys below.");
        println!();
    }

    out.field("Spending Public Key", keys.spending_public_key());
    out.field("Viewing Public Key", keys.viewing_public_key());
    println!();
    out.field("Meta-Address (share this to receive payments)", &keys.meta_address().meta_address);
    println!();
    out.field("Spending Private Key", keys.spending_private_key());
    out.field("Viewing Private Key", keys.viewing_private_key());
    println!();
    println!("{}", "WARNING: Either private key is enough to spend received funds.".red().bold());

    Ok(())
}

fn address(out: &Output, meta_address: &str) -> Result<()> {
    let Some(stealth) = generate_stealth_address(meta_address)
        .context("Failed to generate ephemeral key")?
    else {
        bail!("Invalid meta-address: expected st:<spending>:<viewing>");
    };

    if out.is_json() {
        return out.json(&stealth);
    }

    out.heading("One-Time Stealth Address");
    out.field("Pay To", stealth.address);
    out.field("Ephemeral Public Key (publish with the payment)", stealth.ephemeral_public_key);
    out.field("Shared Secret Hash", &stealth.shared_secret_hash);
    println!();
    out.note(&format!("Created {}", format_timestamp(stealth.timestamp)));

    Ok(())
}

fn scan(
    out: &Output,
    source: &KeySource,
    announcements: Option<PathBuf>,
    ephemeral: &[String],
) -> Result<()> {
    let keys = source.load()?;

    let payments: Vec<StealthPayment> = match announcements {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let announcements: Vec<Announcement> =
                serde_json::from_str(&json).context("Failed to parse announcements")?;
            scan_announcements(&keys, &announcements)
        }
        None if ephemeral.is_empty() => bail!("Provide --announcements or --ephemeral"),
        None => scan_for_stealth_payments(&keys, ephemeral),
    };

    if out.is_json() {
        return out.json(&payments);
    }

    if payments.is_empty() {
        println!("{}", "No payments found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} payment(s):", payments.len()).green().bold());
    for (i, payment) in payments.iter().enumerate() {
        println!();
        println!("{}", format!("Payment #{}", i + 1).cyan());
        println!("  Address:   {}", payment.stealth_address);
        println!("  Ephemeral: {}", payment.ephemeral_public_key);
        if let Some(amount) = payment.amount {
            println!("  Amount:    {} lamports", amount);
        }
        if let Some(signature) = &payment.signature {
            println!("  Tx:        {}", signature);
        }
    }

    Ok(())
}

fn spend_key(out: &Output, source: &KeySource, ephemeral: &str) -> Result<()> {
    let keys = source.load()?;
    let Some(keypair) = derive_stealth_spending_key(&keys, ephemeral) else {
        bail!("Invalid ephemeral public key: {}", ephemeral);
    };

    let result = SpendKeyResult {
        stealth_address: keypair.pubkey().to_string(),
        private_key: keypair.seed_hex(),
        secret_key: keypair.secret_key_bytes().to_vec(),
    };

    if out.is_json() {
        return out.json(&result);
    }

    out.heading("Stealth Spending Key");
    out.field("Stealth Address", &result.stealth_address);
    out.field("Private Key (hex)", &result.private_key);
    println!();
    out.warning("WARNING: This key controls the funds at the address above!");

    Ok(())
}
