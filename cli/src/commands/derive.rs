//! Derive a keypair from a mnemonic or raw seed

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use zeroize::Zeroize;

use neonvault_core::{derive_keypair, mnemonic_to_seed, DerivationPath, Keypair};

use super::Output;
use crate::config::CliConfig;

#[derive(Args)]
pub struct DeriveArgs {
    /// Recovery phrase
    #[arg(short, long, conflicts_with = "seed")]
    pub mnemonic: Option<String>,

    /// Optional BIP-39 passphrase
    #[arg(long, default_value = "")]
    pub passphrase: String,

    /// Raw 64-byte seed as hex
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Derivation path (default from config)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Also print the 64-byte secret key
    #[arg(long)]
    pub show_secret: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeriveResult {
    path: String,
    public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_key: Option<String>,
    /// Solana keypair-file layout
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_key: Option<Vec<u8>>,
}

pub fn run(out: &Output, cfg: &CliConfig, args: DeriveArgs) -> Result<()> {
    let path_text = args.path.as_deref().unwrap_or(&cfg.derivation_path);
    let path: DerivationPath = path_text
        .parse()
        .with_context(|| format!("Invalid derivation path: {}", path_text))?;

    let keypair = derive_from(&args, &path)?;

    let result = DeriveResult {
        path: path.to_string(),
        public_key: keypair.pubkey().to_string(),
        private_key: args.show_secret.then(|| keypair.seed_hex()),
        secret_key: args.show_secret.then(|| keypair.secret_key_bytes().to_vec()),
    };

    if out.is_json() {
        return out.json(&result);
    }

    out.heading("Derived Keypair");
    out.field("Path", &result.path);
    out.field("Public Key", &result.public_key);
    if let Some(private_key) = &result.private_key {
        println!();
        out.field("Private Key (hex)", private_key);
        out.warning("WARNING: Anyone with this key controls the account!");
    }

    Ok(())
}

fn derive_from(args: &DeriveArgs, path: &DerivationPath) -> Result<Keypair> {
    let mut seed = match (&args.mnemonic, &args.seed) {
        (Some(phrase), _) => mnemonic_to_seed(phrase, &args.passphrase)
            .context("Invalid recovery phrase")?
            .to_vec(),
        (None, Some(seed_hex)) => hex::decode(seed_hex.trim()).context("Seed is not valid hex")?,
        (None, None) => bail!("Provide either --mnemonic or --seed"),
    };

    let keypair = derive_keypair(path, &seed).context("Key derivation failed");
    seed.zeroize();
    keypair
}
