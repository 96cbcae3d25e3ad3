//! NeonVault CLI - command line front end for the wallet cryptographic core

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::*;

#[derive(Parser)]
#[command(name = "neonvault")]
#[command(author = "NeonVault Team")]
#[command(version = "0.1.0")]
#[command(about = "NeonVault wallet crypto - HD keys, balance commitments and stealth addresses")]
#[command(long_about = r#"
NeonVault derives Solana keys from a recovery phrase, commits to balances
without revealing them, and creates one-time stealth addresses.

Quick Start:
  1. neonvault mnemonic                      Generate a recovery phrase
  2. neonvault derive --mnemonic "..."       Derive your wallet key
  3. neonvault stealth keygen                Create stealth keys
  4. neonvault stealth address st:...        Pay someone privately
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to config file (default: ~/.neonvault/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new BIP-39 recovery phrase
    Mnemonic {
        /// Number of words (12 or 24)
        #[arg(short, long, default_value_t = 24)]
        words: usize,
    },

    /// Derive an Ed25519 keypair along a SLIP-0010 path
    Derive(derive::DeriveArgs),

    /// Commit to a balance (lamports)
    Commit {
        /// Balance in lamports
        balance: u64,
    },

    /// Open a commitment with its balance and blinding factor
    Verify {
        /// Commitment (64 hex chars)
        #[arg(short, long)]
        commitment: String,

        /// Claimed balance in lamports
        #[arg(short, long)]
        balance: u64,

        /// Blinding factor (hex)
        #[arg(long)]
        blinding: String,
    },

    /// Prove a committed balance lies in [0, max]
    RangeProof(range_proof::RangeProofArgs),

    /// Commit to a balance twice and prove both commitments hide it
    EqualityProof {
        /// Balance in lamports
        balance: u64,
    },

    /// Stealth address operations
    #[command(subcommand)]
    Stealth(stealth::StealthCommand),

    /// Show or initialise the config file
    Config {
        /// Write the default config file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("neonvault=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let cfg = resolve_config(&cli.command, &config_path)?;
    let out = Output::new(cli.json || cfg.json);

    match cli.command {
        Commands::Mnemonic { words } => mnemonic::run(&out, words)?,
        Commands::Derive(args) => derive::run(&out, &cfg, args)?,
        Commands::Commit { balance } => commit::run(&out, balance)?,
        Commands::Verify { commitment, balance, blinding } => {
            verify::run(&out, &commitment, balance, &blinding)?
        }
        Commands::RangeProof(args) => range_proof::run(&out, &cfg, args)?,
        Commands::EqualityProof { balance } => equality_proof::run(&out, balance)?,
        Commands::Stealth(command) => stealth::run(&out, command)?,
        Commands::Config { init, force } => config_cmd::run(&out, &config_path, &cfg, init, force)?,
    }

    Ok(())
}

/// Load the config for `command`.
///
/// `config --init` must still run when the file on disk is broken, so it
/// falls back to defaults instead of failing.
fn resolve_config(command: &Commands, path: &Path) -> Result<config::CliConfig> {
    match command {
        Commands::Config { init: true, .. } => Ok(config::load_config(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            config::CliConfig::default()
        })),
        _ => config::load_config(path),
    }
}
