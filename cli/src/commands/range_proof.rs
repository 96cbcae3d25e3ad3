//! Range proof over a committed balance

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::json;

use neonvault_core::CommitmentEngine;

use super::Output;
use crate::config::CliConfig;

#[derive(Args)]
pub struct RangeProofArgs {
    /// Balance in lamports
    pub balance: u64,

    /// Upper bound (default from config)
    #[arg(short, long)]
    pub max: Option<u64>,

    /// Existing commitment to prove over
    #[arg(short, long, requires = "blinding")]
    pub commitment: Option<String>,

    /// Blinding factor of the existing commitment
    #[arg(long, requires = "commitment")]
    pub blinding: Option<String>,
}

pub fn run(out: &Output, cfg: &CliConfig, args: RangeProofArgs) -> Result<()> {
    let engine = CommitmentEngine::default();
    let max = args.max.unwrap_or(cfg.range_max);

    let (commitment, blinding) = match (args.commitment, args.blinding) {
        (Some(commitment), Some(blinding)) => {
            if !engine.verify_commitment(&commitment, args.balance, &blinding) {
                bail!("Commitment does not open to {} lamports", args.balance);
            }
            (commitment, blinding)
        }
        _ => {
            let fresh = engine
                .create_commitment(args.balance)
                .context("Failed to create commitment")?;
            (fresh.commitment.clone(), fresh.blinding_factor.clone())
        }
    };

    let Some(proof) = engine.create_range_proof(args.balance, max, &blinding, &commitment) else {
        bail!("Balance {} is outside [0, {}]; no proof issued", args.balance, max);
    };

    if out.is_json() {
        return out.json(&json!({ "proof": proof, "blindingFactor": blinding }));
    }

    out.heading("Range Proof");
    out.field("Commitment", &proof.commitment);
    out.field("Range", format!("[{}, {}]", proof.range_min, proof.range_max));
    out.field("Proof Hash", &proof.proof_hash);
    println!();
    out.field("Blinding Factor (keep secret)", &blinding);

    Ok(())
}
