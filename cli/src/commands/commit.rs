//! Commit to a balance

use anyhow::{Context, Result};

use neonvault_core::CommitmentEngine;

use super::{format_timestamp, Output};

pub fn run(out: &Output, balance: u64) -> Result<()> {
    let engine = CommitmentEngine::default();
    let commitment = engine
        .create_commitment(balance)
        .context("Failed to create commitment")?;

    if out.is_json() {
        return out.json(&commitment);
    }

    out.heading("Balance Commitment");
    out.field("Commitment (share this)", &commitment.commitment);
    println!();
    out.field("Blinding Factor (keep secret)", &commitment.blinding_factor);
    println!();
    out.note(&format!("Created {}", format_timestamp(commitment.timestamp)));
    out.warning("Without the blinding factor this commitment can never be opened.");

    Ok(())
}
