//! Open a commitment

use anyhow::{bail, Result};
use colored::Colorize;
use serde_json::json;

use neonvault_core::CommitmentEngine;

use super::Output;

pub fn run(out: &Output, commitment: &str, balance: u64, blinding: &str) -> Result<()> {
    let engine = CommitmentEngine::default();
    let valid = engine.verify_commitment(commitment, balance, blinding);

    if out.is_json() {
        out.json(&json!({ "commitment": commitment, "balance": balance, "valid": valid }))?;
    } else if valid {
        println!("{}", format!("Commitment opens to {} lamports", balance).green().bold());
    }

    if !valid {
        bail!("Commitment does not open to {} lamports with this blinding factor", balance);
    }
    Ok(())
}
