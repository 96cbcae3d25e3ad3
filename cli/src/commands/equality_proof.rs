//! Equality proof over two fresh commitments

use anyhow::{Context, Result};
use serde_json::json;

use neonvault_core::CommitmentEngine;

use super::Output;

pub fn run(out: &Output, balance: u64) -> Result<()> {
    let engine = CommitmentEngine::default();
    let (proof, opening) = engine
        .create_equality_proof(balance)
        .context("Failed to create equality proof")?;

    if out.is_json() {
        return out.json(&json!({ "proof": proof, "opening": opening }));
    }

    out.heading("Equality Proof");
    out.field("Commitment 1", &proof.commitment1);
    out.field("Commitment 2", &proof.commitment2);
    out.field("Proof Hash", &proof.proof_hash);
    println!();
    out.field("Blinding Factor 1 (keep secret)", &opening.blinding_factor1);
    out.field("Blinding Factor 2 (keep secret)", &opening.blinding_factor2);

    Ok(())
}
