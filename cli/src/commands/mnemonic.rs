//! Generate a recovery phrase

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;

use neonvault_core::generate_mnemonic;

use super::Output;

pub fn run(out: &Output, words: usize) -> Result<()> {
    let phrase = generate_mnemonic(words).context("Failed to generate mnemonic")?;

    if out.is_json() {
        return out.json(&json!({ "mnemonic": phrase, "words": words }));
    }

    out.heading("=== RECOVERY PHRASE - WRITE THIS DOWN! ===");
    println!("{}", "┌────────────────────────────────────────────────────────────┐".yellow());

    let list: Vec<&str> = phrase.split_whitespace().collect();
    for (i, chunk) in list.chunks(4).enumerate() {
        let line: String = chunk
            .iter()
            .enumerate()
            .map(|(j, word)| format!("{:2}. {:<12}", i * 4 + j + 1, word))
            .collect::<Vec<_>>()
            .join(" ");
        println!("│ {} │", format!("{:<58}", line).yellow());
    }

    println!("{}", "└────────────────────────────────────────────────────────────┘".yellow());
    println!();
    println!("{}", "CRITICAL: Store this phrase securely OFFLINE!".red().bold());
    out.warning("Anyone with this phrase can recover your keys.");

    Ok(())
}
