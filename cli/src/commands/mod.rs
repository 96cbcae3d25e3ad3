//! Subcommand implementations

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

pub mod commit;
pub mod config_cmd;
pub mod derive;
pub mod equality_proof;
pub mod mnemonic;
pub mod range_proof;
pub mod stealth;
pub mod verify;

/// Where command results go: formatted text or one JSON document
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print `value` as pretty JSON
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Section heading in text mode
    pub fn heading(&self, title: &str) {
        println!();
        println!("{}", title.yellow().bold());
        println!();
    }

    /// `Label:` followed by an indented value
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!("{}:", label.yellow());
        println!("  {}", value);
    }

    pub fn note(&self, text: &str) {
        println!("{}", text.dimmed());
    }

    pub fn warning(&self, text: &str) {
        println!("{}", text.red());
    }
}

/// Render a Unix-millisecond timestamp for humans
pub fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}
