//! Show or write the config file

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use super::Output;
use crate::config::{save_config, CliConfig};

pub fn run(out: &Output, path: &Path, current: &CliConfig, init: bool, force: bool) -> Result<()> {
    if init {
        save_config(path, &CliConfig::default(), force)?;
        if out.is_json() {
            return out.json(&json!({ "path": path.display().to_string(), "config": CliConfig::default() }));
        }
        println!("{}", format!("Config written to {}", path.display()).green());
        return Ok(());
    }

    if out.is_json() {
        return out.json(&json!({ "path": path.display().to_string(), "exists": path.exists(), "config": current }));
    }

    out.heading("NeonVault Configuration");
    out.field("Config File", path.display());
    if !path.exists() {
        out.note("  (not found, using defaults; run `neonvault config --init`)");
    }
    println!();
    out.field("Derivation Path", &current.derivation_path);
    out.field("Range Max (lamports)", current.range_max);
    out.field("JSON Output", current.json);

    Ok(())
}
