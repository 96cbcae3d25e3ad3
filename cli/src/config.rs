//! CLI configuration file
//!
//! Lives at `~/.neonvault/config.json` unless `--config` points elsewhere.
//! A missing file is not an error: every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use neonvault_core::DerivationPath;
use serde::{Deserialize, Serialize};

/// Default directory for NeonVault files
const NEONVAULT_DIR: &str = ".neonvault";
const CONFIG_FILE: &str = "config.json";

/// Solana's standard first account
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/501'/0'/0'";

/// 1000 SOL in lamports
pub const DEFAULT_RANGE_MAX: u64 = 1_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Path used by `derive` when none is given
    pub derivation_path: String,
    /// Upper bound used by `range-proof` when none is given
    pub range_max: u64,
    /// Print JSON instead of formatted text
    pub json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            derivation_path: DEFAULT_DERIVATION_PATH.to_string(),
            range_max: DEFAULT_RANGE_MAX,
            json: false,
        }
    }
}

impl CliConfig {
    /// Reject values that would only fail later, mid-command
    pub fn validate(&self) -> Result<()> {
        self.derivation_path
            .parse::<DerivationPath>()
            .with_context(|| format!("Invalid derivation_path in config: {}", self.derivation_path))?;
        Ok(())
    }
}

/// Get the NeonVault directory path
pub fn neonvault_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(NEONVAULT_DIR))
}

/// Get the default config file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(neonvault_dir()?.join(CONFIG_FILE))
}

/// Load config from `path`, falling back to defaults if it does not exist
pub fn load_config(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(CliConfig::default());
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: CliConfig = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.validate()?;

    Ok(config)
}

/// Write config to `path`, refusing to overwrite unless `force`
pub fn save_config(path: &Path, config: &CliConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    config.validate()?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json).context("Failed to write config file")?;

    // Set restrictive permissions on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
