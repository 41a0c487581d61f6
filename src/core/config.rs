//! # Configuration
//!
//! Settings with a simple override hierarchy:
//! defaults → config file → CLI flags.
//!
//! Config lives at `~/.review-analyzer/config.toml`. If missing on first run,
//! a commented-out default is generated so users can discover all options.
//! The backend URL is deliberately not read from the environment.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub form: FormConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FormConfig {
    pub min_review_chars: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_MIN_REVIEW_CHARS: usize = 50;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub min_review_chars: usize,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.review-analyzer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".review-analyzer").join("config.toml"))
}

/// Load config from `~/.review-analyzer/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AnalyzerConfig::default()`.
pub fn load_config() -> Result<AnalyzerConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AnalyzerConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path. Same semantics as [`load_config`].
pub fn load_config_from(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AnalyzerConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AnalyzerConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Review Analyzer Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → CLI flags.

# [backend]
# base_url = "http://127.0.0.1:8000"

# [form]
# min_review_chars = 50              # Soft hint only, short reviews are still sent
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Collapse defaults → config file → CLI into concrete values.
///
/// `cli_base_url` is the `--base-url` flag (None = not specified).
pub fn resolve(config: &AnalyzerConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    ResolvedConfig {
        base_url,
        min_review_chars: config
            .form
            .min_review_chars
            .unwrap_or(DEFAULT_MIN_REVIEW_CHARS),
    }
}
