mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// History window used when neither the command line nor the config sets one
pub const DEFAULT_HISTORY: &str = "1 day";

/// Get the config directory path (~/.config/github-explorer/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("github-explorer"))
}

/// Get the default config file path (~/.config/github-explorer/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path,
///   and a missing default file yields an empty config.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => match get_config_path() {
            Some(path) if path.exists() => read_config(&path),
            _ => Ok(Config::default()),
        },
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))
}

/// Parse config YAML. An empty document is an empty config.
pub fn parse_config(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_saphyr::from_str(content)?;
    Ok(config)
}

/// Settings after merging command line flags over the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub history: String,
    pub jira_key: Option<String>,
}

impl Settings {
    /// Flags win over config values, config values win over built-in defaults.
    /// A blank Jira key counts as unset.
    pub fn resolve(history: Option<String>, jira_key: Option<String>, config: &Config) -> Self {
        let history = history
            .or_else(|| config.history.clone())
            .unwrap_or_else(|| DEFAULT_HISTORY.to_string());
        let jira_key = jira_key
            .or_else(|| config.jira_key.clone())
            .filter(|key| !key.trim().is_empty());
        Settings { history, jira_key }
    }
}
