/// Configuration system for repograph
///
/// Supports loading from multiple sources with priority:
/// Environment variables > Config file > Defaults
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Repository scan limits
    pub scan: ScanConfig,

    /// Remote content host configuration
    pub remote: RemoteConfig,
}

/// Repository scan limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Hard cap on total files collected during the tree scan
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Content is fetched for at most this many files (a prefix of the scan
    /// order); files beyond it stay edgeless nodes
    #[serde(default = "default_max_analyzed")]
    pub max_analyzed: usize,
}

/// Remote content host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// API base URL of the content host
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Optional bearer token for authenticated requests
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_files() -> usize {
    300
}

fn default_max_analyzed() -> usize {
    60
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            max_analyzed: default_max_analyzed(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the config file if present, then
    /// environment variable overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(config)
    }

    /// Default config file location, e.g. `~/.config/repograph/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("repograph")
            .join("config.toml")
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("REPOGRAPH_TOKEN") {
            if !token.is_empty() {
                self.remote.token = Some(token);
            }
        }
        if let Ok(api_base) = std::env::var("REPOGRAPH_API_BASE") {
            if !api_base.is_empty() {
                self.remote.api_base = api_base;
            }
        }
        if let Ok(max_files) = std::env::var("REPOGRAPH_MAX_FILES") {
            if let Ok(value) = max_files.parse() {
                self.scan.max_files = value;
            }
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.scan.max_files == 0 {
            return Err(ConfigError::InvalidValue {
                key: "scan.max_files".to_string(),
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        if self.scan.max_analyzed == 0 {
            return Err(ConfigError::InvalidValue {
                key: "scan.max_analyzed".to_string(),
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        if self.remote.api_base.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "remote.api_base".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scan.max_files, 300);
        assert_eq!(config.scan.max_analyzed, 60);
        assert_eq!(config.remote.api_base, "https://api.github.com");
        assert!(config.remote.token.is_none());
    }

    #[test]
    fn test_from_file_partial_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\nmax_files = 50\n\n[remote]\ntimeout_secs = 5").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.scan.max_files, 50);
        // Unset fields fall back to serde defaults
        assert_eq!(config.scan.max_analyzed, 60);
        assert_eq!(config.remote.timeout_secs, 5);
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not [valid toml").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/repograph.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }

    #[test]
    fn test_validate_rejects_zero_caps() {
        let mut config = Config::default();
        config.scan.max_files = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scan.max_analyzed = 0;
        assert!(config.validate().is_err());
    }
}
