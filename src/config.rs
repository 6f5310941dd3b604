//! Runtime configuration
//!
//! Layered lookup: built-in defaults, then the first TOML file found among
//! `crimp-quality.toml`, `.crimp-quality.toml` and
//! `<config dir>/crimp-quality/config.toml`, then environment variables. The
//! result is validated before use. Only the binary reads configuration; library
//! entry points take their inputs as arguments.

use crate::file_discovery::DEFAULT_LOG_FILE_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Diagnostic logging of the tool itself
    pub logging: LoggingConfig,

    /// Where station logs live
    pub paths: PathsConfig,

    /// Log file lookup
    pub scan: ScanConfig,

    /// JSON and table rendering
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the `<YYYY>/<MM>/<DD>` tree
    pub log_root: PathBuf,
    /// Where our own diagnostic logs go when file logging is enabled
    pub log_directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub file_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json_pretty: bool,
    pub display_limit: Option<usize>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "ERROR".to_string(),
            format: "pretty".to_string(),
            output: "console".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            log_root: PathBuf::from("."),
            log_directory: PathBuf::from("logs"),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_LOG_FILE_NAME.to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the first config file found, then environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                info!(config_file = %path.display(), "Using config file");
                Self::load_from_file(&path)?
            }
            None => Config::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn find_config_file() -> Option<PathBuf> {
        let user_config = dirs::config_dir().map(|d| d.join("crimp-quality").join("config.toml"));
        [
            Some(PathBuf::from("crimp-quality.toml")),
            Some(PathBuf::from(".crimp-quality.toml")),
            user_config,
        ]
        .into_iter()
        .flatten()
        .find(|path| path.is_file())
    }

    /// Read one TOML file. Missing sections and keys take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        if let Ok(val) = env::var("CRIMP_QUALITY_ROOT") {
            self.paths.log_root = PathBuf::from(val);
        }
        if let Ok(val) = env::var("CRIMP_QUALITY_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }
        if let Ok(val) = env::var("CRIMP_QUALITY_FILE_NAME") {
            self.scan.file_name = val;
        }
        if let Ok(val) = env::var("CRIMP_QUALITY_JSON_PRETTY") {
            self.output.json_pretty = val
                .parse()
                .context("Invalid CRIMP_QUALITY_JSON_PRETTY")?;
        }

        Ok(())
    }

    /// Reject values that would make lookups or logging misbehave.
    pub fn validate(&self) -> Result<()> {
        let file_name = self.scan.file_name.trim();
        if file_name.is_empty() {
            anyhow::bail!("Log file name cannot be empty");
        }
        if file_name.contains('/') || file_name.contains('\\') {
            anyhow::bail!(
                "Log file name must not contain path separators, got {}",
                self.scan.file_name
            );
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            anyhow::bail!(
                "Log format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            );
        }

        if !matches!(self.logging.output.as_str(), "console" | "file" | "both") {
            anyhow::bail!(
                "Log output must be 'console', 'file' or 'both', got '{}'",
                self.logging.output
            );
        }

        Ok(())
    }

    /// Write the configuration as TOML, e.g. to seed a config file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!(path = %path.display(), "Wrote configuration");

        Ok(())
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load the global configuration once. Later calls return the stored instance.
pub fn init_config() -> Result<&'static Config> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = Config::load()?;
    Ok(CONFIG.get_or_init(|| config))
}
