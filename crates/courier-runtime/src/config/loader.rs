//! Configuration loader using figment.
//!
//! Sources, lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. Profile-specific config file (`courier.{profile}.toml` / `.yaml`)
//! 3. Main config file (`courier.toml` / `courier.yaml` / `courier.yml`)
//! 4. Environment variables (`COURIER_*`)
//! 5. Programmatic overrides ([`ConfigLoader::merge`])
//!
//! An override only replaces the keys it serializes: a partial
//! `serde_json::json!` object touches just those keys, a whole
//! [`CourierConfig`] replaces everything.
//!
//! # Environment Variable Mapping
//!
//! Variables use the `COURIER_` prefix with `__` as the nesting separator:
//!
//! - `COURIER_TELEGRAM__BOT_TOKEN=123:abc` → `telegram.bot_token`
//! - `COURIER_WEBHOOK__PORT=8080` → `webhook.port`
//! - `COURIER_LOGGING__LEVEL=debug` → `logging.level`
//!
//! # Example
//!
//! ```rust,ignore
//! use courier_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .profile("production")
//!     .file("./config/courier.toml")
//!     .merge(serde_json::json!({"webhook": {"port": 8080}}))
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "yaml-config", feature = "toml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::CourierConfig;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "COURIER_";

/// File names searched in each directory, by enabled format.
fn file_names() -> Vec<&'static str> {
    let mut names = Vec::new();
    #[cfg(feature = "toml-config")]
    names.push("courier.toml");
    #[cfg(feature = "yaml-config")]
    names.extend(["courier.yaml", "courier.yml"]);
    names
}

/// Configuration profile for environment-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    /// Development profile (default).
    #[default]
    Development,
    /// Production profile.
    Production,
    /// Custom profile name.
    Custom(String),
}

impl Profile {
    /// Returns the profile name as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Parses a profile name.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Reads `COURIER_PROFILE`, defaulting to Development.
    pub fn from_env() -> Self {
        std::env::var("COURIER_PROFILE")
            .map(|p| Self::parse(&p))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Layered configuration loader.
pub struct ConfigLoader {
    overrides: Figment,
    profile: Profile,
    search_paths: Vec<PathBuf>,
    load_env: bool,
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader for the profile named by `COURIER_PROFILE`.
    pub fn new() -> Self {
        Self {
            overrides: Figment::new(),
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Sets the configuration profile.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a directory to search for configuration files.
    ///
    /// Without any, the current directory and `~/.config/courier` are searched.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds the current directory to the search paths.
    pub fn with_current_dir(self) -> Self {
        match std::env::current_dir() {
            Ok(cwd) => self.search_path(cwd),
            Err(_) => self,
        }
    }

    /// Loads exactly this file instead of searching.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skips `COURIER_*` environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Adds an override applied above files and environment.
    ///
    /// Later overrides win over earlier ones.
    pub fn merge<T: Serialize>(mut self, overrides: T) -> Self {
        self.overrides = self.overrides.merge(Serialized::defaults(overrides));
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<CourierConfig> {
        let profile = self.profile.clone();
        let config: CourierConfig = self.build_figment()?.extract()?;

        debug!(
            profile = %profile,
            api_url = %config.telegram.api_url,
            logging_level = %config.logging.level,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn build_figment(self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(CourierConfig::default()));

        match &self.config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.clone()));
                }
                info!(path = %path.display(), "Loading configuration file");
                figment = merge_file(figment, path)?;
            }
            None => figment = self.search_files(figment)?,
        }

        if self.load_env {
            trace!(prefix = ENV_PREFIX, "Loading environment variables");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        Ok(figment.merge(self.overrides))
    }

    /// Merges the first configuration file found, preceded by its profile
    /// variant (`courier.{profile}.toml`) when that exists.
    fn search_files(&self, mut figment: Figment) -> ConfigResult<Figment> {
        let dirs = if self.search_paths.is_empty() {
            default_search_paths()
        } else {
            self.search_paths.clone()
        };

        for dir in &dirs {
            for name in file_names() {
                let Some((stem, ext)) = name.rsplit_once('.') else {
                    continue;
                };
                let base = dir.join(name);
                if !base.exists() {
                    continue;
                }

                let variant = dir.join(format!("{stem}.{}.{ext}", self.profile));
                if variant.exists() {
                    debug!(path = %variant.display(), "Loading profile configuration");
                    figment = merge_file(figment, &variant)?;
                }
                info!(path = %base.display(), "Loading configuration file");
                return merge_file(figment, &base);
            }
        }

        warn!(paths = ?dirs, "No configuration file found, using defaults");
        Ok(figment)
    }
}

fn default_search_paths() -> Vec<PathBuf> {
    std::env::current_dir()
        .ok()
        .into_iter()
        .chain(dirs::config_dir().map(|dir| dir.join("courier")))
        .collect()
}

/// Merges one file, dispatching on its extension.
fn merge_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        #[cfg(feature = "toml-config")]
        "toml" => Ok(figment.merge(Toml::file(path))),
        #[cfg(feature = "yaml-config")]
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        ext => Err(ConfigError::ParseError(format!(
            "unsupported or disabled configuration format: .{ext}"
        ))),
    }
}
