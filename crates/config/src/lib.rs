//! Configuration loading and validation.
//!
//! Configuration is layered: compiled-in defaults, then an optional
//! `devinfo.toml` (working directory first, then the platform config
//! directory), then environment variables prefixed with `DEVINFO_` (nested
//! keys separated by `__`, e.g. `DEVINFO_SEARCH__ENABLED=true`).
//!
//! The secondary search credentials are additionally honored from the bare
//! `API_KEY` and `CUSTOM_SEARCH_ID` environment variables, matching how the
//! Google Programmable Search Engine documentation names them.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::instrument;

pub const DEFAULT_INPUT_FILE: &str = "./data/device-codes.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "./output/device_info.csv";
pub const DEFAULT_CACHE_FILE: &str = "./data/device-info-cache.json";
pub const DEVICE_SPECIFICATIONS_URL: &str = "https://www.devicespecifications.com/index.php";
pub const CUSTOM_SEARCH_URL: &str = "https://customsearch.googleapis.com/customsearch/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mirror diagnostic logging to stderr at debug level.
    pub debug: bool,
    pub files: Files,
    pub cache: CacheConfig,
    pub output: OutputConfig,
    pub brands: BrandsConfig,
    pub primary: PrimaryConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Files {
    /// Input file of newline-separated device codes.
    pub input: PathBuf,
    /// Output CSV of `code, device, comment` rows.
    pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub read: bool,
    pub write: bool,
    pub file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write unresolved codes to a separate plain-text file.
    pub not_found_file: bool,
    /// Also record unresolved codes as rows in the main output.
    pub not_found_in_main: bool,
    /// Append a summary row with run statistics.
    pub stats: bool,
    /// When resolving a single code from the command line, also write the
    /// default output file instead of only printing to the console.
    pub single_query_to_file: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandsConfig {
    /// Optional JSON file overriding the embedded brand list.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryConfig {
    pub enabled: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fall back to the web search API when the primary lookup fails.
    pub enabled: bool,
    pub url: String,
    pub api_key: String,
    pub engine_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            files: Files::default(),
            cache: CacheConfig::default(),
            output: OutputConfig::default(),
            brands: BrandsConfig::default(),
            primary: PrimaryConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for Files {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { read: true, write: true, file: PathBuf::from(DEFAULT_CACHE_FILE) }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            not_found_file: true,
            not_found_in_main: true,
            stats: true,
            single_query_to_file: false,
        }
    }
}

impl Default for BrandsConfig {
    fn default() -> Self {
        Self { file: None }
    }
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self { enabled: true, url: DEVICE_SPECIFICATIONS_URL.to_string() }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: CUSTOM_SEARCH_URL.to_string(),
            api_key: String::new(),
            engine_id: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, file and environment.
    #[instrument]
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(Self::config_file()))
                .merge(Env::prefixed("DEVINFO_").split("__")),
        )
    }

    /// Extract a config from a prepared figment. Split out so tests can
    /// inject their own providers.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let mut config: Config = figment.extract().or_raise(|| ErrorKind::Invalid)?;
        if config.search.api_key.is_empty()
            && let Ok(key) = std::env::var("API_KEY")
        {
            config.search.api_key = key;
        }
        if config.search.engine_id.is_empty()
            && let Ok(id) = std::env::var("CUSTOM_SEARCH_ID")
        {
            config.search.engine_id = id;
        }
        Ok(config)
    }

    /// Check cross-field requirements. Fatal before any processing begins.
    pub fn validate(&self) -> Result<()> {
        if self.search.enabled {
            if self.search.api_key.is_empty() {
                exn::bail!(ErrorKind::MissingApiKey);
            }
            if self.search.engine_id.is_empty() {
                exn::bail!(ErrorKind::MissingEngineId);
            }
        }
        Ok(())
    }

    fn config_file() -> PathBuf {
        let local = PathBuf::from("devinfo.toml");
        if local.exists() {
            return local;
        }
        ProjectDirs::from("", "", "devinfo")
            .map(|dirs| dirs.config_dir().join("devinfo.toml"))
            .unwrap_or(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert!(config.primary.enabled);
        assert!(!config.search.enabled);
        assert!(config.cache.read && config.cache.write);
        assert_eq!(config.files.input, PathBuf::from(DEFAULT_INPUT_FILE));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn search_without_credentials_fails_validation() {
        let mut config = Config::default();
        config.search.enabled = true;
        assert!(config.validate().is_err());
        config.search.api_key = "key".to_string();
        assert!(config.validate().is_err());
        config.search.engine_id = "cx".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_and_env_layers_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "devinfo.toml",
                r#"
                debug = true

                [files]
                input = "./codes.txt"

                [search]
                enabled = true
                api_key = "from-file"
                "#,
            )?;
            jail.set_env("DEVINFO_SEARCH__ENGINE_ID", "from-env");
            let config = Config::from_figment(
                Figment::new()
                    .merge(Serialized::defaults(Config::default()))
                    .merge(Toml::file("devinfo.toml"))
                    .merge(Env::prefixed("DEVINFO_").split("__")),
            )
            .expect("config should load");
            assert!(config.debug);
            assert_eq!(config.files.input, PathBuf::from("./codes.txt"));
            // untouched keys keep their defaults
            assert_eq!(config.files.output, PathBuf::from(DEFAULT_OUTPUT_FILE));
            assert_eq!(config.search.api_key, "from-file");
            assert_eq!(config.search.engine_id, "from-env");
            assert!(config.validate().is_ok());
            Ok(())
        });
    }

    #[test]
    fn bare_credential_env_vars_fill_empty_fields() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("API_KEY", "bare-key");
            jail.set_env("CUSTOM_SEARCH_ID", "bare-cx");
            let config =
                Config::from_figment(Figment::new().merge(Serialized::defaults(Config::default())))
                    .expect("config should load");
            assert_eq!(config.search.api_key, "bare-key");
            assert_eq!(config.search.engine_id, "bare-cx");
            Ok(())
        });
    }
}
