//! # Session Configuration
//!
//! Settings for the back-office session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TALLY_DATA_PATH=/srv/tally/state.json                              │
//! │     TALLY_BALANCE_TOLERANCE_CENTS=1                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/backoffice/backoffice.toml (Linux)                       │
//! │     ~/Library/Application Support/com.tally.backoffice/... (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Downtown Branch"
//! currency_symbol = "₱"
//!
//! [report]
//! top_seller_limit = 5
//! balance_tolerance_cents = 0
//!
//! [storage]
//! data_path = "/srv/tally/state.json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_core::{Money, DEFAULT_TOP_SELLER_LIMIT};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

// =============================================================================
// Store Settings
// =============================================================================

/// Display settings for the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Symbol printed before amounts. Display only; all amounts are in the
    /// single store currency.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Tally Store".to_string()
}

fn default_currency_symbol() -> String {
    "₱".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Report Settings
// =============================================================================

/// Knobs for report assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Rows in the top-seller list.
    #[serde(default = "default_top_seller_limit")]
    pub top_seller_limit: usize,

    /// Largest |variance| still reported as Balanced, in cents.
    /// Zero means balanced to the exact cent.
    #[serde(default)]
    pub balance_tolerance_cents: i64,
}

fn default_top_seller_limit() -> usize {
    DEFAULT_TOP_SELLER_LIMIT
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            top_seller_limit: default_top_seller_limit(),
            balance_tolerance_cents: 0,
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the state file lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Path of the JSON state file. Platform data dir when unset.
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

// =============================================================================
// Main Session Configuration
// =============================================================================

/// Complete session configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub report: ReportSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl SessionConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (backoffice.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading session config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.top_seller_limit == 0 {
            return Err(ConfigError::Invalid(
                "top_seller_limit must be greater than 0".into(),
            ));
        }

        if self.report.balance_tolerance_cents < 0 {
            return Err(ConfigError::Invalid(
                "balance_tolerance_cents must not be negative".into(),
            ));
        }

        if let Some(path) = &self.storage.data_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("data_path must not be empty".into()));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("TALLY_STORE_NAME") {
            self.store.name = name;
        }

        if let Ok(symbol) = std::env::var("TALLY_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Ok(path) = std::env::var("TALLY_DATA_PATH") {
            debug!(path = %path, "Overriding data path from environment");
            self.storage.data_path = Some(PathBuf::from(path));
        }

        if let Ok(limit) = std::env::var("TALLY_TOP_SELLER_LIMIT") {
            match limit.parse::<usize>() {
                Ok(l) => self.report.top_seller_limit = l,
                Err(_) => warn!(value = %limit, "Ignoring unreadable TALLY_TOP_SELLER_LIMIT"),
            }
        }

        if let Ok(tolerance) = std::env::var("TALLY_BALANCE_TOLERANCE_CENTS") {
            match tolerance.parse::<i64>() {
                Ok(t) => {
                    debug!(tolerance = t, "Overriding balance tolerance from environment");
                    self.report.balance_tolerance_cents = t;
                }
                Err(_) => warn!(
                    value = %tolerance,
                    "Ignoring unreadable TALLY_BALANCE_TOLERANCE_CENTS"
                ),
            }
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "tally", "backoffice")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("backoffice.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The state file to open: configured path, else the platform data dir,
    /// else `backoffice.json` in the working directory.
    pub fn data_path(&self) -> PathBuf {
        self.storage
            .data_path
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join("backoffice.json")))
            .unwrap_or_else(|| Path::new("backoffice.json").to_path_buf())
    }

    pub fn balance_tolerance(&self) -> Money {
        Money::from_cents(self.report.balance_tolerance_cents)
    }

    pub fn top_seller_limit(&self) -> usize {
        self.report.top_seller_limit
    }

    /// Renders an amount with the store's symbol: `₱1250.50`, `-₱5.00`.
    pub fn format_currency(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{}{}", self.store.currency_symbol, amount.abs())
        } else {
            format!("{}{}", self.store.currency_symbol, amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.top_seller_limit(), 5);
        assert!(config.balance_tolerance().is_zero());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SessionConfig::default();

        config.report.top_seller_limit = 0;
        assert!(config.validate().is_err());

        config.report.top_seller_limit = 3;
        config.report.balance_tolerance_cents = -1;
        assert!(config.validate().is_err());

        config.report.balance_tolerance_cents = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backoffice.toml");
        std::fs::write(
            &path,
            "[store]\nname = \"Downtown\"\n\n[report]\ntop_seller_limit = 3\n\n[storage]\ndata_path = \"/srv/tally/state.json\"\n",
        )
        .unwrap();

        let config = SessionConfig::load(Some(path)).unwrap();
        assert_eq!(config.store.name, "Downtown");
        assert_eq!(config.store.currency_symbol, "₱");
        assert_eq!(config.top_seller_limit(), 3);
        assert_eq!(config.data_path(), PathBuf::from("/srv/tally/state.json"));
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backoffice.toml");

        std::fs::write(&path, "[report]\ntop_seller_limit = 0\n").unwrap();
        assert!(matches!(
            SessionConfig::load(Some(path.clone())),
            Err(ConfigError::Invalid(_))
        ));

        std::fs::write(&path, "[report\n").unwrap();
        assert!(matches!(
            SessionConfig::load(Some(path)),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.store.name, "Tally Store");
    }

    #[test]
    fn test_format_currency() {
        let config = SessionConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(125050)), "₱1250.50");
        assert_eq!(config.format_currency(Money::from_cents(-500)), "-₱5.00");
        assert_eq!(config.format_currency(Money::zero()), "₱0.00");
    }
}
