//! # Checkout Configuration
//!
//! Settings for the in-memory adapters and the `checkout-sim` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CARTWRIGHT_PAYMENT_APPROVE=false                                   │
//! │     CARTWRIGHT_MAX_AUTHORIZATION=2500.00                               │
//! │     CARTWRIGHT_LOG=cartwright_checkout=debug                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/checkout/checkout.toml (Linux)                           │
//! │     ~/Library/Application Support/com.cartwright.checkout/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [payment]
//! approve = true
//! max_authorization = "10000"
//! first_transaction_id = 1
//!
//! [inventory]
//! default_level = 0
//! levels = [
//!     { product_id = 1, quantity = 50 },
//!     { product_id = 2, quantity = 3 },
//! ]
//!
//! [display]
//! scale = 2
//!
//! [logging]
//! filter = "info"
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use cartwright_core::{Money, ProductId, TransactionId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// Largest scale `rust_decimal` can represent.
const MAX_DISPLAY_SCALE: u32 = 28;

// =============================================================================
// Payment Settings
// =============================================================================

/// Behavior of the in-memory payment gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSettings {
    /// When false every authorization is declined.
    #[serde(default = "default_true")]
    pub approve: bool,

    /// Amounts above this are declined.
    #[serde(default = "default_max_authorization")]
    pub max_authorization: Money,

    /// First transaction id handed out; later ids count up from here.
    #[serde(default = "default_first_transaction_id")]
    pub first_transaction_id: TransactionId,
}

fn default_true() -> bool {
    true
}

fn default_max_authorization() -> Money {
    Money::from_units(10_000)
}

fn default_first_transaction_id() -> TransactionId {
    1
}

impl Default for PaymentSettings {
    fn default() -> Self {
        PaymentSettings {
            approve: true,
            max_authorization: default_max_authorization(),
            first_transaction_id: default_first_transaction_id(),
        }
    }
}

// =============================================================================
// Inventory Settings
// =============================================================================

/// Initial stock level of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub product_id: ProductId,
    pub quantity: u64,
}

/// Initial contents of the in-memory inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Level assumed for products missing from `levels`.
    #[serde(default)]
    pub default_level: u64,

    #[serde(default)]
    pub levels: Vec<StockLevel>,
}

// =============================================================================
// Display & Logging
// =============================================================================

/// How totals are presented. Pricing itself never rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Decimal places of printed amounts.
    #[serde(default = "default_scale")]
    pub scale: u32,
}

fn default_scale() -> u32 {
    2
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            scale: default_scale(),
        }
    }
}

/// Log filter used when `RUST_LOG` is not set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// Main Checkout Configuration
// =============================================================================

/// Complete checkout configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub payment: PaymentSettings,

    #[serde(default)]
    pub inventory: InventorySettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (checkout.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading checkout config from file");
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

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load checkout config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Checkout config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.payment.max_authorization.is_positive() {
            return Err(ConfigError::InvalidConfig(format!(
                "payment.max_authorization must be greater than 0, got {}",
                self.payment.max_authorization
            )));
        }

        let mut seen = BTreeSet::new();
        for level in &self.inventory.levels {
            if !seen.insert(level.product_id) {
                return Err(ConfigError::InvalidConfig(format!(
                    "inventory.levels lists product {} more than once",
                    level.product_id
                )));
            }
        }

        if self.display.scale > MAX_DISPLAY_SCALE {
            return Err(ConfigError::InvalidConfig(format!(
                "display.scale must be at most {}, got {}",
                MAX_DISPLAY_SCALE, self.display.scale
            )));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(approve) = var("CARTWRIGHT_PAYMENT_APPROVE") {
            match approve.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => self.payment.approve = true,
                "false" | "0" | "no" => self.payment.approve = false,
                _ => warn!(value = %approve, "Unknown CARTWRIGHT_PAYMENT_APPROVE value"),
            }
        }

        if let Some(max) = var("CARTWRIGHT_MAX_AUTHORIZATION") {
            match Money::parse(&max) {
                Ok(amount) => {
                    debug!(%amount, "Overriding max authorization from environment");
                    self.payment.max_authorization = amount;
                }
                Err(e) => warn!(error = %e, "Ignoring CARTWRIGHT_MAX_AUTHORIZATION"),
            }
        }

        if let Some(filter) = var("CARTWRIGHT_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Picks the config file: an explicit path, else `local` when it
    /// exists, else the platform default.
    pub fn resolve_path(explicit: Option<PathBuf>, local: &Path) -> Option<PathBuf> {
        explicit.or_else(|| {
            if local.exists() {
                Some(local.to_path_buf())
            } else {
                Self::default_config_path()
            }
        })
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cartwright", "checkout")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CheckoutConfig::default();
        assert!(config.payment.approve);
        assert_eq!(config.payment.max_authorization, Money::from_units(10_000));
        assert_eq!(config.payment.first_transaction_id, 1);
        assert_eq!(config.inventory.default_level, 0);
        assert_eq!(config.display.scale, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CheckoutConfig::default();

        config.payment.max_authorization = Money::zero();
        assert!(config.validate().is_err());

        config.payment.max_authorization = Money::from_units(50);
        config.inventory.levels = vec![
            StockLevel { product_id: 1, quantity: 5 },
            StockLevel { product_id: 1, quantity: 9 },
        ];
        assert!(config.validate().is_err());

        config.inventory.levels.pop();
        assert!(config.validate().is_ok());

        config.display.scale = 29;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: CheckoutConfig = toml::from_str(
            r#"
            [payment]
            approve = false

            [inventory]
            levels = [{ product_id = 7, quantity = 3 }]
            "#,
        )
        .unwrap();

        assert!(!config.payment.approve);
        assert_eq!(config.payment.first_transaction_id, 1);
        assert_eq!(
            config.inventory.levels,
            vec![StockLevel { product_id: 7, quantity: 3 }]
        );
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CARTWRIGHT_PAYMENT_APPROVE", "no"),
            ("CARTWRIGHT_MAX_AUTHORIZATION", "250.50"),
            ("CARTWRIGHT_LOG", "debug"),
        ]);
        let mut config = CheckoutConfig::default();
        config.apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()));

        assert!(!config.payment.approve);
        assert_eq!(config.payment.max_authorization, Money::parse("250.50").unwrap());
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = CheckoutConfig::default();
        config.apply_overrides_from(|key| match key {
            "CARTWRIGHT_PAYMENT_APPROVE" => Some("maybe".to_string()),
            "CARTWRIGHT_MAX_AUTHORIZATION" => Some("lots".to_string()),
            _ => None,
        });

        assert_eq!(config, CheckoutConfig::default());
    }

    #[test]
    fn test_toml_serialization() {
        let config = CheckoutConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[payment]"));
        assert!(toml_str.contains("[display]"));

        let parsed: CheckoutConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_resolve_path_prefers_explicit_then_local() {
        let dir = std::env::temp_dir().join(format!("cartwright-{}", uuid::Uuid::new_v4()));
        let local = dir.join("checkout.toml");
        let explicit = PathBuf::from("/etc/cartwright/checkout.toml");

        assert_eq!(
            CheckoutConfig::resolve_path(Some(explicit.clone()), &local),
            Some(explicit)
        );
        assert_eq!(
            CheckoutConfig::resolve_path(None, &local),
            CheckoutConfig::default_config_path()
        );

        CheckoutConfig::default().save(Some(local.clone())).unwrap();
        assert_eq!(CheckoutConfig::resolve_path(None, &local), Some(local.clone()));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("cartwright-{}", uuid::Uuid::new_v4()))
            .join("checkout.toml");

        let mut config = CheckoutConfig::default();
        config.payment.first_transaction_id = 500;
        config.save(Some(path.clone())).unwrap();

        let loaded: CheckoutConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.payment.first_transaction_id, 500);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
