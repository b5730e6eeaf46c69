//! Storefront configuration.
//!
//! Read from TOML, or JSON when the file name ends in `.json`:
//!
//! ```toml
//! [pricing]
//! currency = "PKR"
//! tax_rate = 10.0
//! delivery_charge = 150.0
//!
//! [promotions]
//! LAB10 = 10.0
//!
//! [api]
//! base_url = "https://api.example.com"
//! timeout_secs = 30
//!
//! [storage]
//! dir = ".storefront"
//! store = "default"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::cart::{CartSettings, PromoCatalog};
use crate::checkout::DeliveryPolicy;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
/// Overrides `storage.dir`.
pub const ENV_DATA_DIR: &str = "STOREFRONT_DATA_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Promo codes mapped to their percentage off.
    #[serde(default)]
    pub promotions: BTreeMap<String, f64>,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self, CommerceError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        if is_json(path) {
            serde_json::from_str(&content).map_err(|e| {
                CommerceError::Config(format!("failed to parse {}: {}", path.display(), e))
            })
        } else {
            Self::from_toml(&content)
                .map_err(|e| CommerceError::Config(format!("{}: {}", path.display(), e)))
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, CommerceError> {
        toml::from_str(content).map_err(|e| CommerceError::Config(e.to_string()))
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<(), CommerceError> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self).map_err(|e| CommerceError::Serialization(e.to_string()))?
        };

        std::fs::write(path, content).map_err(|e| {
            CommerceError::Config(format!("failed to write {}: {}", path.display(), e))
        })
    }

    /// Apply environment overrides, looking variables up with `var`.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(dir) = var(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.storage.dir = dir;
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_process_env(&mut self) {
        self.apply_env(|name| std::env::var(name).ok());
    }

    pub fn cart_settings(&self) -> Result<CartSettings, CommerceError> {
        self.pricing.cart_settings()
    }

    pub fn promo_catalog(&self) -> Result<PromoCatalog, CommerceError> {
        PromoCatalog::from_codes(self.promotions.iter().map(|(code, pct)| (code.as_str(), *pct)))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Pricing inputs supplied by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Tax rate in percent.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Charge for delivery orders, in major units.
    #[serde(default = "default_delivery_charge")]
    pub delivery_charge: f64,
}

fn default_currency() -> String {
    Currency::PKR.code().to_string()
}

fn default_tax_rate() -> f64 {
    10.0
}

fn default_delivery_charge() -> f64 {
    150.0
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            tax_rate: default_tax_rate(),
            delivery_charge: default_delivery_charge(),
        }
    }
}

impl PricingConfig {
    pub fn currency(&self) -> Result<Currency, CommerceError> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| {
                CommerceError::Config(format!("unsupported currency: {}", self.currency))
            })
    }

    pub fn cart_settings(&self) -> Result<CartSettings, CommerceError> {
        let currency = self.currency()?;
        if !self.delivery_charge.is_finite() || self.delivery_charge < 0.0 {
            return Err(CommerceError::Config(format!(
                "delivery_charge must be a non-negative amount, got {}",
                self.delivery_charge
            )));
        }
        Ok(CartSettings {
            currency,
            tax_rate: Some(self.tax_rate),
            delivery: DeliveryPolicy::new(Money::from_decimal(self.delivery_charge, currency)),
        })
    }
}

/// Remote product and order API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Where cart state is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file-backed store, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Key-value store name.
    #[serde(default = "default_store")]
    pub store: String,
}

fn default_storage_dir() -> String {
    ".storefront".to_string()
}

fn default_store() -> String {
    "default".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            store: default_store(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        let settings = config.cart_settings().unwrap();
        assert_eq!(settings.currency, Currency::PKR);
        assert_eq!(settings.tax_rate, Some(10.0));
        assert_eq!(settings.delivery.delivery_charge.amount_minor, 15000);
        assert!(config.promo_catalog().unwrap().is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let config = StorefrontConfig::from_toml(
            r#"
            [pricing]
            currency = "usd"
            tax_rate = 8.5

            [promotions]
            lab10 = 10.0

            [api]
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();

        let settings = config.cart_settings().unwrap();
        assert_eq!(settings.currency, Currency::USD);
        assert_eq!(settings.delivery.delivery_charge.amount_minor, 15000);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.storage.store, "default");

        let applied = config.promo_catalog().unwrap().resolve("LAB10").unwrap().unwrap();
        assert_eq!(applied.percent, 10.0);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = StorefrontConfig::default();
        config.pricing.currency = "XYZ".to_string();
        assert!(matches!(config.cart_settings(), Err(CommerceError::Config(_))));

        let mut config = StorefrontConfig::default();
        config.pricing.delivery_charge = -1.0;
        assert!(config.cart_settings().is_err());

        let mut config = StorefrontConfig::default();
        config.promotions.insert("HALF".to_string(), 150.0);
        assert!(config.promo_catalog().is_err());

        assert!(StorefrontConfig::from_toml("[pricing\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_env(|name| match name {
            ENV_API_URL => Some("https://orders.example.com".to_string()),
            ENV_DATA_DIR => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "https://orders.example.com");
        assert_eq!(config.storage.dir, ".storefront");
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("storefront-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut config = StorefrontConfig::default();
        config.promotions.insert("WELCOME".to_string(), 5.0);

        for name in ["storefront.toml", "storefront.json"] {
            let path = dir.join(name);
            config.save(&path).unwrap();
            assert_eq!(StorefrontConfig::load(&path).unwrap(), config);
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
