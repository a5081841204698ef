use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::core::currency::{Currency, Unit};

pub const METALPRICEAPI_KEY_ENV: &str = "METALPRICEAPI_KEY";
pub const CURRENCYFREAKS_KEY_ENV: &str = "CURRENCYFREAKS_KEY";

pub const METALPRICEAPI_BASE_URL: &str = "https://api.metalpriceapi.com";
pub const CURRENCYFREAKS_BASE_URL: &str = "https://api.currencyfreaks.com";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MetalPriceApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencyFreaksConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub metalpriceapi: Option<MetalPriceApiConfig>,
    pub currencyfreaks: Option<CurrencyFreaksConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            metalpriceapi: Some(MetalPriceApiConfig {
                base_url: METALPRICEAPI_BASE_URL.to_string(),
                api_key: None,
            }),
            currencyfreaks: Some(CurrencyFreaksConfig {
                base_url: CURRENCYFREAKS_BASE_URL.to_string(),
                api_key: None,
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub unit: Unit,
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when
    /// it does not exist. API keys can come from the environment alone, so a
    /// missing file is not an error.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(AppConfig::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "bullion")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// API key for the metals provider. The environment wins over the config
    /// file; an absent key is passed through as-is and surfaces as an
    /// authentication failure from the provider.
    pub fn metalpriceapi_key(&self) -> Option<String> {
        std::env::var(METALPRICEAPI_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| {
                self.providers
                    .metalpriceapi
                    .as_ref()
                    .and_then(|p| p.api_key.clone())
            })
    }

    /// API key for the rates provider, same resolution order as above.
    pub fn currencyfreaks_key(&self) -> Option<String> {
        std::env::var(CURRENCYFREAKS_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| {
                self.providers
                    .currencyfreaks
                    .as_ref()
                    .and_then(|p| p.api_key.clone())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  metalpriceapi:
    base_url: "http://example.com/metals"
    api_key: "metals-key"
  currencyfreaks:
    base_url: "http://example.com/rates"
    api_key: "rates-key"
currency: "EUR"
unit: "ounce"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        let metals = config.providers.metalpriceapi.as_ref().unwrap();
        assert_eq!(metals.base_url, "http://example.com/metals");
        assert_eq!(metals.api_key.as_deref(), Some("metals-key"));
        let rates = config.providers.currencyfreaks.as_ref().unwrap();
        assert_eq!(rates.base_url, "http://example.com/rates");
        assert_eq!(rates.api_key.as_deref(), Some("rates-key"));
        assert_eq!(config.currency, Currency::Eur);
        assert_eq!(config.unit, Unit::Ounce);
    }

    #[test]
    fn test_config_defaults_apply() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.unit, Unit::Gram);
        assert_eq!(
            config.providers.metalpriceapi.unwrap().base_url,
            METALPRICEAPI_BASE_URL
        );
        assert_eq!(
            config.providers.currencyfreaks.unwrap().base_url,
            CURRENCYFREAKS_BASE_URL
        );
    }

    #[test]
    fn test_api_key_env_override() {
        let yaml_str = r#"
providers:
  metalpriceapi:
    base_url: "http://example.com/metals"
    api_key: "file-key"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();

        unsafe { std::env::remove_var(METALPRICEAPI_KEY_ENV) };
        assert_eq!(config.metalpriceapi_key().as_deref(), Some("file-key"));

        unsafe { std::env::set_var(METALPRICEAPI_KEY_ENV, "env-key") };
        assert_eq!(config.metalpriceapi_key().as_deref(), Some("env-key"));
        unsafe { std::env::remove_var(METALPRICEAPI_KEY_ENV) };
    }
}
