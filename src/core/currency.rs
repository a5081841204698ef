//! Currency and unit domain types, and the exchange-rate provider seam

use crate::core::error::FetchError;
use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Supported display currencies. USD is the base: every rate in the table is
/// expressed as units of the currency per 1 USD.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Inr,
    Jpy,
    Aud,
    Cad,
}

impl Currency {
    pub const ALL: [Currency; 7] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Inr,
        Currency::Jpy,
        Currency::Aud,
        Currency::Cad,
    ];

    /// ISO 4217 code, which is also the key used in the rate table.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "INR" => Ok(Currency::Inr),
            "JPY" => Ok(Currency::Jpy),
            "AUD" => Ok(Currency::Aud),
            "CAD" => Ok(Currency::Cad),
            _ => Err(anyhow::anyhow!("Unsupported currency: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Gram,
    Ounce,
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Unit::Gram => "gram",
                Unit::Ounce => "ounce",
            }
        )
    }
}

impl FromStr for Unit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gram" => Ok(Unit::Gram),
            "ounce" => Ok(Unit::Ounce),
            _ => Err(anyhow::anyhow!("Invalid unit: {}", s)),
        }
    }
}

/// Exchange rates keyed by ISO code, as units of the currency per 1 USD.
/// Built once per load cycle from the provider response and read-only after.
/// USD is implicitly 1 and never stored.
#[derive(Debug, Clone, Default)]
pub struct ExchangeRateTable {
    rates: HashMap<String, f64>,
}

impl ExchangeRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, rate: f64) {
        self.rates.insert(code.into(), rate);
    }

    /// Rate for a currency, or `None` when the provider did not include it.
    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.rates.get(currency.code()).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(String, f64)> for ExchangeRateTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        ExchangeRateTable {
            rates: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<ExchangeRateTable, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_serde_uses_iso_codes() {
        let currency: Currency = serde_yaml::from_str("\"EUR\"").unwrap();
        assert_eq!(currency, Currency::Eur);
        assert_eq!(serde_yaml::to_string(&Currency::Jpy).unwrap().trim(), "JPY");
    }

    #[test]
    fn test_unit_serde_is_lowercase() {
        let unit: Unit = serde_yaml::from_str("\"ounce\"").unwrap();
        assert_eq!(unit, Unit::Ounce);
        assert_eq!(serde_yaml::to_string(&Unit::Gram).unwrap().trim(), "gram");
    }

    #[test]
    fn test_currency_from_str_is_case_insensitive() {
        assert_eq!(
            <Currency as FromStr>::from_str("eur").unwrap(),
            Currency::Eur
        );
        assert_eq!(
            <Currency as FromStr>::from_str("JPY").unwrap(),
            Currency::Jpy
        );
        assert!(<Currency as FromStr>::from_str("CHF").is_err());
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!(<Unit as FromStr>::from_str("Gram").unwrap(), Unit::Gram);
        assert_eq!(<Unit as FromStr>::from_str("ounce").unwrap(), Unit::Ounce);
        assert!(<Unit as FromStr>::from_str("kilogram").is_err());
    }

    #[test]
    fn test_rate_lookup_by_code() {
        let mut table = ExchangeRateTable::new();
        table.insert("EUR", 0.92);
        assert_eq!(table.rate(Currency::Eur), Some(0.92));
        assert_eq!(table.rate(Currency::Jpy), None);
    }
}
