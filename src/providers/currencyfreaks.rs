use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::currency::{ExchangeRateProvider, ExchangeRateTable};
use crate::core::error::FetchError;

pub struct CurrencyFreaksProvider {
    base_url: String,
    api_key: String,
}

impl CurrencyFreaksProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        CurrencyFreaksProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrencyFreaksResponse {
    rates: Option<HashMap<String, RateValue>>,
}

// CurrencyFreaks serves rates as JSON strings; numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            RateValue::Number(n) => Some(*n),
            RateValue::Text(s) => s.parse().ok(),
        }
    }
}

#[async_trait]
impl ExchangeRateProvider for CurrencyFreaksProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<ExchangeRateTable, FetchError> {
        let url = format!("{}/latest", self.base_url);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("bullion/1.0")
            .build()?;
        let response = client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let text = response.text().await?;

        let data: CurrencyFreaksResponse = serde_json::from_str(&text).map_err(|e| {
            FetchError::Network(format!("Failed to parse exchange rate response: {e}"))
        })?;

        let Some(raw_rates) = data.rates else {
            return Err(FetchError::CurrencyRate);
        };

        let table: ExchangeRateTable = raw_rates
            .into_iter()
            .filter_map(|(code, value)| match value.as_f64() {
                Some(rate) => Some((code, rate)),
                None => {
                    debug!("Dropping unparseable rate for {}", code);
                    None
                }
            })
            .collect();

        if table.is_empty() {
            return Err(FetchError::CurrencyRate);
        }

        debug!(rates = table.len(), "Parsed exchange rate table");
        Ok(table)
    }
}
