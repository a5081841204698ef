use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::error::FetchError;
use crate::core::metal::{Metal, MetalPriceProvider, MetalPriceSnapshot};

// MetalpriceAPI returns USD-based quotes under "USD<symbol>" keys. The value
// is the USD price of one troy ounce of the metal and is passed through
// verbatim, without inversion.
const GOLD_TICKER: &str = "USDXAU";
const SILVER_TICKER: &str = "USDXAG";

pub struct MetalPriceApiProvider {
    base_url: String,
    api_key: String,
}

impl MetalPriceApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        MetalPriceApiProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetalPriceResponse {
    success: bool,
    error: Option<String>,
    timestamp: Option<i64>,
    rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl MetalPriceProvider for MetalPriceApiProvider {
    #[instrument(name = "MetalPriceFetch", skip(self))]
    async fn fetch_spot_prices(&self) -> Result<MetalPriceSnapshot, FetchError> {
        let url = format!("{}/v1/latest", self.base_url);
        debug!("Requesting spot prices from {}", url);

        let symbols = format!("{},{}", Metal::Gold.symbol(), Metal::Silver.symbol());
        let client = reqwest::Client::builder()
            .user_agent("bullion/1.0")
            .build()?;
        let response = client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("base", "USD"),
                ("currencies", symbols.as_str()),
            ])
            .send()
            .await?;

        let text = response.text().await?;

        let data: MetalPriceResponse = serde_json::from_str(&text)
            .map_err(|e| FetchError::Network(format!("Failed to parse metals response: {e}")))?;
        debug!(?data, "Received metals response");

        if !data.success {
            return Err(match data.error {
                Some(message) => FetchError::MetalPrice(message),
                None => FetchError::metal_price_fallback(),
            });
        }

        let Some(rates) = data.rates else {
            return Err(FetchError::metal_price_fallback());
        };

        // A ticker absent from the rates object is not an error; the price
        // simply reads as unavailable.
        let snapshot = MetalPriceSnapshot {
            gold_usd_per_ounce: rates.get(GOLD_TICKER).copied(),
            silver_usd_per_ounce: rates.get(SILVER_TICKER).copied(),
            as_of: data
                .timestamp
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        };

        Ok(snapshot)
    }
}
