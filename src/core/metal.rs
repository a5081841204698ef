//! Metal domain types and the metals provider seam

use crate::core::error::FetchError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metal {
    Gold,
    Silver,
}

impl Metal {
    /// Display order is fixed: gold first.
    pub const ALL: [Metal; 2] = [Metal::Gold, Metal::Silver];

    /// Provider ticker symbol for this metal.
    pub fn symbol(&self) -> &'static str {
        match self {
            Metal::Gold => "XAU",
            Metal::Silver => "XAG",
        }
    }
}

impl Display for Metal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Metal::Gold => "Gold",
                Metal::Silver => "Silver",
            }
        )
    }
}

/// Spot prices in USD per troy ounce, the internal unit of truth. Built once
/// per load cycle and replaced wholesale, never mutated. `None` means the
/// provider returned no value for that metal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetalPriceSnapshot {
    pub gold_usd_per_ounce: Option<f64>,
    pub silver_usd_per_ounce: Option<f64>,
    /// Provider-reported quote time, when present in the response.
    pub as_of: Option<DateTime<Utc>>,
}

impl MetalPriceSnapshot {
    pub fn usd_per_ounce(&self, metal: Metal) -> Option<f64> {
        match metal {
            Metal::Gold => self.gold_usd_per_ounce,
            Metal::Silver => self.silver_usd_per_ounce,
        }
    }
}

#[async_trait]
pub trait MetalPriceProvider: Send + Sync {
    async fn fetch_spot_prices(&self) -> Result<MetalPriceSnapshot, FetchError>;
}
