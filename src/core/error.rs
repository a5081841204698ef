//! Error types for the fetch boundary

use thiserror::Error;

/// Errors raised by the provider adapters. Every variant collapses into a
/// single `Failed(message)` load state; the distinction matters only to the
/// fetch layer and its tests.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The metals provider reported failure or returned no rates object.
    /// Carries the provider's own error message when it sent one.
    #[error("{0}")]
    MetalPrice(String),

    /// The rates provider returned a missing or empty rate table.
    #[error("Failed to fetch currency exchange rates")]
    CurrencyRate,

    /// Transport-level failure, or a body that could not be decoded as JSON.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Network(e.to_string())
    }
}

impl FetchError {
    /// Fallback message when the metals provider signals failure without
    /// including an error of its own.
    pub fn metal_price_fallback() -> Self {
        FetchError::MetalPrice("Failed to fetch metal prices".to_string())
    }
}
