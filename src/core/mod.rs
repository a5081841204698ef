//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod load;
pub mod log;
pub mod metal;

// Re-export main types for cleaner imports
pub use convert::{GRAMS_PER_TROY_OUNCE, PriceComposer};
pub use currency::{Currency, ExchangeRateProvider, ExchangeRateTable, Unit};
pub use error::FetchError;
pub use load::{LoadOrchestrator, LoadStatus};
pub use metal::{Metal, MetalPriceProvider, MetalPriceSnapshot};
