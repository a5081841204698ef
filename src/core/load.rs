//! Load cycle state machine

use crate::core::convert::PriceComposer;
use crate::core::currency::ExchangeRateProvider;
use crate::core::metal::MetalPriceProvider;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Runs the single fetch pass of a session: metals first, then exchange
/// rates, then both datasets handed to the composer at once. Any fetch error
/// short-circuits into `Failed` and leaves the composer unpopulated, so a
/// partial load can never be served as `Ready`.
pub struct LoadOrchestrator<'a> {
    metals: &'a dyn MetalPriceProvider,
    rates: &'a dyn ExchangeRateProvider,
    status: LoadStatus,
    composer: PriceComposer,
}

impl<'a> LoadOrchestrator<'a> {
    pub fn new(
        metals: &'a dyn MetalPriceProvider,
        rates: &'a dyn ExchangeRateProvider,
    ) -> Self {
        LoadOrchestrator {
            metals,
            rates,
            status: LoadStatus::Loading,
            composer: PriceComposer::new(),
        }
    }

    /// Sequencing is fixed: a metals failure always wins because the rates
    /// fetch never starts after one.
    pub async fn load(&mut self) {
        self.status = LoadStatus::Loading;

        let snapshot = match self.metals.fetch_spot_prices().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.status = LoadStatus::Failed(e.to_string());
                return;
            }
        };
        debug!(?snapshot, "Fetched metal prices");

        let table = match self.rates.fetch_rates().await {
            Ok(table) => table,
            Err(e) => {
                self.status = LoadStatus::Failed(e.to_string());
                return;
            }
        };
        debug!(rates = table.len(), "Fetched exchange rates");

        self.composer.set_data(snapshot, table);
        self.status = LoadStatus::Ready;
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn composer(&self) -> &PriceComposer {
        &self.composer
    }
}
