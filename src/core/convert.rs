//! Price composition over the two fetched datasets

use crate::core::currency::{Currency, ExchangeRateTable, Unit};
use crate::core::metal::{Metal, MetalPriceSnapshot};

/// Grams in one troy ounce.
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1035;

/// Holds the latest metal price snapshot and rate table and derives display
/// prices from them. Both datasets are replaced wholesale on each load cycle
/// and never partially mutated.
#[derive(Debug, Default)]
pub struct PriceComposer {
    snapshot: MetalPriceSnapshot,
    rates: ExchangeRateTable,
}

impl PriceComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, snapshot: MetalPriceSnapshot, rates: ExchangeRateTable) {
        self.snapshot = snapshot;
        self.rates = rates;
    }

    pub fn snapshot(&self) -> &MetalPriceSnapshot {
        &self.snapshot
    }

    pub fn rates(&self) -> &ExchangeRateTable {
        &self.rates
    }

    /// Converts a USD price into the target currency. Identity for USD;
    /// `None` when the target has no entry in the rate table, so that a
    /// missing rate surfaces as "unavailable" instead of defaulting to 0 or 1.
    pub fn convert_currency(&self, price_usd: f64, target: Currency) -> Option<f64> {
        if target == Currency::Usd {
            return Some(price_usd);
        }
        self.rates.rate(target).map(|rate| price_usd * rate)
    }

    /// Converts a per-ounce price into the requested unit.
    pub fn convert_unit(price: f64, unit: Unit) -> f64 {
        match unit {
            Unit::Ounce => price,
            Unit::Gram => price / GRAMS_PER_TROY_OUNCE,
        }
    }

    /// Final display price. Currency conversion runs before unit conversion:
    /// the rate table is defined against per-ounce USD values. `None` when the
    /// USD price is absent or zero, or the target currency has no rate.
    pub fn price(&self, price_usd: Option<f64>, target: Currency, unit: Unit) -> Option<f64> {
        let price_usd = price_usd.filter(|p| *p != 0.0)?;
        let in_currency = self.convert_currency(price_usd, target)?;
        Some(Self::convert_unit(in_currency, unit))
    }

    /// Display price for a metal from the current snapshot.
    pub fn metal_price(&self, metal: Metal, target: Currency, unit: Unit) -> Option<f64> {
        self.price(self.snapshot.usd_per_ounce(metal), target, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer_with_rates(rates: &[(&str, f64)]) -> PriceComposer {
        let mut table = ExchangeRateTable::new();
        for (code, rate) in rates {
            table.insert(*code, *rate);
        }
        let mut composer = PriceComposer::new();
        composer.set_data(
            MetalPriceSnapshot {
                gold_usd_per_ounce: Some(2000.0),
                silver_usd_per_ounce: None,
                as_of: None,
            },
            table,
        );
        composer
    }

    #[test]
    fn test_usd_ounce_is_identity() {
        let composer = composer_with_rates(&[]);
        assert_eq!(
            composer.price(Some(2000.0), Currency::Usd, Unit::Ounce),
            Some(2000.0)
        );
    }

    #[test]
    fn test_usd_gram_divides_by_troy_ounce() {
        let composer = composer_with_rates(&[]);
        assert_eq!(
            composer.price(Some(2000.0), Currency::Usd, Unit::Gram),
            Some(2000.0 / 31.1035)
        );
    }

    #[test]
    fn test_eur_ounce_multiplies_by_rate() {
        // 2000 USD/oz at 0.92 EUR per USD
        let composer = composer_with_rates(&[("EUR", 0.92)]);
        let price = composer
            .price(Some(2000.0), Currency::Eur, Unit::Ounce)
            .unwrap();
        assert!((price - 1840.0).abs() < 0.001);
    }

    #[test]
    fn test_eur_gram_converts_currency_then_unit() {
        let composer = composer_with_rates(&[("EUR", 0.92)]);
        let price = composer
            .price(Some(2000.0), Currency::Eur, Unit::Gram)
            .unwrap();
        assert!((price - 1840.0 / 31.1035).abs() < 0.001);
        assert!((price - 59.15).abs() < 0.01);
    }

    #[test]
    fn test_missing_price_is_unavailable() {
        let composer = composer_with_rates(&[("EUR", 0.92)]);
        for currency in Currency::ALL {
            for unit in [Unit::Gram, Unit::Ounce] {
                assert_eq!(composer.price(None, currency, unit), None);
            }
        }
    }

    #[test]
    fn test_zero_price_is_unavailable() {
        let composer = composer_with_rates(&[("EUR", 0.92)]);
        assert_eq!(composer.price(Some(0.0), Currency::Usd, Unit::Ounce), None);
        assert_eq!(composer.price(Some(0.0), Currency::Eur, Unit::Gram), None);
    }

    #[test]
    fn test_missing_rate_is_unavailable_but_usd_still_works() {
        // JPY absent from the table; USD needs no table entry
        let composer = composer_with_rates(&[("EUR", 0.92)]);
        assert_eq!(composer.price(Some(2000.0), Currency::Jpy, Unit::Ounce), None);
        assert_eq!(composer.price(Some(2000.0), Currency::Jpy, Unit::Gram), None);
        assert_eq!(
            composer.price(Some(2000.0), Currency::Usd, Unit::Ounce),
            Some(2000.0)
        );
    }

    #[test]
    fn test_unit_conversion_applied_exactly_once() {
        let composer = composer_with_rates(&[]);
        let price = composer
            .price(Some(GRAMS_PER_TROY_OUNCE), Currency::Usd, Unit::Gram)
            .unwrap();
        assert!((price - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_convert_unit_is_not_idempotent() {
        let once = PriceComposer::convert_unit(2000.0, Unit::Gram);
        let twice = PriceComposer::convert_unit(once, Unit::Gram);
        assert!((once - twice).abs() > 1.0);
    }

    #[test]
    fn test_metal_price_reads_snapshot() {
        let composer = composer_with_rates(&[("EUR", 0.92)]);
        assert!(
            composer
                .metal_price(Metal::Gold, Currency::Eur, Unit::Ounce)
                .is_some()
        );
        // Silver has no value in the snapshot
        for currency in Currency::ALL {
            assert_eq!(
                composer.metal_price(Metal::Silver, currency, Unit::Ounce),
                None
            );
        }
    }
}
