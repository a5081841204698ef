pub mod cli;
pub mod core;
pub mod providers;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::config::{AppConfig, CURRENCYFREAKS_BASE_URL, METALPRICEAPI_BASE_URL};
use crate::core::load::{LoadOrchestrator, LoadStatus};
use crate::core::{Currency, Unit};
use crate::providers::currencyfreaks::CurrencyFreaksProvider;
use crate::providers::metalpriceapi::MetalPriceApiProvider;

pub async fn run(
    currency: Option<Currency>,
    unit: Option<Unit>,
    config_path: Option<&str>,
) -> Result<()> {
    info!("Bullion starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let currency = currency.unwrap_or(config.currency);
    let unit = unit.unwrap_or(config.unit);

    let metals_base_url = config
        .providers
        .metalpriceapi
        .as_ref()
        .map_or(METALPRICEAPI_BASE_URL, |p| &p.base_url);
    let metals_provider = MetalPriceApiProvider::new(
        metals_base_url,
        &config.metalpriceapi_key().unwrap_or_default(),
    );

    let rates_base_url = config
        .providers
        .currencyfreaks
        .as_ref()
        .map_or(CURRENCYFREAKS_BASE_URL, |p| &p.base_url);
    let rates_provider = CurrencyFreaksProvider::new(
        rates_base_url,
        &config.currencyfreaks_key().unwrap_or_default(),
    );

    let mut orchestrator = LoadOrchestrator::new(&metals_provider, &rates_provider);

    let spinner = cli::ui::new_spinner("Loading prices...");
    orchestrator.load().await;
    spinner.finish_and_clear();

    match orchestrator.status() {
        LoadStatus::Ready => {
            println!(
                "{}",
                cli::prices::display_as_table(orchestrator.composer(), currency, unit)
            );
            Ok(())
        }
        LoadStatus::Failed(message) => {
            eprintln!(
                "{}",
                cli::ui::style_text(&format!("Error: {message}"), cli::ui::StyleType::Error)
            );
            anyhow::bail!("{message}")
        }
        // load() always resolves to Ready or Failed
        LoadStatus::Loading => unreachable!(),
    }
}
