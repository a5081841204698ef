use super::ui;
use crate::core::{Currency, Metal, PriceComposer, Unit};
use comfy_table::Cell;

/// Renders the spot price table for the selected currency and unit. Prices
/// the composer cannot derive show as "N/A".
pub fn display_as_table(composer: &PriceComposer, currency: Currency, unit: Unit) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Metal"),
        ui::header_cell(&format!("Price per {unit} ({currency})")),
    ]);

    for metal in Metal::ALL {
        let price = composer.metal_price(metal, currency, unit);
        table.add_row(vec![
            Cell::new(metal.to_string()),
            ui::format_optional_cell(price, |p| format!("{p:.2}")),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Gold & Silver Spot Prices", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());

    if let Some(as_of) = composer.snapshot().as_of {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!("As of {}", as_of.format("%Y-%m-%d %H:%M UTC")),
                ui::StyleType::Subtle
            )
        ));
    }

    output
}
