//! Text output formatting with tables and colors.

use laptoptimus_core::{
    CatalogItem, Currency, DeliveryQuote, DeliveryRequest, DisplayPrice, Listing,
    ParsedSearchResult, PriceConverter, Source,
};
use laptoptimus_store::Settings;
use std::path::Path;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

const MODEL_WIDTH: usize = 34;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a search reply: prose, offers table, and sources.
    pub fn format_search(&self, result: &ParsedSearchResult, converter: &PriceConverter) -> String {
        let mut sections = Vec::new();

        let prose = result.prose().trim();
        if !prose.is_empty() {
            sections.push(prose.to_string());
        }

        if !result.has_products() {
            sections.push(self.dim("No structured offers in this reply."));
        } else {
            sections.push(format!(
                "{}\n{}",
                self.bold(&format!("Offers ({})", result.products.len())),
                self.format_listings(&result.products, converter)
            ));
        }

        if !result.sources.is_empty() {
            sections.push(self.format_sources(&result.sources));
        }

        sections.join("\n\n")
    }

    /// Formats listings as a table with UAH prices.
    pub fn format_listings(&self, listings: &[Listing], converter: &PriceConverter) -> String {
        let mut lines = vec![
            format!(
                "{:<34} {:<14} {:<3} {:>12} {:>10}",
                "Model", "Store", "Cty", "Price", "UAH"
            ),
            "─".repeat(77),
        ];

        for listing in listings {
            lines.push(format!(
                "{:<34} {:<14} {:<3} {:>12} {}",
                truncate(&listing.model_name, MODEL_WIDTH),
                truncate(&listing.store_name, 14),
                truncate(&listing.country, 3),
                format_original(listing.price_original, &listing.currency),
                self.price_cell(converter.quote(listing), 10)
            ));

            let specs = listing.specs.summary();
            if !specs.is_empty() {
                lines.push(format!("  {}", self.dim(&specs)));
            }
            if !listing.link.is_empty() {
                lines.push(format!("  {}", self.cyan(&listing.link)));
            }
        }

        lines.join("\n")
    }

    /// Formats grounding citations.
    pub fn format_sources(&self, sources: &[Source]) -> String {
        let mut lines = vec![self.bold("Sources")];
        for (i, source) in sources.iter().enumerate() {
            lines.push(format!("  [{}] {} {}", i + 1, source.title, self.dim(&source.uri)));
        }
        lines.join("\n")
    }

    /// Formats a single conversion.
    pub fn format_conversion(
        &self,
        amount: f64,
        currency: &Currency,
        price: DisplayPrice,
        converter: &PriceConverter,
    ) -> String {
        let mut lines = vec![format!(
            "{} = {} UAH",
            format_original(amount, currency),
            self.price_cell(price, 0)
        )];

        match currency {
            Currency::Ron => lines.push(self.dim(&converter.formula_example(amount))),
            Currency::Usd => lines.push(self.dim(&format!(
                "UAH = USD x {}",
                converter.settings().usd_buy_rate
            ))),
            Currency::Uah => {}
            Currency::Other(tag) => lines.push(self.yellow(&format!(
                "Currency {tag:?} cannot be converted (supported: RON, UAH, USD)"
            ))),
        }

        lines.join("\n")
    }

    /// Formats catalog records as a table.
    pub fn format_catalog(&self, items: &[CatalogItem], converter: &PriceConverter) -> String {
        if items.is_empty() {
            return self.dim("No catalog records.");
        }

        let mut lines = vec![
            format!(
                "{:<34} {:<14} {:<13} {:>12} {:>10}",
                "Model", "Store", "Status", "Price", "UAH"
            ),
            "─".repeat(87),
        ];

        for item in items {
            let listing = &item.listing;
            let badge = format!("{:<13}", item.badge());
            lines.push(format!(
                "{:<34} {:<14} {} {:>12} {}",
                truncate(&listing.model_name, MODEL_WIDTH),
                truncate(&listing.store_name, 14),
                self.badge_color(item, &badge),
                format_original(listing.price_original, &listing.currency),
                self.price_cell(converter.quote(listing), 10)
            ));

            if let Some(lowest) = item.lowest_recorded_price() {
                if lowest < listing.price_original {
                    lines.push(format!(
                        "  {}",
                        self.dim(&format!(
                            "lowest recorded: {}",
                            format_original(lowest, &listing.currency)
                        ))
                    ));
                }
            }
        }

        lines.join("\n")
    }

    /// Formats a landed-cost breakdown.
    pub fn format_delivery(&self, request: &DeliveryRequest, quote: &DeliveryQuote) -> String {
        let amount = |v: f64| DisplayPrice::Amount(laptoptimus_core::round_display(v)).to_string();
        let mut lines = vec![
            self.bold(&format!(
                "Landed cost: {} RON, {} kg",
                request.price_ron, request.weight_kg
            )),
            "─".repeat(40),
            format!("{:<12} {:>14} UAH", "Product", amount(quote.product_uah)),
            format!(
                "{:<12} {:>14} UAH{}",
                "Shipping",
                amount(quote.shipping_uah),
                if request.insurance { " (insured)" } else { "" }
            ),
        ];
        if request.include_customs {
            lines.push(format!("{:<12} {:>14} UAH", "Customs", amount(quote.customs_uah)));
        }
        lines.push("─".repeat(40));
        lines.push(format!(
            "{:<12} {:>14} UAH",
            "Total",
            self.green(&amount(quote.total_uah))
        ));
        lines.join("\n")
    }

    /// Formats the effective settings.
    pub fn format_settings(&self, settings: &Settings, path: &Path, converter: &PriceConverter) -> String {
        let exchange = &settings.exchange;
        let search = &settings.search;
        let rates = &settings.delivery;
        let lines = [
            self.bold("LaptOptimus Configuration"),
            "─".repeat(40),
            format!("Settings file: {}", path.display()),
            String::new(),
            self.bold("Exchange"),
            format!("  usdBuyRate:           {}", exchange.usd_buy_rate),
            format!("  ronToUsdFactor:       {}", exchange.ron_to_usd_factor),
            format!("  romanianDeliveryRate: {}", exchange.romanian_delivery_rate),
            format!("  {}", self.dim(&converter.formula_example(1000.0))),
            String::new(),
            self.bold("Search"),
            format!("  model:      {}", search.model),
            format!("  apiKeyEnv:  {}", search.api_key_env),
            format!("  baseUrl:    {}", search.base_url),
            format!("  timeout:    {}s, {} attempts", search.timeout_secs, search.max_attempts),
            String::new(),
            self.bold("Delivery"),
            format!(
                "  {} EUR + {} EUR/kg, {} RON/EUR, {} UAH/EUR",
                rates.base_fee_eur, rates.shipping_per_kg_eur, rates.ron_per_eur, rates.uah_per_eur
            ),
            String::new(),
            format!("Log level: {}", settings.log_level),
        ];
        lines.join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn price_cell(&self, price: DisplayPrice, width: usize) -> String {
        let text = format!("{:>width$}", price.to_string());
        match price {
            DisplayPrice::Amount(_) => self.green(&text),
            DisplayPrice::NotAvailable => self.yellow(&text),
        }
    }

    fn badge_color(&self, item: &CatalogItem, text: &str) -> String {
        match item.badge() {
            "out of stock" => self.red(text),
            "new" => self.green(text),
            "price changed" => self.yellow(text),
            _ => self.dim(text),
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Formats an origin-currency amount, e.g. `6,499 RON`.
fn format_original(amount: f64, currency: &Currency) -> String {
    let whole = laptoptimus_core::round_display(amount);
    let number = if (amount - amount.trunc()).abs() < f64::EPSILON {
        laptoptimus_core::group_thousands(whole)
    } else {
        format!("{amount:.2}")
    };
    if currency.code().is_empty() {
        number
    } else {
        format!("{number} {currency}")
    }
}

/// Cuts `text` to `width` characters, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ASUS ROG Strix G16", 8), "ASUS RO…");
        assert_eq!(truncate("Ноутбук Lenovo", 7), "Ноутбу…");
    }

    #[test]
    fn test_format_original() {
        assert_eq!(format_original(6499.0, &Currency::Ron), "6,499 RON");
        assert_eq!(format_original(5899.99, &Currency::Ron), "5899.99 RON");
        assert_eq!(format_original(10.0, &Currency::default()), "10");
    }

    #[test]
    fn test_paint_respects_colors() {
        let plain = TextFormatter::new(false);
        assert_eq!(plain.green("x"), "x");

        let colored = TextFormatter::new(true);
        assert_eq!(colored.red("x"), format!("{RED}x{RESET}"));
    }
}
