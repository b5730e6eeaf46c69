//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use storefront_core::prelude::*;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print the cart lines.
    pub fn cart_lines(&self, entries: &[CartEntry]) {
        const WIDTHS: [usize; 4] = [28, 5, 14, 14];

        self.table_row(&["ITEM", "QTY", "EACH", "TOTAL"], &WIDTHS);
        for entry in entries {
            let each = entry.total_per_unit_with_add_ons.display();
            let total = entry
                .line_total()
                .map(|m| m.display())
                .unwrap_or_else(|_| "overflow".to_string());
            let quantity = entry.quantity.to_string();
            self.table_row(&[&entry.name, &quantity, &each, &total], &WIDTHS);

            let labels = entry.add_on_labels();
            if !labels.is_empty() {
                self.table_row(
                    &[&format!("  + {}", labels.join(", ")), "", "", ""],
                    &WIDTHS,
                );
            }
            self.table_row(&[&format!("  {}", style(&entry.id).dim()), "", "", ""], &WIDTHS);
        }
    }

    /// Print the price breakdown of a cart.
    pub fn pricing(&self, pricing: &PricingSnapshot) {
        if self.json {
            return;
        }
        println!();
        self.kv("Subtotal", &pricing.subtotal.display());
        self.kv(
            &format!("Tax ({})", format_percent(pricing.tax_rate)),
            &pricing.tax_amount.display(),
        );
        let delivery = if pricing.is_free_delivery() {
            style("Free").green().to_string()
        } else {
            pricing.delivery_charge.display()
        };
        self.kv("Delivery", &delivery);
        if pricing.has_discount() {
            self.kv(
                &format!("Discount ({})", format_percent(pricing.discount_rate)),
                &style(format!("-{}", pricing.discount_amount.display()))
                    .green()
                    .to_string(),
            );
        }
        println!(
            "  {}: {}",
            style("Total").bold(),
            style(pricing.grand_total.display()).bold()
        );
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) =
            ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Format a rate like `10%` or `12.5%`.
pub fn format_percent(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{}%", rate as i64)
    } else {
        format!("{}%", rate)
    }
}

/// Price tag for a menu product, showing the original price when on sale.
pub fn price_tag(product: &MenuProduct) -> String {
    if product.is_on_sale() {
        format!(
            "{} {}",
            style(product.effective_price().display()).green(),
            style(product.price.display()).dim().strikethrough()
        )
    } else {
        product.price.display()
    }
}
