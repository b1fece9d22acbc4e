//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table, ContentArrangement};
use rust_decimal::Decimal;

/// Descriptions longer than this are shortened in the product grid
const DESCRIPTION_LIMIT: usize = 100;

/// Characters kept when a description is shortened
const DESCRIPTION_PREVIEW: usize = 60;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format a price as dollars with two decimals
pub fn format_price(price: Decimal) -> String {
    format!("${:.2}", price.round_dp(2))
}

/// Shorten a product description for the grid
///
/// Anything over 100 characters becomes its first 60 characters plus "...".
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let preview: String = description.chars().take(DESCRIPTION_PREVIEW).collect();
        format!("{}...", preview)
    } else {
        description.to_string()
    }
}

/// Cart badge shown next to headers
pub fn cart_badge(entries: usize) -> String {
    format!("Cart ({})", entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(10995, 2)), "$109.95");
        assert_eq!(format_price(Decimal::new(22, 0)), "$22.00");
        assert_eq!(format_price(Decimal::new(15, 1)), "$1.50");
    }

    #[test]
    fn test_short_description_is_kept() {
        let exactly_limit = "a".repeat(100);
        assert_eq!(truncate_description(&exactly_limit), exactly_limit);
        assert_eq!(truncate_description(""), "");
    }

    #[test]
    fn test_long_description_is_truncated() {
        let long = "b".repeat(101);
        let shown = truncate_description(&long);
        assert_eq!(shown, format!("{}...", "b".repeat(60)));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let long = "é".repeat(120);
        let shown = truncate_description(&long);
        assert_eq!(shown.chars().count(), 63);
    }

    #[test]
    fn test_cart_badge() {
        assert_eq!(cart_badge(0), "Cart (0)");
        assert_eq!(cart_badge(3), "Cart (3)");
    }
}
