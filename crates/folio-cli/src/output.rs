//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
///
/// `Minimal` is handled by the caller, which knows which value matters.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Minimal => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints a single serializable value as JSON or one CSV record.
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.serialize(data)?;
            wtr.flush()?;
        }
        OutputFormat::Table | OutputFormat::Json | OutputFormat::Minimal => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Rounds a percentage to two decimals for display.
pub fn round_percent(rate: f64) -> f64 {
    (rate * 100.0).round() / 100.0
}

/// Formats an optional XIRR, `N/A` when not computable.
pub fn format_xirr(rate: Option<f64>) -> String {
    rate.map_or_else(|| "N/A".to_string(), |r| format!("{:.2}%", r))
}

/// Formats an optional XIRR with colour: green gains, red losses.
pub fn format_xirr_colored(rate: Option<f64>) -> String {
    let text = format_xirr(rate);
    match rate {
        Some(r) if r < 0.0 => text.red().to_string(),
        Some(_) => text.green().to_string(),
        None => text.dimmed().to_string(),
    }
}

/// Formats a monetary amount to two decimals.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Formats an optional monetary amount, `-` when unknown.
pub fn format_money_opt(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), format_money)
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(10.004_9), 10.0);
        assert_eq!(round_percent(-43.398), -43.4);
    }

    #[test]
    fn test_format_xirr() {
        assert_eq!(format_xirr(Some(9.999)), "10.00%");
        assert_eq!(format_xirr(None), "N/A");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(123_456, 3)), "123.46");
        assert_eq!(format_money_opt(None), "-");
    }
}
