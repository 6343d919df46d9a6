//! CSV loaders for trades and prices.
//!
//! Trades: `symbol,date,side,quantity,price[,account]`
//! Prices: `symbol,price`

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use folio_core::types::{Date, Trade, TradeSide};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{CliError, CliResult};

#[derive(Debug, Deserialize)]
struct TradeRow {
    symbol: String,
    date: String,
    side: String,
    quantity: String,
    price: String,
    #[serde(default)]
    account: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceRow {
    symbol: String,
    price: String,
}

fn reader(path: &Path) -> CliResult<csv::Reader<std::fs::File>> {
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?)
}

fn record_error(path: &Path, line: u64, reason: impl Into<String>) -> CliError {
    CliError::InvalidRecord {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

fn parse_decimal(path: &Path, line: u64, field: &str, value: &str) -> CliResult<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| record_error(path, line, format!("{field} '{value}' is not a number")))
}

/// Loads and validates a trades file.
pub fn load_trades(path: &Path) -> CliResult<Vec<Trade>> {
    let mut rdr = reader(path)?;
    let mut trades = Vec::new();

    for result in rdr.deserialize::<TradeRow>() {
        let row = result?;
        // Header is line 1
        let line = trades.len() as u64 + 2;

        let date = Date::parse(&row.date).map_err(|e| record_error(path, line, e.to_string()))?;
        let side =
            TradeSide::from_str(&row.side).map_err(|e| record_error(path, line, e.to_string()))?;
        let quantity = parse_decimal(path, line, "quantity", &row.quantity)?;
        let price = parse_decimal(path, line, "price", &row.price)?;

        let mut trade = Trade::new(row.symbol, date, side, quantity, price)
            .map_err(|e| record_error(path, line, e.to_string()))?;
        if let Some(account) = row.account {
            trade = trade.with_account(account);
        }
        trades.push(trade);
    }

    tracing::info!("Loaded {} trades from {}", trades.len(), path.display());
    Ok(trades)
}

/// Loads a prices file into a symbol map. Later rows win.
pub fn load_prices(path: &Path) -> CliResult<HashMap<String, Decimal>> {
    let mut rdr = reader(path)?;
    let mut prices = HashMap::new();

    for (index, result) in rdr.deserialize::<PriceRow>().enumerate() {
        let row = result?;
        let line = index as u64 + 2;
        let price = parse_decimal(path, line, "price", &row.price)?;
        if price < Decimal::ZERO {
            return Err(record_error(path, line, format!("negative price {price}")));
        }
        prices.insert(row.symbol, price);
    }

    tracing::info!("Loaded {} prices from {}", prices.len(), path.display());
    Ok(prices)
}
