//! XIRR command implementation.
//!
//! Computes the annualized money-weighted return of one position.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use folio_core::types::{Date, Trade};
use folio_returns::config::ReturnsConfig;
use folio_returns::position::net_quantity;
use folio_returns::stock::xirr_for_trades;
use folio_returns::xirr::XirrOutcome;

use crate::cli::OutputFormat;
use crate::commands::{parse_price, valuation_date};
use crate::error::CliError;
use crate::input::load_trades;
use crate::output::{
    format_money, format_xirr_colored, print_header, print_output, print_single, round_percent,
    KeyValue,
};

/// Arguments for the xirr command.
#[derive(Args, Debug)]
pub struct XirrArgs {
    /// Trades CSV (symbol,date,side,quantity,price[,account])
    #[arg(short, long)]
    pub trades: PathBuf,

    /// Current price of the instrument
    #[arg(short, long)]
    pub price: String,

    /// Symbol to evaluate. Required when the file holds several.
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Only use trades from this account. Without it, trades from every
    /// account are combined into one position; use `reconcile` for
    /// per-account results.
    #[arg(short, long)]
    pub account: Option<String>,

    /// Valuation date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,
}

/// Machine-readable XIRR report.
#[derive(Debug, Serialize)]
struct XirrReport {
    symbol: String,
    account: Option<String>,
    valuation_date: Date,
    trades: usize,
    net_quantity: Decimal,
    current_price: Decimal,
    xirr: Option<f64>,
}

/// Execute the xirr command.
pub fn execute(
    args: XirrArgs,
    config: &ReturnsConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let price = parse_price(&args.price)?;
    let as_of = valuation_date(args.as_of.as_deref())?;
    let trades = load_trades(&args.trades)?;

    let symbol = select_symbol(&trades, args.symbol.as_deref(), config)?;
    let selected: Vec<Trade> = trades
        .into_iter()
        .filter(|t| config.resolve_symbol(t.symbol()) == symbol)
        .filter(|t| args.account.is_none() || t.account() == args.account.as_deref())
        .collect();

    if selected.is_empty() {
        let filter = match &args.account {
            Some(account) => format!("{symbol} in account '{account}'"),
            None => symbol,
        };
        return Err(CliError::NoMatchingTrades(filter).into());
    }

    let quantity = net_quantity(&selected);
    let outcome = xirr_for_trades(&selected, price, quantity, as_of, &config.xirr);
    if let XirrOutcome::NotComputable(reason) = outcome {
        tracing::info!("XIRR for {} not computable: {}", symbol, reason);
    }
    let xirr = outcome.rate().map(round_percent);

    if format == OutputFormat::Minimal {
        println!("{}", xirr.map_or_else(|| "N/A".to_string(), |r| format!("{:.2}", r)));
        return Ok(());
    }

    let report = XirrReport {
        symbol,
        account: args.account,
        valuation_date: as_of,
        trades: selected.len(),
        net_quantity: quantity,
        current_price: price,
        xirr,
    };

    match format {
        OutputFormat::Table => {
            if !quiet {
                print_header(&format!("XIRR: {}", report.symbol));
            }
            let rows = vec![
                KeyValue::new("Symbol", report.symbol.clone()),
                KeyValue::new("Account", report.account.clone().unwrap_or_else(|| "-".into())),
                KeyValue::new("Valuation Date", report.valuation_date.to_string()),
                KeyValue::new("Trades", report.trades.to_string()),
                KeyValue::new("Net Quantity", report.net_quantity.to_string()),
                KeyValue::new("Current Price", format_money(report.current_price)),
                KeyValue::new("Market Value", format_money(report.net_quantity * price)),
                KeyValue::new("XIRR", format_xirr_colored(report.xirr)),
            ];
            print_output(&rows, format)?;
        }
        OutputFormat::Json | OutputFormat::Csv | OutputFormat::Minimal => {
            print_single(&report, format)?;
        }
    }

    Ok(())
}

/// Picks the symbol to evaluate, after renames.
fn select_symbol(
    trades: &[Trade],
    requested: Option<&str>,
    config: &ReturnsConfig,
) -> Result<String, CliError> {
    if let Some(symbol) = requested {
        return Ok(config.resolve_symbol(symbol.trim()).to_string());
    }

    let symbols: BTreeSet<&str> = trades
        .iter()
        .map(|t| config.resolve_symbol(t.symbol()))
        .collect();

    match symbols.len() {
        0 => Err(CliError::NoMatchingTrades("any symbol".to_string())),
        1 => Ok(symbols.into_iter().next().unwrap_or_default().to_string()),
        _ => Err(CliError::AmbiguousSymbol(
            symbols.into_iter().collect::<Vec<_>>().join(", "),
        )),
    }
}
