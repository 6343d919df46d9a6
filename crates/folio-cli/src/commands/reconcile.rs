//! Reconcile command implementation.
//!
//! Reports net position, average cost, P&L and XIRR for every
//! (account, symbol) pair in a trades file.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use folio_core::types::Date;
use folio_returns::config::ReturnsConfig;
use folio_returns::portfolio::{reconcile_portfolio, PortfolioTotals};
use folio_returns::position::PositionSummary;

use crate::cli::OutputFormat;
use crate::commands::valuation_date;
use crate::input::{load_prices, load_trades};
use crate::output::{
    format_money, format_money_opt, format_xirr, print_header, print_output, print_warning,
    round_percent, KeyValue,
};

/// Arguments for the reconcile command.
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Trades CSV (symbol,date,side,quantity,price[,account])
    #[arg(short, long)]
    pub trades: PathBuf,

    /// Prices CSV (symbol,price). Open positions without a price are not valued.
    #[arg(short, long)]
    pub prices: Option<PathBuf>,

    /// Valuation date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,
}

/// One display row per position.
#[derive(Debug, Serialize, Tabled)]
struct PositionRow {
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Net Qty")]
    net_quantity: String,
    #[tabled(rename = "Avg Cost")]
    average_cost: String,
    #[tabled(rename = "Realized")]
    realized_pnl: String,
    #[tabled(rename = "Market Value")]
    market_value: String,
    #[tabled(rename = "Unrealized")]
    unrealized_pnl: String,
    #[tabled(rename = "XIRR")]
    xirr: String,
}

impl From<&PositionSummary> for PositionRow {
    fn from(p: &PositionSummary) -> Self {
        Self {
            account: p.account.clone().unwrap_or_default(),
            symbol: p.symbol.clone(),
            net_quantity: p.net_quantity.normalize().to_string(),
            average_cost: format_money(p.average_cost),
            realized_pnl: format_money(p.realized_pnl),
            market_value: format_money_opt(p.market_value),
            unrealized_pnl: format_money_opt(p.unrealized_pnl),
            xirr: format_xirr(p.xirr),
        }
    }
}

/// JSON report: positions with rounded XIRR plus totals.
#[derive(Debug, Serialize)]
struct ReconcileReport {
    valuation_date: Date,
    positions: Vec<PositionSummary>,
    totals: PortfolioTotals,
}

/// Execute the reconcile command.
pub fn execute(
    args: ReconcileArgs,
    config: &ReturnsConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let as_of = valuation_date(args.as_of.as_deref())?;
    let trades = load_trades(&args.trades)?;
    let prices = match &args.prices {
        Some(path) => load_prices(path)?,
        None => HashMap::new(),
    };

    let mut positions = reconcile_portfolio(&trades, &prices, as_of, config);
    for position in &mut positions {
        position.xirr = position.xirr.map(round_percent);
    }
    let totals = PortfolioTotals::from_positions(&positions);

    match format {
        OutputFormat::Table => {
            if !quiet {
                print_header(&format!("Positions as of {as_of}"));
            }
            let rows: Vec<PositionRow> = positions.iter().map(PositionRow::from).collect();
            print_output(&rows, format)?;

            if !quiet {
                print_header("Totals");
                print_output(&totals_rows(&totals), format)?;
                if totals.unpriced_positions > 0 {
                    print_warning(&format!(
                        "{} open position(s) have no price and are not valued",
                        totals.unpriced_positions
                    ));
                }
            }
        }
        OutputFormat::Json => {
            let report = ReconcileReport {
                valuation_date: as_of,
                positions,
                totals,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Csv => {
            let rows: Vec<PositionRow> = positions.iter().map(PositionRow::from).collect();
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            for p in &positions {
                let account = p.account.as_deref().unwrap_or("-");
                let xirr = p.xirr.map_or_else(|| "N/A".to_string(), |r| format!("{:.2}", r));
                println!("{account}\t{}\t{xirr}", p.symbol);
            }
        }
    }

    Ok(())
}

fn totals_rows(totals: &PortfolioTotals) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Positions", totals.positions.to_string()),
        KeyValue::new("Open", totals.open_positions.to_string()),
        KeyValue::new("Cost Basis", format_money(totals.cost_basis)),
        KeyValue::new("Market Value", format_money(totals.market_value)),
        KeyValue::new("Realized P&L", format_money(totals.realized_pnl)),
        KeyValue::new("Unrealized P&L", format_money(totals.unrealized_pnl)),
        KeyValue::new("Total P&L", format_money(totals.total_pnl())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_formatting() {
        let summary = PositionSummary {
            symbol: "AAPL".into(),
            account: None,
            net_quantity: Decimal::new(1500, 2),
            average_cost: Decimal::new(160_333, 3),
            cost_basis: Decimal::new(2405, 0),
            realized_pnl: Decimal::new(-150, 0),
            current_price: None,
            market_value: None,
            unrealized_pnl: None,
            total_bought: Decimal::new(20, 0),
            total_sold: Decimal::new(5, 0),
            trade_count: 3,
            first_trade: None,
            last_trade: None,
            xirr: Some(12.345),
        };

        let row = PositionRow::from(&summary);

        assert_eq!(row.account, "");
        assert_eq!(row.net_quantity, "15");
        assert_eq!(row.average_cost, "160.33");
        assert_eq!(row.realized_pnl, "-150.00");
        assert_eq!(row.market_value, "-");
        assert_eq!(row.xirr, "12.35%");
    }
}
