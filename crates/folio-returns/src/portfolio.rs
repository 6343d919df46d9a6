//! Grouped reconciliation across accounts and symbols.

use std::collections::{BTreeMap, HashMap};

use folio_core::types::{Date, Trade};
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ReturnsConfig;
use crate::parallel::maybe_parallel_map;
use crate::position::{reconcile_position, PositionSummary};

/// Source of current prices by symbol.
pub trait PriceSource {
    /// Returns the current price for `symbol`, if known.
    fn price(&self, symbol: &str) -> Option<Decimal>;
}

impl PriceSource for HashMap<String, Decimal> {
    fn price(&self, symbol: &str) -> Option<Decimal> {
        self.get(symbol).copied()
    }
}

impl PriceSource for BTreeMap<String, Decimal> {
    fn price(&self, symbol: &str) -> Option<Decimal> {
        self.get(symbol).copied()
    }
}

/// Key of a reconciliation group. `None` is the unnamed default account.
type GroupKey = (Option<String>, String);

/// Reconciles every (account, symbol) position in a trade stream.
///
/// Symbols are renamed through `config.symbol_aliases` before grouping.
/// Prices are looked up under the renamed symbol first, then under any old
/// symbol renamed to it. Results are ordered by account (unnamed account
/// first) then symbol.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use folio_core::types::{Date, Trade, TradeSide};
/// use folio_returns::config::ReturnsConfig;
/// use folio_returns::portfolio::reconcile_portfolio;
/// use rust_decimal_macros::dec;
///
/// let d = Date::from_ymd(2022, 6, 1).unwrap();
/// let trades = vec![
///     Trade::new("FB", d, TradeSide::Buy, dec!(10), dec!(200)).unwrap(),
///     Trade::new("META", d.add_days(300), TradeSide::Buy, dec!(5), dec!(120)).unwrap(),
/// ];
/// let prices = HashMap::from([("META".to_string(), dec!(300))]);
/// let config = ReturnsConfig::default().with_alias("FB", "META");
///
/// let positions = reconcile_portfolio(&trades, &prices, d.add_days(365), &config);
///
/// assert_eq!(positions.len(), 1);
/// assert_eq!(positions[0].symbol, "META");
/// assert_eq!(positions[0].net_quantity, dec!(15));
/// ```
#[must_use]
pub fn reconcile_portfolio<P>(
    trades: &[Trade],
    prices: &P,
    valuation_date: Date,
    config: &ReturnsConfig,
) -> Vec<PositionSummary>
where
    P: PriceSource + Sync + ?Sized,
{
    let mut groups: BTreeMap<GroupKey, Vec<Trade>> = BTreeMap::new();

    for trade in trades {
        let symbol = config.resolve_symbol(trade.symbol());
        let key = (trade.account().map(str::to_string), symbol.to_string());
        groups.entry(key).or_default().push(trade.clone());
    }

    let groups: Vec<(GroupKey, Vec<Trade>)> = groups.into_iter().collect();
    info!(
        "Reconciling {} trades in {} positions as of {}",
        trades.len(),
        groups.len(),
        valuation_date
    );

    maybe_parallel_map(&groups, config, |((account, symbol), group)| {
        let price = lookup_price(prices, symbol, config);
        let mut summary = reconcile_position(group, price, valuation_date, &config.xirr);
        summary.symbol.clone_from(symbol);
        summary.account.clone_from(account);
        debug!(
            "{}/{}: net {} xirr {:?}",
            account.as_deref().unwrap_or("-"),
            symbol,
            summary.net_quantity,
            summary.xirr
        );
        summary
    })
}

fn lookup_price<P>(prices: &P, symbol: &str, config: &ReturnsConfig) -> Option<Decimal>
where
    P: PriceSource + ?Sized,
{
    prices.price(symbol).or_else(|| {
        config.aliases_of(symbol).find_map(|old| {
            let price = prices.price(old)?;
            debug!("{symbol}: using price listed under old symbol {old}");
            Some(price)
        })
    })
}

/// Portfolio-level sums over reconciled positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Number of positions.
    pub positions: usize,
    /// Positions with open quantity.
    pub open_positions: usize,
    /// Cost of all open quantity.
    pub cost_basis: Decimal,
    /// Market value of priced positions.
    pub market_value: Decimal,
    /// Realized P&L over all positions.
    pub realized_pnl: Decimal,
    /// Unrealized P&L of priced positions.
    pub unrealized_pnl: Decimal,
    /// Open positions with no price.
    pub unpriced_positions: usize,
}

impl PortfolioTotals {
    /// Sums a set of position summaries.
    #[must_use]
    pub fn from_positions(positions: &[PositionSummary]) -> Self {
        positions.iter().fold(Self::default(), |mut totals, p| {
            totals.positions += 1;
            totals.cost_basis += p.cost_basis;
            totals.realized_pnl += p.realized_pnl;
            totals.market_value += p.market_value.unwrap_or_default();
            totals.unrealized_pnl += p.unrealized_pnl.unwrap_or_default();
            if p.is_open() {
                totals.open_positions += 1;
                if p.current_price.is_none() {
                    totals.unpriced_positions += 1;
                }
            }
            totals
        })
    }

    /// Realized plus unrealized P&L.
    #[must_use]
    pub fn total_pnl(&self) -> Decimal {
        self.realized_pnl + self.unrealized_pnl
    }
}
