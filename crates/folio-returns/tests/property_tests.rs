//! Property-based tests for reconciliation and XIRR invariants.
//!
//! - XIRR rises with the terminal value of an open position
//! - XIRR does not depend on the input order of trades, including
//!   trades that share a date
//! - Sorting keeps same-day trades in input order
//! - Buying and selling at the same price earns 0%
//! - Realized plus unrealized P&L equals net cash plus market value

use folio_core::types::{Date, Trade, TradeSide};
use folio_returns::cashflows::sort_trades;
use folio_returns::config::XirrConfig;
use folio_returns::position::{net_quantity, reconcile_position};
use folio_returns::stock::calculate_stock_xirr_as_of;
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

fn start() -> Date {
    Date::from_ymd(2020, 1, 2).unwrap()
}

/// Generates a trade side.
fn arb_side() -> impl Strategy<Value = TradeSide> {
    prop_oneof![Just(TradeSide::Buy), Just(TradeSide::Sell)]
}

/// Generates a price between 1.00 and 999.99.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (100i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generates a whole-unit quantity.
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1i64..500).prop_map(Decimal::from)
}

/// Generates trades on distinct days within about five years.
fn arb_trades(max: usize) -> impl Strategy<Value = Vec<Trade>> {
    proptest::collection::btree_set(0i64..1800, 1..=max).prop_flat_map(|days| {
        let n = days.len();
        (
            Just(days),
            proptest::collection::vec((arb_side(), arb_quantity(), arb_price()), n),
        )
            .prop_map(|(days, parts)| {
                days.into_iter()
                    .zip(parts)
                    .map(|(day, (side, qty, price))| {
                        Trade::new("PROP", start().add_days(day), side, qty, price).unwrap()
                    })
                    .collect()
            })
    })
}

/// Generates buy-only trades on distinct days in the first two years.
fn arb_buys(max: usize) -> impl Strategy<Value = Vec<Trade>> {
    proptest::collection::btree_set(0i64..730, 1..=max).prop_flat_map(|days| {
        let n = days.len();
        (
            Just(days),
            proptest::collection::vec((arb_quantity(), arb_price()), n),
        )
            .prop_map(|(days, parts)| {
                days.into_iter()
                    .zip(parts)
                    .map(|(day, (qty, price))| {
                        Trade::new("PROP", start().add_days(day), TradeSide::Buy, qty, price)
                            .unwrap()
                    })
                    .collect()
            })
    })
}

/// Generates trades crowded into three weeks, so dates repeat often.
fn arb_crowded_trades(max: usize) -> impl Strategy<Value = Vec<Trade>> {
    proptest::collection::vec((0i64..21, arb_side(), arb_quantity(), arb_price()), 2..=max)
        .prop_map(|parts| {
            parts
                .into_iter()
                .map(|(day, side, qty, price)| {
                    Trade::new("PROP", start().add_days(day), side, qty, price).unwrap()
                })
                .collect()
        })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A higher mark price on an open long position never lowers its XIRR.
    #[test]
    fn prop_xirr_monotone_in_terminal_value(
        trades in arb_buys(6),
        price in arb_price(),
        bump_pct in 10i64..200,
    ) {
        let valuation = start().add_days(1095);
        let qty = net_quantity(&trades);
        let higher = price * (Decimal::ONE + Decimal::new(bump_pct, 2));

        let low = calculate_stock_xirr_as_of(&trades, price, qty, valuation);
        let high = calculate_stock_xirr_as_of(&trades, higher, qty, valuation);

        if let (Some(low), Some(high)) = (low, high) {
            prop_assert!(high > low, "xirr {} at {} vs {} at {}", low, price, high, higher);
        }
    }

    /// Reordering the input does not change the result.
    #[test]
    fn prop_xirr_shuffle_stable(
        (trades, shuffled) in arb_trades(10)
            .prop_flat_map(|t| (Just(t.clone()), Just(t).prop_shuffle())),
        price in arb_price(),
    ) {
        let valuation = start().add_days(1900);
        let qty = net_quantity(&trades);

        let original = calculate_stock_xirr_as_of(&trades, price, qty, valuation);
        let reordered = calculate_stock_xirr_as_of(&shuffled, price, qty, valuation);

        prop_assert_eq!(original, reordered);
    }

    /// Same-day trades may be summed in any order; the rate agrees to
    /// floating-point noise.
    #[test]
    fn prop_xirr_shuffle_stable_with_shared_dates(
        (trades, shuffled) in arb_crowded_trades(12)
            .prop_flat_map(|t| (Just(t.clone()), Just(t).prop_shuffle())),
        price in arb_price(),
    ) {
        let valuation = start().add_days(400);
        let qty = net_quantity(&trades);

        let original = calculate_stock_xirr_as_of(&trades, price, qty, valuation);
        let reordered = calculate_stock_xirr_as_of(&shuffled, price, qty, valuation);

        match (original, reordered) {
            (None, None) => {}
            (Some(a), Some(b)) => prop_assert!(
                (a - b).abs() <= 1e-6 * a.abs().max(1.0),
                "xirr {} vs {} after shuffle", a, b
            ),
            (a, b) => prop_assert!(false, "computability changed: {:?} vs {:?}", a, b),
        }
    }

    /// Sorting by date never reorders trades that share a date.
    #[test]
    fn prop_sort_keeps_input_order_for_ties(trades in arb_crowded_trades(16)) {
        let sorted = sort_trades(&trades);
        let index_of = |trade: &Trade| {
            trades.iter().position(|t| std::ptr::eq(t, trade)).unwrap_or(usize::MAX)
        };

        prop_assert_eq!(sorted.len(), trades.len());
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].date() <= pair[1].date());
            if pair[0].date() == pair[1].date() {
                prop_assert!(index_of(pair[0]) < index_of(pair[1]));
            }
        }
    }

    /// Buying and later selling everything at the same price earns nothing.
    #[test]
    fn prop_round_trip_is_zero(
        qty in arb_quantity(),
        price in arb_price(),
        held in 1i64..3000,
    ) {
        let trades = vec![
            Trade::new("RT", start(), TradeSide::Buy, qty, price).unwrap(),
            Trade::new("RT", start().add_days(held), TradeSide::Sell, qty, price).unwrap(),
        ];

        let xirr = calculate_stock_xirr_as_of(&trades, price, Decimal::ZERO, start().add_days(held));

        // Rounds to 0.00%
        prop_assert!(xirr.is_some());
        prop_assert!(xirr.unwrap_or(f64::NAN).abs() < 5e-3);
    }

    /// Average-cost accounting splits, but never creates or loses, P&L.
    #[test]
    fn prop_pnl_identity(trades in arb_trades(12), price in arb_price()) {
        let summary = reconcile_position(&trades, Some(price), start().add_days(1900), &XirrConfig::default());

        let net_cash: Decimal = trades
            .iter()
            .map(|t| if t.is_buy() { -t.notional() } else { t.notional() })
            .sum();
        let expected = net_cash + summary.net_quantity * price;
        let actual = summary.realized_pnl + summary.unrealized_pnl.unwrap_or_default();

        prop_assert!(
            (expected - actual).abs() < Decimal::new(1, 6),
            "expected {} got {}", expected, actual
        );
        prop_assert_eq!(summary.net_quantity, net_quantity(&trades));
        prop_assert!(summary.cost_basis >= Decimal::ZERO);
    }
}
