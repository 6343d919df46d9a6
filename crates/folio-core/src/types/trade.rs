//! Trade records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{FolioError, FolioResult};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    /// Units acquired, cash paid out.
    Buy,
    /// Units disposed of, cash received.
    Sell,
}

impl TradeSide {
    /// Returns `+1` for buys and `-1` for sells.
    #[must_use]
    pub fn sign(&self) -> Decimal {
        match self {
            TradeSide::Buy => Decimal::ONE,
            TradeSide::Sell => Decimal::NEGATIVE_ONE,
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        };
        write!(f, "{name}")
    }
}

impl FromStr for TradeSide {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" | "B" => Ok(TradeSide::Buy),
            "SELL" | "S" => Ok(TradeSide::Sell),
            _ => Err(FolioError::invalid_side(s)),
        }
    }
}

/// A single executed buy or sell.
///
/// Quantity and price are always strictly positive; the direction lives in
/// [`TradeSide`]. The only way to build a `Trade` is through [`Trade::new`],
/// which enforces that invariant, so downstream code never re-validates.
///
/// # Example
///
/// ```rust
/// use folio_core::types::{Date, Trade, TradeSide};
/// use rust_decimal_macros::dec;
///
/// let date = Date::from_ymd(2024, 1, 2).unwrap();
/// let sell = Trade::new("VTI", date, TradeSide::Sell, dec!(4), dec!(240))
///     .unwrap()
///     .with_account("ira");
///
/// assert_eq!(sell.signed_quantity(), dec!(-4));
/// assert_eq!(sell.account(), Some("ira"));
/// assert!(Trade::new("VTI", date, TradeSide::Buy, dec!(0), dec!(240)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trade {
    symbol: String,
    account: Option<String>,
    date: Date,
    side: TradeSide,
    quantity: Decimal,
    price: Decimal,
}

impl Trade {
    /// Creates a validated trade.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::InvalidTrade` if the symbol is blank, the
    /// quantity or price is not strictly positive, or `quantity * price`
    /// does not fit in a `Decimal`.
    pub fn new(
        symbol: impl Into<String>,
        date: Date,
        side: TradeSide,
        quantity: Decimal,
        price: Decimal,
    ) -> FolioResult<Self> {
        let symbol = symbol.into();

        if symbol.trim().is_empty() {
            return Err(FolioError::invalid_trade(symbol, "symbol must not be empty"));
        }
        if quantity <= Decimal::ZERO {
            return Err(FolioError::invalid_trade(
                symbol,
                format!("quantity must be positive, got {quantity}"),
            ));
        }
        if price <= Decimal::ZERO {
            return Err(FolioError::invalid_trade(
                symbol,
                format!("price must be positive, got {price}"),
            ));
        }
        if quantity.checked_mul(price).is_none() {
            return Err(FolioError::invalid_trade(
                symbol,
                format!("notional of {quantity} x {price} overflows"),
            ));
        }

        Ok(Self {
            symbol,
            account: None,
            date,
            side,
            quantity,
            price,
        })
    }

    /// Assigns the trade to an account.
    ///
    /// Blank account names are treated as "no account".
    #[must_use]
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        let account = account.into();
        self.account = if account.trim().is_empty() {
            None
        } else {
            Some(account)
        };
        self
    }

    /// Returns the instrument symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the account, if the trade is assigned to one.
    #[must_use]
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Returns the execution date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the trade direction.
    #[must_use]
    pub fn side(&self) -> TradeSide {
        self.side
    }

    /// Returns the (positive) quantity.
    #[must_use]
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Returns the (positive) unit price.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns `quantity * price`, which [`Trade::new`] checked fits.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.quantity * self.price
    }

    /// Returns the quantity signed by direction: positive for buys.
    #[must_use]
    pub fn signed_quantity(&self) -> Decimal {
        self.side.sign() * self.quantity
    }

    /// Returns true for buys.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.side == TradeSide::Buy
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} @ {}",
            self.date, self.side, self.quantity, self.symbol, self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> Date {
        Date::from_ymd(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_trade_creation() {
        let trade = Trade::new("AAPL", date(), TradeSide::Buy, dec!(10), dec!(180.25)).unwrap();

        assert_eq!(trade.symbol(), "AAPL");
        assert_eq!(trade.account(), None);
        assert_eq!(trade.notional(), dec!(1802.50));
        assert_eq!(trade.signed_quantity(), dec!(10));
        assert!(trade.is_buy());
    }

    #[test]
    fn test_rejects_non_positive_values() {
        assert!(Trade::new("AAPL", date(), TradeSide::Buy, dec!(0), dec!(1)).is_err());
        assert!(Trade::new("AAPL", date(), TradeSide::Buy, dec!(-5), dec!(1)).is_err());
        assert!(Trade::new("AAPL", date(), TradeSide::Sell, dec!(5), dec!(0)).is_err());
        assert!(Trade::new("AAPL", date(), TradeSide::Sell, dec!(5), dec!(-2.5)).is_err());
        assert!(Trade::new("  ", date(), TradeSide::Sell, dec!(5), dec!(2.5)).is_err());
    }

    #[test]
    fn test_rejects_overflowing_notional() {
        let err = Trade::new("BIG", date(), TradeSide::Buy, Decimal::MAX, dec!(2)).unwrap_err();
        assert!(err.to_string().contains("overflows"), "{err}");

        let largest = Trade::new("BIG", date(), TradeSide::Buy, Decimal::MAX, dec!(1)).unwrap();
        assert_eq!(largest.notional(), Decimal::MAX);
    }

    #[test]
    fn test_error_names_symbol() {
        let err = Trade::new("TSLA", date(), TradeSide::Buy, dec!(-1), dec!(200)).unwrap_err();
        assert!(matches!(err, FolioError::InvalidTrade { ref symbol, .. } if symbol == "TSLA"));
    }

    #[test]
    fn test_with_account() {
        let trade = Trade::new("AAPL", date(), TradeSide::Sell, dec!(2), dec!(190))
            .unwrap()
            .with_account("brokerage");
        assert_eq!(trade.account(), Some("brokerage"));
        assert_eq!(trade.signed_quantity(), dec!(-2));

        let blank = trade.with_account(" ");
        assert_eq!(blank.account(), None);
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("buy".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!(" SELL ".parse::<TradeSide>().unwrap(), TradeSide::Sell);
        assert_eq!("s".parse::<TradeSide>().unwrap(), TradeSide::Sell);
        assert!("short".parse::<TradeSide>().is_err());
        assert_eq!(TradeSide::Buy.to_string(), "BUY");
    }

    #[test]
    fn test_serialize() {
        let trade = Trade::new("AAPL", date(), TradeSide::Sell, dec!(2), dec!(190)).unwrap();
        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["side"], "SELL");
        assert_eq!(json["date"], "2024-05-10");
    }
}
