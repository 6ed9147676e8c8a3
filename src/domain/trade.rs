// ============================================================================
// Trade Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeId(Uuid);

impl TradeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TradeId {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable execution record produced by the matching pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    /// Pair identifier, e.g. "TON_USDT"
    pub pair: String,
    pub side: Side,
    /// Execution price (always the order's own limit price)
    pub price: Decimal,
    /// Filled quantity in base units
    pub amount: Decimal,
    pub ts: DateTime<Utc>,
}

impl Trade {
    pub fn new(
        pair: String,
        side: Side,
        price: Decimal,
        amount: Decimal,
        ts: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TradeId::new(),
            pair,
            side,
            price,
            amount,
            ts,
        }
    }

    /// Notional value of the trade (price * amount).
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_creation() {
        let trade = Trade::new(
            "TON_USDT".to_string(),
            Side::Buy,
            Decimal::from(95),
            Decimal::from(2),
            Utc::now(),
        );

        assert_eq!(trade.pair, "TON_USDT");
        assert_eq!(trade.notional(), Decimal::from(190));
    }

    #[test]
    fn test_notional_with_fractional_amount() {
        let trade = Trade::new(
            "TON_USDT".to_string(),
            Side::Sell,
            Decimal::new(1005, 1), // 100.5
            Decimal::new(5, 1),    // 0.5
            Utc::now(),
        );
        assert_eq!(trade.notional(), Decimal::new(5025, 2)); // 50.25
    }
}
