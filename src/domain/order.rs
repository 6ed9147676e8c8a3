// ============================================================================
// Order Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// Order lifecycle states: `Open -> {Filled | Cancelled}`, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Filled,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

// ============================================================================
// Order Entity
// ============================================================================

/// A resting limit order.
///
/// Created by order placement in status `Open`; mutated only by the
/// matching pass (which decrements `remaining`) or by cancellation. Once
/// the status leaves `Open` the order is moved to history and frozen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Pair identifier, e.g. "TON_USDT"
    pub pair: String,
    pub side: Side,
    /// Limit price, snapped to the tick grid at creation time
    pub price: Decimal,
    /// Original amount in base units
    pub amount: Decimal,
    /// Unfilled amount in base units
    pub remaining: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Stamped when the order leaves the `Open` state
    pub closed_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(
        pair: String,
        side: Side,
        price: Decimal,
        amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: OrderId::new(),
            pair,
            side,
            price,
            amount,
            remaining: amount,
            status: OrderStatus::Open,
            created_at,
            closed_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// The ledger reservation this order currently holds: remaining cost
    /// in quote units for a buy, remaining quantity in base units for a sell.
    pub fn reserved_value(&self) -> Decimal {
        match self.side {
            Side::Buy => self.price * self.remaining,
            Side::Sell => self.remaining,
        }
    }

    /// Crossing condition against a mid price: a buy fills when the market
    /// trades at or below its limit, a sell at or above.
    pub fn crosses(&self, mid: Decimal) -> bool {
        match self.side {
            Side::Buy => mid <= self.price,
            Side::Sell => mid >= self.price,
        }
    }

    /// Transition into a terminal state and stamp the close time.
    pub(crate) fn close(&mut self, status: OrderStatus, ts: DateTime<Utc>) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.closed_at = Some(ts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample(side: Side) -> Order {
        Order::new("TON_USDT".to_string(), side, dec("95"), dec("2"), Utc::now())
    }

    #[test]
    fn test_order_creation() {
        let order = sample(Side::Buy);
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.remaining, order.amount);
        assert!(order.closed_at.is_none());
        assert!(order.is_open());
    }

    #[test]
    fn test_reserved_value_per_side() {
        assert_eq!(sample(Side::Buy).reserved_value(), dec("190"));
        assert_eq!(sample(Side::Sell).reserved_value(), dec("2"));
    }

    #[test]
    fn test_crossing_condition() {
        let buy = sample(Side::Buy);
        assert!(buy.crosses(dec("95")));
        assert!(buy.crosses(dec("90")));
        assert!(!buy.crosses(dec("95.1")));

        let sell = sample(Side::Sell);
        assert!(sell.crosses(dec("95")));
        assert!(sell.crosses(dec("100")));
        assert!(!sell.crosses(dec("94.9")));
    }

    #[test]
    fn test_close_stamps_time() {
        let mut order = sample(Side::Buy);
        let ts = Utc::now();
        order.close(OrderStatus::Cancelled, ts);
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.closed_at, Some(ts));
        assert!(order.status.is_terminal());
    }
}
