// ============================================================================
// Order Book Synthesizer
// Cosmetic bid/ask ladder rendered around the current mid price
// ============================================================================

use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::{round_to, snap_to_tick, tick_size_for};

/// A single rung of the synthesized ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Decimal,
    pub amount: Decimal,
}

/// Display-only depth snapshot.
///
/// Regenerated whenever the mid price moves. The ladder has no causal
/// link to order matching, which evaluates fills against the mid price
/// alone; it never constrains or informs executions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Bid levels, best (highest) first
    pub bids: Vec<BookLevel>,
    /// Ask levels, best (lowest) first
    pub asks: Vec<BookLevel>,
}

impl OrderBookSnapshot {
    pub fn empty() -> Self {
        Self {
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|level| level.price)
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|level| level.price)
    }

    /// Current spread (best ask minus best bid).
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }
}

/// Render a bid/ask ladder of `levels` rungs per side around `mid`.
///
/// The spread is drawn as 2-10 ticks; each rung steps one tick further
/// from the best price. Rung amounts start from a random base quantity
/// that decays by 0.92-0.98 per rung while being scaled up slightly with
/// depth to avoid a monotonic collapse.
pub fn synthesize_book<R: Rng + ?Sized>(
    mid: Decimal,
    levels: usize,
    rng: &mut R,
) -> OrderBookSnapshot {
    let tick = tick_size_for(mid);
    let spread_ticks: i64 = ((3.0 + rng.gen::<f64>() * 6.0).round() as i64).clamp(2, 10);
    let half_spread = ((spread_ticks as f64 / 2.0).round() as i64).max(1);

    let best_ask = snap_to_tick(mid, tick, half_spread);
    let best_bid = snap_to_tick(mid, tick, -half_spread);

    let mut asks = Vec::with_capacity(levels);
    let mut base = 60.0 + rng.gen::<f64>() * 140.0;
    for rung in 0..levels {
        let price = snap_to_tick(best_ask, tick, rung as i64);
        asks.push(BookLevel {
            price,
            amount: rung_amount(base, rung, rng),
        });
        base *= 0.92 + rng.gen::<f64>() * 0.06;
    }

    let mut bids = Vec::with_capacity(levels);
    let mut base = 60.0 + rng.gen::<f64>() * 140.0;
    for rung in 0..levels {
        let price = snap_to_tick(best_bid, tick, -(rung as i64)).max(tick);
        bids.push(BookLevel {
            price,
            amount: rung_amount(base, rung, rng),
        });
        base *= 0.92 + rng.gen::<f64>() * 0.06;
    }

    OrderBookSnapshot { bids, asks }
}

fn rung_amount<R: Rng + ?Sized>(base: f64, rung: usize, rng: &mut R) -> Decimal {
    let raw = base * (0.6 + rng.gen::<f64>() * 0.9) * (1.0 + rung as f64 * 0.15);
    round_to(Decimal::from_f64(raw).unwrap_or(Decimal::ONE), 2)
}
