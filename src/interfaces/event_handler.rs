// ============================================================================
// Event Handler Interface
// Contract for observing simulation events
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Mood, OrderId, Side, Trade};

/// Events emitted by the simulation engine.
#[derive(Debug, Clone)]
pub enum SimEvent {
    /// A limit order was accepted and its reservation taken
    OrderPlaced {
        order_id: OrderId,
        side: Side,
        price: Decimal,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// An open order was cancelled and its reservation released
    OrderCancelled {
        order_id: OrderId,
        timestamp: DateTime<Utc>,
    },

    /// The matching pass produced a fill
    OrderFilled {
        order_id: OrderId,
        trade: Trade,
        remaining: Decimal,
    },

    /// The clock advanced the market by one step
    PriceTicked {
        mid: Decimal,
        mood: Mood,
        timestamp: DateTime<Utc>,
    },

    /// The session was reset to its defaults
    SessionReset { timestamp: DateTime<Utc> },
}

/// Observer trait for simulation events.
/// Implementations can handle logging, UI notification, metrics, etc.
pub trait EventHandler: Send + Sync {
    fn on_event(&self, event: SimEvent);
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: SimEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: SimEvent) {
        match &event {
            SimEvent::PriceTicked { mid, mood, .. } => {
                tracing::trace!(%mid, ?mood, "market tick");
            },
            other => {
                tracing::debug!("simulation event: {:?}", other);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(SimEvent::SessionReset {
            timestamp: Utc::now(),
        });
        // Should not panic
    }
}
