// ============================================================================
// Market Simulator Library
// Regime-switching price process, limit-order matching, escrow accounting
// ============================================================================

//! # Market Simulator
//!
//! A local, single-user market simulation that produces a believable,
//! continuously evolving price and lets a caller place and cancel limit
//! orders against it.
//!
//! ## Features
//!
//! - **Regime-switching random walk** (calm / trend / pump / dump moods)
//!   driving the mid price
//! - **Limit-order matching** against the mid price with simulated
//!   partial liquidity, always executing at the order's own limit
//! - **Escrow accounting**: balances carry exact reservations backed by
//!   the open orders at all times
//! - **Defensive persistence**: typed, versioned snapshots that restore
//!   from corrupt or partial data without ever failing
//! - **Owned simulation clock** that can be started, paused and stopped
//!
//! The synthesized depth ladder is display-only; fills are evaluated
//! against the single mid price, not against the ladder.
//!
//! ## Example
//!
//! ```rust
//! use market_sim::prelude::*;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let pair = TradingPair::new("TON", "USDT", Decimal::new(512, 2));
//! let config = SimConfig::new(Decimal::from(1000));
//! let store = Arc::new(MemoryStore::new());
//!
//! let mut sim = MarketSim::restore(pair, config, store, "sim_TON_USDT");
//!
//! let order_id = sim
//!     .place_limit_order(Side::Buy, Decimal::new(50, 1), Decimal::from(10))
//!     .unwrap();
//!
//! println!("mid: {}", sim.mid_price());
//! println!("available: {:?}", sim.available());
//!
//! sim.cancel_order(order_id);
//! ```
//!
//! To run continuously, wrap the engine in a mutex and hand it to the
//! clock:
//!
//! ```rust,no_run
//! use market_sim::prelude::*;
//! use parking_lot::Mutex;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let pair = TradingPair::new("TON", "USDT", Decimal::new(512, 2));
//! let config = SimConfig::new(Decimal::from(1000));
//! let sim = Arc::new(Mutex::new(MarketSim::restore(
//!     pair,
//!     config,
//!     Arc::new(MemoryStore::new()),
//!     "sim_TON_USDT",
//! )));
//!
//! let clock = SimulationClock::start(Arc::clone(&sim), Duration::from_millis(800));
//! // ... the UI reads sim.lock() between ticks ...
//! clock.stop();
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod persistence;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        Asset, Available, Balances, MarketState, Mood, Order, OrderId, OrderStatus, SimConfig,
        Side, Trade, TradeId, TradingPair,
    };
    pub use crate::engine::{
        BookLevel, Change24h, MarketSim, OrderBookSnapshot, SimError, SimResult, SimulationClock,
    };
    pub use crate::interfaces::{EventHandler, LoggingEventHandler, NoOpEventHandler, SimEvent};
    pub use crate::persistence::{FileStore, MemoryStore, PersistedSnapshot, SnapshotStore};
}
