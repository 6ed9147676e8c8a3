// ============================================================================
// Domain Models
// ============================================================================

pub mod config;
pub mod ledger;
pub mod market;
pub mod order;
pub mod pair;
pub mod trade;

pub use config::SimConfig;
pub use ledger::{Asset, Available, Balances};
pub use market::{MarketState, Mood};
pub use order::{Order, OrderId, OrderStatus, Side};
pub use pair::TradingPair;
pub use trade::{Trade, TradeId};
