// ============================================================================
// Simulation Engine
// ============================================================================

pub mod book;
pub mod clock;
pub mod errors;
pub mod price_process;
pub mod sim;

pub use book::{BookLevel, OrderBookSnapshot};
pub use clock::SimulationClock;
pub use errors::{SimError, SimResult};
pub use sim::{Change24h, MarketSim};
