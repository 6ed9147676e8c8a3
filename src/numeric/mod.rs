// ============================================================================
// Numeric Utilities
// Decimal rounding and tick-grid helpers shared by the whole simulation
// ============================================================================

mod tick;

pub use tick::{round_to, snap_to_tick, tick_decimals, tick_size_for};
