// ============================================================================
// Rounding & Tick Utilities
// Price-grid arithmetic mimicking real exchange tick conventions
// ============================================================================

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a value to `digits` decimal places using half-up rounding.
#[inline]
pub fn round_to(value: Decimal, digits: u32) -> Decimal {
    value.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
}

/// Minimum price increment for a given price magnitude.
///
/// Higher-value assets trade on coarser grids, low-value assets on finer
/// ones: 1 above 1000, 0.1 above 100, 0.01 above 10, 0.0001 below that.
pub fn tick_size_for(price: Decimal) -> Decimal {
    if price >= Decimal::from(1000) {
        Decimal::ONE
    } else if price >= Decimal::from(100) {
        Decimal::new(1, 1)
    } else if price >= Decimal::from(10) {
        Decimal::new(1, 2)
    } else {
        Decimal::new(1, 4)
    }
}

/// Display precision implied by a tick size (0 digits for tick=1,
/// 1 for 0.1, 2 for 0.01, 4 for 0.0001).
pub fn tick_decimals(tick: Decimal) -> u32 {
    if tick >= Decimal::ONE {
        0
    } else if tick >= Decimal::new(1, 1) {
        1
    } else if tick >= Decimal::new(1, 2) {
        2
    } else {
        4
    }
}

/// Round `price` to the nearest multiple of `tick`, then step by
/// `direction` whole ticks.
///
/// The result carries the display precision of the tick itself, so book
/// levels synthesized from it line up on a clean grid.
pub fn snap_to_tick(price: Decimal, tick: Decimal, direction: i64) -> Decimal {
    let steps = (price / tick).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let snapped = (steps + Decimal::from(direction)) * tick;
    round_to(snapped, tick_decimals(tick))
}
