// ============================================================================
// Trading Pair
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable identity of the simulated instrument.
///
/// Created once per session; the baseline price and 24h change are only
/// used to seed the initial market state and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingPair {
    /// Base asset symbol (e.g. "TON")
    pub base: String,
    /// Quote asset symbol (e.g. "USDT")
    pub quote: String,
    /// Baseline price used to seed the mid price
    pub base_price: Decimal,
    /// Baseline 24h change in percent, used to back-compute the 24h open
    pub change_24h: Decimal,
    /// Baseline 24h volume the accumulator starts from
    pub volume_24h: Decimal,
}

impl TradingPair {
    /// Default baseline volume when the caller supplies none.
    const DEFAULT_VOLUME: i64 = 50_000;

    pub fn new(base: impl Into<String>, quote: impl Into<String>, base_price: Decimal) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
            base_price,
            change_24h: Decimal::ZERO,
            volume_24h: Decimal::from(Self::DEFAULT_VOLUME),
        }
    }

    /// Builder method: seed the baseline 24h change (percent).
    pub fn with_change_24h(mut self, change: Decimal) -> Self {
        self.change_24h = change;
        self
    }

    /// Builder method: seed the baseline 24h volume.
    pub fn with_volume_24h(mut self, volume: Decimal) -> Self {
        self.volume_24h = volume;
        self
    }

    /// Canonical identifier, e.g. "TON_USDT".
    pub fn id(&self) -> String {
        format!("{}_{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_id() {
        let pair = TradingPair::new("TON", "USDT", Decimal::new(512, 2));
        assert_eq!(pair.id(), "TON_USDT");
        assert_eq!(pair.volume_24h, Decimal::from(50_000));
        assert_eq!(pair.change_24h, Decimal::ZERO);
    }

    #[test]
    fn test_builder_methods() {
        let pair = TradingPair::new("BTC", "USDT", Decimal::from(64_000))
            .with_change_24h(Decimal::new(-23, 1))
            .with_volume_24h(Decimal::from(1_000_000));

        assert_eq!(pair.change_24h, Decimal::new(-23, 1));
        assert_eq!(pair.volume_24h, Decimal::from(1_000_000));
    }
}
