// ============================================================================
// Market State
// Regime-switching price process state
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::round_to;

// ============================================================================
// Mood (volatility regime)
// ============================================================================

/// The regime the price process is currently operating under.
///
/// Each mood maps to a per-second (drift, volatility) pair; annualization
/// is deliberately not used at this time scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Calm,
    TrendUp,
    TrendDown,
    Pump,
    Dump,
}

impl Mood {
    /// Per-second fractional drift of this regime.
    pub fn drift(self) -> f64 {
        match self {
            Mood::Calm => 0.0,
            Mood::TrendUp => 0.00025,
            Mood::TrendDown => -0.00025,
            Mood::Pump => 0.0015,
            Mood::Dump => -0.0015,
        }
    }

    /// Per-second volatility of this regime.
    pub fn volatility(self) -> f64 {
        match self {
            Mood::Calm => 0.0012,
            Mood::TrendUp | Mood::TrendDown => 0.0016,
            Mood::Pump | Mood::Dump => 0.0045,
        }
    }

    /// Pump and dump are the violent regimes with capped duration.
    pub fn is_extreme(self) -> bool {
        matches!(self, Mood::Pump | Mood::Dump)
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Calm
    }
}

// ============================================================================
// Market State
// ============================================================================

/// Mutable market state, owned exclusively by the simulation tick path.
///
/// Invariant: `mid > 0` at all times. Mood transitions only occur once the
/// current time reaches `mood_until`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    /// Current simulated mid price
    pub mid: Decimal,
    /// Reference price for the 24h-change calculation, fixed at session start
    pub open_24h: Decimal,
    /// Accumulated simulated volume, pulsed up on every tick
    pub volume_24h: Decimal,
    /// Active volatility regime
    pub mood: Mood,
    /// When the current mood expires and a new one is drawn
    pub mood_until: DateTime<Utc>,
    /// Timestamp of the last processed tick, used to derive `dt`
    pub last_ts: DateTime<Utc>,
}

impl MarketState {
    /// Initial mood duration before the first redraw.
    const INITIAL_MOOD_SECS: i64 = 60;

    /// Seed a fresh market state from the pair's baseline figures.
    ///
    /// The 24h open is back-computed from the baseline price and change so
    /// that the session starts out already showing the advertised change.
    pub fn seeded(pair: &crate::domain::TradingPair, now: DateTime<Utc>) -> Self {
        let denom = Decimal::ONE + pair.change_24h / Decimal::from(100);
        let open_24h = if denom > Decimal::ZERO {
            round_to(pair.base_price / denom, 4)
        } else {
            pair.base_price
        };

        Self {
            mid: pair.base_price,
            open_24h,
            volume_24h: pair.volume_24h,
            mood: Mood::Calm,
            mood_until: now + Duration::seconds(Self::INITIAL_MOOD_SECS),
            last_ts: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradingPair;

    #[test]
    fn test_mood_params() {
        assert_eq!(Mood::Calm.drift(), 0.0);
        assert_eq!(Mood::TrendUp.drift(), 0.00025);
        assert_eq!(Mood::TrendDown.drift(), -0.00025);
        assert_eq!(Mood::Pump.volatility(), 0.0045);
        assert!(Mood::Dump.is_extreme());
        assert!(!Mood::TrendUp.is_extreme());
    }

    #[test]
    fn test_seeded_back_computes_open() {
        let pair = TradingPair::new("TON", "USDT", Decimal::from(105))
            .with_change_24h(Decimal::from(5));
        let now = Utc::now();
        let state = MarketState::seeded(&pair, now);

        assert_eq!(state.mid, Decimal::from(105));
        // 105 / 1.05 = 100
        assert_eq!(state.open_24h, Decimal::from(100));
        assert_eq!(state.mood, Mood::Calm);
        assert_eq!(state.last_ts, now);
        assert!(state.mood_until > now);
    }

    #[test]
    fn test_seeded_guards_degenerate_change() {
        // A -100% baseline change would divide by zero; fall back to the price
        let pair = TradingPair::new("TON", "USDT", Decimal::from(100))
            .with_change_24h(Decimal::from(-100));
        let state = MarketState::seeded(&pair, Utc::now());
        assert_eq!(state.open_24h, Decimal::from(100));
    }

    #[test]
    fn test_mood_serde_shape() {
        let json = serde_json::to_string(&Mood::TrendUp).unwrap();
        assert_eq!(json, "\"trend_up\"");
        let back: Mood = serde_json::from_str("\"dump\"").unwrap();
        assert_eq!(back, Mood::Dump);
    }
}
