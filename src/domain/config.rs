// ============================================================================
// Simulation Configuration
// ============================================================================

use rust_decimal::Decimal;
use std::time::Duration;

/// Tunable parameters of a simulation session.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Quote balance granted to a fresh session (and restored by reset)
    pub initial_quote: Decimal,
    /// Cadence of the simulation clock
    pub tick_interval: Duration,
    /// Rungs per side in the synthesized order book ladder
    pub book_levels: usize,
    /// Maximum retained trade records (oldest evicted)
    pub trade_log_cap: usize,
    /// Maximum retained closed orders (oldest evicted)
    pub history_cap: usize,
}

impl SimConfig {
    pub fn new(initial_quote: Decimal) -> Self {
        Self {
            initial_quote,
            ..Self::default()
        }
    }

    /// Builder method: set the clock cadence.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Builder method: set the ladder depth per side.
    pub fn with_book_levels(mut self, levels: usize) -> Self {
        self.book_levels = levels;
        self
    }

    /// Builder method: set the trade log cap.
    pub fn with_trade_log_cap(mut self, cap: usize) -> Self {
        self.trade_log_cap = cap;
        self
    }

    /// Builder method: set the order history cap.
    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_quote < Decimal::ZERO {
            return Err("Initial quote balance cannot be negative".to_string());
        }
        if self.tick_interval.is_zero() {
            return Err("Tick interval must be positive".to_string());
        }
        if self.book_levels == 0 {
            return Err("Book must have at least one level per side".to_string());
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_quote: Decimal::ZERO,
            tick_interval: Duration::from_millis(800),
            book_levels: 6,
            trade_log_cap: 60,
            history_cap: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.tick_interval, Duration::from_millis(800));
        assert_eq!(config.book_levels, 6);
        assert_eq!(config.trade_log_cap, 60);
        assert_eq!(config.history_cap, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimConfig::new(Decimal::from(1000))
            .with_tick_interval(Duration::from_millis(100))
            .with_book_levels(4);

        assert_eq!(config.initial_quote, Decimal::from(1000));
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.book_levels, 4);
    }

    #[test]
    fn test_validation() {
        let bad_quote = SimConfig::new(Decimal::from(-1));
        assert!(bad_quote.validate().is_err());

        let bad_levels = SimConfig::default().with_book_levels(0);
        assert!(bad_levels.validate().is_err());

        let bad_interval = SimConfig::default().with_tick_interval(Duration::ZERO);
        assert!(bad_interval.validate().is_err());
    }
}
