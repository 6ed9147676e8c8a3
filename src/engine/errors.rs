// ============================================================================
// Engine Errors
// User-facing error kinds on the mutating path
// ============================================================================

use std::fmt;

use crate::domain::Asset;

/// Errors returned by order placement.
///
/// Both kinds are synchronous and recoverable; the engine state is left
/// untouched when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Price or amount was non-positive (or rounded down to nothing)
    InvalidParameter,
    /// Requested reservation exceeds the free balance of the given asset
    InsufficientFunds { asset: Asset },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidParameter => {
                write!(f, "invalid order parameters: price and amount must be positive")
            },
            SimError::InsufficientFunds { asset: Asset::Quote } => {
                write!(f, "insufficient quote balance to place order")
            },
            SimError::InsufficientFunds { asset: Asset::Base } => {
                write!(f, "insufficient base balance to place order")
            },
        }
    }
}

impl std::error::Error for SimError {}

/// Result type alias for engine operations
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SimError::InvalidParameter.to_string(),
            "invalid order parameters: price and amount must be positive"
        );
        assert_eq!(
            SimError::InsufficientFunds { asset: Asset::Quote }.to_string(),
            "insufficient quote balance to place order"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(SimError::InvalidParameter, SimError::InvalidParameter);
        assert_ne!(
            SimError::InsufficientFunds { asset: Asset::Quote },
            SimError::InsufficientFunds { asset: Asset::Base }
        );
    }
}
