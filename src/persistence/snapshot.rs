// ============================================================================
// Persisted Snapshot
// Typed, versioned session snapshot with a lenient field-by-field decoder
// ============================================================================

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Balances, MarketState, Order, Trade};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The serializable union of everything a session owns.
///
/// Written after every tick and every mutating call; reconstructed at
/// session start. Decoding never fails: malformed or missing fields fall
/// back to the caller's defaults one field at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub version: u32,
    pub balances: Balances,
    pub open_orders: Vec<Order>,
    pub order_history: Vec<Order>,
    pub trades: Vec<Trade>,
    pub market: MarketState,
}

impl PersistedSnapshot {
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a stored snapshot, substituting `defaults` wherever the raw
    /// data is missing, corrupt, or wrongly shaped.
    ///
    /// After the per-field merge the result is validated as a whole: a
    /// non-positive mid or reservations the restored open orders cannot
    /// account for mark the snapshot as tampered, and the defaults win
    /// outright. Load is never an error from the caller's point of view.
    pub fn decode(raw: Option<&str>, defaults: PersistedSnapshot) -> PersistedSnapshot {
        let Some(raw) = raw else {
            return defaults;
        };
        let Ok(parsed) = serde_json::from_str::<RawSnapshot>(raw) else {
            tracing::warn!("snapshot parse failed, starting from defaults");
            return defaults;
        };

        let mut merged = PersistedSnapshot {
            version: parsed.version.unwrap_or(SNAPSHOT_VERSION),
            balances: parsed.balances.unwrap_or_else(|| defaults.balances.clone()),
            open_orders: parsed
                .open_orders
                .unwrap_or_else(|| defaults.open_orders.clone()),
            order_history: parsed
                .order_history
                .unwrap_or_else(|| defaults.order_history.clone()),
            trades: parsed.trades.unwrap_or_else(|| defaults.trades.clone()),
            market: parsed.market.unwrap_or_else(|| defaults.market.clone()),
        };

        // Orders that already left the open state, or that carry nothing
        // fillable, have no business in the open collection.
        merged
            .open_orders
            .retain(|o| o.is_open() && o.remaining > Decimal::ZERO && o.price > Decimal::ZERO);

        if !merged.is_coherent() {
            tracing::warn!("snapshot failed coherence checks, starting from defaults");
            return defaults;
        }
        merged
    }

    /// Cross-field validation of a restored snapshot.
    ///
    /// Reservations are recomputed from the open orders; if the stored
    /// ledger cannot cover them the snapshot is rejected as a whole.
    fn is_coherent(&self) -> bool {
        if self.market.mid <= Decimal::ZERO {
            return false;
        }

        let mut quote_reserved = Decimal::ZERO;
        let mut base_reserved = Decimal::ZERO;
        for order in &self.open_orders {
            match order.side {
                crate::domain::Side::Buy => quote_reserved += order.reserved_value(),
                crate::domain::Side::Sell => base_reserved += order.reserved_value(),
            }
        }

        self.balances.quote_reserved() == quote_reserved
            && self.balances.base_reserved() == base_reserved
            && self.balances.invariants_hold()
    }
}

// ============================================================================
// Lenient decoding
// ============================================================================

/// Intermediate shape where every field decodes independently: a field of
/// the wrong type becomes `None` instead of poisoning the whole document.
#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default, deserialize_with = "lenient")]
    version: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    balances: Option<Balances>,
    #[serde(default, deserialize_with = "lenient")]
    open_orders: Option<Vec<Order>>,
    #[serde(default, deserialize_with = "lenient")]
    order_history: Option<Vec<Order>>,
    #[serde(default, deserialize_with = "lenient")]
    trades: Option<Vec<Trade>>,
    #[serde(default, deserialize_with = "lenient")]
    market: Option<MarketState>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
