// ============================================================================
// Market Simulation Engine
// Order lifecycle, matching against the simulated mid price, and snapshots
// ============================================================================

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::{
    Asset, Available, Balances, MarketState, Mood, Order, OrderId, OrderStatus, SimConfig, Side,
    Trade, TradingPair,
};
use crate::engine::book::{synthesize_book, OrderBookSnapshot};
use crate::engine::errors::{SimError, SimResult};
use crate::engine::price_process;
use crate::interfaces::{EventHandler, NoOpEventHandler, SimEvent};
use crate::numeric::{round_to, snap_to_tick, tick_size_for};
use crate::persistence::{PersistedSnapshot, SnapshotStore, SNAPSHOT_VERSION};

/// 24h change derived from the current mid and the session's 24h open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Change24h {
    /// Percentage change, rounded to 2 decimals
    pub percent: Decimal,
    /// Absolute change, rounded to 4 decimals
    pub absolute: Decimal,
}

/// The simulated market and order-execution engine for one trading pair.
///
/// All mutation funnels through `place_limit_order`, `cancel_order`,
/// `tick` and `reset`; wrap the engine in a mutex (the simulation clock
/// does) and a clock tick can never interleave with a caller's mutation.
/// Every mutating operation finishes by writing a snapshot through the
/// configured store.
pub struct MarketSim {
    pair: TradingPair,
    config: SimConfig,
    market: MarketState,
    balances: Balances,
    open_orders: Vec<Order>,
    order_history: Vec<Order>,
    trades: Vec<Trade>,
    book: OrderBookSnapshot,
    rng: StdRng,
    store: Arc<dyn SnapshotStore>,
    key: String,
    events: Arc<dyn EventHandler>,
}

impl MarketSim {
    /// Start a session, restoring from the persisted snapshot under `key`
    /// if one exists. Corrupt or partial snapshots fall back to defaults
    /// field by field and never fail the restore.
    pub fn restore(
        pair: TradingPair,
        config: SimConfig,
        store: Arc<dyn SnapshotStore>,
        key: impl Into<String>,
    ) -> Self {
        Self::build(pair, config, store, key.into(), StdRng::from_entropy())
    }

    /// Like [`MarketSim::restore`] but with a fixed RNG seed, so price
    /// paths, book ladders and fill fractions are reproducible.
    pub fn restore_seeded(
        pair: TradingPair,
        config: SimConfig,
        store: Arc<dyn SnapshotStore>,
        key: impl Into<String>,
        seed: u64,
    ) -> Self {
        Self::build(pair, config, store, key.into(), StdRng::seed_from_u64(seed))
    }

    /// Builder method: attach an event handler (defaults to no-op).
    pub fn with_event_handler(mut self, events: Arc<dyn EventHandler>) -> Self {
        self.events = events;
        self
    }

    fn build(
        pair: TradingPair,
        config: SimConfig,
        store: Arc<dyn SnapshotStore>,
        key: String,
        mut rng: StdRng,
    ) -> Self {
        let now = Utc::now();
        let defaults = PersistedSnapshot {
            version: SNAPSHOT_VERSION,
            balances: Balances::new(config.initial_quote),
            open_orders: Vec::new(),
            order_history: Vec::new(),
            trades: Vec::new(),
            market: MarketState::seeded(&pair, now),
        };

        let raw = store.load(&key);
        let snapshot = PersistedSnapshot::decode(raw.as_deref(), defaults);
        let book = synthesize_book(snapshot.market.mid, config.book_levels, &mut rng);

        let mut sim = Self {
            pair,
            config,
            market: snapshot.market,
            balances: snapshot.balances,
            open_orders: snapshot.open_orders,
            order_history: snapshot.order_history,
            trades: snapshot.trades,
            book,
            rng,
            store,
            key,
            events: Arc::new(NoOpEventHandler),
        };
        sim.persist();
        sim
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    pub fn pair(&self) -> &TradingPair {
        &self.pair
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn mid_price(&self) -> Decimal {
        self.market.mid
    }

    pub fn mood(&self) -> Mood {
        self.market.mood
    }

    pub fn volume_24h(&self) -> Decimal {
        self.market.volume_24h
    }

    /// Timestamp of the last processed tick.
    pub fn tick_timestamp(&self) -> DateTime<Utc> {
        self.market.last_ts
    }

    /// 24h change versus the session's fixed open.
    pub fn change_24h(&self) -> Change24h {
        let open = self.market.open_24h;
        if open <= Decimal::ZERO {
            return Change24h {
                percent: Decimal::ZERO,
                absolute: Decimal::ZERO,
            };
        }
        let absolute = self.market.mid - open;
        Change24h {
            percent: round_to(absolute / open * Decimal::from(100), 2),
            absolute: round_to(absolute, 4),
        }
    }

    /// The cosmetic depth ladder, regenerated on every tick.
    pub fn order_book(&self) -> &OrderBookSnapshot {
        &self.book
    }

    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    pub fn available(&self) -> Available {
        self.balances.available()
    }

    /// Open orders, newest first.
    pub fn open_orders(&self) -> &[Order] {
        &self.open_orders
    }

    /// Closed orders, newest first, capped.
    pub fn order_history(&self) -> &[Order] {
        &self.order_history
    }

    /// Executions, newest first, capped.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    // ========================================================================
    // Mutating operations
    // ========================================================================

    /// Place a limit order.
    ///
    /// The price is snapped to the tick grid of the current mid before it
    /// is stored. A buy reserves `price * amount` of the quote balance, a
    /// sell reserves `amount` of the base balance. Validation happens
    /// before any mutation, so a failed placement leaves no trace.
    pub fn place_limit_order(
        &mut self,
        side: Side,
        price: Decimal,
        amount: Decimal,
    ) -> SimResult<OrderId> {
        if price <= Decimal::ZERO || amount <= Decimal::ZERO {
            return Err(SimError::InvalidParameter);
        }

        let amount = round_to(amount, 6);
        if amount <= Decimal::ZERO {
            return Err(SimError::InvalidParameter);
        }

        let tick = tick_size_for(self.market.mid);
        let price = snap_to_tick(price, tick, 0);
        if price <= Decimal::ZERO {
            return Err(SimError::InvalidParameter);
        }

        match side {
            Side::Buy => {
                let cost = price * amount;
                if !self.balances.try_reserve_quote(cost) {
                    return Err(SimError::InsufficientFunds { asset: Asset::Quote });
                }
            },
            Side::Sell => {
                if !self.balances.try_reserve_base(amount) {
                    return Err(SimError::InsufficientFunds { asset: Asset::Base });
                }
            },
        }

        let now = Utc::now();
        let order = Order::new(self.pair.id(), side, price, amount, now);
        let order_id = order.id;
        self.open_orders.insert(0, order);

        self.events.on_event(SimEvent::OrderPlaced {
            order_id,
            side,
            price,
            amount,
            timestamp: now,
        });
        self.persist();
        Ok(order_id)
    }

    /// Cancel an open order. Unknown or already-closed ids are a no-op.
    ///
    /// Only the reservation backing the *remaining* quantity is released;
    /// the filled part was already settled by the matching pass.
    pub fn cancel_order(&mut self, order_id: OrderId) {
        let Some(pos) = self.open_orders.iter().position(|o| o.id == order_id) else {
            return;
        };
        let mut order = self.open_orders.remove(pos);

        match order.side {
            Side::Buy => self.balances.release_quote(order.price * order.remaining),
            Side::Sell => self.balances.release_base(order.remaining),
        }

        let now = Utc::now();
        order.close(OrderStatus::Cancelled, now);
        self.push_history(order);

        self.events.on_event(SimEvent::OrderCancelled {
            order_id,
            timestamp: now,
        });
        self.persist();
    }

    /// Advance the simulation by one tick: price step, matching pass,
    /// ladder refresh, snapshot. The sole driver of time.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        price_process::advance(&mut self.market, now, &mut self.rng);
        self.run_matching(now);
        self.book = synthesize_book(self.market.mid, self.config.book_levels, &mut self.rng);

        self.events.on_event(SimEvent::PriceTicked {
            mid: self.market.mid,
            mood: self.market.mood,
            timestamp: now,
        });
        self.persist();
    }

    /// Discard the session and start over: fresh quote balance, zero
    /// base, empty collections, the pair's baseline price.
    pub fn reset(&mut self) {
        let now = Utc::now();
        self.store.remove(&self.key);

        self.market = MarketState::seeded(&self.pair, now);
        self.balances = Balances::new(self.config.initial_quote);
        self.open_orders.clear();
        self.order_history.clear();
        self.trades.clear();
        self.book = synthesize_book(self.market.mid, self.config.book_levels, &mut self.rng);

        self.events.on_event(SimEvent::SessionReset { timestamp: now });
        self.persist();
    }

    // ========================================================================
    // Matching pass
    // ========================================================================

    /// Evaluate every open order against the current mid price.
    ///
    /// One batch pass per tick: all crossing checks use the same mid, and
    /// execution always happens at the order's own limit price. Simulated
    /// liquidity fills a uniform 25-100% slice of the remaining quantity.
    pub(crate) fn run_matching(&mut self, now: DateTime<Utc>) {
        if self.open_orders.is_empty() {
            return;
        }

        let mid = self.market.mid;
        let mut still_open = Vec::with_capacity(self.open_orders.len());
        let mut closed = Vec::new();

        for mut order in self.open_orders.drain(..) {
            if !order.crosses(mid) {
                still_open.push(order);
                continue;
            }

            let fraction: f64 = self.rng.gen_range(0.25..=1.0);
            let fraction = Decimal::from_f64(fraction).unwrap_or(Decimal::ONE);
            let fill = round_to(order.remaining * fraction, 6).min(order.remaining);
            if fill <= Decimal::ZERO {
                still_open.push(order);
                continue;
            }

            let exec_price = order.price;
            match order.side {
                Side::Buy => self.balances.settle_buy(exec_price * fill, fill),
                Side::Sell => self.balances.settle_sell(fill, exec_price * fill),
            }

            let trade = Trade::new(order.pair.clone(), order.side, exec_price, fill, now);
            self.trades.insert(0, trade.clone());
            self.trades.truncate(self.config.trade_log_cap);

            order.remaining -= fill;
            self.events.on_event(SimEvent::OrderFilled {
                order_id: order.id,
                trade,
                remaining: order.remaining,
            });

            if order.remaining <= Decimal::ZERO {
                order.close(OrderStatus::Filled, now);
                closed.push(order);
            } else {
                still_open.push(order);
            }
        }

        self.open_orders = still_open;
        for order in closed {
            self.push_history(order);
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn push_history(&mut self, order: Order) {
        self.order_history.insert(0, order);
        self.order_history.truncate(self.config.history_cap);
    }

    fn persist(&self) {
        let snapshot = PersistedSnapshot {
            version: SNAPSHOT_VERSION,
            balances: self.balances.clone(),
            open_orders: self.open_orders.clone(),
            order_history: self.order_history.clone(),
            trades: self.trades.clone(),
            market: self.market.clone(),
        };
        match snapshot.encode() {
            Ok(raw) => {
                if let Err(err) = self.store.save(&self.key, &raw) {
                    tracing::warn!(key = %self.key, %err, "snapshot save failed");
                }
            },
            Err(err) => tracing::warn!(key = %self.key, %err, "snapshot encode failed"),
        }
    }

    /// Pin the mid price directly, bypassing the price process. Lets
    /// tests drive the matching pass against a known price.
    pub(crate) fn force_mid(&mut self, mid: Decimal) {
        self.market.mid = mid;
    }
}
