// ============================================================================
// Price Process
// Regime-switching random walk driving the simulated mid price
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::domain::{MarketState, Mood};
use crate::numeric::{round_to, tick_decimals, tick_size_for};

/// Floor below which the mid price is never allowed to fall.
const MIN_MID: f64 = 0.0001;

/// Floor on the elapsed time per step, so a stalled timer cannot produce
/// a degenerate dt.
const MIN_DT_MS: i64 = 200;

/// Draw the next mood given the expiring one.
///
/// Pump and dump are self-limiting: 75% of the time they collapse back to
/// calm, otherwise they persist one more period. From any other mood the
/// draw is 62% calm, 20% trend-up, 15% trend-down, 3% split between the
/// extremes.
pub fn choose_mood<R: Rng + ?Sized>(prev: Mood, rng: &mut R) -> Mood {
    let r: f64 = rng.gen();
    if prev.is_extreme() {
        return if r < 0.75 { Mood::Calm } else { prev };
    }
    if r < 0.62 {
        Mood::Calm
    } else if r < 0.82 {
        Mood::TrendUp
    } else if r < 0.97 {
        Mood::TrendDown
    } else if rng.gen::<f64>() < 0.5 {
        Mood::Pump
    } else {
        Mood::Dump
    }
}

/// Random lifetime for a freshly drawn mood: 12-22s for the extremes,
/// 25-70s for everything else.
pub fn mood_duration<R: Rng + ?Sized>(mood: Mood, rng: &mut R) -> Duration {
    let ms = if mood.is_extreme() {
        rng.gen_range(12_000..=22_000)
    } else {
        rng.gen_range(25_000..=70_000)
    };
    Duration::milliseconds(ms)
}

/// Advance the market by one step at `now`.
///
/// Redraws the mood if the current one expired, applies the regime's
/// drift plus a uniform shock scaled by `vol * sqrt(dt)`, keeps the mid
/// strictly positive, rounds it to its tick-implied precision and pulses
/// the volume accumulator in proportion to the shock.
pub fn advance<R: Rng + ?Sized>(market: &mut MarketState, now: DateTime<Utc>, rng: &mut R) {
    let dt_ms = (now - market.last_ts).num_milliseconds().max(MIN_DT_MS);
    let dt = dt_ms as f64 / 1000.0;

    if now >= market.mood_until {
        market.mood = choose_mood(market.mood, rng);
        market.mood_until = now + mood_duration(market.mood, rng);
    }

    let drift = market.mood.drift();
    let vol = market.mood.volatility();
    let noise: f64 = rng.gen_range(-1.0..=1.0);
    let shock = noise * vol * dt.sqrt();

    let mid = market.mid.to_f64().unwrap_or(MIN_MID);
    let next = (mid * (1.0 + drift * dt + shock)).max(MIN_MID);

    if let Some(next_mid) = Decimal::from_f64(next) {
        let digits = tick_decimals(tick_size_for(next_mid));
        let rounded = round_to(next_mid, digits);
        if rounded > Decimal::ZERO {
            market.mid = rounded;
        }
    }

    let pulse = shock.abs() * rng.gen_range(1200.0..4700.0);
    if let Some(pulse) = Decimal::from_f64(pulse) {
        market.volume_24h += round_to(pulse, 2);
    }

    market.last_ts = now;
}
