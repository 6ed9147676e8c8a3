// ============================================================================
// Simulation Clock
// Owned periodic task driving price steps and matching passes
// ============================================================================

use chrono::Utc;
use crossbeam::channel::{self, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::engine::sim::MarketSim;

/// Periodic driver of the simulation.
///
/// Fires on a fixed cadence and runs one full tick (price step, matching
/// pass, snapshot) while holding the engine lock, so a tick can never
/// interleave with a caller's placement or cancellation. Elapsed time is
/// measured per firing, so a slow or paused host does not desynchronize
/// the price process.
///
/// The clock stops deterministically on `stop()` or drop.
pub struct SimulationClock {
    paused: Arc<AtomicBool>,
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl SimulationClock {
    /// Spawn the clock thread at the given cadence.
    pub fn start(sim: Arc<Mutex<MarketSim>>, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = channel::bounded::<()>(1);
        let paused = Arc::new(AtomicBool::new(false));
        let paused_flag = Arc::clone(&paused);

        let handle = std::thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    if paused_flag.load(Ordering::Relaxed) {
                        continue;
                    }
                    sim.lock().tick(Utc::now());
                },
            }
        });

        Self {
            paused,
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Suspend ticking without tearing the thread down. The next tick
    /// after `resume()` measures the full paused interval as elapsed time.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Relaxed);
    }

    /// Resume ticking after a pause.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    /// Stop the clock and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SimConfig, TradingPair};
    use crate::persistence::MemoryStore;
    use rust_decimal::Decimal;

    fn shared_sim() -> Arc<Mutex<MarketSim>> {
        let pair = TradingPair::new("TON", "USDT", Decimal::from(100));
        let config = SimConfig::new(Decimal::from(1000))
            .with_tick_interval(Duration::from_millis(10));
        Arc::new(Mutex::new(MarketSim::restore_seeded(
            pair,
            config,
            Arc::new(MemoryStore::new()),
            "clock",
            7,
        )))
    }

    #[test]
    fn test_clock_drives_ticks() {
        let sim = shared_sim();
        let before = sim.lock().volume_24h();
        let interval = sim.lock().config().tick_interval;

        let clock = SimulationClock::start(Arc::clone(&sim), interval);
        std::thread::sleep(Duration::from_millis(120));
        clock.stop();

        // Volume only grows through ticks
        assert!(sim.lock().volume_24h() >= before);
    }

    #[test]
    fn test_pause_suspends_ticks() {
        let sim = shared_sim();
        let clock = SimulationClock::start(Arc::clone(&sim), Duration::from_millis(10));

        clock.pause();
        assert!(clock.is_paused());
        std::thread::sleep(Duration::from_millis(50));
        let ts_paused = sim.lock().tick_timestamp();
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(sim.lock().tick_timestamp(), ts_paused);

        clock.resume();
        assert!(!clock.is_paused());
        std::thread::sleep(Duration::from_millis(60));
        assert!(sim.lock().tick_timestamp() > ts_paused);
        clock.stop();
    }

    #[test]
    fn test_drop_stops_thread() {
        let sim = shared_sim();
        {
            let _clock = SimulationClock::start(Arc::clone(&sim), Duration::from_millis(10));
            std::thread::sleep(Duration::from_millis(30));
        }
        // Clock dropped; no further ticks
        let after_drop = sim.lock().tick_timestamp();
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(sim.lock().tick_timestamp(), after_drop);
    }
}
