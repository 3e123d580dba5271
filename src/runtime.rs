//! Tokio-backed once-per-second ticker for the snap-back countdown.
//!
//! Purely a host convenience: the scheduler itself is tick-driven and
//! runtime-agnostic. Ticks are delivered over a channel and drained on the
//! host loop, which calls `LockWidget::on_tick` per tick; stopping the
//! ticker and canceling the countdown are independent, which is fine
//! because a late tick against a canceled countdown is already a no-op.

use crossbeam_channel::{unbounded, Receiver, Sender};
use instant::{Duration, Instant};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// A tick carries the instant it fired, mostly for diagnostics
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    pub at: Instant,
}

pub struct CountdownTicker {
    tick_rx: Receiver<Tick>,
    shutdown: Arc<AtomicBool>,
}

impl CountdownTicker {
    /// Spawn a ticking task on the current tokio runtime
    pub fn start(period: Duration) -> Self {
        let (tick_tx, tick_rx): (Sender<Tick>, Receiver<Tick>) = unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = shutdown.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // First interval tick fires immediately; swallow it
            interval.tick().await;

            loop {
                interval.tick().await;
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                if tick_tx.send(Tick { at: Instant::now() }).is_err() {
                    break;
                }
            }
        });

        Self { tick_rx, shutdown }
    }

    /// One-second ticker, matching the countdown's unit
    pub fn per_second() -> Self {
        Self::start(Duration::from_secs(1))
    }

    /// Drain ticks delivered since the last call
    pub fn drain(&self) -> Vec<Tick> {
        self.tick_rx.try_iter().collect()
    }

    /// Receiver for hosts that prefer to select on it directly
    pub fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Stop the ticking task
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
