//! Once-per-second clock ticker bound to a single timezone
//!
//! One ticker owns one task. Retargeting aborts that task before a new one
//! starts, and dropping the ticker aborts it too, so a screen never leaks a
//! timer per location change.

use crate::clock::{local_now, LocalTime};
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

type TickFn = Arc<dyn Fn(LocalTime) -> bool + Send + Sync>;

pub struct ClockTicker {
    zone: Tz,
    on_tick: TickFn,
    handle: JoinHandle<()>,
}

impl ClockTicker {
    /// Start ticking in `zone`.
    ///
    /// `on_tick` runs immediately and then once per second. Returning
    /// `false` stops the ticker.
    pub fn spawn<F>(zone: Tz, on_tick: F) -> Self
    where
        F: Fn(LocalTime) -> bool + Send + Sync + 'static,
    {
        let on_tick: TickFn = Arc::new(on_tick);
        let handle = Self::start(zone, on_tick.clone());
        Self {
            zone,
            on_tick,
            handle,
        }
    }

    fn start(zone: Tz, on_tick: TickFn) -> JoinHandle<()> {
        debug!(zone = zone.name(), "starting clock ticker");
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if !on_tick(local_now(zone)) {
                    break;
                }
            }
        })
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancel the current timer and start a fresh one in `zone`
    pub fn retarget(&mut self, zone: Tz) {
        if zone == self.zone && self.is_running() {
            return;
        }
        self.handle.abort();
        self.zone = zone;
        self.handle = Self::start(zone, self.on_tick.clone());
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn ticks_in_selected_zone() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _ticker = ClockTicker::spawn(chrono_tz::Asia::Tokyo, move |t| tx.send(t).is_ok());

        for _ in 0..3 {
            let t = rx.recv().await.unwrap();
            assert_eq!(t.zone, chrono_tz::Asia::Tokyo);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retarget_replaces_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = ClockTicker::spawn(chrono_tz::UTC, move |t| tx.send(t.zone).is_ok());

        assert_eq!(rx.recv().await, Some(chrono_tz::UTC));
        ticker.retarget(chrono_tz::Europe::Paris);
        assert_eq!(ticker.zone(), chrono_tz::Europe::Paris);
        while rx.try_recv().is_ok() {}

        for _ in 0..4 {
            assert_eq!(rx.recv().await, Some(chrono_tz::Europe::Paris));
        }
        assert!(ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = ClockTicker::spawn(chrono_tz::UTC, move |t| tx.send(t).is_ok());
        assert!(rx.recv().await.is_some());

        drop(ticker);
        while rx.recv().await.is_some() {}
    }

    #[tokio::test(start_paused = true)]
    async fn callback_can_stop_ticker() {
        let ticker = ClockTicker::spawn(chrono_tz::UTC, |_| false);
        tokio::time::sleep(TICK_PERIOD * 2).await;
        assert!(!ticker.is_running());
    }
}
