//! Background refresh for the live dashboard.
//!
//! One thread drives three schedules (positions, radio, race control) and
//! sends the generated events over a channel. The thread's lifetime is
//! bound to the [`Ticker`] handle: dropping the handle signals the thread
//! and joins it, so no event is produced after the view is gone.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use rand::Rng;

use super::LiveEvent;
use super::mock::MockFeed;
use crate::config::schema::LiveConfig;

/// Refresh intervals of the three feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub positions: Duration,
    pub radio: Duration,
    pub updates: Duration,
}

impl Schedule {
    /// Intervals from `[live]`. Zero is raised to 1 ms so the loop never
    /// spins.
    pub fn from_config(live: &LiveConfig) -> Self {
        let ms = |v: u64| Duration::from_millis(v.max(1));
        Self {
            positions: ms(live.positions_ms),
            radio: ms(live.radio_ms),
            updates: ms(live.updates_ms),
        }
    }
}

/// Handle to the refresh thread.
#[derive(Debug)]
pub struct Ticker {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start the thread. Events arrive on the returned receiver, which
    /// reports `Disconnected` once the thread has exited.
    pub fn spawn<R>(schedule: Schedule, feed: MockFeed<R>) -> Result<(Self, Receiver<LiveEvent>)>
    where
        R: Rng + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("pitwall-live".into())
            .spawn(move || run(schedule, feed, &stop_rx, &event_tx))
            .context("Failed to spawn live refresh thread")?;

        Ok((
            Self {
                stop_tx: Some(stop_tx),
                handle: Some(handle),
            },
            event_rx,
        ))
    }

    /// Stop the thread and wait for it. Same as dropping the handle.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        // Dropping the sender wakes the thread with `Disconnected`.
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run<R: Rng>(
    schedule: Schedule,
    mut feed: MockFeed<R>,
    stop_rx: &Receiver<()>,
    event_tx: &Sender<LiveEvent>,
) {
    let start = Instant::now();
    let mut next_positions = start + schedule.positions;
    let mut next_radio = start + schedule.radio;
    let mut next_update = start + schedule.updates;

    loop {
        let due = next_positions.min(next_radio).min(next_update);
        let wait = due.saturating_duration_since(Instant::now());

        match stop_rx.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }

        let now = Instant::now();
        let mut events = Vec::new();
        if now >= next_positions {
            events.push(LiveEvent::Frame(feed.frame(Utc::now())));
            next_positions = advance(next_positions, schedule.positions, now);
        }
        if now >= next_radio {
            events.push(LiveEvent::Radio(feed.radio(Utc::now())));
            next_radio = advance(next_radio, schedule.radio, now);
        }
        if now >= next_update {
            events.push(LiveEvent::Update(feed.race_update(Utc::now())));
            next_update = advance(next_update, schedule.updates, now);
        }

        for event in events {
            if event_tx.send(event).is_err() {
                return;
            }
        }
    }
}

/// Next deadline after `now`, skipping ticks missed while busy.
fn advance(deadline: Instant, interval: Duration, now: Instant) -> Instant {
    let mut next = deadline + interval;
    while next <= now {
        next += interval;
    }
    next
}
