//! Simulated live timing.
//!
//! - [`mock`]: placeholder data generator
//! - [`ticker`]: background refresh thread with strict teardown
//!
//! [`LiveDashboard`] is the view state. It only changes through
//! [`LiveDashboard::apply`], called on the foreground thread with events
//! received from the ticker.

pub mod mock;
pub mod ticker;

use std::collections::VecDeque;

use mock::{LiveFrame, RaceUpdate, RadioMessage};

/// One refresh produced by the ticker.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent {
    Frame(LiveFrame),
    Radio(RadioMessage),
    Update(RaceUpdate),
}

/// State of the live dashboard.
#[derive(Debug, Clone)]
pub struct LiveDashboard {
    frame: Option<LiveFrame>,
    radio: VecDeque<RadioMessage>,
    updates: VecDeque<RaceUpdate>,
    feed_len: usize,
    connected: bool,
}

impl LiveDashboard {
    /// Empty dashboard keeping at most `feed_len` radio messages and race
    /// control updates each.
    pub fn new(feed_len: usize) -> Self {
        Self {
            frame: None,
            radio: VecDeque::with_capacity(feed_len),
            updates: VecDeque::with_capacity(feed_len),
            feed_len,
            connected: true,
        }
    }

    pub fn apply(&mut self, event: LiveEvent) {
        match event {
            LiveEvent::Frame(frame) => self.frame = Some(frame),
            LiveEvent::Radio(message) => push_newest(&mut self.radio, message, self.feed_len),
            LiveEvent::Update(update) => push_newest(&mut self.updates, update, self.feed_len),
        }
    }

    /// Latest positions frame; `None` until the first refresh arrives.
    pub fn frame(&self) -> Option<&LiveFrame> {
        self.frame.as_ref()
    }

    /// Radio messages, newest first.
    pub fn radio(&self) -> impl Iterator<Item = &RadioMessage> {
        self.radio.iter()
    }

    /// Race control updates, newest first.
    pub fn updates(&self) -> impl Iterator<Item = &RaceUpdate> {
        self.updates.iter()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Mark the feed as closed once the ticker has stopped.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }
}

fn push_newest<T>(feed: &mut VecDeque<T>, item: T, cap: usize) {
    if cap == 0 {
        return;
    }
    feed.push_front(item);
    feed.truncate(cap);
}
