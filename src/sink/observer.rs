//! Log observers.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use super::filter::NoiseFilter;

/// Receives console lines published to a [`LogSink`](super::LogSink).
///
/// Called from arbitrary worker threads.
pub trait LogObserver: Send + Sync {
    fn publish(&self, message: &str);
}

/// Forwards lines over a channel to the thread that owns the console.
#[derive(Debug)]
pub struct ChannelObserver {
    tx: Sender<String>,
}

impl ChannelObserver {
    /// Create the observer and the receiving end for the console thread.
    pub fn new() -> (Self, Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl LogObserver for ChannelObserver {
    fn publish(&self, message: &str) {
        // The console may already be gone during shutdown.
        let _ = self.tx.send(message.to_string());
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    lines: Mutex<Vec<String>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines received so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether any received line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|l| l.contains(needle))
    }
}

impl LogObserver for CollectingObserver {
    fn publish(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}

/// Drops noisy lines before they reach the wrapped observer.
///
/// Only presentation is affected; the durable log still records every line.
#[derive(Debug)]
pub struct FilteredObserver<O> {
    inner: O,
    filter: NoiseFilter,
}

impl<O: LogObserver> FilteredObserver<O> {
    pub fn new(inner: O, filter: NoiseFilter) -> Self {
        Self { inner, filter }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<O: LogObserver> LogObserver for FilteredObserver<O> {
    fn publish(&self, message: &str) {
        if !self.filter.is_noise(message) {
            self.inner.publish(message);
        }
    }
}
