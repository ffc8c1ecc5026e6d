//! Process-wide log sink.
//!
//! The executor and orchestrator publish every console line to a
//! [`LogSink`]. Each publication is recorded as a `tracing` event (the
//! durable log written by the subscriber installed in `main`) and then
//! handed to at most one attached [`LogObserver`].
//!
//! Observers are called on the publishing thread. An observer that owns
//! thread-affine state forwards the line to its own thread, as
//! [`ChannelObserver`] does; observers must not block.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tuneup::sink::{CollectingObserver, LogSink};
//!
//! let sink = LogSink::new();
//! let observer = Arc::new(CollectingObserver::new());
//! sink.attach(observer.clone());
//! sink.publish("EXEC: Flushing DNS cache to fix network issues.");
//! assert_eq!(observer.lines().len(), 1);
//! ```

pub mod filter;
pub mod observer;

use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::{error, info};

pub use filter::NoiseFilter;
pub use observer::{ChannelObserver, CollectingObserver, FilteredObserver, LogObserver};

/// Target of the `tracing` events that mirror published console lines.
pub const CONSOLE_TARGET: &str = "tuneup::console";

/// Append-only, thread-safe console log.
#[derive(Default)]
pub struct LogSink {
    observer: RwLock<Option<Arc<dyn LogObserver>>>,
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("has_observer", &self.has_observer())
            .finish()
    }
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `observer`, returning the one it replaces.
    ///
    /// Attach before starting workers so no early line is missed.
    pub fn attach(&self, observer: Arc<dyn LogObserver>) -> Option<Arc<dyn LogObserver>> {
        let mut slot = self.observer.write().unwrap_or_else(|e| e.into_inner());
        slot.replace(observer)
    }

    /// Detach the current observer.
    pub fn detach(&self) -> Option<Arc<dyn LogObserver>> {
        let mut slot = self.observer.write().unwrap_or_else(|e| e.into_inner());
        slot.take()
    }

    pub fn has_observer(&self) -> bool {
        self.observer
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Publish a console line.
    pub fn publish(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        info!(target: CONSOLE_TARGET, "{}", message);
        self.notify(message);
    }

    /// Publish a console line recorded at error level.
    pub fn publish_error(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        error!(target: CONSOLE_TARGET, "{}", message);
        self.notify(message);
    }

    fn notify(&self, message: &str) {
        // Clone out of the lock so a slow observer never holds it.
        let observer = self
            .observer
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(observer) = observer {
            observer.publish(message);
        }
    }
}
