//! Shared runner configuration.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Settings;
use crate::error::Result;
use crate::shell::TextDecoder;
use crate::sink::LogSink;

/// State shared by every executor and orchestrator of one process.
///
/// The dry-run flag may be flipped from any thread at any time; the
/// executor reads it once per step, so a run already past that check is
/// unaffected.
#[derive(Debug)]
pub struct RunnerState {
    dry_run: AtomicBool,
    sink: LogSink,
    decoder: TextDecoder,
    hide_window: bool,
}

impl RunnerState {
    pub fn new(dry_run: bool, decoder: TextDecoder) -> Self {
        Self {
            dry_run: AtomicBool::new(dry_run),
            sink: LogSink::new(),
            decoder,
            hide_window: true,
        }
    }

    /// Build the state described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if the legacy code page is unknown.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let decoder = TextDecoder::new(settings.legacy_code_page()?);
        Ok(Self::new(settings.dry_run, decoder))
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run.load(Ordering::SeqCst)
    }

    pub fn set_dry_run(&self, enabled: bool) {
        self.dry_run.store(enabled, Ordering::SeqCst);
    }

    /// The logging sink every step publishes to.
    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    pub fn decoder(&self) -> TextDecoder {
        self.decoder
    }

    /// Whether vector-mode children run without a console window.
    pub fn hide_window(&self) -> bool {
        self.hide_window
    }
}

impl Default for RunnerState {
    fn default() -> Self {
        Self::new(false, TextDecoder::default())
    }
}
