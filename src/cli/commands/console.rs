//! Drives one engine action while echoing its console log.
//!
//! The action runs on a worker thread. This thread owns the terminal: it
//! receives published lines over a channel and hands them to the UI until
//! the worker finishes.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::engine::{Action, ActionOutcome, Engine};
use crate::error::Result;
use crate::sink::{ChannelObserver, FilteredObserver};
use crate::ui::UserInterface;

/// How long to wait for a line before checking whether the worker is done.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run `action` on a worker and pump its log lines into `ui`.
///
/// The spinner shows the action's progress text and finishes with
/// `done` or an error mark depending on the outcome.
pub fn run_action(
    engine: &Arc<Engine>,
    ui: &mut dyn UserInterface,
    action: Action,
    label: &str,
) -> Result<ActionOutcome> {
    let filter = engine.settings().noise_filter()?;
    let (observer, rx) = ChannelObserver::new();
    engine
        .sink()
        .attach(Arc::new(FilteredObserver::new(observer, filter)));

    let mut spinner = ui.start_spinner(label);
    let task = match engine.spawn(action, Some(spinner.progress_sink())) {
        Ok(task) => task,
        Err(e) => {
            engine.sink().detach();
            spinner.finish_error(label);
            return Err(e);
        }
    };

    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(line) => ui.log_line(&line),
            Err(_) if task.is_finished() => break,
            Err(_) => {}
        }
    }
    // Lines published just before the worker exited.
    for line in rx.try_iter() {
        ui.log_line(&line);
    }

    debug!("Worker {} finished", task.name());
    let joined = task.join();
    engine.sink().detach();

    match joined.and_then(|outcome| outcome) {
        Ok(outcome) => {
            if outcome.success() {
                spinner.finish_success(label);
            } else {
                spinner.finish_error(label);
            }
            Ok(outcome)
        }
        Err(e) => {
            spinner.finish_error(label);
            Err(e)
        }
    }
}
