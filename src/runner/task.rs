//! Worker tasks for user actions.

use std::thread::{self, JoinHandle};

use crate::error::{Result, TuneupError};
use crate::shell::CancelToken;

/// A user action running on its own worker thread.
///
/// Dropping the task detaches the worker; it keeps running until its
/// action finishes.
#[derive(Debug)]
pub struct ActionTask<T> {
    name: String,
    cancel: CancelToken,
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> ActionTask<T> {
    /// Start `work` on a named worker thread.
    ///
    /// The closure receives the task's cancellation token.
    ///
    /// # Errors
    ///
    /// Returns `ActionFailed` if the thread cannot be created.
    pub fn spawn<F>(name: impl Into<String>, work: F) -> Result<Self>
    where
        F: FnOnce(CancelToken) -> T + Send + 'static,
    {
        let name = name.into();
        let cancel = CancelToken::new();
        let token = cancel.clone();

        let handle = thread::Builder::new()
            .name(format!("tuneup-{}", name))
            .spawn(move || work(token))
            .map_err(|e| TuneupError::ActionFailed {
                action: name.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            name,
            cancel,
            handle,
        })
    }
}

impl<T> ActionTask<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ask the running action to stop.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the action to finish.
    ///
    /// # Errors
    ///
    /// Returns `ActionFailed` if the worker panicked.
    pub fn join(self) -> Result<T> {
        let name = self.name;
        self.handle.join().map_err(|_| TuneupError::ActionFailed {
            action: name,
            message: "worker panicked".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn join_returns_value() {
        let task = ActionTask::spawn("answer", |_| 42).unwrap();
        assert_eq!(task.name(), "answer");
        assert_eq!(task.join().unwrap(), 42);
    }

    #[test]
    fn cancel_reaches_worker() {
        let task = ActionTask::spawn("wait", |cancel: CancelToken| {
            while !cancel.is_cancelled() {
                std::thread::sleep(Duration::from_millis(5));
            }
            "stopped"
        })
        .unwrap();
        task.cancel();
        assert_eq!(task.join().unwrap(), "stopped");
    }

    #[test]
    fn panicking_worker_is_action_failed() {
        let task = ActionTask::<()>::spawn("boom", |_| panic!("boom")).unwrap();
        let err = task.join().unwrap_err();
        assert!(matches!(err, TuneupError::ActionFailed { .. }));
    }

    #[test]
    fn worker_thread_is_named() {
        let task = ActionTask::spawn("named", |_| {
            std::thread::current().name().map(str::to_string)
        })
        .unwrap();
        assert_eq!(task.join().unwrap().as_deref(), Some("tuneup-named"));
    }
}
