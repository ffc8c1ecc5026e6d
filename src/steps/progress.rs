//! Progress callbacks.

/// Lightweight synchronous receiver for status text.
///
/// Separate from the [`LogSink`](crate::sink::LogSink): progress text is
/// meant for a single status line and is not recorded.
pub trait ProgressSink: Send + Sync {
    fn report(&self, text: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, text: &str) {
        self(text)
    }
}
