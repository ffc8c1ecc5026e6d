//! Step execution.
//!
//! [`StepExecutor`] runs one [`Step`] and always returns an
//! [`ExecutionResult`]: timeouts, nonzero exits, spawn failures and
//! cancellation are reported through the result and the logging sink, never
//! as errors.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::recipe::Step;
use crate::runner::RunnerState;
use crate::shell::{
    execute_captured, execute_streaming, CancelToken, CommandOptions, Completion,
};
use crate::steps::progress::ProgressSink;
use crate::steps::result::ExecutionResult;

/// Runs steps against the host, honoring the shared dry-run flag.
#[derive(Debug, Clone)]
pub struct StepExecutor {
    state: Arc<RunnerState>,
}

impl StepExecutor {
    pub fn new(state: Arc<RunnerState>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &Arc<RunnerState> {
        &self.state
    }

    /// Execute a step in shell mode.
    pub fn execute(&self, step: &Step, progress: Option<&dyn ProgressSink>) -> ExecutionResult {
        self.execute_with_cancel(step, progress, &CancelToken::new())
    }

    /// Execute a step in shell mode, stopping early if `cancel` is set.
    ///
    /// Publishes, in order: `EXEC: <display text>`, then either
    /// `[DRY] <command>` or `CMD: <command>` followed by every output line
    /// and one of `SUCCESS`, `FAILED (Code n)`, `TIMEOUT`, `CANCELLED` or
    /// `ERROR: <text>`.
    pub fn execute_with_cancel(
        &self,
        step: &Step,
        progress: Option<&dyn ProgressSink>,
        cancel: &CancelToken,
    ) -> ExecutionResult {
        let sink = self.state.sink();
        let display = step.display_text();

        if let Some(progress) = progress {
            progress.report(&display);
        }
        sink.publish(format!("EXEC: {}", display));

        let command = step.command().to_shell_string();

        // Read on every call; the flag may change between steps.
        if self.state.dry_run() {
            sink.publish(format!("[DRY] {}", command));
            return ExecutionResult::dry_run();
        }

        sink.publish(format!("CMD: {}", command));
        debug!(tag = step.tag(), timeout = step.timeout_secs(), "Spawning shell step");

        let options = CommandOptions {
            timeout: step.timeout(),
            cancel: cancel.clone(),
            decoder: self.state.decoder(),
            hide_window: false,
        };

        let start = Instant::now();
        let outcome = execute_streaming(&command, &options, &mut |line| sink.publish(line));

        match outcome {
            Ok(out) => match out.completion {
                Completion::Exited(code) => {
                    let output = out.lines.join("\n");
                    if code == Some(0) {
                        sink.publish("SUCCESS");
                        ExecutionResult::succeeded(output, out.duration)
                    } else {
                        sink.publish(format!("FAILED (Code {})", code.unwrap_or(-1)));
                        ExecutionResult::failed(code, output, out.duration)
                    }
                }
                Completion::TimedOut => {
                    sink.publish("TIMEOUT");
                    ExecutionResult::timed_out(out.duration)
                }
                Completion::Cancelled => {
                    sink.publish("CANCELLED");
                    ExecutionResult::cancelled(out.duration)
                }
            },
            Err(e) => {
                sink.publish(format!("ERROR: {}", e));
                ExecutionResult::spawn_error(e.to_string(), start.elapsed())
            }
        }
    }

    /// Execute a literal argument vector without a shell.
    ///
    /// Output is captured when the process exits; the result carries stdout
    /// on success and stderr on failure. The child gets no console window.
    pub fn execute_native(
        &self,
        args: &[String],
        timeout: Duration,
        cancel: &CancelToken,
    ) -> ExecutionResult {
        let sink = self.state.sink();
        let joined = args.join(" ");

        if self.state.dry_run() {
            sink.publish(format!("[DRY] {}", joined));
            return ExecutionResult::dry_run();
        }

        sink.publish(format!("CMD (Native): {}", joined));

        let options = CommandOptions {
            timeout,
            cancel: cancel.clone(),
            decoder: self.state.decoder(),
            hide_window: self.state.hide_window(),
        };

        let start = Instant::now();
        match execute_captured(args, &options) {
            Ok(out) => match out.completion {
                Completion::Exited(Some(0)) => {
                    sink.publish("SUCCESS");
                    self.publish_block(&out.stdout);
                    ExecutionResult::succeeded(out.stdout, out.duration)
                }
                Completion::Exited(code) => {
                    sink.publish(format!("FAILED (Code {})", code.unwrap_or(-1)));
                    self.publish_block(&out.stderr);
                    ExecutionResult::failed(code, out.stderr, out.duration)
                }
                Completion::TimedOut => {
                    sink.publish("TIMEOUT");
                    ExecutionResult::timed_out(out.duration)
                }
                Completion::Cancelled => {
                    sink.publish("CANCELLED");
                    ExecutionResult::cancelled(out.duration)
                }
            },
            Err(e) => {
                sink.publish(format!("ERROR: {}", e));
                ExecutionResult::spawn_error(e.to_string(), start.elapsed())
            }
        }
    }

    fn publish_block(&self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.state.sink().publish(text);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::StepCommand;
    use crate::sink::CollectingObserver;
    use crate::steps::ExecutionStatus;
    use std::sync::Mutex;

    fn executor(dry_run: bool) -> (StepExecutor, Arc<CollectingObserver>) {
        let state = Arc::new(RunnerState::default());
        state.set_dry_run(dry_run);
        let observer = Arc::new(CollectingObserver::new());
        state.sink().attach(observer.clone());
        (StepExecutor::new(state), observer)
    }

    #[test]
    fn echo_succeeds_with_output() {
        let (exec, log) = executor(false);
        let step = Step::shell("echo hello").unwrap();
        let result = exec.execute(&step, None);
        assert!(result.success);
        assert!(result.output.contains("hello"));
        assert_eq!(result.status, ExecutionStatus::Succeeded);
        assert!(log.contains("SUCCESS"));
        assert!(log.contains("CMD: echo hello"));
    }

    #[cfg(unix)]
    #[test]
    fn legacy_code_page_output_is_decoded() {
        let (exec, log) = executor(false);
        let step = Step::shell(r"printf '\232berpr\201fung\n'").unwrap();
        let result = exec.execute(&step, None);
        assert!(result.success);
        assert_eq!(result.output, "Überprüfung");
        assert!(log.contains("Überprüfung"));
    }

    #[test]
    fn nonzero_exit_keeps_output() {
        let (exec, log) = executor(false);
        let cmd = if cfg!(target_os = "windows") {
            "echo partial && exit 3"
        } else {
            "echo partial; exit 3"
        };
        let result = exec.execute(&Step::shell(cmd).unwrap(), None);
        assert!(!result.success);
        assert_eq!(result.output, "partial");
        assert_eq!(result.status, ExecutionStatus::Failed { code: Some(3) });
        assert!(log.contains("FAILED (Code 3)"));
    }

    #[test]
    fn dry_run_spawns_nothing() {
        let (exec, log) = executor(true);
        let marker = std::env::temp_dir().join("tuneup-dry-run-marker");
        let _ = std::fs::remove_file(&marker);
        let step = Step::shell(format!("echo x > {}", marker.display())).unwrap();
        let result = exec.execute(&step, None);
        assert_eq!(result, ExecutionResult::dry_run());
        assert!(!marker.exists());
        assert!(log.lines().iter().any(|l| l.starts_with("[DRY] echo x")));
        assert!(!log.lines().iter().any(|l| l.starts_with("CMD:")));
    }

    #[test]
    fn dry_run_flag_is_read_per_call() {
        let (exec, _) = executor(true);
        let step = Step::shell("echo live").unwrap();
        assert_eq!(exec.execute(&step, None).status, ExecutionStatus::DryRun);
        exec.state().set_dry_run(false);
        assert_eq!(exec.execute(&step, None).status, ExecutionStatus::Succeeded);
    }

    #[test]
    fn exec_line_uses_display_text() {
        let (exec, log) = executor(true);
        let step = Step::shell("ipconfig /flushdns")
            .unwrap()
            .with_tag("no_such_tag");
        exec.execute(&step, None);
        assert_eq!(log.lines()[0], "EXEC: Running action: no_such_tag");
    }

    #[test]
    fn progress_receives_display_text() {
        let (exec, _) = executor(true);
        let seen = Mutex::new(Vec::new());
        let progress = |text: &str| seen.lock().unwrap().push(text.to_string());
        let step = Step::shell("echo hi").unwrap().with_friendly("Saying hi");
        exec.execute(&step, Some(&progress));
        assert_eq!(*seen.lock().unwrap(), vec!["Saying hi".to_string()]);
    }

    #[test]
    fn argv_step_is_joined_for_the_shell() {
        let (exec, log) = executor(false);
        let step = Step::new(StepCommand::Argv(vec!["echo".into(), "joined".into()])).unwrap();
        let result = exec.execute(&step, None);
        assert!(result.success);
        assert!(log.contains("CMD: echo joined"));
        assert_eq!(result.output, "joined");
    }

    #[cfg(unix)]
    #[test]
    fn timeout_returns_fixed_message() {
        let (exec, log) = executor(false);
        let step = Step::shell("sleep 10").unwrap().with_timeout(1).unwrap();
        let start = Instant::now();
        let result = exec.execute(&step, None);
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(result.output, "Command timed out");
        assert_eq!(result.status, ExecutionStatus::TimedOut);
        assert!(log.contains("TIMEOUT"));
    }

    #[cfg(unix)]
    #[test]
    fn cancelled_step_stops_early() {
        let (exec, log) = executor(false);
        let step = Step::shell("sleep 10").unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = exec.execute_with_cancel(&step, None, &cancel);
        assert!(result.is_cancelled());
        assert_eq!(result.output, "Command cancelled");
        assert!(log.contains("CANCELLED"));
    }

    #[test]
    fn native_success_returns_stdout() {
        let (exec, log) = executor(false);
        let args: Vec<String> = if cfg!(target_os = "windows") {
            vec!["cmd".into(), "/C".into(), "echo native".into()]
        } else {
            vec!["echo".into(), "native".into()]
        };
        let result = exec.execute_native(&args, Duration::from_secs(10), &CancelToken::new());
        assert!(result.success);
        assert!(result.output.contains("native"));
        assert!(log.lines().iter().any(|l| l.starts_with("CMD (Native): ")));
    }

    #[cfg(unix)]
    #[test]
    fn native_failure_returns_stderr() {
        let (exec, log) = executor(false);
        let args = vec!["sh".into(), "-c".into(), "echo out; echo bad >&2; exit 4".into()];
        let result = exec.execute_native(&args, Duration::from_secs(10), &CancelToken::new());
        assert!(!result.success);
        assert_eq!(result.output.trim(), "bad");
        assert!(log.contains("FAILED (Code 4)"));
    }

    #[test]
    fn native_spawn_error_is_a_result() {
        let (exec, log) = executor(false);
        let args = vec!["tuneup-definitely-missing-binary".to_string()];
        let result = exec.execute_native(&args, Duration::from_secs(10), &CancelToken::new());
        assert!(!result.success);
        assert_eq!(result.status, ExecutionStatus::SpawnError);
        assert!(log.lines().iter().any(|l| l.starts_with("ERROR: ")));
    }

    #[test]
    fn native_dry_run() {
        let (exec, log) = executor(true);
        let args = vec!["winget".to_string(), "install".to_string()];
        let result = exec.execute_native(&args, Duration::from_secs(1), &CancelToken::new());
        assert_eq!(result.output, "Dry run");
        assert!(log.contains("[DRY] winget install"));
    }
}
