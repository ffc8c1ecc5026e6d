//! Shell command execution.
//!
//! Two modes:
//!
//! - [`execute_streaming`] runs a command line through the platform shell,
//!   merges stdout and stderr, and hands each decoded line to a callback as
//!   soon as it is read.
//! - [`execute_captured`] runs a literal argument vector without a shell and
//!   collects stdout and stderr separately once the process exits.
//!
//! Both are bounded by a timeout and observe a [`CancelToken`]; a child that
//! outlives either is terminated.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Result, TuneupError};

use super::cancel::CancelToken;
use super::decode::TextDecoder;
use super::platform::{argv_command, detect_shell, hide_window, isolate_process_group, terminate};

/// How often timeouts and cancellation are checked while a child runs.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How a command run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The process exited (exit code is `None` if killed by a signal).
    Exited(Option<i32>),
    /// The timeout elapsed and the process was terminated.
    TimedOut,
    /// Cancellation was requested and the process was terminated.
    Cancelled,
}

impl Completion {
    /// Whether the process exited with code 0.
    pub fn is_success(&self) -> bool {
        matches!(self, Completion::Exited(Some(0)))
    }
}

/// Options for command execution.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Upper bound on the whole run.
    pub timeout: Duration,

    /// Cancellation flag checked while the child runs.
    pub cancel: CancelToken,

    /// Decoder for child output.
    pub decoder: TextDecoder,

    /// Do not create a console window for the child (Windows).
    pub hide_window: bool,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(crate::recipe::DEFAULT_TIMEOUT_SECS),
            cancel: CancelToken::new(),
            decoder: TextDecoder::default(),
            hide_window: false,
        }
    }
}

/// Result of a shell-mode run.
#[derive(Debug, Clone)]
pub struct StreamedOutput {
    pub completion: Completion,

    /// Non-empty decoded lines of the merged output, in arrival order.
    pub lines: Vec<String>,

    pub duration: Duration,
}

/// Result of a vector-mode run.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub completion: Completion,

    /// Standard output (empty unless the process exited).
    pub stdout: String,

    /// Standard error (empty unless the process exited).
    pub stderr: String,

    pub duration: Duration,
}

/// Execute a command line through the shell, streaming merged output.
///
/// `on_line` receives every non-empty decoded line while the child is still
/// running.
///
/// # Errors
///
/// Returns `SpawnFailed` if the shell cannot be started and `Io` if the
/// child's status cannot be queried. Timeouts, cancellation and nonzero
/// exits are reported through [`Completion`].
pub fn execute_streaming(
    command: &str,
    options: &CommandOptions,
    on_line: &mut dyn FnMut(&str),
) -> Result<StreamedOutput> {
    let start = Instant::now();
    let deadline = start + options.timeout;

    // One pipe for both streams keeps their relative order.
    let (reader, writer) = io::pipe()?;

    let mut cmd = detect_shell().command(command);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::from(writer.try_clone()?));
    cmd.stderr(Stdio::from(writer));
    isolate_process_group(&mut cmd);
    if options.hide_window {
        hide_window(&mut cmd);
    }

    let spawned = cmd.spawn();
    // The command still holds the parent's write ends; EOF needs them closed.
    drop(cmd);
    let mut child = spawned.map_err(|source| TuneupError::SpawnFailed {
        command: command.to_string(),
        source,
    })?;

    let (tx, rx) = mpsc::channel();
    spawn_line_reader(reader, tx);

    let mut lines = Vec::new();
    let mut streaming = true;

    let completion = loop {
        if let Some(cutoff) = cutoff(&options.cancel, deadline) {
            terminate(&mut child);
            break cutoff;
        }
        let wait = deadline
            .saturating_duration_since(Instant::now())
            .min(POLL_INTERVAL);

        if streaming {
            match rx.recv_timeout(wait) {
                Ok(raw) => {
                    let line = options.decoder.decode_line(&raw);
                    if !line.is_empty() {
                        on_line(&line);
                        lines.push(line);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => streaming = false,
            }
        } else if let Some(status) = try_wait(&mut child)? {
            break Completion::Exited(status);
        } else {
            thread::sleep(wait);
        }
    };

    Ok(StreamedOutput {
        completion,
        lines,
        duration: start.elapsed(),
    })
}

/// Execute a literal argument vector without a shell.
///
/// Output is collected when the process exits; stdout and stderr are kept
/// apart.
///
/// # Errors
///
/// Returns `InvalidStep` for an empty vector, `SpawnFailed` if the program
/// cannot be started.
pub fn execute_captured(args: &[String], options: &CommandOptions) -> Result<CapturedOutput> {
    let start = Instant::now();
    let deadline = start + options.timeout;

    let mut cmd = argv_command(args).ok_or_else(|| TuneupError::InvalidStep {
        message: "argument vector is empty".to_string(),
    })?;
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    isolate_process_group(&mut cmd);
    if options.hide_window {
        hide_window(&mut cmd);
    }

    let mut child = cmd.spawn().map_err(|source| TuneupError::SpawnFailed {
        command: args.join(" "),
        source,
    })?;

    let stdout = child.stdout.take().map(spawn_collector);
    let stderr = child.stderr.take().map(spawn_collector);

    let completion = loop {
        if let Some(cutoff) = cutoff(&options.cancel, deadline) {
            terminate(&mut child);
            break cutoff;
        }
        if let Some(status) = try_wait(&mut child)? {
            break Completion::Exited(status);
        }
        let wait = deadline
            .saturating_duration_since(Instant::now())
            .min(POLL_INTERVAL);
        thread::sleep(wait);
    };

    // Collector threads of a terminated child are left to finish on their own.
    let (stdout, stderr) = match completion {
        Completion::Exited(_) => (
            join_collector(stdout, &options.decoder),
            join_collector(stderr, &options.decoder),
        ),
        Completion::TimedOut | Completion::Cancelled => (String::new(), String::new()),
    };

    Ok(CapturedOutput {
        completion,
        stdout,
        stderr,
        duration: start.elapsed(),
    })
}

fn cutoff(cancel: &CancelToken, deadline: Instant) -> Option<Completion> {
    if cancel.is_cancelled() {
        Some(Completion::Cancelled)
    } else if Instant::now() >= deadline {
        Some(Completion::TimedOut)
    } else {
        None
    }
}

/// Poll the child; a child whose status cannot be read is terminated.
fn try_wait(child: &mut Child) -> Result<Option<Option<i32>>> {
    match child.try_wait() {
        Ok(status) => Ok(status.map(|s| s.code())),
        Err(e) => {
            terminate(child);
            Err(e.into())
        }
    }
}

fn spawn_line_reader<R: Read + Send + 'static>(source: R, tx: Sender<Vec<u8>>) {
    thread::spawn(move || {
        let mut reader = BufReader::new(source);
        let mut buf = Vec::new();
        loop {
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if tx.send(std::mem::take(&mut buf)).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

fn spawn_collector<R: Read + Send + 'static>(mut source: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = source.read_to_end(&mut buf);
        buf
    })
}

fn join_collector(handle: Option<JoinHandle<Vec<u8>>>, decoder: &TextDecoder) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| decoder.decode(&bytes))
        .unwrap_or_default()
}
