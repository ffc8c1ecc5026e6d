//! Child process execution: shell and argument-vector modes, output
//! decoding, and cancellation.

pub mod cancel;
pub mod command;
pub mod decode;
pub mod platform;

pub use cancel::CancelToken;
pub use command::{
    execute_captured, execute_streaming, CapturedOutput, CommandOptions, Completion,
    StreamedOutput,
};
pub use decode::{LegacyCodePage, TextDecoder};
pub use platform::{detect_shell, is_ci, is_elevated, ShellInfo, ShellType};
