//! Platform-specific shell selection and process control.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

/// `CREATE_NO_WINDOW` process creation flag.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Known shell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Sh,
    Bash,
    PowerShell,
    Cmd,
    Unknown,
}

impl ShellType {
    /// Parse shell type from executable name.
    pub fn from_executable(exe: &str) -> Self {
        let name = Path::new(exe)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "sh" | "dash" => ShellType::Sh,
            "bash" => ShellType::Bash,
            "powershell" | "pwsh" => ShellType::PowerShell,
            "cmd" => ShellType::Cmd,
            _ => ShellType::Unknown,
        }
    }

    /// Flag that makes the shell run the next argument as a command line.
    pub fn command_flag(&self) -> &'static str {
        match self {
            ShellType::Cmd => "/C",
            ShellType::PowerShell => "-Command",
            ShellType::Sh | ShellType::Bash | ShellType::Unknown => "-c",
        }
    }
}

/// The shell used for shell-mode steps.
#[derive(Debug, Clone)]
pub struct ShellInfo {
    /// Shell executable path.
    pub executable: PathBuf,

    /// Shell kind.
    pub kind: ShellType,
}

impl ShellInfo {
    /// Build a `Command` that runs `command_line` through this shell.
    pub fn command(&self, command_line: &str) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg(self.kind.command_flag());
        cmd.arg(command_line);
        cmd
    }
}

/// Detect the shell used for shell-mode steps.
///
/// `COMSPEC` (default `cmd.exe`) on Windows, `/bin/sh` elsewhere. The
/// user's login shell is not used so recipes behave the same for everyone.
pub fn detect_shell() -> ShellInfo {
    let executable = if cfg!(target_os = "windows") {
        std::env::var_os("COMSPEC")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("cmd.exe"))
    } else {
        PathBuf::from("/bin/sh")
    };
    let kind = ShellType::from_executable(&executable.to_string_lossy());

    ShellInfo { executable, kind }
}

/// Build a `Command` for a literal argument vector.
///
/// Returns `None` for an empty vector.
pub fn argv_command(args: &[String]) -> Option<Command> {
    let (program, rest) = args.split_first()?;
    let mut cmd = Command::new(OsString::from(program));
    cmd.args(rest);
    Some(cmd)
}

/// Ask the host not to create a console window for the child.
pub fn hide_window(cmd: &mut Command) {
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    #[cfg(not(windows))]
    {
        let _ = cmd;
    }
}

/// Put the child in its own process group so the whole tree can be
/// terminated together.
pub fn isolate_process_group(cmd: &mut Command) {
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    #[cfg(not(unix))]
    {
        let _ = cmd;
    }
}

/// Terminate a child (and its process group on Unix) and reap it.
pub fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pid) = libc::pid_t::try_from(child.id()) {
            // SAFETY: kill() only sends a signal; a negative pid targets the
            // process group created by isolate_process_group.
            unsafe {
                libc::kill(-pid, libc::SIGKILL);
            }
        }
    }

    let _ = child.kill();
    let _ = child.wait();
}

/// Check if running in a CI environment.
///
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root/admin.
///
/// Most maintenance recipes need an elevated process.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        // `net session` only succeeds from an elevated prompt.
        let mut cmd = Command::new("net");
        cmd.arg("session")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null());
        hide_window(&mut cmd);
        cmd.status().map(|s| s.success()).unwrap_or(false)
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}
