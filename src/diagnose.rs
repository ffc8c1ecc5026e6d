//! System diagnostics: hardware overview, memory-heavy processes and
//! startup items.
//!
//! The overview and process views are read straight from the OS through
//! `sysinfo` and never change the system, so they run in dry-run mode too.
//! The startup view shells out like any other step.

use std::cmp::Ordering;
use std::fmt;
use std::thread;

use sysinfo::{MemoryRefreshKind, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

use crate::error::Result;
use crate::recipe::Step;

/// Prefix of every line the diagnostics publish.
pub const DIAGNOSE_PREFIX: &str = "[Diagnose] ";

/// Number of processes the process view lists.
pub const TOP_PROCESSES: usize = 15;

/// Command that lists programs started at logon.
pub const STARTUP_COMMAND: &str = "wmic startup get caption,command";

/// Progress text shown while the startup query runs.
pub const STARTUP_QUERY: &str = "Querying startup items (via wmic)...";

const SEPARATOR_WIDTH: usize = 30;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Which diagnostic to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiagnoseView {
    #[default]
    Overview,
    Processes,
    Startup,
}

impl DiagnoseView {
    pub const ALL: [DiagnoseView; 3] = [
        DiagnoseView::Overview,
        DiagnoseView::Processes,
        DiagnoseView::Startup,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DiagnoseView::Overview => "overview",
            DiagnoseView::Processes => "processes",
            DiagnoseView::Startup => "startup",
        }
    }
}

impl fmt::Display for DiagnoseView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of the machine's OS, CPU and memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemOverview {
    pub os: String,
    pub machine: String,
    pub processor: String,
    /// Global CPU usage in percent, sampled over one update interval.
    pub cpu_usage: f32,
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    /// Bytes.
    pub memory_total: u64,
    /// Bytes.
    pub memory_used: u64,
}

impl SystemOverview {
    /// Sample the running system. Blocks for one CPU update interval.
    pub fn collect() -> Self {
        let mut sys =
            System::new_with_specifics(RefreshKind::everything().without_processes());
        sys.refresh_cpu_usage();
        thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_usage();

        let name = System::name().unwrap_or_else(|| "Unknown".to_string());
        let release = System::kernel_version().unwrap_or_default();
        let version = System::long_os_version().unwrap_or_default();
        let processor = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        Self {
            os: format!("{} {} ({})", name, release, version),
            machine: System::cpu_arch(),
            processor,
            cpu_usage: sys.global_cpu_usage(),
            physical_cores: System::physical_core_count(),
            logical_cores: sys.cpus().len(),
            memory_total: sys.total_memory(),
            memory_used: sys.used_memory(),
        }
    }

    pub fn memory_percent(&self) -> f64 {
        percent(self.memory_used, self.memory_total)
    }

    /// The overview as display lines.
    pub fn lines(&self) -> Vec<String> {
        let physical = self
            .physical_cores
            .map_or_else(|| "?".to_string(), |n| n.to_string());
        vec![
            format!("OS: {}", self.os),
            format!("Machine: {}", self.machine),
            format!("Processor: {}", self.processor),
            "-".repeat(SEPARATOR_WIDTH),
            format!("CPU Usage: {:.1}%", self.cpu_usage),
            format!(
                "Cores: {} (Physical), {} (Logical)",
                physical, self.logical_cores
            ),
            "-".repeat(SEPARATOR_WIDTH),
            format!("Memory Total: {:.2} GB", self.memory_total as f64 / GIB),
            format!(
                "Memory Used: {:.2} GB ({:.1}%)",
                self.memory_used as f64 / GIB,
                self.memory_percent()
            ),
        ]
    }
}

/// One process and its share of physical memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessUsage {
    pub name: String,
    pub memory_percent: f64,
}

/// The `limit` processes using the most memory, heaviest first.
pub fn top_processes(limit: usize) -> Vec<ProcessUsage> {
    let mut sys = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
    );
    sys.refresh_processes_specifics(
        ProcessesToUpdate::All,
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );
    let total = sys.total_memory();
    let usage = sys
        .processes()
        .values()
        .map(|p| ProcessUsage {
            name: p.name().to_string_lossy().into_owned(),
            memory_percent: percent(p.memory(), total),
        })
        .collect();
    heaviest(usage, limit)
}

/// Sort by memory share, descending, and keep the first `limit`.
pub fn heaviest(mut usage: Vec<ProcessUsage>, limit: usize) -> Vec<ProcessUsage> {
    usage.sort_by(|a, b| {
        b.memory_percent
            .partial_cmp(&a.memory_percent)
            .unwrap_or(Ordering::Equal)
    });
    usage.truncate(limit);
    usage
}

/// The process view as display lines.
pub fn process_lines(usage: &[ProcessUsage]) -> Vec<String> {
    let mut lines = Vec::with_capacity(usage.len() + 1);
    lines.push(format!("Top {} Memory Hogs:", TOP_PROCESSES));
    lines.extend(
        usage
            .iter()
            .map(|p| format!("{}: {:.1}% RAM", p.name, p.memory_percent)),
    );
    lines
}

/// The step that lists startup items.
pub fn startup_step() -> Result<Step> {
    Ok(Step::shell(STARTUP_COMMAND)?
        .with_tag("startup_items")
        .with_friendly("List startup items"))
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}
