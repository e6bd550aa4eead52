//! Diagnostic capture: the bundled record written whenever an alert fires.
//!
//! Two parts, both bounded: the top CPU consumers from the triggering
//! snapshot, and the tail of the system log. Captures reuse the cycle's
//! snapshot so every record of one cycle describes the same process table.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};

use crate::exec::run_with_timeout;
use crate::types::{MetricsSnapshot, ProcessSample, gib};

/// What tripped the capture; decides how much system-log context to pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureReason {
    ProcessCpu,
    ResourcePressure,
    LivenessFailure,
}

impl CaptureReason {
    fn tail_lines(self) -> usize {
        match self {
            CaptureReason::LivenessFailure => 10,
            CaptureReason::ProcessCpu | CaptureReason::ResourcePressure => 5,
        }
    }
}

/// Rank by CPU descending, keep the top `limit`, then drop the monitor's
/// own process. Exclusion runs after truncation, so the result may hold
/// fewer than `limit` entries.
pub fn top_consumers(
    processes: &[ProcessSample],
    own_pid: u32,
    limit: usize,
) -> Vec<ProcessSample> {
    let mut ranked = processes.to_vec();
    ranked.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    ranked.truncate(limit);
    ranked.retain(|p| p.pid != own_pid);
    ranked
}

/// Last `lines` lines of the file at `path`. Best effort: a missing file,
/// a missing tail binary, or a blown deadline all degrade to an empty
/// string, never an error.
pub async fn syslog_tail(path: &Path, lines: usize, limit: Duration) -> String {
    let count = lines.to_string();
    let path = path.display().to_string();
    match run_with_timeout("tail", &["-n", &count, &path], limit).await {
        Ok(out) if out.success() => out.stdout,
        Ok(out) => {
            warn!("[diag] tail of {path} exited with {:?}", out.exit_code);
            String::new()
        }
        Err(err) => {
            warn!("[diag] could not read system log: {err}");
            String::new()
        }
    }
}

pub struct DiagnosticCapture {
    /// Fixed for the process lifetime, resolved once at startup.
    own_pid: u32,
    syslog_path: PathBuf,
    tail_timeout: Duration,
    top_n: usize,
}

impl DiagnosticCapture {
    pub fn new(own_pid: u32, syslog_path: PathBuf, tail_timeout: Duration, top_n: usize) -> Self {
        Self {
            own_pid,
            syslog_path,
            tail_timeout,
            top_n,
        }
    }

    /// Write the capture record: one line per top consumer, then the
    /// system-log tail as a single multi-line entry.
    pub async fn capture(&self, snapshot: &MetricsSnapshot, reason: CaptureReason) {
        for process in top_consumers(&snapshot.processes, self.own_pid, self.top_n) {
            info!(
                "[diag] process {} (pid {}) cpu {:.1}% memory {:.2}GiB",
                process.name,
                process.pid,
                process.cpu_percent,
                gib(process.memory_bytes)
            );
        }

        let tail = syslog_tail(&self.syslog_path, reason.tail_lines(), self.tail_timeout).await;
        if !tail.is_empty() {
            info!("[diag] recent system log:\n{tail}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(pid: u32, cpu_percent: f32) -> ProcessSample {
        ProcessSample {
            pid,
            name: format!("proc-{pid}"),
            cpu_percent,
            memory_bytes: 1 << 30,
        }
    }

    #[test]
    fn test_ranking_is_by_cpu_descending() {
        let processes = vec![proc(1, 5.0), proc(2, 80.0), proc(3, 40.0), proc(4, 60.0)];
        let top = top_consumers(&processes, 999, 3);

        let pids: Vec<u32> = top.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![2, 4, 3]);
    }

    #[test]
    fn test_own_pid_never_reported_even_when_first() {
        let processes = vec![proc(42, 500.0), proc(2, 80.0), proc(3, 40.0)];
        let top = top_consumers(&processes, 42, 3);

        assert!(top.iter().all(|p| p.pid != 42));
    }

    #[test]
    fn test_self_exclusion_shrinks_the_selection() {
        // Own process ranks second: exclusion happens after truncation,
        // so only two entries remain.
        let processes = vec![proc(1, 90.0), proc(42, 85.0), proc(3, 40.0), proc(4, 30.0)];
        let top = top_consumers(&processes, 42, 3);

        let pids: Vec<u32> = top.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![1, 3]);
    }

    #[test]
    fn test_selection_is_capped() {
        let processes: Vec<ProcessSample> =
            (1..=10).map(|pid| proc(pid, pid as f32)).collect();
        assert_eq!(top_consumers(&processes, 999, 3).len(), 3);
    }

    #[test]
    fn test_fewer_processes_than_limit() {
        let processes = vec![proc(1, 10.0)];
        assert_eq!(top_consumers(&processes, 999, 3).len(), 1);
    }

    #[test]
    fn test_tail_lines_per_reason() {
        assert_eq!(CaptureReason::ProcessCpu.tail_lines(), 5);
        assert_eq!(CaptureReason::ResourcePressure.tail_lines(), 5);
        assert_eq!(CaptureReason::LivenessFailure.tail_lines(), 10);
    }
}
