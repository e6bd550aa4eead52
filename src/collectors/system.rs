//! Host metrics via sysinfo: global CPU, available memory, 1-minute load
//! average, and the per-process table.

use std::time::Duration;

use anyhow::Result;
use log::debug;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, ProcessRefreshKind, RefreshKind, System};
use tokio::time::sleep;

use crate::types::{MetricsSnapshot, ProcessSample, gib};

pub struct SystemSampler {
    system: System,
    cpu_window: Duration,
}

fn refresh_kind() -> RefreshKind {
    RefreshKind::nothing()
        .with_cpu(CpuRefreshKind::everything())
        .with_memory(MemoryRefreshKind::everything())
        .with_processes(ProcessRefreshKind::nothing().with_cpu().with_memory())
}

impl SystemSampler {
    pub fn new(cpu_window: Duration) -> Self {
        Self {
            system: System::new_with_specifics(refresh_kind()),
            cpu_window,
        }
    }

    /// Take one snapshot. CPU percentages need two refreshes separated by
    /// a measurement window; the first refresh arms the counters. Entries
    /// that vanish between the refreshes are simply absent from the table.
    pub async fn sample(&mut self) -> Result<MetricsSnapshot> {
        self.system.refresh_specifics(refresh_kind());
        sleep(self.cpu_window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)).await;
        self.system.refresh_specifics(refresh_kind());

        let processes: Vec<ProcessSample> = self
            .system
            .processes()
            .values()
            .map(|process| ProcessSample {
                pid: process.pid().as_u32(),
                name: process.name().to_string_lossy().into_owned(),
                cpu_percent: process.cpu_usage(),
                memory_bytes: process.memory(),
            })
            .collect();

        debug!("[sampler] {} processes enumerated", processes.len());

        Ok(MetricsSnapshot {
            cpu_percent: self.system.global_cpu_usage(),
            memory_available_gib: gib(self.system.available_memory()),
            load_avg_1m: System::load_average().one,
            processes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_reads_a_live_host() {
        let mut sampler = SystemSampler::new(Duration::from_millis(200));
        let snapshot = sampler.sample().await.unwrap();

        assert!(snapshot.cpu_percent >= 0.0);
        assert!(snapshot.memory_available_gib > 0.0);
        assert!(snapshot.load_avg_1m >= 0.0);
        // At least the test process itself is running.
        assert!(!snapshot.processes.is_empty());
    }
}
