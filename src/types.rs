use serde::Serialize;

const GIB: f64 = (1u64 << 30) as f64;

/// Convert a byte count to GiB.
pub fn gib(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

/// One process row from the process table, valid for a single cycle only.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    /// May exceed 100 on multi-core hosts.
    pub cpu_percent: f32,
    /// Resident set size in bytes.
    pub memory_bytes: u64,
}

/// Point-in-time reading of the host, owned by the cycle that captured it.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub cpu_percent: f32,
    pub memory_available_gib: f64,
    pub load_avg_1m: f64,
    pub processes: Vec<ProcessSample>,
}

impl MetricsSnapshot {
    /// One-line reading for the periodic status record.
    pub fn summary(&self) -> String {
        format!(
            "cpu={:.1}% mem_available={:.2}GiB load1={:.2}",
            self.cpu_percent, self.memory_available_gib, self.load_avg_1m
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gib_conversion() {
        assert_eq!(gib(0), 0.0);
        assert_eq!(gib(1 << 30), 1.0);
        assert_eq!(format!("{:.2}", gib(2147483648)), "2.00");
        assert_eq!(format!("{:.2}", gib(536870912)), "0.50");
    }

    #[test]
    fn test_snapshot_summary() {
        let snapshot = MetricsSnapshot {
            cpu_percent: 42.35,
            memory_available_gib: 3.141,
            load_avg_1m: 1.5,
            processes: Vec::new(),
        };
        let summary = snapshot.summary();
        assert!(summary.contains("cpu=42.3%") || summary.contains("cpu=42.4%"));
        assert!(summary.contains("mem_available=3.14GiB"));
        assert!(summary.contains("load1=1.50"));
    }
}
