use std::path::PathBuf;
use std::time::Duration;

/// Fixed alert thresholds. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Per-process CPU ceiling. May exceed 100: a multi-threaded process
    /// reports the sum of its cores.
    pub per_process_cpu_pct: f32,
    pub overall_cpu_pct: f32,
    pub min_available_memory_gib: f64,
    pub max_load_avg: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            per_process_cpu_pct: 201.0,
            overall_cpu_pct: 60.0,
            min_available_memory_gib: 0.2,
            max_load_avg: 20.0,
        }
    }
}

/// Process-wide configuration, passed explicitly into the monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub thresholds: Thresholds,
    /// Target of the ICMP liveness probe.
    pub ping_host: String,
    /// Sleep between monitoring cycles.
    pub interval: Duration,
    /// Append-mode destination of the monitor's own records.
    pub log_path: PathBuf,
    /// System log read back during diagnostic capture.
    pub syslog_path: PathBuf,
    pub probe_timeout: Duration,
    pub tail_timeout: Duration,
    /// Window between the two CPU refreshes of one sample.
    pub cpu_sample_window: Duration,
    /// How many top consumers a capture reports.
    pub top_n: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            ping_host: "qq.com".to_string(),
            interval: Duration::from_secs(120),
            log_path: PathBuf::from("/var/log/hostwatchd.log"),
            syslog_path: PathBuf::from("/var/log/messages"),
            probe_timeout: Duration::from_secs(10),
            tail_timeout: Duration::from_secs(5),
            cpu_sample_window: Duration::from_secs(1),
            top_n: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_are_positive_finite() {
        let t = Thresholds::default();
        for value in [
            t.per_process_cpu_pct as f64,
            t.overall_cpu_pct as f64,
            t.min_available_memory_gib,
            t.max_load_avg,
        ] {
            assert!(value.is_finite());
            assert!(value > 0.0);
        }
    }

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.ping_host, "qq.com");
        assert_eq!(config.interval, Duration::from_secs(120));
        assert_eq!(config.top_n, 3);
        assert!(config.probe_timeout > Duration::ZERO);
        assert!(config.tail_timeout > Duration::ZERO);
    }
}
