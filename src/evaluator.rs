//! Threshold evaluation.
//!
//! A pure function of one snapshot and the fixed thresholds; no alert
//! state survives a cycle, so re-evaluating the same snapshot always
//! yields the same decisions.

use crate::config::Thresholds;
use crate::types::MetricsSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A single process over the per-process CPU ceiling.
    ProcessCpu {
        pid: u32,
        name: String,
        cpu_percent: f32,
    },
    /// The host as a whole over its limits on CPU, memory, or load.
    ResourcePressure {
        cpu_percent: f32,
        memory_available_gib: f64,
        load_avg_1m: f64,
    },
}

/// Decide which alerts fire for `snapshot`. At most two per cycle: one
/// per-process breach and one aggregate breach, each evaluated
/// independently.
pub fn evaluate(snapshot: &MetricsSnapshot, thresholds: &Thresholds) -> Vec<Alert> {
    let mut alerts = Vec::new();

    // First offender in iteration order wins; the scan stops there.
    for process in &snapshot.processes {
        if process.cpu_percent > thresholds.per_process_cpu_pct {
            alerts.push(Alert::ProcessCpu {
                pid: process.pid,
                name: process.name.clone(),
                cpu_percent: process.cpu_percent,
            });
            break;
        }
    }

    if snapshot.cpu_percent > thresholds.overall_cpu_pct
        || snapshot.memory_available_gib < thresholds.min_available_memory_gib
        || snapshot.load_avg_1m > thresholds.max_load_avg
    {
        alerts.push(Alert::ResourcePressure {
            cpu_percent: snapshot.cpu_percent,
            memory_available_gib: snapshot.memory_available_gib,
            load_avg_1m: snapshot.load_avg_1m,
        });
    }

    alerts
}
