//! The monitor loop: sample, evaluate, capture, probe, sleep, repeat.

use log::{error, info, warn};
use tokio::time::sleep;

use crate::collectors::SystemSampler;
use crate::config::MonitorConfig;
use crate::diagnostics::{CaptureReason, DiagnosticCapture};
use crate::evaluator::{Alert, evaluate};
use crate::probe::{LivenessProbe, ProbeOutcome};

pub struct Monitor {
    config: MonitorConfig,
    sampler: SystemSampler,
    capture: DiagnosticCapture,
    probe: LivenessProbe,
}

impl Monitor {
    /// `own_pid` is resolved once by the caller and stays fixed for the
    /// process lifetime; capture uses it to keep the monitor out of its
    /// own top-consumer reports.
    pub fn new(config: MonitorConfig, own_pid: u32) -> Self {
        let capture = DiagnosticCapture::new(
            own_pid,
            config.syslog_path.clone(),
            config.tail_timeout,
            config.top_n,
        );
        let probe = LivenessProbe::new(config.ping_host.clone(), config.probe_timeout);
        let sampler = SystemSampler::new(config.cpu_sample_window);
        Self {
            config,
            sampler,
            capture,
            probe,
        }
    }

    /// Runs until the process is killed.
    pub async fn run(mut self) {
        info!(
            "[monitor] starting host monitor, cycle every {:?}",
            self.config.interval
        );
        loop {
            self.cycle().await;
            sleep(self.config.interval).await;
        }
    }

    async fn cycle(&mut self) {
        let snapshot = match self.sampler.sample().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                // A failed sample drops this cycle; the next tick is the retry.
                warn!("[monitor] sampling failed: {err:#}");
                return;
            }
        };

        info!("[monitor] {}", snapshot.summary());

        for alert in evaluate(&snapshot, &self.config.thresholds) {
            match &alert {
                Alert::ProcessCpu {
                    pid,
                    name,
                    cpu_percent,
                } => {
                    warn!(
                        "[monitor] process {name} (pid {pid}) cpu at {cpu_percent:.1}% exceeds threshold {:.1}%",
                        self.config.thresholds.per_process_cpu_pct
                    );
                    self.capture
                        .capture(&snapshot, CaptureReason::ProcessCpu)
                        .await;
                }
                Alert::ResourcePressure {
                    cpu_percent,
                    memory_available_gib,
                    load_avg_1m,
                } => {
                    warn!(
                        "[monitor] host over threshold (cpu {cpu_percent:.1}%, mem available {memory_available_gib:.2}GiB, load1 {load_avg_1m:.2}), recording top consumers"
                    );
                    self.capture
                        .capture(&snapshot, CaptureReason::ResourcePressure)
                        .await;
                }
            }
        }

        match self.probe.check().await {
            Ok(ProbeOutcome::Reachable) => {}
            Ok(ProbeOutcome::Unreachable) => {
                error!(
                    "[probe] cannot ping {}, host may be wedged",
                    self.probe.host()
                );
                self.capture
                    .capture(&snapshot, CaptureReason::LivenessFailure)
                    .await;
            }
            // The probe not running at all must not kill the loop.
            Err(err) => error!("[probe] liveness check failed to run: {err}"),
        }
    }
}
