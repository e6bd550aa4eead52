//! Active liveness probe: one ICMP echo against a fixed host, used as a
//! proxy for "the host is not wedged".

use std::time::Duration;

use crate::exec::{CommandError, run_with_timeout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable,
}

pub struct LivenessProbe {
    host: String,
    timeout: Duration,
    program: String,
}

impl LivenessProbe {
    pub fn new(host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            timeout,
            program: "ping".to_string(),
        }
    }

    /// Substitute the ping binary. Tests pass stubs like `true` or `false`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Send one echo request. A probe that runs out its deadline counts as
    /// unreachable; only a probe that could not run at all is an error.
    pub async fn check(&self) -> Result<ProbeOutcome, CommandError> {
        match run_with_timeout(&self.program, &["-c", "1", &self.host], self.timeout).await {
            Ok(out) if out.success() => Ok(ProbeOutcome::Reachable),
            Ok(_) => Ok(ProbeOutcome::Unreachable),
            Err(CommandError::Timeout { .. }) => Ok(ProbeOutcome::Unreachable),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_exit_means_reachable() {
        let probe =
            LivenessProbe::new("qq.com", Duration::from_secs(5)).with_program("true");
        assert_eq!(probe.check().await.unwrap(), ProbeOutcome::Reachable);
    }

    #[tokio::test]
    async fn test_nonzero_exit_means_unreachable() {
        let probe =
            LivenessProbe::new("qq.com", Duration::from_secs(5)).with_program("false");
        assert_eq!(probe.check().await.unwrap(), ProbeOutcome::Unreachable);
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let probe = LivenessProbe::new("qq.com", Duration::from_secs(5))
            .with_program("hostwatchd-no-such-ping");
        assert!(probe.check().await.is_err());
    }
}
