//! Bounded execution of external commands.
//!
//! Every child process the daemon spawns goes through here: a hung ping or
//! tail must not stall the monitor past its deadline.

use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;

#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{program} did not finish within {limit:?}")]
    Timeout { program: String, limit: Duration },
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// Run `program` with `args`, waiting at most `limit` for it to finish.
/// The child is killed if the deadline passes.
pub async fn run_with_timeout(
    program: &str,
    args: &[&str],
    limit: Duration,
) -> Result<CommandOutput, CommandError> {
    let result = timeout(
        limit,
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output(),
    )
    .await;

    let output = result
        .map_err(|_| CommandError::Timeout {
            program: program.to_string(),
            limit,
        })?
        .map_err(|source| CommandError::Spawn {
            program: program.to_string(),
            source,
        })?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        exit_code: output.status.code(),
    })
}
