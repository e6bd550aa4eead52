//! Append-only file log sink, one `<timestamp> - <message>` line per record.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Initialize the process-wide logger. Records append to `log_path`,
/// creating it if absent; if the path cannot be opened (e.g. the daemon
/// runs as an unprivileged user) records go to stderr instead.
pub fn init(log_path: &Path) -> Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Info).format(|buf, record| {
        writeln!(
            buf,
            "{} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.args()
        )
    });

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(err) => {
            eprintln!(
                "hostwatchd: cannot open {}: {err}; logging to stderr",
                log_path.display()
            );
            builder.target(Target::Stderr);
        }
    }

    builder.try_init()?;
    Ok(())
}
