use anyhow::anyhow;
use hostwatchd::{Monitor, MonitorConfig, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = MonitorConfig::default();
    logging::init(&config.log_path)?;

    let own_pid = sysinfo::get_current_pid()
        .map_err(|err| anyhow!("cannot determine own pid: {err}"))?
        .as_u32();

    Monitor::new(config, own_pid).run().await;
    Ok(())
}
