use std::path::PathBuf;

use anyhow::Result;
use log::info;
use xrloop_samples::{config::DemoConfig, run};

pub fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = DemoConfig::load(config_path.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local_set = tokio::task::LocalSet::new();

    info!("[XRLOOP_SAMPLES] Runtime starting..");
    let summary = local_set.block_on(&runtime, run(config))?;
    info!("[XRLOOP_SAMPLES] FINISHED! {summary:?}");

    Ok(())
}
