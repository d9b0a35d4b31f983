use anyhow::Result;
use clap::Parser;
use tracing::info;

use fraudscan_infrastructure::{AppConfig, BIND_ADDR_ENV, CONFIG_PATH_ENV};

#[derive(Parser, Debug)]
#[command(name = "fraudscan")]
#[command(about = "Transaction fraud screening web service", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Listen address, overrides bind_addr
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    // a missing .env file is fine
    let _ = dotenvy::dotenv();
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_PATH_ENV, config);
    }
    if let Some(bind) = args.bind {
        std::env::set_var(BIND_ADDR_ENV, bind);
    }

    let config = AppConfig::load().await?;
    let _log_guard = fraudscan_bootstrap::telemetry::init_tracing(
        config.log_dir.as_deref(),
        config.log_json,
    );
    info!(
        source = config.loaded_from.as_deref().unwrap_or("defaults"),
        backend = config.backend.as_str(),
        bind_addr = %config.bind_addr,
        page_size = config.page_size,
        "configuration loaded"
    );

    fraudscan_bootstrap::run_standalone(config).await
}
