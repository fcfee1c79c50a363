use anyhow::Result;
use tracing_subscriber::EnvFilter;

use musetrip::{MuseTripConfig, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = MuseTripConfig::load()?;
    init_tracing(&config);

    web::run(&config).await
}

fn init_tracing(config: &MuseTripConfig) {
    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
