use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zonewatch::{spawn_feed, ChannelHost, Output, Settings, ZonesPlugin};

#[derive(Parser, Debug)]
#[command(name = "zonewatch")]
#[command(about = "Classify live signal values into zones and emit notification deltas")]
struct Args {
    /// Path to the zones config file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: PathBuf,

    /// Vessel identifier used in the delta context (overrides the config file)
    #[arg(long)]
    self_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries deltas
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zonewatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut settings = Settings::load(&args.config)?;
    if let Some(self_id) = args.self_id {
        settings.self_id = self_id;
    }

    let host = Arc::new(ChannelHost::new(settings.self_id.clone(), Output::Stdout));
    for path in &settings.zones {
        host.declare(&path.key);
    }

    let mut plugin = ZonesPlugin::new(host.clone());
    let failures = plugin.start(&settings.zones_config());
    if !failures.is_empty() {
        warn!("{} of {} paths could not be watched", failures.len(), settings.zones.len());
    }
    info!("Watching {:?}", plugin.active_paths());

    let feed = spawn_feed(tokio::io::stdin(), host);
    tokio::select! {
        result = feed => {
            if let Err(e) = result {
                warn!("Feed task failed: {}", e);
            }
            // Let the last values drain through the dispatchers
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    plugin.stop();
    Ok(())
}
