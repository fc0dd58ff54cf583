//! Example: Watching a synthetic signal through a channel host
//!
//! This example demonstrates how to embed zonewatch in your own
//! application by pushing values into a `ChannelHost` and reading the
//! published deltas back from a channel.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example channel_source
//! ```

use std::sync::Arc;
use std::time::Duration;

use zonewatch::{ChannelHost, Output, ZonesPlugin};
use zonewatch_types::{Method, PathConfig, UpdateContent, ZoneSpec, ZoneState, ZonesConfig};

const COOLANT: &str = "propulsion.main.coolantTemperature";

#[tokio::main]
async fn main() {
    println!("Channel source example");
    println!("Generating a synthetic coolant temperature...\n");

    let (output, mut deltas) = Output::channel(64);
    let host = Arc::new(ChannelHost::new("urn:mrn:imo:mmsi:230099999", output));
    let coolant = host.declare(COOLANT);

    // Kelvin: normal below 360, warn up to 370, alarm above
    let config = ZonesConfig::new().path(
        PathConfig::new(COOLANT)
            .zone(ZoneSpec::new(ZoneState::Normal).upper(360.0).method([]))
            .zone(
                ZoneSpec::new(ZoneState::Warn)
                    .lower(360.0)
                    .upper(370.0)
                    .method([Method::Visual]),
            )
            .zone(ZoneSpec::new(ZoneState::Alarm).lower(370.0).message("Engine overheating")),
    );

    let mut plugin = ZonesPlugin::new(host.clone());
    plugin.start(&config);

    // Ramp the temperature up and back down
    tokio::spawn(async move {
        let ramp = (340..=380).step_by(5).chain((340..=375).rev().step_by(5));
        for kelvin in ramp {
            coolant.send(kelvin as f64);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });

    println!("Receiving deltas for 2 seconds:\n");
    let deadline = tokio::time::sleep(Duration::from_secs(2));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            Some(delta) = deltas.recv() => {
                for update in &delta.updates {
                    match &update.content {
                        UpdateContent::Meta(meta) => {
                            for entry in meta {
                                println!("  Meta for '{}': {} zones", entry.path, entry.value.zones.len());
                            }
                        }
                        UpdateContent::Values(values) => {
                            for value in values {
                                println!(
                                    "  {} -> {} ({})",
                                    value.path, value.value.state, value.value.message
                                );
                            }
                        }
                    }
                }
            }
            _ = &mut deadline => break,
        }
    }

    plugin.stop();
}
