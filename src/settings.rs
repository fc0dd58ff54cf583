//! Settings for the zonewatch binary.
//!
//! Settings are read from a config file and can be overridden with
//! `ZONEWATCH_*` environment variables:
//!
//! ```toml
//! self_id = "urn:mrn:imo:mmsi:230099999"
//!
//! [[zones]]
//! key = "environment.depth.belowKeel"
//!
//! [[zones.zones]]
//! upper = 2.0
//! state = "alarm"
//! message = "Shallow water"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use zonewatch_types::{PathConfig, ZonesConfig};

/// Identifier used when no `self_id` is configured.
pub const DEFAULT_SELF_ID: &str = "self";

/// Runtime settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Vessel identifier used in the delta context.
    #[serde(default = "default_self_id")]
    pub self_id: String,

    /// Watched paths, in configuration order.
    #[serde(default)]
    pub zones: Vec<PathConfig>,
}

fn default_self_id() -> String {
    DEFAULT_SELF_ID.to_string()
}

impl Settings {
    /// Load settings from a file, layered with environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("ZONEWATCH"))
            .build()
            .with_context(|| format!("Failed to read config {}", path.display()))?;

        config
            .try_deserialize()
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// The zone configuration handed to the plugin.
    pub fn zones_config(&self) -> ZonesConfig {
        ZonesConfig {
            zones: self.zones.clone(),
        }
    }
}
