//! # zonewatch
//!
//! Zone classification and notification handling for live signal values.
//!
//! Each watched signal path carries an ordered list of zones (bounded
//! numeric ranges with a severity state). As values arrive, zonewatch
//! classifies them into the first matching zone and publishes a
//! notification delta only when the occupied zone changes. Values outside
//! every zone report the default `normal` state.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          ZonesPlugin                         │
//! │                                                              │
//! │  ZonesConfig ──▶ metadata_delta() ──────────────┐            │
//! │       │                                         │            │
//! │       ▼ (one per active path)                   ▼            │
//! │  NotificationDispatcher ──▶ ZoneClassifier ──▶ DeltaSink     │
//! │       ▲                                                      │
//! └───────┼──────────────────────────────────────────────────────┘
//!         │
//!    ValueStream ◀── ChannelHost ◀── spawn_feed (NDJSON)
//! ```
//!
//! - **[`zones`]**: Classifier, payload construction, dispatch and metadata
//! - **[`host`]**: The [`Host`] traits the handler needs, with a tokio
//!   [`ChannelHost`] implementation and [`Output`] backends
//! - **[`plugin`]**: Start/stop lifecycle over a whole configuration
//! - **[`settings`]**: Config file loading for the binary
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Read {"path": ..., "value": ...} lines from stdin, write deltas to stdout
//! zonewatch --config zones.toml < values.ndjson
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::sync::Arc;
//! use zonewatch::{ChannelHost, Output, ZonesPlugin};
//! use zonewatch_types::{PathConfig, ZoneSpec, ZoneState, ZonesConfig};
//!
//! # tokio_test::block_on(async {
//! let (output, mut deltas) = Output::channel(16);
//! let host = Arc::new(ChannelHost::new("urn:mrn:imo:mmsi:230099999", output));
//! let voltage = host.declare("electrical.batteries.house.voltage");
//!
//! let config = ZonesConfig::new().path(
//!     PathConfig::new("electrical.batteries.house.voltage")
//!         .zone(ZoneSpec::new(ZoneState::Alarm).upper(11.5).message("Battery flat")),
//! );
//!
//! let mut plugin = ZonesPlugin::new(host.clone());
//! plugin.start(&config);
//! voltage.send(11.2);
//!
//! let _meta = deltas.recv().await;
//! let notification = deltas.recv().await.unwrap();
//! let value = notification.values().next().unwrap();
//! assert_eq!(value.path, "notifications.electrical.batteries.house.voltage");
//! assert_eq!(value.value.message, "Battery flat");
//! plugin.stop();
//! # });
//! ```

pub mod error;
pub mod host;
pub mod plugin;
pub mod settings;
pub mod zones;

// Re-export main types for convenience
pub use error::{HostError, ZonesError};
pub use host::{
    spawn_feed, ChannelHost, DeltaSink, Host, Output, SignalSender, SignalUpdate, Subscription,
    ValueCallback, ValueStream,
};
pub use plugin::ZonesPlugin;
pub use settings::Settings;
pub use zones::{
    build_payload, metadata_delta, zone_meta, Classification, DispatchHandle,
    NotificationDispatcher, ZoneClassifier,
};
