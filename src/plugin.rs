//! Lifecycle of the zones handler.
//!
//! [`ZonesPlugin`] publishes the zone metadata once, then starts one
//! [`NotificationDispatcher`] per active path and keeps their handles
//! until [`ZonesPlugin::stop`].

use std::sync::Arc;

use tracing::{debug, info, warn};
use zonewatch_types::ZonesConfig;

use crate::error::ZonesError;
use crate::host::{DeltaSink, Host};
use crate::zones::{metadata_delta, DispatchHandle, NotificationDispatcher};

/// Zone notification handler bound to a host.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use zonewatch::{ChannelHost, Output, ZonesPlugin};
/// use zonewatch_types::{PathConfig, ZoneSpec, ZoneState, ZonesConfig};
///
/// # tokio_test::block_on(async {
/// let (output, mut rx) = Output::channel(16);
/// let host = Arc::new(ChannelHost::new("self", output));
/// host.declare("environment.depth.belowKeel");
///
/// let config = ZonesConfig::new().path(
///     PathConfig::new("environment.depth.belowKeel")
///         .zone(ZoneSpec::new(ZoneState::Alarm).upper(2.0)),
/// );
///
/// let mut plugin = ZonesPlugin::new(host);
/// let failures = plugin.start(&config);
/// assert!(failures.is_empty());
///
/// // Metadata is published at start
/// assert!(rx.recv().await.is_some());
/// plugin.stop();
/// # });
/// ```
pub struct ZonesPlugin<H: Host + 'static> {
    host: Arc<H>,
    handles: Vec<DispatchHandle>,
    running: bool,
}

impl<H: Host + 'static> ZonesPlugin<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self {
            host,
            handles: Vec::new(),
            running: false,
        }
    }

    /// Publish zone metadata and start watching every active path.
    ///
    /// A path that cannot be started is logged and returned in the failure
    /// list; the remaining paths still start. Calling this on a running
    /// plugin restarts it.
    pub fn start(&mut self, config: &ZonesConfig) -> Vec<ZonesError> {
        if self.running {
            self.stop();
        }

        info!("Starting zones plugin with {} paths", config.zones.len());
        if let Some(delta) = metadata_delta(self.host.self_id(), &config.zones) {
            debug!("Sending path metadata for {} paths", delta.updates.len());
            self.host.publish(delta);
        }

        let sink: Arc<dyn DeltaSink> = self.host.clone();
        let mut failures = Vec::new();

        for path in config.active_paths() {
            let started = NotificationDispatcher::new(path, self.host.self_id(), sink.clone())
                .and_then(|dispatcher| dispatcher.start(&*self.host));

            match started {
                Ok(handle) => self.handles.push(handle),
                Err(e) => {
                    warn!("Not watching {}: {}", e.key(), e);
                    failures.push(e);
                }
            }
        }

        self.running = true;
        failures
    }

    /// Stop every dispatcher. Safe to call at any time, any number of times.
    pub fn stop(&mut self) {
        for handle in self.handles.iter_mut() {
            handle.stop();
        }
        self.handles.clear();
        if self.running {
            info!("Stopped zones plugin");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Keys of the paths currently being watched.
    pub fn active_paths(&self) -> Vec<&str> {
        self.handles.iter().filter_map(DispatchHandle::key).collect()
    }
}

impl<H: Host + 'static> Drop for ZonesPlugin<H> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<H: Host + 'static> std::fmt::Debug for ZonesPlugin<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZonesPlugin")
            .field("running", &self.running)
            .field("paths", &self.active_paths())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use crate::host::{spawn_feed, ChannelHost, Output};
    use std::io::Cursor;
    use tokio::sync::mpsc;
    use tokio::time::{sleep, Duration};
    use zonewatch_types::{Delta, NotificationPayload, PathConfig, ZoneSpec, ZoneState};

    const DEPTH: &str = "environment.depth.belowKeel";
    const BATTERY: &str = "electrical.batteries.house.voltage";

    fn config() -> ZonesConfig {
        ZonesConfig::new()
            .path(
                PathConfig::new(DEPTH)
                    .zone(ZoneSpec::new(ZoneState::Alarm).upper(2.0))
                    .zone(ZoneSpec::new(ZoneState::Warn).lower(2.0).upper(5.0)),
            )
            .path(
                PathConfig::new(BATTERY)
                    .active(false)
                    .zone(ZoneSpec::new(ZoneState::Alarm).upper(11.5)),
            )
    }

    fn host() -> (Arc<ChannelHost>, mpsc::Receiver<Delta>) {
        let (output, rx) = Output::channel(64);
        let host = Arc::new(ChannelHost::new("vessel-1", output));
        host.declare(DEPTH);
        host.declare(BATTERY);
        (host, rx)
    }

    fn drain(rx: &mut mpsc::Receiver<Delta>) -> Vec<Delta> {
        let mut deltas = Vec::new();
        while let Ok(delta) = rx.try_recv() {
            deltas.push(delta);
        }
        deltas
    }

    fn notifications(deltas: &[Delta]) -> Vec<NotificationPayload> {
        deltas
            .iter()
            .flat_map(|d| d.values().map(|v| v.value.clone()).collect::<Vec<_>>())
            .collect()
    }

    #[tokio::test]
    async fn test_start_publishes_metadata_then_notifications() {
        let (host, mut rx) = host();
        let mut plugin = ZonesPlugin::new(host.clone());

        assert!(plugin.start(&config()).is_empty());
        assert_eq!(plugin.active_paths(), vec![DEPTH]);

        host.send(DEPTH, 1.0).unwrap();
        sleep(Duration::from_millis(20)).await;
        host.send(DEPTH, 1.5).unwrap();
        sleep(Duration::from_millis(20)).await;
        host.send(DEPTH, 3.0).unwrap();
        sleep(Duration::from_millis(20)).await;

        let deltas = drain(&mut rx);
        let meta: Vec<&str> = deltas[0].meta_entries().map(|m| m.path.as_str()).collect();
        assert_eq!(meta, vec![DEPTH, BATTERY]);

        let states: Vec<ZoneState> = notifications(&deltas).iter().map(|p| p.state).collect();
        assert_eq!(states, vec![ZoneState::Alarm, ZoneState::Warn]);
    }

    #[tokio::test]
    async fn test_burst_from_feed_publishes_every_zone_change() {
        let (host, mut rx) = host();
        let config = ZonesConfig::new().path(
            PathConfig::new(DEPTH)
                .zone(ZoneSpec::new(ZoneState::Normal).upper(10.0))
                .zone(ZoneSpec::new(ZoneState::Alarm).lower(10.0)),
        );
        let mut plugin = ZonesPlugin::new(host.clone());
        assert!(plugin.start(&config).is_empty());

        let data: String = [1.0, 2.0, 12.0, 15.0, 3.0]
            .iter()
            .map(|v| format!("{{\"path\": \"{DEPTH}\", \"value\": {v}}}\n"))
            .collect();
        spawn_feed(Cursor::new(data), host.clone()).await.unwrap();
        sleep(Duration::from_millis(20)).await;

        let states: Vec<ZoneState> = notifications(&drain(&mut rx)).iter().map(|p| p.state).collect();
        assert_eq!(states, vec![ZoneState::Normal, ZoneState::Alarm, ZoneState::Normal]);
    }

    #[tokio::test]
    async fn test_inactive_paths_are_not_classified() {
        let (host, mut rx) = host();
        let mut plugin = ZonesPlugin::new(host.clone());
        plugin.start(&config());

        host.send(BATTERY, 10.0).unwrap();
        sleep(Duration::from_millis(20)).await;

        assert!(notifications(&drain(&mut rx)).is_empty());
    }

    #[tokio::test]
    async fn test_failed_path_does_not_block_others() {
        let (output, mut rx) = Output::channel(64);
        let host = Arc::new(ChannelHost::new("vessel-1", output));
        host.declare(DEPTH);

        let config = ZonesConfig::new()
            .path(PathConfig::new("navigation.unknown").zone(ZoneSpec::new(ZoneState::Alert)))
            .path(PathConfig::new("tanks.empty"))
            .path(PathConfig::new(DEPTH).zone(ZoneSpec::new(ZoneState::Alarm).upper(2.0)));

        let mut plugin = ZonesPlugin::new(host.clone());
        let failures = plugin.start(&config);

        assert_eq!(failures.len(), 2);
        assert_eq!(
            failures[0],
            ZonesError::Subscribe {
                key: "navigation.unknown".to_string(),
                source: HostError::UnknownPath("navigation.unknown".to_string()),
            }
        );
        assert_eq!(failures[1], ZonesError::EmptyZones { key: "tanks.empty".to_string() });
        assert_eq!(plugin.active_paths(), vec![DEPTH]);

        host.send(DEPTH, 0.5).unwrap();
        sleep(Duration::from_millis(20)).await;
        assert_eq!(notifications(&drain(&mut rx)).len(), 1);
    }

    #[tokio::test]
    async fn test_stop_silences_all_paths() {
        let (host, mut rx) = host();
        let mut plugin = ZonesPlugin::new(host.clone());
        plugin.start(&config());
        drain(&mut rx);

        plugin.stop();
        plugin.stop();
        assert!(!plugin.is_running());
        assert!(plugin.active_paths().is_empty());

        host.send(DEPTH, 1.0).unwrap();
        sleep(Duration::from_millis(20)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_restart_emits_first_classification_again() {
        let (host, mut rx) = host();
        let mut plugin = ZonesPlugin::new(host.clone());
        plugin.start(&config());

        host.send(DEPTH, 1.0).unwrap();
        sleep(Duration::from_millis(20)).await;
        plugin.stop();

        plugin.start(&config());
        sleep(Duration::from_millis(20)).await;

        let deltas = drain(&mut rx);
        // metadata, alarm, metadata, alarm (current value re-delivered)
        assert_eq!(deltas.iter().filter(|d| d.meta_entries().count() > 0).count(), 2);
        assert_eq!(notifications(&deltas).len(), 2);
        assert_eq!(plugin.active_paths(), vec![DEPTH]);
    }

    #[test]
    fn stop_before_start_is_safe() {
        let (host, _rx) = host();
        let mut plugin = ZonesPlugin::new(host);
        plugin.stop();
        plugin.stop();
        assert!(!plugin.is_running());
    }

    #[test]
    fn empty_config_publishes_nothing() {
        let (host, mut rx) = host();
        let mut plugin = ZonesPlugin::new(host);

        assert!(plugin.start(&ZonesConfig::new()).is_empty());
        assert!(plugin.is_running());
        assert!(rx.try_recv().is_err());
    }
}
