//! Per-path notification dispatch.
//!
//! A [`NotificationDispatcher`] classifies every value delivered for its
//! path and publishes a notification only when the classification changes.
//! The last published classification and the stopped flag live behind one
//! mutex, so a value being handled while `stop()` runs either publishes
//! before `stop()` returns or not at all.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};
use zonewatch_types::{Delta, PathConfig, ZoneSpec};

use super::{build_payload, Classification, ZoneClassifier};
use crate::error::ZonesError;
use crate::host::{DeltaSink, Subscription, ValueStream};

#[derive(Debug, Default)]
struct DispatchState {
    /// Last published classification. `None` until the first value.
    last: Option<Classification>,
    stopped: bool,
}

/// Turns a path's value stream into deduplicated notification deltas.
pub struct NotificationDispatcher {
    key: String,
    notification_path: String,
    self_id: String,
    zones: Vec<ZoneSpec>,
    classifier: ZoneClassifier,
    sink: Arc<dyn DeltaSink>,
    state: Mutex<DispatchState>,
}

impl NotificationDispatcher {
    /// Create a dispatcher for one path.
    ///
    /// Fails if the path has no zones.
    pub fn new(
        path: &PathConfig,
        self_id: impl Into<String>,
        sink: Arc<dyn DeltaSink>,
    ) -> Result<Self, ZonesError> {
        if path.zones.is_empty() {
            return Err(ZonesError::EmptyZones {
                key: path.key.clone(),
            });
        }

        Ok(Self {
            key: path.key.clone(),
            notification_path: path.notification_path(),
            self_id: self_id.into(),
            zones: path.zones.clone(),
            classifier: ZoneClassifier::new(&path.zones),
            sink,
            state: Mutex::new(DispatchState::default()),
        })
    }

    /// The path key this dispatcher watches.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Handle one value. Returns `true` if a notification was published.
    pub fn on_value(&self, value: f64) -> bool {
        let classification = self.classifier.classify(value);
        debug!(
            "Value: {}, classification: {:?} for {}",
            value, classification, self.key
        );

        let mut state = self.state.lock();
        if state.stopped || state.last == Some(classification) {
            return false;
        }
        state.last = Some(classification);

        let payload = build_payload(classification, &self.zones);
        debug!(
            "Sending notification for {}: {} ({})",
            self.key, payload.state, payload.message
        );
        self.sink.publish(Delta::notification(
            &self.self_id,
            self.notification_path.clone(),
            payload,
        ));
        true
    }

    /// The last published classification, if any.
    pub fn last_classification(&self) -> Option<Classification> {
        self.state.lock().last
    }

    /// Subscribe to the path's value stream and start dispatching.
    pub fn start(self, stream: &dyn ValueStream) -> Result<DispatchHandle, ZonesError> {
        let dispatcher = Arc::new(self);
        let callback_target = dispatcher.clone();

        let subscription = stream
            .subscribe(
                &dispatcher.key,
                Box::new(move |value| {
                    callback_target.on_value(value);
                }),
            )
            .map_err(|source| ZonesError::Subscribe {
                key: dispatcher.key.clone(),
                source,
            })?;

        info!("Watching zones for {}", dispatcher.key);
        Ok(DispatchHandle {
            dispatcher: Some(dispatcher),
            subscription: Some(subscription),
        })
    }

    fn halt(&self) {
        let mut state = self.state.lock();
        state.stopped = true;
        state.last = None;
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("key", &self.key)
            .field("zones", &self.zones.len())
            .finish()
    }
}

/// Handle to a running dispatcher.
///
/// [`DispatchHandle::default`] is a handle that was never started.
#[derive(Debug, Default)]
pub struct DispatchHandle {
    dispatcher: Option<Arc<NotificationDispatcher>>,
    subscription: Option<Subscription>,
}

impl DispatchHandle {
    /// The watched path key, if the handle is running.
    pub fn key(&self) -> Option<&str> {
        self.dispatcher.as_deref().map(NotificationDispatcher::key)
    }

    pub fn is_running(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// Stop dispatching and unsubscribe.
    ///
    /// No notification is published once this returns. Safe to call
    /// repeatedly or on a handle that was never started.
    pub fn stop(&mut self) {
        if let Some(dispatcher) = self.dispatcher.take() {
            // Waits for a value being handled on another thread
            dispatcher.halt();
            info!("Stopped watching zones for {}", dispatcher.key);
        }
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl Drop for DispatchHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
