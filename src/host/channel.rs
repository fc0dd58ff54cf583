//! Channel-based host.
//!
//! Each declared signal keeps its latest value and one unbounded queue per
//! subscriber. A subscriber's background task forwards the current value
//! and then every later update, in send order, to its callback.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tracing::debug;
use zonewatch_types::Delta;

use super::{DeltaSink, Host, Output, Subscription, ValueCallback, ValueStream};
use crate::error::HostError;

#[derive(Debug, Default)]
struct Signal {
    latest: Option<f64>,
    subscribers: Vec<mpsc::UnboundedSender<f64>>,
}

type SharedSignal = Arc<Mutex<Signal>>;

/// Sending half of a declared signal.
#[derive(Debug, Clone)]
pub struct SignalSender {
    path: String,
    signal: SharedSignal,
}

impl SignalSender {
    /// Record a new value and queue it for every subscriber.
    pub fn send(&self, value: f64) {
        let mut signal = self.signal.lock();
        signal.latest = Some(value);
        // Closed queues belong to cancelled subscriptions
        signal.subscribers.retain(|tx| tx.send(value).is_ok());
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A host that receives values through per-signal queues and publishes
/// deltas to an [`Output`].
///
/// # Example
///
/// ```
/// use zonewatch::{ChannelHost, Output};
///
/// let (output, _rx) = Output::channel(16);
/// let host = ChannelHost::new("urn:mrn:imo:mmsi:230099999", output);
///
/// let depth = host.declare("environment.depth.belowKeel");
/// depth.send(4.2);
/// assert_eq!(host.latest("environment.depth.belowKeel"), Some(4.2));
/// ```
#[derive(Debug)]
pub struct ChannelHost {
    self_id: String,
    signals: RwLock<BTreeMap<String, SharedSignal>>,
    output: Output,
}

impl ChannelHost {
    pub fn new(self_id: impl Into<String>, output: Output) -> Self {
        Self {
            self_id: self_id.into(),
            signals: RwLock::new(BTreeMap::new()),
            output,
        }
    }

    /// Declare a signal path, or get the sender of an existing one.
    pub fn declare(&self, path: &str) -> SignalSender {
        // Fast path: check if it exists
        if let Some(sender) = self.signal(path) {
            return sender;
        }

        let mut signals = self.signals.write();
        let signal = signals.entry(path.to_string()).or_default().clone();
        SignalSender {
            path: path.to_string(),
            signal,
        }
    }

    /// Sender for a declared path.
    pub fn signal(&self, path: &str) -> Option<SignalSender> {
        self.signals.read().get(path).map(|signal| SignalSender {
            path: path.to_string(),
            signal: signal.clone(),
        })
    }

    /// Send a value to a declared path.
    pub fn send(&self, path: &str, value: f64) -> Result<(), HostError> {
        let sender = self
            .signal(path)
            .ok_or_else(|| HostError::UnknownPath(path.to_string()))?;
        sender.send(value);
        Ok(())
    }

    /// Latest value of a declared path, if one has been sent.
    pub fn latest(&self, path: &str) -> Option<f64> {
        self.signals.read().get(path).and_then(|signal| signal.lock().latest)
    }

    /// All declared paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.signals.read().keys().cloned().collect()
    }
}

impl ValueStream for ChannelHost {
    fn subscribe(&self, path: &str, on_value: ValueCallback) -> Result<Subscription, HostError> {
        let signal = self
            .signals
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| HostError::UnknownPath(path.to_string()))?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| HostError::NoRuntime)?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            // Queue the current value ahead of any later send
            let mut signal = signal.lock();
            if let Some(value) = signal.latest {
                let _ = tx.send(value);
            }
            signal.subscribers.push(tx);
        }

        let task_path = path.to_string();
        let task = runtime.spawn(async move {
            while let Some(value) = rx.recv().await {
                on_value(value);
            }
            debug!("Signal {} closed", task_path);
        });

        Ok(Subscription::new(move || task.abort()))
    }
}

impl DeltaSink for ChannelHost {
    fn publish(&self, delta: Delta) {
        self.output.emit(&delta);
    }
}

impl Host for ChannelHost {
    fn self_id(&self) -> &str {
        &self.self_id
    }
}
