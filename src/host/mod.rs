//! Host abstraction for receiving values and publishing deltas.
//!
//! The zone handler does not own the value stream or the message bus. It
//! talks to them through the [`ValueStream`] and [`DeltaSink`] traits, which
//! a host implements. [`ChannelHost`] is a tokio-based implementation used by
//! the binary and by tests.

mod channel;
mod feed;
mod output;

pub use channel::{ChannelHost, SignalSender};
pub use feed::{spawn_feed, SignalUpdate};
pub use output::Output;

use std::fmt;

use zonewatch_types::Delta;

use crate::error::HostError;

/// Callback invoked with each new value of a subscribed signal.
pub type ValueCallback = Box<dyn Fn(f64) + Send + Sync>;

/// Source of live values for named signal paths.
pub trait ValueStream: Send + Sync {
    /// Subscribe to the latest value of `path`.
    ///
    /// The callback is invoked once per delivered value. Deliveries for a
    /// single subscription must not overlap.
    fn subscribe(&self, path: &str, on_value: ValueCallback) -> Result<Subscription, HostError>;
}

/// Destination for outbound deltas.
///
/// Publishing is fire-and-forget: implementations must not block and
/// failures are not reported back.
pub trait DeltaSink: Send + Sync {
    fn publish(&self, delta: Delta);
}

/// A host supplies values, accepts deltas and knows which vessel it is.
pub trait Host: ValueStream + DeltaSink {
    /// Identifier of the vessel this host runs on.
    fn self_id(&self) -> &str;
}

/// A live subscription returned by [`ValueStream::subscribe`].
///
/// Cancels on [`Subscription::unsubscribe`] or when dropped.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Create a subscription that runs `cancel` when unsubscribed.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancel the subscription. Calling this more than once has no effect.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Whether the subscription has not yet been cancelled.
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
