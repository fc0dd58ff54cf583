//! Path configuration: which signals are watched and their ordered zones.

use alloc::string::String;
use alloc::vec::Vec;

use crate::ZoneSpec;

/// Zones configured for one signal path.
///
/// Zone order is significant: the first matching zone wins.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathConfig {
    /// Signal path identifier, e.g. `environment.depth.belowKeel`.
    pub key: String,

    /// Whether notifications are emitted for this path.
    #[cfg_attr(feature = "serde", serde(default = "default_active"))]
    pub active: bool,

    /// Ordered zones for this path.
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: Vec<ZoneSpec>,
}

#[cfg(feature = "serde")]
fn default_active() -> bool {
    true
}

impl PathConfig {
    /// Create an active path with no zones.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            active: true,
            zones: Vec::new(),
        }
    }

    /// Append a zone. Zones are matched in the order they are added.
    pub fn zone(mut self, zone: ZoneSpec) -> Self {
        self.zones.push(zone);
        self
    }

    /// Set whether the path is active.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// The path that notifications for this key are published under.
    pub fn notification_path(&self) -> String {
        let mut path = String::from(crate::NOTIFICATION_PREFIX);
        path.push_str(&self.key);
        path
    }
}

/// The full set of watched paths, in configuration order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZonesConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: Vec<PathConfig>,
}

impl ZonesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path.
    pub fn path(mut self, path: PathConfig) -> Self {
        self.zones.push(path);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Paths that should be classified at runtime.
    pub fn active_paths(&self) -> impl Iterator<Item = &PathConfig> {
        self.zones.iter().filter(|p| p.active)
    }
}
