//! Delta envelopes handed to the host's message bus.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::{NotificationPayload, ZoneMeta, SOURCE_LABEL};

/// A delta: a batch of updates for one context.
///
/// # Example
///
/// ```rust
/// use zonewatch_types::{Delta, NotificationPayload};
///
/// let delta = Delta::notification(
///     "urn:mrn:imo:mmsi:230099999",
///     "notifications.environment.depth.belowKeel",
///     NotificationPayload::normal(),
/// );
///
/// assert_eq!(delta.context, "vessels.urn:mrn:imo:mmsi:230099999");
/// assert_eq!(delta.updates.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta {
    /// Context the updates apply to, e.g. `vessels.<self id>`.
    pub context: String,

    /// Updates, each attributed to a source.
    pub updates: Vec<Update>,
}

impl Delta {
    /// The context string for the vessel identified by `self_id`.
    pub fn vessel_context(self_id: &str) -> String {
        let mut context = String::from("vessels.");
        context.push_str(self_id);
        context
    }

    /// A delta carrying one notification value.
    pub fn notification(
        self_id: &str,
        path: impl Into<String>,
        value: NotificationPayload,
    ) -> Self {
        Self {
            context: Self::vessel_context(self_id),
            updates: vec![Update::values(vec![PathValue {
                path: path.into(),
                value,
            }])],
        }
    }

    /// A delta with one metadata update per entry.
    pub fn meta(self_id: &str, entries: impl IntoIterator<Item = PathMeta>) -> Self {
        Self {
            context: Self::vessel_context(self_id),
            updates: entries
                .into_iter()
                .map(|entry| Update::meta(vec![entry]))
                .collect(),
        }
    }

    /// Iterate over every notification value in this delta.
    pub fn values(&self) -> impl Iterator<Item = &PathValue> {
        self.updates.iter().flat_map(|u| match &u.content {
            UpdateContent::Values(values) => values.as_slice(),
            UpdateContent::Meta(_) => &[],
        })
    }

    /// Iterate over every metadata entry in this delta.
    pub fn meta_entries(&self) -> impl Iterator<Item = &PathMeta> {
        self.updates.iter().flat_map(|u| match &u.content {
            UpdateContent::Meta(meta) => meta.as_slice(),
            UpdateContent::Values(_) => &[],
        })
    }
}

/// Origin of an update.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Source {
    pub label: String,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            label: String::from(SOURCE_LABEL),
        }
    }
}

/// A single update within a delta.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Update {
    pub source: Source,

    /// Serialized as either a `values` or a `meta` array.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub content: UpdateContent,
}

impl Update {
    pub fn values(values: Vec<PathValue>) -> Self {
        Self {
            source: Source::default(),
            content: UpdateContent::Values(values),
        }
    }

    pub fn meta(meta: Vec<PathMeta>) -> Self {
        Self {
            source: Source::default(),
            content: UpdateContent::Meta(meta),
        }
    }
}

/// Body of an update.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UpdateContent {
    Values(Vec<PathValue>),
    Meta(Vec<PathMeta>),
}

/// A notification value for a path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathValue {
    pub path: String,
    pub value: NotificationPayload,
}

/// A metadata value for a path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathMeta {
    pub path: String,
    pub value: ZoneMeta,
}
