//! Zone definitions: a bounded numeric range with a severity and notification method.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Severity state attached to a zone.
///
/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ZoneState {
    Nominal,
    #[default]
    Normal,
    Alert,
    Warn,
    Alarm,
    Emergency,
}

impl ZoneState {
    /// Every state, in severity order.
    pub const ALL: [ZoneState; 6] = [
        ZoneState::Nominal,
        ZoneState::Normal,
        ZoneState::Alert,
        ZoneState::Warn,
        ZoneState::Alarm,
        ZoneState::Emergency,
    ];

    /// The wire name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneState::Nominal => "nominal",
            ZoneState::Normal => "normal",
            ZoneState::Alert => "alert",
            ZoneState::Warn => "warn",
            ZoneState::Alarm => "alarm",
            ZoneState::Emergency => "emergency",
        }
    }
}

impl fmt::Display for ZoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a notification should be presented to the crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Method {
    Visual,
    Sound,
}

/// Methods used when a zone does not configure any.
pub fn default_methods() -> Vec<Method> {
    vec![Method::Visual, Method::Sound]
}

/// A single zone on a signal path.
///
/// Bounds are optional. A zone with neither bound matches every value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneSpec {
    /// Lower bound of the zone.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub lower: Option<f64>,

    /// Upper bound of the zone.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub upper: Option<f64>,

    /// State reported while the value sits in this zone.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: ZoneState,

    /// Notification methods, at most two.
    #[cfg_attr(feature = "serde", serde(default = "default_methods"))]
    pub method: Vec<Method>,

    /// Custom notification message.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub message: Option<String>,
}

impl ZoneSpec {
    /// Create an unbounded zone with the given state and the default methods.
    pub fn new(state: ZoneState) -> Self {
        Self {
            lower: None,
            upper: None,
            state,
            method: default_methods(),
            message: None,
        }
    }

    /// Set the lower bound.
    pub fn lower(mut self, lower: f64) -> Self {
        self.lower = Some(lower);
        self
    }

    /// Set the upper bound.
    pub fn upper(mut self, upper: f64) -> Self {
        self.upper = Some(upper);
        self
    }

    /// Replace the notification methods.
    pub fn method(mut self, method: impl IntoIterator<Item = Method>) -> Self {
        self.method = method.into_iter().collect();
        self
    }

    /// Set a custom message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The configured message, treating an empty string as absent.
    pub fn custom_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

impl Default for ZoneSpec {
    fn default() -> Self {
        Self::new(ZoneState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_builder() {
        let zone = ZoneSpec::new(ZoneState::Warn)
            .lower(10.0)
            .upper(20.0)
            .method([Method::Sound])
            .message("getting warm");

        assert_eq!(zone.lower, Some(10.0));
        assert_eq!(zone.upper, Some(20.0));
        assert_eq!(zone.state, ZoneState::Warn);
        assert_eq!(zone.method, vec![Method::Sound]);
        assert_eq!(zone.custom_message(), Some("getting warm"));
    }

    #[test]
    fn empty_message_is_not_custom() {
        let zone = ZoneSpec::new(ZoneState::Alarm).message("");
        assert_eq!(zone.custom_message(), None);
    }

    #[test]
    fn states_are_ordered_by_severity() {
        assert!(ZoneState::Nominal < ZoneState::Normal);
        assert!(ZoneState::Alarm < ZoneState::Emergency);
        assert_eq!(ZoneState::ALL.len(), 6);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_defaults() {
        let zone: ZoneSpec = serde_json::from_str(r#"{"upper": 5}"#).unwrap();
        assert_eq!(zone.state, ZoneState::Normal);
        assert_eq!(zone.method, vec![Method::Visual, Method::Sound]);
        assert_eq!(zone.upper, Some(5.0));
        assert!(zone.lower.is_none());
        assert!(zone.message.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_unknown_state() {
        let result = serde_json::from_str::<ZoneSpec>(r#"{"state": "panic"}"#);
        assert!(result.is_err());
    }
}
