//! Values carried inside published deltas.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{Method, ZoneSpec, ZoneState};

/// Message used when a value falls outside every configured zone.
pub const NORMAL_RANGE_MESSAGE: &str = "Value is within normal range";

/// Notification value published under `notifications.<key>`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotificationPayload {
    pub state: ZoneState,
    pub message: String,
    pub method: Vec<Method>,
}

impl NotificationPayload {
    /// The payload published when no zone matches.
    pub fn normal() -> Self {
        Self {
            state: ZoneState::Normal,
            message: String::from(NORMAL_RANGE_MESSAGE),
            method: Vec::new(),
        }
    }
}

/// One zone as described in path metadata. Methods are not included here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneMetaEntry {
    pub state: ZoneState,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub lower: Option<f64>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub upper: Option<f64>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub message: Option<String>,
}

impl From<&ZoneSpec> for ZoneMetaEntry {
    fn from(zone: &ZoneSpec) -> Self {
        Self {
            state: zone.state,
            lower: zone.lower,
            upper: zone.upper,
            message: zone.message.clone(),
        }
    }
}

/// Metadata value describing every zone configured on a path.
///
/// The `*_method` fields carry the methods of the first zone with that state,
/// and are omitted when the path has no zone in that state.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZoneMeta {
    pub zones: Vec<ZoneMetaEntry>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub nominal_method: Option<Vec<Method>>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub normal_method: Option<Vec<Method>>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alert_method: Option<Vec<Method>>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub warn_method: Option<Vec<Method>>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alarm_method: Option<Vec<Method>>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub emergency_method: Option<Vec<Method>>,
}

impl ZoneMeta {
    /// The method field for a state.
    pub fn method_for(&self, state: ZoneState) -> Option<&Vec<Method>> {
        match state {
            ZoneState::Nominal => self.nominal_method.as_ref(),
            ZoneState::Normal => self.normal_method.as_ref(),
            ZoneState::Alert => self.alert_method.as_ref(),
            ZoneState::Warn => self.warn_method.as_ref(),
            ZoneState::Alarm => self.alarm_method.as_ref(),
            ZoneState::Emergency => self.emergency_method.as_ref(),
        }
    }

    /// Mutable access to the method field for a state.
    pub fn method_for_mut(&mut self, state: ZoneState) -> &mut Option<Vec<Method>> {
        match state {
            ZoneState::Nominal => &mut self.nominal_method,
            ZoneState::Normal => &mut self.normal_method,
            ZoneState::Alert => &mut self.alert_method,
            ZoneState::Warn => &mut self.warn_method,
            ZoneState::Alarm => &mut self.alarm_method,
            ZoneState::Emergency => &mut self.emergency_method,
        }
    }
}
