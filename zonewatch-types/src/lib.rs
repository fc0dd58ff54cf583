//! # zonewatch-types
//!
//! Core types for zone-based notifications. This crate defines the
//! configuration records that describe zones on a signal path and the
//! delta envelopes published when a path changes zone.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature for JSON configuration and deltas
//! - **Wire compatible**: Serialized deltas match the Signal K delta shape exactly
//! - **Ergonomic builders**: Fluent API for constructing zones in code and tests
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON/TOML/etc. (de)serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use zonewatch_types::{Method, PathConfig, ZoneSpec, ZoneState};
//!
//! let path = PathConfig::new("propulsion.main.temperature")
//!     .zone(ZoneSpec::new(ZoneState::Normal).lower(0.0).upper(360.0))
//!     .zone(
//!         ZoneSpec::new(ZoneState::Alarm)
//!             .lower(360.0)
//!             .method([Method::Visual, Method::Sound])
//!             .message("Engine overheating"),
//!     );
//!
//! assert!(path.active);
//! assert_eq!(path.zones.len(), 2);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod config;
mod delta;
mod payload;
mod zone;

pub use config::*;
pub use delta::*;
pub use payload::*;
pub use zone::*;

/// Source label attached to every update published by zonewatch.
pub const SOURCE_LABEL: &str = "self.notificationhandler";

/// Prefix prepended to a path key to form its notification path.
pub const NOTIFICATION_PREFIX: &str = "notifications.";
