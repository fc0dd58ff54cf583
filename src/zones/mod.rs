//! Zone classification and notification dispatch.
//!
//! ## Submodules
//!
//! - [`classifier`]: First-match range tests ([`ZoneClassifier`], [`Classification`])
//! - [`notification`]: Payload construction for a classification
//! - [`dispatcher`]: Per-path change detection and publishing ([`NotificationDispatcher`])
//! - [`metadata`]: One-time description of all configured zones
//!
//! ## Data Flow
//!
//! ```text
//! value (f64)
//!     │
//!     ▼
//! ZoneClassifier::classify()
//!     │
//!     ▼
//! change detection (last classification)
//!     │
//!     ▼
//! build_payload() ──▶ Delta ──▶ DeltaSink::publish()
//! ```

pub mod classifier;
pub mod dispatcher;
pub mod metadata;
pub mod notification;

pub use classifier::{Classification, ZoneClassifier};
pub use dispatcher::{DispatchHandle, NotificationDispatcher};
pub use metadata::{metadata_delta, zone_meta};
pub use notification::build_payload;
