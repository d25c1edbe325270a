//! Motion-classification core for the Rust pickup-monitor platform.
//!
//! The modules mirror the legacy handset monitoring loop while providing
//! an explicit session lifecycle, typed host contracts, and O(1)
//! per-sample classification.

pub mod detector;
pub mod host_interface;
pub mod prelude;
pub mod telemetry;

pub use prelude::{DetectorConfig, EventSink, HostError, HostResult, SessionError};
