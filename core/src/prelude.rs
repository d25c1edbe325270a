use serde::{Deserialize, Serialize};

/// Threshold set driving the pickup classification.
///
/// The defaults are the reference heuristic; the struct exists so the values
/// can travel through the host's configuration layer alongside everything
/// else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Per-axis sample-to-sample delta above which motion is significant (m/s²).
    pub motion_delta: f64,
    /// Previous |z| above which the phone counts as resting flat (m/s²).
    pub flat_threshold: f64,
    /// Current |z| below which the phone counts as tilted upright (m/s²).
    pub upright_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            motion_delta: 1.5,
            flat_threshold: 8.0,
            upright_threshold: 5.0,
        }
    }
}

/// Failures raised by host collaborators (storage, notification, sampling).
#[derive(thiserror::Error, Debug)]
pub enum HostError {
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("notification failure: {0}")]
    Notification(String),
    #[error("subscription failure: {0}")]
    Subscription(String),
}

pub type HostResult<T> = Result<T, HostError>;

/// Errors surfaced by the monitoring session lifecycle.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("notification permission not granted")]
    PermissionDenied,
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Receiver of detected pickup events.
///
/// Called at most once per detected event. By convention the host increments
/// its persisted counter and then delivers a notification; the core only
/// requires that a failure is reported back so the session can log it.
pub trait EventSink {
    fn on_pickup(&mut self) -> HostResult<()>;
}
