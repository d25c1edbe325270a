use crate::host_interface::{PickupEvent, Sample};
use crate::prelude::DetectorConfig;

/// Classifies consecutive accelerometer samples into pickup events.
///
/// The physical model: a phone resting flat on a surface reads near gravity
/// magnitude on its z axis; lifting it rotates that axis away from gravity
/// while producing a jerk. A pickup fires when the previous sample was flat,
/// the current one is upright, and any single axis moved by more than the
/// motion delta between the two.
///
/// The decision for sample n depends only on sample n and sample n-1, so the
/// detector holds exactly one sample of state and runs in O(1) time and
/// memory per tick. At most one event is emitted per `ingest` call.
pub struct PickupDetector {
    config: DetectorConfig,
    previous: Option<Sample>,
}

impl PickupDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            previous: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DetectorConfig::default())
    }

    /// Begins a monitoring pass; the first sample after this is
    /// un-classifiable and only seeds the rolling state.
    pub fn start(&mut self) {
        self.previous = None;
    }

    /// Discards rolling state. Idempotent; stopping a fresh detector is a
    /// no-op.
    pub fn stop(&mut self) {
        self.previous = None;
    }

    /// True once a sample has been ingested since the last start/stop.
    pub fn is_tracking(&self) -> bool {
        self.previous.is_some()
    }

    /// Classifies one sample against the previous one.
    ///
    /// The rolling state advances on every tick, whether or not the event
    /// fires. Non-finite components in either sample suppress firing for the
    /// tick they touch but still advance the state; the stream never halts
    /// on bad data.
    pub fn ingest(&mut self, sample: Sample) -> Option<PickupEvent> {
        let fired = match self.previous {
            None => false,
            Some(previous) => self.transition_fires(&previous, &sample),
        };
        self.previous = Some(sample);
        if fired {
            Some(PickupEvent)
        } else {
            None
        }
    }

    fn transition_fires(&self, previous: &Sample, current: &Sample) -> bool {
        if !previous.is_finite() || !current.is_finite() {
            return false;
        }

        let significant_motion = (previous.x - current.x).abs() > self.config.motion_delta
            || (previous.y - current.y).abs() > self.config.motion_delta
            || (previous.z - current.z).abs() > self.config.motion_delta;
        let was_flat = previous.z.abs() > self.config.flat_threshold;
        let is_upright = current.z.abs() < self.config.upright_threshold;

        was_flat && is_upright && significant_motion
    }
}

impl Default for PickupDetector {
    fn default() -> Self {
        Self::with_defaults()
    }
}
