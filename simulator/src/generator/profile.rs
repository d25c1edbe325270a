use anyhow::bail;
use pickupcore::host_interface::{Sample, DEFAULT_SAMPLE_INTERVAL_MS};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const GRAVITY: f64 = 9.81;
/// Resting z reading once the phone is tilted upright in hand.
const UPRIGHT_Z: f64 = 2.0;
/// Lateral tilt picked up on the x axis while the phone is held.
const UPRIGHT_X: f64 = 3.0;
/// Samples a lift gesture stays upright before settling back flat.
const GESTURE_HOLD: usize = 6;

/// Configuration for generating a synthetic accelerometer trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub samples: usize,
    pub interval_ms: u64,
    pub pickups: usize,
    pub noise: f64,
    pub seed: u64,
    pub scenario: Option<String>,
    pub description: Option<String>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            samples: 600,
            interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            pickups: 3,
            noise: 0.05,
            seed: 0,
            scenario: None,
            description: None,
        }
    }
}

fn jitter(rng: &mut StdRng, noise: f64) -> f64 {
    if noise > 0.0 {
        rng.gen_range(-noise..noise)
    } else {
        0.0
    }
}

/// Builds a trace of a phone resting flat with `pickups` evenly spaced lift
/// gestures injected. Each gesture is one flat-to-upright transition with a
/// lateral jerk, held upright for a few ticks, then settled back flat.
pub fn build_pickup_trace_from_config(config: &TraceConfig) -> anyhow::Result<Vec<Sample>> {
    let spacing = config.samples / (config.pickups + 1);
    if config.pickups > 0 && spacing < GESTURE_HOLD + 2 {
        bail!(
            "trace of {} samples is too short for {} pickups",
            config.samples,
            config.pickups
        );
    }

    let mut upright = vec![false; config.samples];
    for gesture in 0..config.pickups {
        let start = (gesture + 1) * spacing;
        for slot in upright.iter_mut().skip(start).take(GESTURE_HOLD) {
            *slot = true;
        }
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut trace = Vec::with_capacity(config.samples);
    for &held in &upright {
        let sample = if held {
            Sample::new(
                UPRIGHT_X + jitter(&mut rng, config.noise),
                jitter(&mut rng, config.noise),
                UPRIGHT_Z + jitter(&mut rng, config.noise),
            )
        } else {
            Sample::new(
                jitter(&mut rng, config.noise),
                jitter(&mut rng, config.noise),
                GRAVITY + jitter(&mut rng, config.noise),
            )
        };
        trace.push(sample);
    }

    Ok(trace)
}

pub fn build_pickup_trace(samples: usize, pickups: usize) -> anyhow::Result<Vec<Sample>> {
    let config = TraceConfig {
        samples,
        pickups,
        ..Default::default()
    };
    build_pickup_trace_from_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickupcore::detector::PickupDetector;

    fn count_events(trace: &[Sample]) -> usize {
        let mut detector = PickupDetector::with_defaults();
        trace
            .iter()
            .filter(|sample| detector.ingest(**sample).is_some())
            .count()
    }

    #[test]
    fn generator_builds_expected_sample_count() {
        let trace = build_pickup_trace(600, 3).unwrap();
        assert_eq!(trace.len(), 600);
    }

    #[test]
    fn each_gesture_yields_exactly_one_event() {
        let trace = build_pickup_trace(600, 3).unwrap();
        assert_eq!(count_events(&trace), 3);
    }

    #[test]
    fn resting_trace_yields_no_events() {
        let trace = build_pickup_trace(200, 0).unwrap();
        assert_eq!(count_events(&trace), 0);
    }

    #[test]
    fn generator_is_deterministic_per_seed() {
        let config = TraceConfig {
            samples: 120,
            pickups: 2,
            seed: 13,
            ..Default::default()
        };
        let first = build_pickup_trace_from_config(&config).unwrap();
        let second = build_pickup_trace_from_config(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(count_events(&first), 2);
    }

    #[test]
    fn overcrowded_trace_is_rejected() {
        assert!(build_pickup_trace(20, 10).is_err());
    }
}
