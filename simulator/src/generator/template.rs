/// Generates a linear z-axis ramp between two readings for hand-built traces.
#[allow(dead_code)]
pub fn z_ramp(from: f64, to: f64, steps: usize) -> Vec<f64> {
    (0..steps)
        .map(|i| from + (to - from) * (i as f64 / steps.max(1) as f64))
        .collect()
}
