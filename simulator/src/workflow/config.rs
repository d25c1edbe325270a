use anyhow::Context;
use pickupcore::host_interface::DEFAULT_SAMPLE_INTERVAL_MS;
use pickupcore::prelude::DetectorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_interval_ms() -> u64 {
    DEFAULT_SAMPLE_INTERVAL_MS
}

fn default_permission() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    pub motion_delta: f64,
    pub flat_threshold: f64,
    pub upright_threshold: f64,
    #[serde(default)]
    pub counter_dir: Option<PathBuf>,
    #[serde(default = "default_permission")]
    pub permission_granted: bool,
}

impl MonitorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading monitor config {}", path_ref.display()))?;
        let config: MonitorConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing monitor config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(interval_ms: u64, counter_dir: Option<PathBuf>) -> Self {
        let thresholds = DetectorConfig::default();
        Self {
            interval_ms,
            motion_delta: thresholds.motion_delta,
            flat_threshold: thresholds.flat_threshold,
            upright_threshold: thresholds.upright_threshold,
            counter_dir,
            permission_granted: true,
        }
    }

    pub fn to_detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            motion_delta: self.motion_delta,
            flat_threshold: self.flat_threshold,
            upright_threshold: self.upright_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_carries_reference_thresholds() {
        let cfg = MonitorConfig::from_args(100, None);
        let detector = cfg.to_detector_config();
        assert_eq!(detector.motion_delta, 1.5);
        assert_eq!(detector.flat_threshold, 8.0);
        assert_eq!(detector.upright_threshold, 5.0);
        assert!(cfg.permission_granted);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"interval_ms: 50\nmotion_delta: 1.5\nflat_threshold: 8.0\nupright_threshold: 5.0\npermission_granted: false\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = MonitorConfig::load(&path).unwrap();
        assert_eq!(cfg.interval_ms, 50);
        assert!(!cfg.permission_granted);
        assert!(cfg.counter_dir.is_none());
    }
}
