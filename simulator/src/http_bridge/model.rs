use serde::{Deserialize, Serialize};

#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MonitorModel {
    pub samples_processed: usize,
    pub events: usize,
    pub pickup_count: u64,
    pub notes: Vec<String>,
}

#[allow(dead_code)]
impl MonitorModel {
    pub fn new() -> Self {
        Self {
            samples_processed: 0,
            events: 0,
            pickup_count: 0,
            notes: Vec::new(),
        }
    }
}
