use crate::host::{
    CountingSink, FileCounterStore, InMemoryCounterStore, LogNotifier, StaticPermissionGate,
    TraceSource,
};
use crate::workflow::config::MonitorConfig;
use anyhow::Context;
use log::warn;
use pickupcore::detector::MonitoringSession;
use pickupcore::host_interface::{CounterStore, Sample};
use pickupcore::prelude::SessionError;
use std::fs;

pub struct MonitorReport {
    pub samples_processed: usize,
    pub events: usize,
    pub pickup_count: u64,
    pub notes: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: MonitorConfig,
}

impl Runner {
    pub fn new(config: MonitorConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, trace: &[Sample]) -> anyhow::Result<MonitorReport> {
        let store: Box<dyn CounterStore> = match &self.config.counter_dir {
            Some(dir) => {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating counter directory {}", dir.display()))?;
                Box::new(FileCounterStore::new(dir))
            }
            None => Box::new(InMemoryCounterStore::new()),
        };
        let mut sink = CountingSink::new(store, Box::new(LogNotifier::new()));

        let mut session =
            MonitoringSession::new(self.config.to_detector_config(), self.config.interval_ms);
        let gate = StaticPermissionGate::new(self.config.permission_granted);
        let mut source = TraceSource::new(trace.to_vec());

        match session.start(&gate, &mut source) {
            Ok(()) => {}
            Err(SessionError::PermissionDenied) => {
                warn!("notification permission denied, monitoring not started");
                return Ok(MonitorReport {
                    samples_processed: 0,
                    events: 0,
                    pickup_count: sink.current_count().unwrap_or(0),
                    notes: vec!["notification permission denied, monitoring not started".into()],
                });
            }
            Err(err) => return Err(err).context("starting monitoring session"),
        }

        let samples_processed = session.drain(&mut sink);
        session.stop();

        let metrics = session.metrics();
        let pickup_count = sink
            .current_count()
            .context("reading final pickup count")?;

        let mut notes = vec![format!(
            "{} samples at {} ms cadence",
            samples_processed, self.config.interval_ms
        )];
        if metrics.rejected > 0 {
            notes.push(format!("{} non-finite samples suppressed", metrics.rejected));
        }
        if metrics.sink_failures > 0 {
            notes.push(format!("{} sink dispatch failures", metrics.sink_failures));
        }

        Ok(MonitorReport {
            samples_processed,
            events: metrics.events,
            pickup_count,
            notes,
        })
    }
}
