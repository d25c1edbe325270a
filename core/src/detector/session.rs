use crate::detector::PickupDetector;
use crate::host_interface::{PermissionGate, PermissionStatus, Sample, SampleSource, Subscription};
use crate::prelude::{DetectorConfig, EventSink, SessionError};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{MetricsRecorder, MetricsSnapshot};
use log::warn;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Owns one monitoring pass: the detector, the sample subscription, and the
/// consuming end of the sample channel.
///
/// Samples are processed strictly in arrival order on the caller's thread;
/// there is no internal locking and `ingest` is never entered concurrently.
pub struct MonitoringSession {
    detector: PickupDetector,
    interval_ms: u64,
    subscription: Option<Box<dyn Subscription>>,
    receiver: Option<UnboundedReceiver<Sample>>,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl MonitoringSession {
    pub fn new(config: DetectorConfig, interval_ms: u64) -> Self {
        Self {
            detector: PickupDetector::new(config),
            interval_ms,
            subscription: None,
            receiver: None,
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    /// Queries the permission gate once and, when granted, subscribes the
    /// source to the session's channel. Starting an already started session
    /// is a no-op.
    pub fn start(
        &mut self,
        gate: &dyn PermissionGate,
        source: &mut dyn SampleSource,
    ) -> Result<(), SessionError> {
        if self.subscription.is_some() {
            return Ok(());
        }
        if gate.query() == PermissionStatus::Denied {
            return Err(SessionError::PermissionDenied);
        }

        self.detector.start();
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = source.subscribe(self.interval_ms, tx)?;
        self.subscription = Some(handle);
        self.receiver = Some(rx);
        self.logger.record(&format!(
            "monitoring started, cadence {} ms",
            self.interval_ms
        ));
        Ok(())
    }

    /// Classifies one sample and dispatches any resulting event.
    ///
    /// A sink failure is logged and counted, never propagated; collaborator
    /// trouble must not stall the stream or corrupt detector state.
    pub fn handle_sample(&mut self, sample: Sample, sink: &mut dyn EventSink) {
        if !sample.is_finite() {
            self.metrics.record_rejected();
        }
        self.metrics.record_sample();

        if self.detector.ingest(sample).is_some() {
            self.metrics.record_event();
            self.logger.record("phone pickup detected");
            if let Err(err) = sink.on_pickup() {
                self.metrics.record_sink_failure();
                warn!("event sink failed: {}", err);
            }
        }
    }

    /// Consumes the sample channel in arrival order until the producer
    /// closes it. Returns the number of samples processed.
    pub fn drain(&mut self, sink: &mut dyn EventSink) -> usize {
        let mut receiver = match self.receiver.take() {
            Some(receiver) => receiver,
            None => return 0,
        };

        let mut processed = 0;
        while let Some(sample) = receiver.blocking_recv() {
            self.handle_sample(sample, sink);
            processed += 1;
        }
        processed
    }

    /// Cancels the subscription and discards rolling state. Idempotent;
    /// stopping a session that never started is a no-op.
    pub fn stop(&mut self) {
        if let Some(mut handle) = self.subscription.take() {
            handle.cancel();
            self.logger.record("monitoring stopped");
        }
        self.receiver = None;
        self.detector.stop();
    }

    pub fn is_started(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{HostError, HostResult};
    use tokio::sync::mpsc::UnboundedSender;

    struct GrantingGate;

    impl PermissionGate for GrantingGate {
        fn query(&self) -> PermissionStatus {
            PermissionStatus::Granted
        }
    }

    struct DenyingGate;

    impl PermissionGate for DenyingGate {
        fn query(&self) -> PermissionStatus {
            PermissionStatus::Denied
        }
    }

    struct ClosedHandle;

    impl Subscription for ClosedHandle {
        fn cancel(&mut self) {}
    }

    /// Pushes a fixed batch synchronously and closes the channel.
    struct BatchSource {
        samples: Vec<Sample>,
    }

    impl SampleSource for BatchSource {
        fn subscribe(
            &mut self,
            _interval_ms: u64,
            tx: UnboundedSender<Sample>,
        ) -> HostResult<Box<dyn Subscription>> {
            for sample in self.samples.drain(..) {
                tx.send(sample)
                    .map_err(|err| HostError::Subscription(err.to_string()))?;
            }
            Ok(Box::new(ClosedHandle))
        }
    }

    struct RecordingSink {
        pickups: usize,
    }

    impl EventSink for RecordingSink {
        fn on_pickup(&mut self) -> HostResult<()> {
            self.pickups += 1;
            Ok(())
        }
    }

    struct FailingSink;

    impl EventSink for FailingSink {
        fn on_pickup(&mut self) -> HostResult<()> {
            Err(HostError::Storage("disk full".into()))
        }
    }

    fn lift_twice() -> Vec<Sample> {
        vec![
            Sample::new(0.0, 0.0, 9.8),
            Sample::new(0.0, 0.0, 2.0),
            Sample::new(0.0, 0.0, 9.8),
            Sample::new(0.0, 0.0, 2.0),
        ]
    }

    #[test]
    fn denied_permission_blocks_subscription() {
        let mut session = MonitoringSession::new(DetectorConfig::default(), 100);
        let mut source = BatchSource {
            samples: lift_twice(),
        };
        let result = session.start(&DenyingGate, &mut source);
        assert!(matches!(result, Err(SessionError::PermissionDenied)));
        assert!(!session.is_started());
    }

    #[test]
    fn drain_dispatches_one_event_per_transition() {
        let mut session = MonitoringSession::new(DetectorConfig::default(), 100);
        let mut source = BatchSource {
            samples: lift_twice(),
        };
        session.start(&GrantingGate, &mut source).unwrap();

        let mut sink = RecordingSink { pickups: 0 };
        let processed = session.drain(&mut sink);
        session.stop();

        assert_eq!(processed, 4);
        assert_eq!(sink.pickups, 2);
        let metrics = session.metrics();
        assert_eq!(metrics.samples, 4);
        assert_eq!(metrics.events, 2);
        assert_eq!(metrics.sink_failures, 0);
    }

    #[test]
    fn start_is_a_no_op_when_already_started() {
        let mut session = MonitoringSession::new(DetectorConfig::default(), 100);
        let mut source = BatchSource {
            samples: lift_twice(),
        };
        session.start(&GrantingGate, &mut source).unwrap();
        let mut empty = BatchSource {
            samples: Vec::new(),
        };
        session.start(&DenyingGate, &mut empty).unwrap();
        assert!(session.is_started());
    }

    #[test]
    fn sink_failures_are_contained() {
        let mut session = MonitoringSession::new(DetectorConfig::default(), 100);
        let mut source = BatchSource {
            samples: lift_twice(),
        };
        session.start(&GrantingGate, &mut source).unwrap();

        let processed = session.drain(&mut FailingSink);
        assert_eq!(processed, 4);
        let metrics = session.metrics();
        assert_eq!(metrics.events, 2);
        assert_eq!(metrics.sink_failures, 2);
    }

    #[test]
    fn non_finite_samples_are_counted_as_rejected() {
        let mut session = MonitoringSession::new(DetectorConfig::default(), 100);
        let mut source = BatchSource {
            samples: vec![
                Sample::new(0.0, 0.0, 9.8),
                Sample::new(f64::NAN, 0.0, 2.0),
                Sample::new(0.0, 0.0, 9.8),
            ],
        };
        session.start(&GrantingGate, &mut source).unwrap();

        let mut sink = RecordingSink { pickups: 0 };
        session.drain(&mut sink);

        assert_eq!(sink.pickups, 0);
        assert_eq!(session.metrics().rejected, 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut session = MonitoringSession::new(DetectorConfig::default(), 100);
        session.stop();
        session.stop();
        assert!(!session.is_started());

        let mut source = BatchSource {
            samples: lift_twice(),
        };
        session.start(&GrantingGate, &mut source).unwrap();
        session.stop();
        session.stop();
        assert!(!session.is_started());
    }
}
