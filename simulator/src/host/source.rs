use pickupcore::host_interface::{Sample, SampleSource, Subscription};
use pickupcore::prelude::{HostError, HostResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Handle for a source whose delivery already finished when `subscribe`
/// returned.
struct InertHandle;

impl Subscription for InertHandle {
    fn cancel(&mut self) {}
}

/// Pushes a prepared trace into the channel synchronously, then closes it.
///
/// The trace samples are nominally one sampling interval apart; replaying
/// them back-to-back is fine because the detector's decision only looks at
/// consecutive pairs, never at wall-clock time.
pub struct TraceSource {
    trace: Vec<Sample>,
}

impl TraceSource {
    pub fn new(trace: Vec<Sample>) -> Self {
        Self { trace }
    }
}

impl SampleSource for TraceSource {
    fn subscribe(
        &mut self,
        _interval_ms: u64,
        tx: UnboundedSender<Sample>,
    ) -> HostResult<Box<dyn Subscription>> {
        for sample in self.trace.drain(..) {
            tx.send(sample)
                .map_err(|err| HostError::Subscription(err.to_string()))?;
        }
        Ok(Box::new(InertHandle))
    }
}

struct IntervalHandle {
    cancelled: Arc<AtomicBool>,
}

impl Subscription for IntervalHandle {
    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Delivers one generated sample per interval from a background thread
/// until cancelled; the live analogue of the handset accelerometer feed.
pub struct IntervalSource<F> {
    generate: Option<F>,
}

impl<F> IntervalSource<F>
where
    F: FnMut() -> Sample + Send + 'static,
{
    pub fn new(generate: F) -> Self {
        Self {
            generate: Some(generate),
        }
    }
}

impl<F> SampleSource for IntervalSource<F>
where
    F: FnMut() -> Sample + Send + 'static,
{
    fn subscribe(
        &mut self,
        interval_ms: u64,
        tx: UnboundedSender<Sample>,
    ) -> HostResult<Box<dyn Subscription>> {
        let mut generate = self
            .generate
            .take()
            .ok_or_else(|| HostError::Subscription("interval source already subscribed".into()))?;

        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                if tx.send(generate()).is_err() {
                    break;
                }
                thread::sleep(Duration::from_millis(interval_ms));
            }
        });

        Ok(Box::new(IntervalHandle { cancelled }))
    }
}
