use crate::host_interface::Sample;
use crate::prelude::HostResult;
use tokio::sync::mpsc::UnboundedSender;

/// Reference sampling cadence in milliseconds.
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 100;

/// Handle to a running sample subscription. Cancelling is idempotent and
/// closes the feeding side of the channel.
pub trait Subscription {
    fn cancel(&mut self);
}

/// Producer of accelerometer samples at a fixed cadence.
///
/// The host owns sampling timing; the session only hands over the sending
/// half of its channel and the interval it wants.
pub trait SampleSource {
    fn subscribe(
        &mut self,
        interval_ms: u64,
        tx: UnboundedSender<Sample>,
    ) -> HostResult<Box<dyn Subscription>>;
}
