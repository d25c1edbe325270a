/// Signal that a flat-to-upright pickup transition fired.
///
/// Carries no payload; the moment of the `ingest` call is the event. The
/// core never stores these, they are consumed immediately by the host sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupEvent;
