use crate::prelude::HostResult;

/// Storage key under which the daily pickup count is persisted.
pub const PICKUP_COUNT_KEY: &str = "pickupCount";

/// Persisted daily pickup counter.
///
/// `load` reports 0 when nothing has been stored yet. The core assumes a
/// single writer; read-increment-write is atomic with respect to the host's
/// own event processing, not across processes.
pub trait CounterStore {
    fn load(&self) -> HostResult<u64>;
    fn store(&mut self, count: u64) -> HostResult<()>;
}
