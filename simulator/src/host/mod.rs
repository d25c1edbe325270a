pub mod counter;
pub mod notify;
pub mod permission;
pub mod sink;
pub mod source;

pub use counter::{FileCounterStore, InMemoryCounterStore};
pub use notify::LogNotifier;
pub use permission::StaticPermissionGate;
pub use sink::CountingSink;
pub use source::{IntervalSource, TraceSource};
