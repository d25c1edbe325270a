pub mod counter;
pub mod event;
pub mod notify;
pub mod permission;
pub mod sample;
pub mod source;

pub use counter::{CounterStore, PICKUP_COUNT_KEY};
pub use event::PickupEvent;
pub use notify::{pickup_notification, NotificationContent, Notifier};
pub use permission::{PermissionGate, PermissionStatus};
pub use sample::Sample;
pub use source::{SampleSource, Subscription, DEFAULT_SAMPLE_INTERVAL_MS};
