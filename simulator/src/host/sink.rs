use pickupcore::host_interface::{pickup_notification, CounterStore, Notifier};
use pickupcore::prelude::{EventSink, HostResult};

/// The conventional pickup callback: increment the persisted counter, then
/// notify with the new value.
pub struct CountingSink {
    store: Box<dyn CounterStore>,
    notifier: Box<dyn Notifier>,
}

impl CountingSink {
    pub fn new(store: Box<dyn CounterStore>, notifier: Box<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub fn current_count(&self) -> HostResult<u64> {
        self.store.load()
    }
}

impl EventSink for CountingSink {
    fn on_pickup(&mut self) -> HostResult<()> {
        let count = self.store.load()? + 1;
        self.store.store(count)?;
        self.notifier.notify(&pickup_notification(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::counter::InMemoryCounterStore;
    use pickupcore::host_interface::NotificationContent;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CollectingNotifier {
        delivered: Rc<RefCell<Vec<NotificationContent>>>,
    }

    impl Notifier for CollectingNotifier {
        fn notify(&mut self, content: &NotificationContent) -> HostResult<()> {
            self.delivered.borrow_mut().push(content.clone());
            Ok(())
        }
    }

    fn sink_with_count(count: u64) -> (CountingSink, Rc<RefCell<Vec<NotificationContent>>>) {
        let delivered = Rc::new(RefCell::new(Vec::new()));
        let sink = CountingSink::new(
            Box::new(InMemoryCounterStore::with_count(count)),
            Box::new(CollectingNotifier {
                delivered: delivered.clone(),
            }),
        );
        (sink, delivered)
    }

    #[test]
    fn each_pickup_increments_by_exactly_one() {
        let (mut sink, delivered) = sink_with_count(0);
        for _ in 0..5 {
            sink.on_pickup().unwrap();
        }
        assert_eq!(sink.current_count().unwrap(), 5);
        assert_eq!(delivered.borrow().len(), 5);
    }

    #[test]
    fn counting_resumes_from_the_persisted_value() {
        let (mut sink, _) = sink_with_count(41);
        sink.on_pickup().unwrap();
        assert_eq!(sink.current_count().unwrap(), 42);
    }

    #[test]
    fn notification_carries_the_updated_count() {
        let (mut sink, delivered) = sink_with_count(2);
        sink.on_pickup().unwrap();

        let delivered = delivered.borrow();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].title, "Phone Pickup Detected!");
        assert_eq!(
            delivered[0].body,
            "You have picked up your phone 3 times today."
        );
    }
}
