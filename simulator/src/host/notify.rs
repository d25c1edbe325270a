use log::info;
use pickupcore::host_interface::{NotificationContent, Notifier};
use pickupcore::prelude::HostResult;

/// Delivers notifications through the log layer; the offline host has no
/// notification center to hand them to.
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for LogNotifier {
    fn notify(&mut self, content: &NotificationContent) -> HostResult<()> {
        info!("[notification] {} {}", content.title, content.body);
        Ok(())
    }
}
