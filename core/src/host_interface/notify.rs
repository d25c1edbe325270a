use crate::prelude::HostResult;

/// Title and body of a user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

/// Builds the pickup notification with the running count interpolated.
pub fn pickup_notification(count: u64) -> NotificationContent {
    NotificationContent {
        title: "Phone Pickup Detected!".to_string(),
        body: format!("You have picked up your phone {} times today.", count),
    }
}

/// Delivery primitive for user-facing notifications.
pub trait Notifier {
    fn notify(&mut self, content: &NotificationContent) -> HostResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_interpolates_count() {
        let content = pickup_notification(7);
        assert_eq!(content.title, "Phone Pickup Detected!");
        assert_eq!(content.body, "You have picked up your phone 7 times today.");
    }
}
