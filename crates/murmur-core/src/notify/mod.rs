//! Notification bookkeeping.
//!
//! A [`Notification`] is a dismissible, timestamped user-facing message.
//! The [`NotificationManager`] is the collection the web interface owns:
//! it is created at start-up and cleared at shutdown, so notification state
//! always has an explicit owner and lifecycle.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

/// A dismissible, timestamped user-facing message.
///
/// A notification is "changed" when its content was updated since it was
/// created; the web interface surfaces changed notifications separately.
pub trait Notification: Send + Sync {
    /// Returns the id of this notification.
    fn id(&self) -> &str;

    /// Returns when this notification was created.
    fn created_time(&self) -> DateTime<Utc>;

    /// Returns when the content of this notification last changed.
    fn last_updated_time(&self) -> DateTime<Utc>;

    /// Returns whether the content changed since creation.
    fn is_changed(&self) -> bool;

    /// Returns whether the user may dismiss this notification.
    fn is_dismissable(&self) -> bool {
        true
    }

    /// Returns whether this notification was dismissed.
    fn is_dismissed(&self) -> bool;

    /// Dismisses this notification.
    fn dismiss(&self);

    /// Renders this notification into the given sink.
    fn render(&self, sink: &mut dyn Write) -> io::Result<()>;

    /// Renders this notification into a string.
    fn render_to_string(&self) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.render(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// The set of currently active notifications, keyed by notification id.
///
/// Adding a notification whose id is already present is a no-op; dismissed
/// notifications are pruned the next time the collection is read.
#[derive(Default)]
pub struct NotificationManager {
    notifications: Mutex<HashMap<String, Arc<dyn Notification>>>,
}

impl NotificationManager {
    /// Creates a new empty notification manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a notification. If a notification with the same id is already
    /// present, nothing happens.
    pub fn add_notification(&self, notification: Arc<dyn Notification>) {
        let mut notifications = self.lock();
        notifications
            .entry(notification.id().to_string())
            .or_insert(notification);
    }

    /// Returns all notifications that were not dismissed, in no particular
    /// order. Dismissed notifications are removed from the collection.
    pub fn notifications(&self) -> Vec<Arc<dyn Notification>> {
        let mut notifications = self.lock();
        notifications.retain(|_, notification| !notification.is_dismissed());
        notifications.values().cloned().collect()
    }

    /// Returns all notifications whose content changed, in no particular
    /// order.
    pub fn changed_notifications(&self) -> Vec<Arc<dyn Notification>> {
        self.notifications()
            .into_iter()
            .filter(|notification| notification.is_changed())
            .collect()
    }

    /// Returns the notification with the given id.
    pub fn by_id(&self, id: &str) -> Option<Arc<dyn Notification>> {
        self.lock().get(id).cloned()
    }

    /// Dismisses the notification with the given id. Returns `true` if a
    /// dismissable notification with that id was found.
    pub fn dismiss(&self, id: &str) -> bool {
        match self.by_id(id) {
            Some(notification) if notification.is_dismissable() => {
                notification.dismiss();
                true
            }
            _ => false,
        }
    }

    /// Removes all notifications.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<dyn Notification>>> {
        self.notifications.lock().expect("notification state lock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct TestNotification {
        id: String,
        created: DateTime<Utc>,
        dismissable: bool,
        changed: bool,
        dismissed: AtomicBool,
    }

    impl TestNotification {
        fn new(id: &str) -> Self {
            Self {
                id: id.to_string(),
                created: Utc.timestamp_opt(0, 0).unwrap(),
                dismissable: true,
                changed: false,
                dismissed: AtomicBool::new(false),
            }
        }

        fn changed(mut self) -> Self {
            self.changed = true;
            self
        }

        fn not_dismissable(mut self) -> Self {
            self.dismissable = false;
            self
        }
    }

    impl Notification for TestNotification {
        fn id(&self) -> &str {
            &self.id
        }

        fn created_time(&self) -> DateTime<Utc> {
            self.created
        }

        fn last_updated_time(&self) -> DateTime<Utc> {
            self.created
        }

        fn is_changed(&self) -> bool {
            self.changed
        }

        fn is_dismissable(&self) -> bool {
            self.dismissable
        }

        fn is_dismissed(&self) -> bool {
            self.dismissed.load(Ordering::SeqCst)
        }

        fn dismiss(&self) {
            self.dismissed.store(true, Ordering::SeqCst);
        }

        fn render(&self, sink: &mut dyn Write) -> io::Result<()> {
            write!(sink, "[{}]", self.id)
        }
    }

    #[test]
    fn adding_the_same_id_twice_keeps_one_notification() {
        let manager = NotificationManager::new();
        manager.add_notification(Arc::new(TestNotification::new("a")));
        manager.add_notification(Arc::new(TestNotification::new("a")));
        assert_eq!(manager.notifications().len(), 1);
    }

    #[test]
    fn dismissed_notifications_are_pruned() {
        let manager = NotificationManager::new();
        manager.add_notification(Arc::new(TestNotification::new("a")));
        manager.add_notification(Arc::new(TestNotification::new("b")));
        assert!(manager.dismiss("a"));
        let remaining = manager.notifications();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), "b");
        assert!(manager.by_id("a").is_none());
    }

    #[test]
    fn dismissing_an_undismissable_notification_fails() {
        let manager = NotificationManager::new();
        manager.add_notification(Arc::new(TestNotification::new("a").not_dismissable()));
        assert!(!manager.dismiss("a"));
        assert_eq!(manager.notifications().len(), 1);
    }

    #[test]
    fn changed_view_only_contains_changed_notifications() {
        let manager = NotificationManager::new();
        manager.add_notification(Arc::new(TestNotification::new("plain")));
        manager.add_notification(Arc::new(TestNotification::new("changed").changed()));
        let changed = manager.changed_notifications();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].id(), "changed");
    }

    #[test]
    fn render_to_string_collects_the_rendered_output() {
        let notification = TestNotification::new("a");
        assert_eq!(notification.render_to_string().unwrap(), "[a]");
    }
}
