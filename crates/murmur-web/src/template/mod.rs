//! Template accessors.
//!
//! Accessors expose computed views of domain objects to the template
//! engine as virtual members.

use std::fmt;
use std::sync::Arc;

use minijinja::value::{Object, Value};
use murmur_core::notify::{Notification, NotificationManager};
use serde_json::json;
use tracing::warn;

/// Exposes two computed views of a [`NotificationManager`] to templates:
///
/// * `all`: every live notification, sorted by creation time, oldest
///   first.
/// * `new`: only notifications whose content changed, sorted by
///   last-update time, newest first.
///
/// Both views are pure read projections, recomputed on every access.
pub struct NotificationManagerAccessor {
    manager: Arc<NotificationManager>,
}

impl NotificationManagerAccessor {
    /// Creates an accessor over the given manager.
    pub fn new(manager: Arc<NotificationManager>) -> Self {
        Self { manager }
    }

    /// Every live notification, oldest first.
    pub fn all(&self) -> Vec<Arc<dyn Notification>> {
        let mut notifications = self.manager.notifications();
        notifications.sort_by_key(|notification| notification.created_time());
        notifications
    }

    /// Only changed notifications, most recently updated first.
    pub fn changed(&self) -> Vec<Arc<dyn Notification>> {
        let mut notifications = self.manager.changed_notifications();
        notifications.sort_by(|a, b| b.last_updated_time().cmp(&a.last_updated_time()));
        notifications
    }

    /// Projects a notification into the flat shape templates and the ajax
    /// boundary consume. A render failure logs a warning and yields an
    /// empty text.
    pub fn project(notification: &dyn Notification) -> serde_json::Value {
        let text = notification.render_to_string().unwrap_or_else(|err| {
            warn!(notification = notification.id(), error = %err, "could not render notification");
            String::new()
        });
        json!({
            "id": notification.id(),
            "createdTime": notification.created_time().timestamp_millis(),
            "lastUpdatedTime": notification.last_updated_time().timestamp_millis(),
            "dismissable": notification.is_dismissable(),
            "text": text,
        })
    }

    fn projected(notifications: &[Arc<dyn Notification>]) -> Value {
        let projected: Vec<serde_json::Value> = notifications
            .iter()
            .map(|notification| Self::project(notification.as_ref()))
            .collect();
        Value::from_serialize(&projected)
    }
}

impl fmt::Debug for NotificationManagerAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NotificationManagerAccessor")
    }
}

impl Object for NotificationManagerAccessor {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "all" => Some(Self::projected(&self.all())),
            "new" => Some(Self::projected(&self.changed())),
            _ => None,
        }
    }
}
