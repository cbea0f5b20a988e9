use murmur_core::notify::Notification;
use serde_json::{Value, json};

use crate::page::JsonPage;
use crate::request::Request;
use crate::web_interface::Services;

const MAX_NOTIFICATION_ID_LENGTH: usize = 36;

/// Dismisses a notification.
pub struct DismissNotificationAjaxPage;

impl JsonPage for DismissNotificationAjaxPage {
    fn path(&self) -> &'static str {
        "ajax/dismissNotification.ajax"
    }

    fn create_json(&self, request: &Request, services: &Services) -> Value {
        let id = request.part("notification", MAX_NOTIFICATION_ID_LENGTH);
        let Some(notification) = services.notifications.by_id(&id) else {
            return json!({"success": false, "error": "invalid-notification-id"});
        };
        if !notification.is_dismissable() {
            return json!({"success": false, "error": "not-dismissable"});
        }
        notification.dismiss();
        json!({"success": true})
    }
}
