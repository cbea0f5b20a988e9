use serde_json::{Value, json};

use crate::page::JsonPage;
use crate::request::Request;
use crate::template::NotificationManagerAccessor;
use crate::web_interface::Services;

/// Returns every live notification with its rendered text, oldest first.
pub struct GetNotificationsAjaxPage;

impl JsonPage for GetNotificationsAjaxPage {
    fn path(&self) -> &'static str {
        "ajax/getNotifications.ajax"
    }

    fn needs_form_password(&self) -> bool {
        false
    }

    fn create_json(&self, _request: &Request, services: &Services) -> Value {
        let accessor = NotificationManagerAccessor::new(services.notifications.clone());
        let notifications: Vec<Value> = accessor
            .all()
            .iter()
            .map(|notification| NotificationManagerAccessor::project(notification.as_ref()))
            .collect();
        json!({"success": true, "notifications": notifications})
    }
}
