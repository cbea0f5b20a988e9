use murmur_core::Result;
use tracing::debug;

use super::{Flow, TemplateContext, TemplatePage};
use crate::request::{Method, Request};
use crate::web_interface::Services;

const MAX_NOTIFICATION_ID_LENGTH: usize = 36;
const MAX_RETURN_PAGE_LENGTH: usize = 256;

/// Dismisses a notification and returns to the originating page.
pub struct DismissNotificationPage;

impl TemplatePage for DismissNotificationPage {
    fn path(&self) -> &'static str {
        "dismissNotification.html"
    }

    fn template_name(&self) -> &'static str {
        "dismissNotification.html"
    }

    fn page_title(&self) -> &'static str {
        "Dismiss Notification"
    }

    fn process(
        &self,
        request: &Request,
        services: &Services,
        context: &mut TemplateContext,
    ) -> Result<Flow> {
        let return_page = request.part("returnPage", MAX_RETURN_PAGE_LENGTH);
        if request.method() == Method::Post {
            let id = request.part("notification", MAX_NOTIFICATION_ID_LENGTH);
            let dismissed = services.notifications.dismiss(&id);
            debug!(notification = %id, dismissed, "dismiss requested");
            return Ok(Flow::redirect(return_page));
        }
        context.set("returnPage", &return_page);
        Ok(Flow::Render)
    }
}
