use murmur_core::Result;

use super::{Flow, TemplateContext, TemplatePage, current_author};
use crate::request::{Method, Request};
use crate::web_interface::Services;

const MAX_TEXT_LENGTH: usize = 65536;
const MAX_RETURN_PAGE_LENGTH: usize = 256;
const MAX_RECIPIENT_LENGTH: usize = 43;

/// Lets the current author publish a new post.
pub struct CreatePostPage;

impl TemplatePage for CreatePostPage {
    fn path(&self) -> &'static str {
        "createPost.html"
    }

    fn template_name(&self) -> &'static str {
        "createPost.html"
    }

    fn page_title(&self) -> &'static str {
        "Create Post"
    }

    fn requires_login(&self) -> bool {
        true
    }

    fn process(
        &self,
        request: &Request,
        services: &Services,
        context: &mut TemplateContext,
    ) -> Result<Flow> {
        let return_page = request.part("returnPage", MAX_RETURN_PAGE_LENGTH);
        if request.method() == Method::Post {
            let text = request.part("text", MAX_TEXT_LENGTH).trim().to_string();
            if !text.is_empty() {
                let recipient_id = request.part("recipient", MAX_RECIPIENT_LENGTH);
                let recipient = (!recipient_id.is_empty()).then_some(recipient_id.as_str());
                let Some(author) = current_author(request, services) else {
                    return Ok(Flow::redirect("noPermission.html"));
                };
                services.core.create_post(&author.id, recipient, &text)?;
                return Ok(Flow::redirect(return_page));
            }
            context.set("errorTextEmpty", true);
        }
        context.set("returnPage", &return_page);
        Ok(Flow::Render)
    }
}
