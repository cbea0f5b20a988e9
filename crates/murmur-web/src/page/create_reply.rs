use murmur_core::Result;

use super::{Flow, TemplateContext, TemplatePage, current_author};
use crate::request::{Method, Request};
use crate::web_interface::Services;

const MAX_TEXT_LENGTH: usize = 65536;
const MAX_RETURN_PAGE_LENGTH: usize = 256;
const MAX_POST_ID_LENGTH: usize = 36;

/// Lets the current author reply to a post.
pub struct CreateReplyPage;

impl TemplatePage for CreateReplyPage {
    fn path(&self) -> &'static str {
        "createReply.html"
    }

    fn template_name(&self) -> &'static str {
        "createReply.html"
    }

    fn page_title(&self) -> &'static str {
        "Create Reply"
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
        let post_id = request.part("post", MAX_POST_ID_LENGTH);
        if request.method() == Method::Post {
            let text = request.part("text", MAX_TEXT_LENGTH).trim().to_string();
            if !text.is_empty() {
                if services.core.get_post(&post_id).is_none() {
                    return Ok(Flow::redirect("invalid.html"));
                }
                let Some(author) = current_author(request, services) else {
                    return Ok(Flow::redirect("noPermission.html"));
                };
                services.core.create_reply(&author.id, &post_id, &text)?;
                return Ok(Flow::redirect(return_page));
            }
            context.set("errorTextEmpty", true);
        }
        context.set("postId", &post_id);
        context.set("returnPage", &return_page);
        Ok(Flow::Render)
    }
}
