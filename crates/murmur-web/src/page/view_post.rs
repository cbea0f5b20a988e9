use murmur_core::Result;

use super::{Flow, TemplateContext, TemplatePage};
use crate::request::Request;
use crate::web_interface::Services;

/// Shows a single post and its replies.
pub struct ViewPostPage;

impl TemplatePage for ViewPostPage {
    fn path(&self) -> &'static str {
        "viewPost.html"
    }

    fn template_name(&self) -> &'static str {
        "viewPost.html"
    }

    fn page_title(&self) -> &'static str {
        "View Post"
    }

    fn process(
        &self,
        request: &Request,
        services: &Services,
        context: &mut TemplateContext,
    ) -> Result<Flow> {
        let post_id = request.param("post").unwrap_or_default();
        if let Some(post) = services.core.get_post(post_id) {
            context.set("replies", &services.core.replies_for(&post.id));
            context.set("post", &post);
        }
        Ok(Flow::Render)
    }
}
