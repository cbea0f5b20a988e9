use murmur_core::Result;

use super::{Flow, TemplateContext, TemplatePage, current_author};
use crate::request::Request;
use crate::web_interface::Services;

/// The current author's feed.
pub struct IndexPage;

impl TemplatePage for IndexPage {
    fn path(&self) -> &'static str {
        "index.html"
    }

    fn template_name(&self) -> &'static str {
        "index.html"
    }

    fn page_title(&self) -> &'static str {
        "Index"
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
        let Some(author) = current_author(request, services) else {
            return Ok(Flow::redirect("noPermission.html"));
        };
        let posts = services.core.posts_for(&author.id);
        context.set("posts", &posts);
        Ok(Flow::Render)
    }
}
