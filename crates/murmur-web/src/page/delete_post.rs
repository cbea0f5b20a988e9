use murmur_core::Result;

use super::{Flow, TemplateContext, TemplatePage, current_author};
use crate::request::{Method, Request};
use crate::web_interface::Services;

const MAX_POST_ID_LENGTH: usize = 36;
const MAX_RETURN_PAGE_LENGTH: usize = 256;
const MAX_FLAG_LENGTH: usize = 4;

/// Asks for confirmation before deleting one of the current author's posts.
/// Posts of other authors can not be deleted.
pub struct DeletePostPage;

impl TemplatePage for DeletePostPage {
    fn path(&self) -> &'static str {
        "deletePost.html"
    }

    fn template_name(&self) -> &'static str {
        "deletePost.html"
    }

    fn page_title(&self) -> &'static str {
        "Delete Post"
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
        let (post_id, return_page) = if request.method() == Method::Post {
            (
                request.part("post", MAX_POST_ID_LENGTH),
                request.part("returnPage", MAX_RETURN_PAGE_LENGTH),
            )
        } else {
            (
                request.param("post").unwrap_or_default().to_string(),
                request.param("returnPage").unwrap_or_default().to_string(),
            )
        };
        let Some(post) = services.core.get_post(&post_id) else {
            return Ok(Flow::redirect("noPermission.html"));
        };
        if post.author_id != author.id {
            return Ok(Flow::redirect("noPermission.html"));
        }

        if request.method() == Method::Post {
            if request.part("confirmDelete", MAX_FLAG_LENGTH) == "true" {
                services.core.delete_post(&post.id)?;
                return Ok(Flow::redirect(return_page));
            }
            if request.part("abortDelete", MAX_FLAG_LENGTH) == "true" {
                return Ok(Flow::redirect(return_page));
            }
        }

        context.set("post", &post);
        context.set("returnPage", &return_page);
        Ok(Flow::Render)
    }
}
