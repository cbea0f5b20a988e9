use murmur_core::Result;
use murmur_core::core::LikeTarget;
use tracing::debug;

use super::{Flow, TemplateContext, TemplatePage, current_author};
use crate::request::{Method, Request};
use crate::web_interface::Services;

const MAX_TYPE_LENGTH: usize = 16;
const MAX_ID_LENGTH: usize = 36;
const MAX_RETURN_PAGE_LENGTH: usize = 256;

fn process_like(
    request: &Request,
    services: &Services,
    context: &mut TemplateContext,
    like: bool,
) -> Result<Flow> {
    let return_page = request.part("returnPage", MAX_RETURN_PAGE_LENGTH);
    if request.method() == Method::Post {
        let Some(author) = current_author(request, services) else {
            return Ok(Flow::redirect("noPermission.html"));
        };
        let type_name = request.part("type", MAX_TYPE_LENGTH);
        let id = request.part(&type_name, MAX_ID_LENGTH);
        if let Ok(target) = type_name.parse::<LikeTarget>() {
            let result = if like {
                services.core.like(&author.id, target, &id)
            } else {
                services.core.unlike(&author.id, target, &id)
            };
            if let Err(err) = result {
                debug!(target = %type_name, id = %id, error = %err, "like change failed");
            }
        }
        return Ok(Flow::redirect(return_page));
    }
    context.set("returnPage", &return_page);
    Ok(Flow::Render)
}

/// Marks a post or reply as liked by the current author.
pub struct LikePage;

impl TemplatePage for LikePage {
    fn path(&self) -> &'static str {
        "like.html"
    }

    fn template_name(&self) -> &'static str {
        "like.html"
    }

    fn page_title(&self) -> &'static str {
        "Like"
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
        process_like(request, services, context, true)
    }
}

/// Removes the current author's like from a post or reply.
pub struct UnlikePage;

impl TemplatePage for UnlikePage {
    fn path(&self) -> &'static str {
        "unlike.html"
    }

    fn template_name(&self) -> &'static str {
        "unlike.html"
    }

    fn page_title(&self) -> &'static str {
        "Unlike"
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
        process_like(request, services, context, false)
    }
}
