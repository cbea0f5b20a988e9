use murmur_core::Result;

use super::{Flow, TemplateContext, TemplatePage, current_author};
use crate::request::{Method, Request};
use crate::web_interface::Services;

const MAX_FIELD_ID_LENGTH: usize = 36;
const MAX_FLAG_LENGTH: usize = 4;

/// Asks for confirmation before deleting a custom profile field.
pub struct DeleteProfileFieldPage;

impl TemplatePage for DeleteProfileFieldPage {
    fn path(&self) -> &'static str {
        "deleteProfileField.html"
    }

    fn template_name(&self) -> &'static str {
        "deleteProfileField.html"
    }

    fn page_title(&self) -> &'static str {
        "Delete Profile Field"
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
        let Some(mut author) = current_author(request, services) else {
            return Ok(Flow::redirect("noPermission.html"));
        };
        let mut profile = author.profile.clone();
        let field_id = if request.method() == Method::Post {
            request.part("field", MAX_FIELD_ID_LENGTH)
        } else {
            request.param("field").unwrap_or_default().to_string()
        };
        let Some(field) = profile.field_by_id(&field_id).cloned() else {
            return Ok(Flow::redirect("invalid.html"));
        };

        if request.method() == Method::Post {
            if request.part("confirm", MAX_FLAG_LENGTH) == "true" {
                profile.remove_field(&field_id)?;
                author.profile = profile;
                services.core.save_author(&author)?;
            }
            return Ok(Flow::redirect("editProfile.html#profile-fields"));
        }

        context.set("field", &field);
        Ok(Flow::Render)
    }
}
