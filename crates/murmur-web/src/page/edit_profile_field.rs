use murmur_core::Result;

use super::{Flow, TemplateContext, TemplatePage, current_author};
use crate::request::{Method, Request};
use crate::web_interface::Services;

const MAX_NAME_LENGTH: usize = 256;
const MAX_FIELD_ID_LENGTH: usize = 36;
const MAX_FLAG_LENGTH: usize = 4;

/// Lets the current author rename one custom profile field.
pub struct EditProfileFieldPage;

impl TemplatePage for EditProfileFieldPage {
    fn path(&self) -> &'static str {
        "editProfileField.html"
    }

    fn template_name(&self) -> &'static str {
        "editProfileField.html"
    }

    fn page_title(&self) -> &'static str {
        "Edit Profile Field"
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
            if request.part("cancel", MAX_FLAG_LENGTH) == "true" {
                return Ok(Flow::redirect("editProfile.html#profile-fields"));
            }
            let name = request.part("name", MAX_NAME_LENGTH).trim().to_string();
            match profile.rename_field(&field_id, &name) {
                Ok(()) => {
                    author.profile = profile;
                    services.core.save_author(&author)?;
                    return Ok(Flow::redirect("editProfile.html#profile-fields"));
                }
                Err(_) => {
                    context.set("fieldName", &name);
                    context.set("duplicateFieldName", true);
                }
            }
        }

        context.set("field", &field);
        Ok(Flow::Render)
    }
}
