use murmur_core::Result;

use super::{Flow, TemplateContext, TemplatePage, current_author, field_id};
use crate::request::{Method, Request};
use crate::web_interface::Services;

const MAX_NAME_LENGTH: usize = 256;
const MAX_BIRTH_PART_LENGTH: usize = 256;
const MAX_FIELD_VALUE_LENGTH: usize = 400;
const MAX_FLAG_LENGTH: usize = 4;

/// Lets the current author edit her profile: the name and birth-date
/// fields, plus an ordered list of custom fields.
///
/// Every POST carries exactly one action (save the profile, add a field, or
/// one per-field action); each action is handled independently and ends in
/// a redirect, except for a failed field addition which re-renders the form
/// with the attempted name echoed back.
pub struct EditProfilePage;

impl TemplatePage for EditProfilePage {
    fn path(&self) -> &'static str {
        "editProfile.html"
    }

    fn template_name(&self) -> &'static str {
        "editProfile.html"
    }

    fn page_title(&self) -> &'static str {
        "Edit Profile"
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
        // The working copy starts out unmodified; the setters track changes.
        let mut profile = author.profile.clone();

        if request.method() == Method::Post {
            if request.part("save-profile", MAX_FLAG_LENGTH) == "true" {
                let first_name = request.part("first-name", MAX_NAME_LENGTH).trim().to_string();
                let middle_name = request.part("middle-name", MAX_NAME_LENGTH).trim().to_string();
                let last_name = request.part("last-name", MAX_NAME_LENGTH).trim().to_string();
                profile.set_first_name((!first_name.is_empty()).then_some(first_name));
                profile.set_middle_name((!middle_name.is_empty()).then_some(middle_name));
                profile.set_last_name((!last_name.is_empty()).then_some(last_name));
                profile.set_birth_day(parse_number(request, "birth-day"));
                profile.set_birth_month(parse_number(request, "birth-month"));
                profile.set_birth_year(parse_number(request, "birth-year"));
                let field_ids: Vec<String> = profile
                    .fields()
                    .iter()
                    .map(|field| field.id().to_string())
                    .collect();
                for id in field_ids {
                    let value = request.part(&format!("field-{id}"), MAX_FIELD_VALUE_LENGTH);
                    profile.set_field_value(&id, &value)?;
                }
                author.profile = profile;
                services.core.save_author(&author)?;
                return Ok(Flow::redirect("editProfile.html"));
            } else if request.part("add-field", MAX_FLAG_LENGTH) == "true" {
                let field_name = request.part("field-name", MAX_NAME_LENGTH).trim().to_string();
                match profile.add_field(&field_name) {
                    Ok(()) => {
                        author.profile = profile;
                        services.core.save_author(&author)?;
                        return Ok(Flow::redirect("editProfile.html#profile-fields"));
                    }
                    Err(_) => {
                        context.set("fieldName", &field_name);
                        context.set("duplicateFieldName", true);
                    }
                }
            } else if let Some(id) = field_id(request, "delete-field-") {
                return Ok(Flow::redirect(format!("deleteProfileField.html?field={id}")));
            } else if let Some(id) = field_id(request, "move-up-field-") {
                if profile.move_field_up(&id).is_err() {
                    return Ok(Flow::redirect("invalid.html"));
                }
                author.profile = profile;
                services.core.save_author(&author)?;
                return Ok(Flow::redirect("editProfile.html#profile-fields"));
            } else if let Some(id) = field_id(request, "move-down-field-") {
                if profile.move_field_down(&id).is_err() {
                    return Ok(Flow::redirect("invalid.html"));
                }
                author.profile = profile;
                services.core.save_author(&author)?;
                return Ok(Flow::redirect("editProfile.html#profile-fields"));
            } else if let Some(id) = field_id(request, "edit-field-") {
                return Ok(Flow::redirect(format!("editProfileField.html?field={id}")));
            }
        }

        context.set("firstName", profile.first_name().unwrap_or_default());
        context.set("middleName", profile.middle_name().unwrap_or_default());
        context.set("lastName", profile.last_name().unwrap_or_default());
        context.set("birthDay", number_text(profile.birth_day()));
        context.set("birthMonth", number_text(profile.birth_month()));
        context.set("birthYear", number_text(profile.birth_year()));
        context.set("fields", profile.fields());
        Ok(Flow::Render)
    }
}

/// Lenient number parsing: anything that is not a number counts as unset.
fn parse_number(request: &Request, name: &str) -> Option<u32> {
    request
        .part(name, MAX_BIRTH_PART_LENGTH)
        .trim()
        .parse()
        .ok()
}

fn number_text(number: Option<u32>) -> String {
    number.map(|number| number.to_string()).unwrap_or_default()
}
