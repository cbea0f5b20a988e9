use murmur_core::core::LikeTarget;
use serde_json::{Value, json};

use crate::page::JsonPage;
use crate::request::Request;
use crate::web_interface::Services;

/// Returns the number of likes a post or reply has.
///
/// The `type` query parameter names the entity kind; the entity id is
/// carried under the parameter named after the type (`post=<id>` or
/// `reply=<id>`).
pub struct GetLikesAjaxPage;

impl JsonPage for GetLikesAjaxPage {
    fn path(&self) -> &'static str {
        "ajax/getLikes.ajax"
    }

    fn needs_form_password(&self) -> bool {
        false
    }

    fn create_json(&self, request: &Request, services: &Services) -> Value {
        let type_name = request.param("type").unwrap_or_default();
        let id = request.param(type_name).unwrap_or_default();
        if id.is_empty() {
            return json!({"success": false, "error": format!("invalid-{type_name}-id")});
        }
        let Ok(target) = type_name.parse::<LikeTarget>() else {
            return json!({"success": false, "error": "invalid-type"});
        };
        let exists = match target {
            LikeTarget::Post => services.core.get_post(id).is_some(),
            LikeTarget::Reply => services.core.get_reply(id).is_some(),
        };
        if !exists {
            return json!({"success": false, "error": format!("invalid-{type_name}-id")});
        }
        json!({"success": true, "likes": services.core.likes(target, id).len()})
    }
}
