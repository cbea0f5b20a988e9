use murmur_core::core::LikeTarget;
use serde_json::{Value, json};

use crate::page::JsonPage;
use crate::request::Request;
use crate::web_interface::Services;

fn like_json(request: &Request, services: &Services, like: bool) -> Value {
    let Some(author_id) = services.sessions.current_author_id(request) else {
        return json!({"success": false, "error": "auth-required"});
    };
    let type_name = request.param("type").unwrap_or_default();
    let id = request.param(type_name).unwrap_or_default();
    if id.is_empty() {
        return json!({"success": false, "error": format!("invalid-{type_name}-id")});
    }
    let Ok(target) = type_name.parse::<LikeTarget>() else {
        return json!({"success": false, "error": "invalid-type"});
    };
    let result = if like {
        services.core.like(&author_id, target, id)
    } else {
        services.core.unlike(&author_id, target, id)
    };
    match result {
        Ok(()) => json!({"success": true}),
        Err(_) => json!({"success": false, "error": format!("invalid-{type_name}-id")}),
    }
}

/// Marks a post or reply as liked by the current author.
pub struct LikeAjaxPage;

impl JsonPage for LikeAjaxPage {
    fn path(&self) -> &'static str {
        "ajax/like.ajax"
    }

    fn create_json(&self, request: &Request, services: &Services) -> Value {
        like_json(request, services, true)
    }
}

/// Removes the current author's like from a post or reply.
pub struct UnlikeAjaxPage;

impl JsonPage for UnlikeAjaxPage {
    fn path(&self) -> &'static str {
        "ajax/unlike.ajax"
    }

    fn create_json(&self, request: &Request, services: &Services) -> Value {
        like_json(request, services, false)
    }
}
