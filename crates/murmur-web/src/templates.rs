//! The embedded template environment.
//!
//! All page and notification templates ship inside the crate; the host
//! never has to locate template files on disk. Variable names used by the
//! templates (`firstName`, `fields`, `errorTextEmpty`, ...) are a stable
//! interface between the handlers and the view layer.

use minijinja::Environment;
use murmur_core::{MurmurError, Result};

/// Template names and their embedded sources.
const TEMPLATES: &[(&str, &str)] = &[
    ("index.html", include_str!("../templates/index.html")),
    ("knownAuthors.html", include_str!("../templates/knownAuthors.html")),
    ("viewPost.html", include_str!("../templates/viewPost.html")),
    ("createPost.html", include_str!("../templates/createPost.html")),
    ("createReply.html", include_str!("../templates/createReply.html")),
    ("editProfile.html", include_str!("../templates/editProfile.html")),
    (
        "editProfileField.html",
        include_str!("../templates/editProfileField.html"),
    ),
    (
        "deleteProfileField.html",
        include_str!("../templates/deleteProfileField.html"),
    ),
    ("deletePost.html", include_str!("../templates/deletePost.html")),
    ("like.html", include_str!("../templates/like.html")),
    ("unlike.html", include_str!("../templates/unlike.html")),
    (
        "dismissNotification.html",
        include_str!("../templates/dismissNotification.html"),
    ),
    ("options.html", include_str!("../templates/options.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("noPermission.html", include_str!("../templates/noPermission.html")),
    ("invalid.html", include_str!("../templates/invalid.html")),
    (
        "notify/newAuthorNotification.html",
        include_str!("../templates/notify/newAuthorNotification.html"),
    ),
    (
        "notify/newPostNotification.html",
        include_str!("../templates/notify/newPostNotification.html"),
    ),
    (
        "notify/newReplyNotification.html",
        include_str!("../templates/notify/newReplyNotification.html"),
    ),
    (
        "notify/startupNotification.html",
        include_str!("../templates/notify/startupNotification.html"),
    ),
];

/// Builds the environment containing every embedded template.
pub fn default_environment() -> Result<Environment<'static>> {
    let mut environment = Environment::new();
    for (name, source) in TEMPLATES {
        environment
            .add_template(name, source)
            .map_err(|err| MurmurError::template(err.to_string()))?;
    }
    Ok(environment)
}
