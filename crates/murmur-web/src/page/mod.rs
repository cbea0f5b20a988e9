//! Page handlers and the contracts they implement.
//!
//! Every page is a stateless unit struct bound to one path; all state lives
//! in the externally-owned entities behind the [`Core`](murmur_core::core::Core)
//! and in the notification collection. [`TemplatePage`]s render a template or redirect,
//! [`JsonPage`]s produce an ajax payload; the generic handler types carry
//! the shared request flow (login check, form password check, rendering).

pub mod ajax;

mod about;
mod create_post;
mod create_reply;
mod delete_post;
mod delete_profile_field;
mod dismiss_notification;
mod edit_profile;
mod edit_profile_field;
mod index;
mod known_authors;
mod like;
mod options;
mod view_post;

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::value::Value;
use murmur_core::Result;
use murmur_core::author::Author;
use serde::{Serialize, Serializer};
use tracing::error;

use crate::request::{Method, Request};
use crate::response::Response;
use crate::template::NotificationManagerAccessor;
use crate::web_interface::Services;

pub use about::AboutPage;
pub use create_post::CreatePostPage;
pub use create_reply::CreateReplyPage;
pub use delete_post::DeletePostPage;
pub use delete_profile_field::DeleteProfileFieldPage;
pub use dismiss_notification::DismissNotificationPage;
pub use edit_profile::EditProfilePage;
pub use edit_profile_field::EditProfileFieldPage;
pub use index::IndexPage;
pub use known_authors::KnownAuthorsPage;
pub use like::{LikePage, UnlikePage};
pub use options::OptionsPage;
pub use view_post::ViewPostPage;

/// Maximum accepted length of the form password part.
const FORM_PASSWORD_LENGTH: usize = 64;

/// A request-to-response mapping unit bound to one path.
pub trait Page: Send + Sync {
    /// The path this page is reachable under, relative to the plugin mount
    /// point.
    fn path(&self) -> &str;

    /// Handles one request.
    fn handle(&self, request: &Request) -> Response;
}

/// How a template page wants to finish its request.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Render the page's template with the populated context.
    Render,
    /// Redirect to another path instead of rendering.
    Redirect(String),
}

impl Flow {
    /// Creates a redirect flow.
    pub fn redirect(target: impl Into<String>) -> Self {
        Self::Redirect(target.into())
    }
}

/// The named variables a template page exposes to its template.
#[derive(Debug, Default)]
pub struct TemplateContext {
    variables: BTreeMap<String, Value>,
}

impl TemplateContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Serialize) {
        self.variables
            .insert(key.into(), Value::from_serialize(&value));
    }

    /// Sets a variable from an already-built template value.
    pub fn set_value(&mut self, key: impl Into<String>, value: Value) {
        self.variables.insert(key.into(), value);
    }

    /// Returns a variable.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }
}

impl Serialize for TemplateContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.variables.serialize(serializer)
    }
}

/// A page that renders a template.
pub trait TemplatePage: Send + Sync {
    /// The path this page is bound to.
    fn path(&self) -> &'static str;

    /// The name of the template to render.
    fn template_name(&self) -> &'static str;

    /// The title shown on the page.
    fn page_title(&self) -> &'static str;

    /// Whether this page requires a logged-in author.
    fn requires_login(&self) -> bool {
        false
    }

    /// Reads the request, calls into the core, and populates the template
    /// context, or asks for a redirect.
    fn process(
        &self,
        request: &Request,
        services: &Services,
        context: &mut TemplateContext,
    ) -> Result<Flow>;
}

/// Wraps a [`TemplatePage`] into a [`Page`], carrying the request flow all
/// template pages share.
pub struct TemplatePageHandler<P> {
    page: P,
    services: Arc<Services>,
}

impl<P: TemplatePage> TemplatePageHandler<P> {
    /// Creates a handler for the given page.
    pub fn new(page: P, services: Arc<Services>) -> Self {
        Self { page, services }
    }
}

impl<P: TemplatePage> Page for TemplatePageHandler<P> {
    fn path(&self) -> &str {
        self.page.path()
    }

    fn handle(&self, request: &Request) -> Response {
        let services = &self.services;
        let current_author_id = services.sessions.current_author_id(request);
        if self.page.requires_login() && current_author_id.is_none() {
            return Response::redirect("noPermission.html");
        }
        if request.method() == Method::Post
            && request.part("formPassword", FORM_PASSWORD_LENGTH) != services.form_password
        {
            return Response::redirect("noPermission.html");
        }

        let mut context = TemplateContext::new();
        context.set("pageTitle", self.page.page_title());
        context.set("formPassword", &services.form_password);
        context.set_value(
            "notifications",
            Value::from_object(NotificationManagerAccessor::new(
                services.notifications.clone(),
            )),
        );
        if let Some(author) = current_author_id
            .as_deref()
            .and_then(|id| services.core.get_author(id))
        {
            context.set("currentAuthor", &author);
        }

        match self.page.process(request, services, &mut context) {
            Ok(Flow::Render) => self.render(&context),
            Ok(Flow::Redirect(target)) => Response::redirect(target),
            Err(err) => {
                error!(page = self.page.path(), error = %err, "page handler failed");
                Response::internal_error()
            }
        }
    }
}

impl<P: TemplatePage> TemplatePageHandler<P> {
    fn render(&self, context: &TemplateContext) -> Response {
        let template = match self.services.templates.get_template(self.page.template_name()) {
            Ok(template) => template,
            Err(err) => {
                error!(template = self.page.template_name(), error = %err, "template missing");
                return Response::internal_error();
            }
        };
        match template.render(context) {
            Ok(body) => Response::html(body),
            Err(err) => {
                error!(template = self.page.template_name(), error = %err, "template failed");
                Response::internal_error()
            }
        }
    }
}

/// A template page without any behavior of its own, e.g. the
/// "no permission" page.
pub struct PlainTemplatePage {
    path: &'static str,
    template_name: &'static str,
    page_title: &'static str,
}

impl PlainTemplatePage {
    /// Creates a plain page.
    pub fn new(path: &'static str, template_name: &'static str, page_title: &'static str) -> Self {
        Self {
            path,
            template_name,
            page_title,
        }
    }
}

impl TemplatePage for PlainTemplatePage {
    fn path(&self) -> &'static str {
        self.path
    }

    fn template_name(&self) -> &'static str {
        self.template_name
    }

    fn page_title(&self) -> &'static str {
        self.page_title
    }

    fn process(
        &self,
        _request: &Request,
        _services: &Services,
        _context: &mut TemplateContext,
    ) -> Result<Flow> {
        Ok(Flow::Render)
    }
}

/// A page that produces a JSON payload for the in-page scripts.
pub trait JsonPage: Send + Sync {
    /// The path this page is bound to.
    fn path(&self) -> &'static str;

    /// Whether requests must carry the form password.
    fn needs_form_password(&self) -> bool {
        true
    }

    /// Produces the JSON payload for one request.
    fn create_json(&self, request: &Request, services: &Services) -> serde_json::Value;
}

/// Wraps a [`JsonPage`] into a [`Page`].
pub struct JsonPageHandler<P> {
    page: P,
    services: Arc<Services>,
}

impl<P: JsonPage> JsonPageHandler<P> {
    /// Creates a handler for the given page.
    pub fn new(page: P, services: Arc<Services>) -> Self {
        Self { page, services }
    }
}

impl<P: JsonPage> Page for JsonPageHandler<P> {
    fn path(&self) -> &str {
        self.page.path()
    }

    fn handle(&self, request: &Request) -> Response {
        if self.page.needs_form_password()
            && request.part("formPassword", FORM_PASSWORD_LENGTH) != self.services.form_password
        {
            return Response::forbidden();
        }
        Response::json(&self.page.create_json(request, &self.services))
    }
}

/// Resolves the author the request's session belongs to.
pub(crate) fn current_author(request: &Request, services: &Services) -> Option<Author> {
    let id = services.sessions.current_author_id(request)?;
    services.core.get_author(&id)
}

/// Scans the form parts for one named `<prefix><id>` and extracts the id.
pub(crate) fn field_id(request: &Request, prefix: &str) -> Option<String> {
    request
        .part_names()
        .find_map(|name| name.strip_prefix(prefix).map(str::to_string))
}
