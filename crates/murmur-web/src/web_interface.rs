//! The composition root of the web layer.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use minijinja::Environment;
use murmur_core::Result;
use murmur_core::author::Author;
use murmur_core::core::{Core, CoreListener};
use murmur_core::notify::{Notification, NotificationManager};
use murmur_core::post::Post;
use murmur_core::reply::Reply;
use tracing::{debug, info, warn};

use crate::host::SessionProvider;
use crate::notify::{ListNotification, TemplateNotification};
use crate::page::ajax::{
    DismissNotificationAjaxPage, GetLikesAjaxPage, GetNotificationsAjaxPage, LikeAjaxPage,
    UnlikeAjaxPage,
};
use crate::page::{
    AboutPage, CreatePostPage, CreateReplyPage, DeletePostPage, DeleteProfileFieldPage,
    DismissNotificationPage, EditProfileFieldPage, EditProfilePage, IndexPage, JsonPage,
    JsonPageHandler, KnownAuthorsPage, LikePage, OptionsPage, Page, PlainTemplatePage,
    TemplatePage, TemplatePageHandler, UnlikePage, ViewPostPage,
};
use crate::request::Request;
use crate::response::Response;
use crate::templates;

/// How long the startup notification stays around.
const STARTUP_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Everything a page handler needs: the core, the node's session manager,
/// the template environment, the notification collection and the form
/// password the node hands out against request forgery.
pub struct Services {
    pub core: Arc<dyn Core>,
    pub sessions: Arc<dyn SessionProvider>,
    pub templates: Arc<Environment<'static>>,
    pub notifications: Arc<NotificationManager>,
    pub form_password: String,
}

/// Bundles the web-facing functionality of the plugin: a path-keyed
/// dispatch table of page handlers, the notification bookkeeping, and the
/// forwarding of core life-cycle events into notifications.
pub struct WebInterface {
    services: Arc<Services>,
    pages: HashMap<String, Box<dyn Page>>,
    new_author_notification: Arc<ListNotification<Author>>,
    new_post_notification: Arc<ListNotification<Post>>,
    new_reply_notification: Arc<ListNotification<Reply>>,
}

impl WebInterface {
    /// Creates the web interface and registers it as a core listener.
    pub fn new(
        core: Arc<dyn Core>,
        sessions: Arc<dyn SessionProvider>,
        form_password: impl Into<String>,
    ) -> Result<Arc<Self>> {
        let environment = Arc::new(templates::default_environment()?);
        let notifications = Arc::new(NotificationManager::new());
        let services = Arc::new(Services {
            core,
            sessions,
            templates: environment.clone(),
            notifications,
            form_password: form_password.into(),
        });
        let new_author_notification = Arc::new(ListNotification::new(
            "new-author-notification",
            "authors",
            environment.clone(),
            "notify/newAuthorNotification.html",
        ));
        let new_post_notification = Arc::new(ListNotification::new(
            "new-post-notification",
            "posts",
            environment.clone(),
            "notify/newPostNotification.html",
        ));
        let new_reply_notification = Arc::new(ListNotification::new(
            "new-reply-notification",
            "replies",
            environment,
            "notify/newReplyNotification.html",
        ));
        let mut web_interface = Self {
            services,
            pages: HashMap::new(),
            new_author_notification,
            new_post_notification,
            new_reply_notification,
        };
        web_interface.register_pages();
        let web_interface = Arc::new(web_interface);
        let listener: Arc<dyn CoreListener> = web_interface.clone();
        web_interface.services.core.add_listener(&listener);
        Ok(web_interface)
    }

    /// Returns the services shared with the page handlers.
    pub fn services(&self) -> &Arc<Services> {
        &self.services
    }

    /// Returns the notification collection.
    pub fn notifications(&self) -> &Arc<NotificationManager> {
        &self.services.notifications
    }

    /// Dispatches a request to the page registered for its path.
    pub fn handle_request(&self, request: &Request) -> Response {
        match self.pages.get(request.path()) {
            Some(page) => page.handle(request),
            None => {
                debug!(path = request.path(), "no page registered");
                Response::not_found()
            }
        }
    }

    /// Starts the web interface: shows the startup notification and spawns
    /// the thread that removes it again.
    pub fn start(&self) {
        let startup = Arc::new(TemplateNotification::new(
            "startup-notification",
            self.services.templates.clone(),
            "notify/startupNotification.html",
        ));
        self.services.notifications.add_notification(startup.clone());
        let spawned = thread::Builder::new()
            .name("murmur startup notification remover".to_string())
            .spawn(move || {
                thread::sleep(STARTUP_NOTIFICATION_TIMEOUT);
                startup.dismiss();
            });
        if let Err(err) = spawned {
            warn!(error = %err, "could not spawn startup notification remover");
        }
        info!("web interface started");
    }

    /// Stops the web interface and drops all notifications.
    pub fn stop(&self) {
        self.services.notifications.clear();
        info!("web interface stopped");
    }

    fn register_pages(&mut self) {
        self.add_template_page(IndexPage);
        self.add_template_page(KnownAuthorsPage);
        self.add_template_page(ViewPostPage);
        self.add_template_page(CreatePostPage);
        self.add_template_page(CreateReplyPage);
        self.add_template_page(EditProfilePage);
        self.add_template_page(EditProfileFieldPage);
        self.add_template_page(DeleteProfileFieldPage);
        self.add_template_page(DeletePostPage);
        self.add_template_page(LikePage);
        self.add_template_page(UnlikePage);
        self.add_template_page(DismissNotificationPage);
        self.add_template_page(OptionsPage);
        self.add_template_page(AboutPage);
        self.add_template_page(PlainTemplatePage::new(
            "noPermission.html",
            "noPermission.html",
            "No Permission",
        ));
        self.add_template_page(PlainTemplatePage::new(
            "invalid.html",
            "invalid.html",
            "Invalid Action",
        ));
        self.add_json_page(GetLikesAjaxPage);
        self.add_json_page(LikeAjaxPage);
        self.add_json_page(UnlikeAjaxPage);
        self.add_json_page(GetNotificationsAjaxPage);
        self.add_json_page(DismissNotificationAjaxPage);
    }

    fn add_template_page<P: TemplatePage + 'static>(&mut self, page: P) {
        let handler = TemplatePageHandler::new(page, self.services.clone());
        self.pages.insert(handler.path().to_string(), Box::new(handler));
    }

    fn add_json_page<P: JsonPage + 'static>(&mut self, page: P) {
        let handler = JsonPageHandler::new(page, self.services.clone());
        self.pages.insert(handler.path().to_string(), Box::new(handler));
    }
}

impl CoreListener for WebInterface {
    fn new_author_found(&self, author: &Author) {
        self.new_author_notification.add(author.clone());
        self.services
            .notifications
            .add_notification(self.new_author_notification.clone());
    }

    fn new_post_found(&self, post: &Post) {
        self.new_post_notification.add(post.clone());
        self.services
            .notifications
            .add_notification(self.new_post_notification.clone());
    }

    fn new_reply_found(&self, reply: &Reply) {
        // Replies to posts this node has not seen yet stay silent.
        if self.services.core.get_post(&reply.post_id).is_none() {
            return;
        }
        self.new_reply_notification.add(reply.clone());
        self.services
            .notifications
            .add_notification(self.new_reply_notification.clone());
    }

    fn author_marked_known(&self, author: &Author) {
        self.new_author_notification.remove(author);
        if self.new_author_notification.is_empty() {
            self.new_author_notification.dismiss();
        }
    }

    fn post_marked_known(&self, post: &Post) {
        self.new_post_notification.remove(post);
        if self.new_post_notification.is_empty() {
            self.new_post_notification.dismiss();
        }
    }

    fn reply_marked_known(&self, reply: &Reply) {
        self.new_reply_notification.remove(reply);
        if self.new_reply_notification.is_empty() {
            self.new_reply_notification.dismiss();
        }
    }
}
