//! Template-backed notifications.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use minijinja::Environment;
use murmur_core::notify::Notification;
use serde::Serialize;

use crate::text::TemplatePart;

/// A notification that renders a single template.
pub struct TemplateNotification {
    id: String,
    environment: Arc<Environment<'static>>,
    template_name: String,
    dismissable: bool,
    created: DateTime<Utc>,
    last_updated: Mutex<DateTime<Utc>>,
    changed: AtomicBool,
    dismissed: AtomicBool,
}

impl TemplateNotification {
    /// Creates a new template notification, timestamped now.
    pub fn new(
        id: impl Into<String>,
        environment: Arc<Environment<'static>>,
        template_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self::with_times(id, environment, template_name, now, now)
    }

    /// Creates a template notification with explicit timestamps.
    pub fn with_times(
        id: impl Into<String>,
        environment: Arc<Environment<'static>>,
        template_name: impl Into<String>,
        created: DateTime<Utc>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            environment,
            template_name: template_name.into(),
            dismissable: true,
            created,
            last_updated: Mutex::new(last_updated),
            changed: AtomicBool::new(false),
            dismissed: AtomicBool::new(false),
        }
    }

    /// Sets whether the user may dismiss this notification.
    pub fn dismissable(mut self, dismissable: bool) -> Self {
        self.dismissable = dismissable;
        self
    }

    /// Marks the content of this notification as changed.
    pub fn touch(&self) {
        *self.last_updated.lock().expect("notification time lock") = Utc::now();
        self.changed.store(true, Ordering::SeqCst);
    }
}

impl Notification for TemplateNotification {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_time(&self) -> DateTime<Utc> {
        self.created
    }

    fn last_updated_time(&self) -> DateTime<Utc> {
        *self.last_updated.lock().expect("notification time lock")
    }

    fn is_changed(&self) -> bool {
        self.changed.load(Ordering::SeqCst)
    }

    fn is_dismissable(&self) -> bool {
        self.dismissable
    }

    fn is_dismissed(&self) -> bool {
        self.dismissed.load(Ordering::SeqCst)
    }

    fn dismiss(&self) {
        self.dismissed.store(true, Ordering::SeqCst);
    }

    fn render(&self, sink: &mut dyn Write) -> io::Result<()> {
        TemplatePart::new(self.environment.clone(), self.template_name.clone()).render(sink)
    }
}

/// A notification that carries a list of elements, bound under a named
/// template variable when rendered.
///
/// Adding or removing an element updates the last-updated time, marks the
/// notification changed and revives it if it had been dismissed; dismissing
/// it empties the list.
pub struct ListNotification<T> {
    id: String,
    key: String,
    environment: Arc<Environment<'static>>,
    template_name: String,
    created: DateTime<Utc>,
    last_updated: Mutex<DateTime<Utc>>,
    changed: AtomicBool,
    dismissed: AtomicBool,
    elements: Mutex<Vec<T>>,
}

impl<T> ListNotification<T>
where
    T: Clone + PartialEq + Serialize + Send + Sync,
{
    /// Creates a new empty list notification, timestamped now.
    pub fn new(
        id: impl Into<String>,
        key: impl Into<String>,
        environment: Arc<Environment<'static>>,
        template_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self::with_times(id, key, environment, template_name, now, now)
    }

    /// Creates a list notification with explicit timestamps.
    pub fn with_times(
        id: impl Into<String>,
        key: impl Into<String>,
        environment: Arc<Environment<'static>>,
        template_name: impl Into<String>,
        created: DateTime<Utc>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
            environment,
            template_name: template_name.into(),
            created,
            last_updated: Mutex::new(last_updated),
            changed: AtomicBool::new(false),
            dismissed: AtomicBool::new(false),
            elements: Mutex::new(Vec::new()),
        }
    }

    /// Adds an element to this notification.
    pub fn add(&self, element: T) {
        self.elements
            .lock()
            .expect("notification elements lock")
            .push(element);
        self.touch();
        self.dismissed.store(false, Ordering::SeqCst);
    }

    /// Removes every occurrence of the given element.
    pub fn remove(&self, element: &T) {
        let mut elements = self.elements.lock().expect("notification elements lock");
        let before = elements.len();
        elements.retain(|existing| existing != element);
        if elements.len() != before {
            drop(elements);
            self.touch();
        }
    }

    /// Returns whether this notification carries no elements.
    pub fn is_empty(&self) -> bool {
        self.elements
            .lock()
            .expect("notification elements lock")
            .is_empty()
    }

    /// Returns a snapshot of the carried elements.
    pub fn elements(&self) -> Vec<T> {
        self.elements
            .lock()
            .expect("notification elements lock")
            .clone()
    }

    fn touch(&self) {
        *self.last_updated.lock().expect("notification time lock") = Utc::now();
        self.changed.store(true, Ordering::SeqCst);
    }
}

impl<T> Notification for ListNotification<T>
where
    T: Clone + PartialEq + Serialize + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn created_time(&self) -> DateTime<Utc> {
        self.created
    }

    fn last_updated_time(&self) -> DateTime<Utc> {
        *self.last_updated.lock().expect("notification time lock")
    }

    fn is_changed(&self) -> bool {
        self.changed.load(Ordering::SeqCst)
    }

    fn is_dismissed(&self) -> bool {
        self.dismissed.load(Ordering::SeqCst)
    }

    fn dismiss(&self) {
        self.dismissed.store(true, Ordering::SeqCst);
        self.elements
            .lock()
            .expect("notification elements lock")
            .clear();
    }

    fn render(&self, sink: &mut dyn Write) -> io::Result<()> {
        TemplatePart::new(self.environment.clone(), self.template_name.clone())
            .set(self.key.as_str(), self.elements())
            .render(sink)
    }
}
