//! The response half of the host boundary.

/// The outcome of handling a request. The hosting node translates this into
/// a real HTTP response; a redirect is a normal, expected exit of a
/// successful mutation, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    content_type: String,
    body: Vec<u8>,
    location: Option<String>,
}

impl Response {
    /// A rendered HTML page.
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8".to_string(),
            body: body.into().into_bytes(),
            location: None,
        }
    }

    /// A JSON payload.
    pub fn json(value: &serde_json::Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json".to_string(),
            body: value.to_string().into_bytes(),
            location: None,
        }
    }

    /// A redirect to another page of the plugin.
    pub fn redirect(target: impl Into<String>) -> Self {
        Self {
            status: 302,
            content_type: "text/html; charset=utf-8".to_string(),
            body: Vec::new(),
            location: Some(target.into()),
        }
    }

    /// No page is registered for the requested path.
    pub fn not_found() -> Self {
        Self::plain(404)
    }

    /// The request lacked the required form password.
    pub fn forbidden() -> Self {
        Self::plain(403)
    }

    /// A handler or the template engine failed.
    pub fn internal_error() -> Self {
        Self::plain(500)
    }

    fn plain(status: u16) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8".to_string(),
            body: Vec::new(),
            location: None,
        }
    }

    /// Returns the status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the content type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the body as text.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns the redirect target, if this response is a redirect.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}
