//! Boundaries to services the hosting node owns.

use crate::request::Request;

/// The node's session manager, seen from the plugin.
///
/// The host resolves a request to the author the session belongs to; the
/// plugin never creates or destroys sessions itself.
pub trait SessionProvider: Send + Sync {
    /// Returns the id of the author the request's session belongs to.
    fn current_author_id(&self, request: &Request) -> Option<String>;
}

/// A session provider that always resolves to the same author.
///
/// Suitable for single-user deployments and tests; multi-user hosts
/// implement [`SessionProvider`] against their own session machinery.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    author_id: Option<String>,
}

impl StaticSessionProvider {
    /// Creates a provider that resolves every request to the given author.
    pub fn new(author_id: impl Into<String>) -> Self {
        Self {
            author_id: Some(author_id.into()),
        }
    }

    /// Creates a provider without a session.
    pub fn logged_out() -> Self {
        Self::default()
    }
}

impl SessionProvider for StaticSessionProvider {
    fn current_author_id(&self, _request: &Request) -> Option<String> {
        self.author_id.clone()
    }
}
