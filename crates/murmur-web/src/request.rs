//! The request half of the host boundary.
//!
//! The hosting node owns the real HTTP machinery; it maps each incoming
//! request onto a [`Request`] before handing it to the web interface.

use std::collections::HashMap;

use strum::{Display, EnumString};

/// The HTTP method of a request. Anything that is not a form submission is
/// treated as GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

/// An incoming request: a path relative to the plugin mount point, query
/// parameters, and (for POST requests) form-encoded parts.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    params: HashMap<String, String>,
    parts: HashMap<String, String>,
}

impl Request {
    /// Creates a new request.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: HashMap::new(),
            parts: HashMap::new(),
        }
    }

    /// Creates a GET request for the given path.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST request for the given path.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Adds a query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Adds a form part.
    pub fn with_part(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.insert(name.into(), value.into());
        self
    }

    /// Returns the method of this request.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the path of this request.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameter with the given name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns the form part with the given name, truncated to at most
    /// `max_length` characters. A missing part yields an empty string; this
    /// accessor never fails.
    pub fn part(&self, name: &str, max_length: usize) -> String {
        match self.parts.get(name) {
            Some(value) => value.chars().take(max_length).collect(),
            None => String::new(),
        }
    }

    /// Returns the names of all form parts.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }
}
