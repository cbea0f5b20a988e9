//! Murmur web layer.
//!
//! This crate maps HTTP-like requests from the hosting node onto the Murmur
//! domain: a dispatch table of stateless page handlers renders templates or
//! JSON from the entities owned by the [`Core`](murmur_core::core::Core),
//! and the [`WebInterface`] composition root wires the handlers, the
//! notification bookkeeping and the template environment together.

pub mod host;
pub mod notify;
pub mod page;
pub mod request;
pub mod response;
pub mod template;
pub mod templates;
pub mod text;
pub mod web_interface;

pub use request::{Method, Request};
pub use response::Response;
pub use web_interface::{Services, WebInterface};
