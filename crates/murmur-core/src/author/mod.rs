//! Author domain model.

mod model;

pub use model::Author;
