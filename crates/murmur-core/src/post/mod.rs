//! Post domain model.

mod model;

pub use model::Post;
