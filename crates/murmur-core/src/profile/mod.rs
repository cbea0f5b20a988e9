//! Author profile domain model.
//!
//! A profile stores personal information about an author. All information
//! is optional; changes are tracked through a conservative dirty flag.

mod model;

pub use model::{Field, Profile};
