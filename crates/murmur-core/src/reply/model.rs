use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reply of an author to a [`Post`](crate::post::Post).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Unique reply identifier (UUID format)
    pub id: String,
    /// The post this reply belongs to
    pub post_id: String,
    /// The author that wrote this reply
    pub author_id: String,
    /// When the reply was created
    pub time: DateTime<Utc>,
    /// The text of the reply
    pub text: String,
}
