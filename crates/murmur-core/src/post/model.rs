use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A text message published by an author, optionally directed at another
/// author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique post identifier (UUID format)
    pub id: String,
    /// The author that wrote this post
    pub author_id: String,
    /// The author this post is directed at, if any
    pub recipient_id: Option<String>,
    /// When the post was created
    pub time: DateTime<Utc>,
    /// The text of the post
    pub text: String,
}
