//! The core service boundary.
//!
//! [`Core`] is the business-logic and persistence service the page handlers
//! call into; the plugin host supplies the real implementation at start-up.
//! [`MemoryCore`] is the in-memory reference implementation used by tests
//! and stand-alone deployments.

mod memory;

use std::sync::Arc;

use strum::{Display, EnumString};

use crate::author::Author;
use crate::config::Options;
use crate::error::Result;
use crate::post::Post;
use crate::reply::Reply;

pub use memory::MemoryCore;

/// The kind of entity a like is attached to. The wire representation is
/// lowercase (`post` / `reply`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LikeTarget {
    Post,
    Reply,
}

/// Receives life-cycle events from the core.
///
/// "Found" events describe entities discovered on the network; "marked
/// known" events fire when the user has acknowledged such an entity.
pub trait CoreListener: Send + Sync {
    fn new_author_found(&self, author: &Author);
    fn new_post_found(&self, post: &Post);
    fn new_reply_found(&self, reply: &Reply);
    fn author_marked_known(&self, author: &Author);
    fn post_marked_known(&self, post: &Post);
    fn reply_marked_known(&self, reply: &Reply);
}

/// Business logic and persistence operations the web layer relies on.
///
/// All operations are synchronous and blocking; the host serves requests on
/// its own worker threads.
pub trait Core: Send + Sync {
    /// Registers a listener for core events. Listeners are held weakly.
    fn add_listener(&self, listener: &Arc<dyn CoreListener>);

    /// Returns all known authors.
    fn authors(&self) -> Vec<Author>;

    /// Returns the author with the given id.
    fn get_author(&self, id: &str) -> Option<Author>;

    /// Persists the given author, replacing the stored record. This is how
    /// the web layer hands an edited profile back to its owner.
    fn save_author(&self, author: &Author) -> Result<()>;

    /// Returns the post with the given id.
    fn get_post(&self, id: &str) -> Option<Post>;

    /// Returns the posts of the given author, newest first.
    fn posts_for(&self, author_id: &str) -> Vec<Post>;

    /// Creates a new post for the given author.
    fn create_post(
        &self,
        author_id: &str,
        recipient_id: Option<&str>,
        text: &str,
    ) -> Result<Post>;

    /// Deletes the post with the given id together with its replies and
    /// likes.
    fn delete_post(&self, post_id: &str) -> Result<()>;

    /// Returns the reply with the given id.
    fn get_reply(&self, id: &str) -> Option<Reply>;

    /// Returns the replies to the given post, oldest first.
    fn replies_for(&self, post_id: &str) -> Vec<Reply>;

    /// Creates a new reply to the given post.
    fn create_reply(&self, author_id: &str, post_id: &str, text: &str) -> Result<Reply>;

    /// Records that the given author likes the given post or reply.
    fn like(&self, author_id: &str, target: LikeTarget, id: &str) -> Result<()>;

    /// Removes the given author's like from the given post or reply.
    fn unlike(&self, author_id: &str, target: LikeTarget, id: &str) -> Result<()>;

    /// Returns the ids of the authors that like the given post or reply,
    /// sorted.
    fn likes(&self, target: LikeTarget, id: &str) -> Vec<String>;

    /// Returns the current plugin options.
    fn options(&self) -> Options;

    /// Replaces the plugin options.
    fn set_options(&self, options: Options) -> Result<()>;
}
