//! In-memory reference implementation of the [`Core`] service.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::{Core, CoreListener, LikeTarget};
use crate::author::Author;
use crate::config::{Options, OptionsStore};
use crate::error::{MurmurError, Result};
use crate::post::Post;
use crate::reply::Reply;

#[derive(Default)]
struct CoreState {
    authors: HashMap<String, Author>,
    posts: HashMap<String, Post>,
    replies: HashMap<String, Reply>,
    post_likes: HashMap<String, BTreeSet<String>>,
    reply_likes: HashMap<String, BTreeSet<String>>,
    options: Options,
}

/// An in-memory [`Core`] guarded by a single mutex.
///
/// Entities discovered on the network enter through the `import_*` methods,
/// which fire listener events; locally created entities do not produce
/// events.
#[derive(Default)]
pub struct MemoryCore {
    state: Mutex<CoreState>,
    listeners: Mutex<Vec<Weak<dyn CoreListener>>>,
    options_store: Option<OptionsStore>,
}

impl MemoryCore {
    /// Creates a new empty core with default options and no backing store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a core whose options are loaded from and persisted through
    /// the given store.
    pub fn with_options_store(options_store: OptionsStore) -> Result<Self> {
        let options = options_store.load()?;
        Ok(Self {
            state: Mutex::new(CoreState {
                options,
                ..CoreState::default()
            }),
            listeners: Mutex::new(Vec::new()),
            options_store: Some(options_store),
        })
    }

    /// Adds a locally created author.
    pub fn register_author(&self, author: Author) {
        debug!(author = %author.id, "registering local author");
        self.state().authors.insert(author.id.clone(), author);
    }

    /// Adds an author discovered on the network and notifies listeners.
    pub fn import_author(&self, author: Author) {
        debug!(author = %author.id, "imported author");
        self.state().authors.insert(author.id.clone(), author.clone());
        self.each_listener(|listener| listener.new_author_found(&author));
    }

    /// Adds a post discovered on the network and notifies listeners.
    pub fn import_post(&self, post: Post) {
        debug!(post = %post.id, "imported post");
        self.state().posts.insert(post.id.clone(), post.clone());
        self.each_listener(|listener| listener.new_post_found(&post));
    }

    /// Adds a reply discovered on the network and notifies listeners.
    pub fn import_reply(&self, reply: Reply) {
        debug!(reply = %reply.id, "imported reply");
        self.state().replies.insert(reply.id.clone(), reply.clone());
        self.each_listener(|listener| listener.new_reply_found(&reply));
    }

    /// Marks an author as acknowledged by the user.
    pub fn mark_author_known(&self, author_id: &str) {
        if let Some(author) = self.get_author(author_id) {
            self.each_listener(|listener| listener.author_marked_known(&author));
        }
    }

    /// Marks a post as acknowledged by the user.
    pub fn mark_post_known(&self, post_id: &str) {
        if let Some(post) = self.get_post(post_id) {
            self.each_listener(|listener| listener.post_marked_known(&post));
        }
    }

    /// Marks a reply as acknowledged by the user.
    pub fn mark_reply_known(&self, reply_id: &str) {
        if let Some(reply) = self.get_reply(reply_id) {
            self.each_listener(|listener| listener.reply_marked_known(&reply));
        }
    }

    fn state(&self) -> MutexGuard<'_, CoreState> {
        self.state.lock().expect("core state lock")
    }

    fn each_listener(&self, event: impl Fn(&dyn CoreListener)) {
        let listeners: Vec<Arc<dyn CoreListener>> = {
            let mut listeners = self.listeners.lock().expect("core listeners lock");
            listeners.retain(|listener| listener.strong_count() > 0);
            listeners
                .iter()
                .filter_map(Weak::upgrade)
                .collect()
        };
        for listener in listeners {
            event(listener.as_ref());
        }
    }
}

impl Core for MemoryCore {
    fn add_listener(&self, listener: &Arc<dyn CoreListener>) {
        self.listeners
            .lock()
            .expect("core listeners lock")
            .push(Arc::downgrade(listener));
    }

    fn authors(&self) -> Vec<Author> {
        self.state().authors.values().cloned().collect()
    }

    fn get_author(&self, id: &str) -> Option<Author> {
        self.state().authors.get(id).cloned()
    }

    fn save_author(&self, author: &Author) -> Result<()> {
        let mut state = self.state();
        if !state.authors.contains_key(&author.id) {
            return Err(MurmurError::not_found("author", &author.id));
        }
        debug!(author = %author.id, "saving author");
        state.authors.insert(author.id.clone(), author.clone());
        Ok(())
    }

    fn get_post(&self, id: &str) -> Option<Post> {
        self.state().posts.get(id).cloned()
    }

    fn posts_for(&self, author_id: &str) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .state()
            .posts
            .values()
            .filter(|post| post.author_id == author_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.time.cmp(&a.time));
        posts
    }

    fn create_post(
        &self,
        author_id: &str,
        recipient_id: Option<&str>,
        text: &str,
    ) -> Result<Post> {
        let mut state = self.state();
        if !state.authors.contains_key(author_id) {
            return Err(MurmurError::not_found("author", author_id));
        }
        let recipient_id = recipient_id
            .filter(|recipient| state.authors.contains_key(*recipient))
            .map(str::to_string);
        let post = Post {
            id: Uuid::new_v4().to_string(),
            author_id: author_id.to_string(),
            recipient_id,
            time: Utc::now(),
            text: text.to_string(),
        };
        debug!(post = %post.id, author = %author_id, "created post");
        state.posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    fn delete_post(&self, post_id: &str) -> Result<()> {
        let mut state = self.state();
        state
            .posts
            .remove(post_id)
            .ok_or_else(|| MurmurError::not_found("post", post_id))?;
        state.post_likes.remove(post_id);
        let orphaned: Vec<String> = state
            .replies
            .values()
            .filter(|reply| reply.post_id == post_id)
            .map(|reply| reply.id.clone())
            .collect();
        for reply_id in orphaned {
            state.replies.remove(&reply_id);
            state.reply_likes.remove(&reply_id);
        }
        debug!(post = %post_id, "deleted post");
        Ok(())
    }

    fn get_reply(&self, id: &str) -> Option<Reply> {
        self.state().replies.get(id).cloned()
    }

    fn replies_for(&self, post_id: &str) -> Vec<Reply> {
        let mut replies: Vec<Reply> = self
            .state()
            .replies
            .values()
            .filter(|reply| reply.post_id == post_id)
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.time.cmp(&b.time));
        replies
    }

    fn create_reply(&self, author_id: &str, post_id: &str, text: &str) -> Result<Reply> {
        let mut state = self.state();
        if !state.authors.contains_key(author_id) {
            return Err(MurmurError::not_found("author", author_id));
        }
        if !state.posts.contains_key(post_id) {
            return Err(MurmurError::not_found("post", post_id));
        }
        let reply = Reply {
            id: Uuid::new_v4().to_string(),
            post_id: post_id.to_string(),
            author_id: author_id.to_string(),
            time: Utc::now(),
            text: text.to_string(),
        };
        debug!(reply = %reply.id, post = %post_id, "created reply");
        state.replies.insert(reply.id.clone(), reply.clone());
        Ok(reply)
    }

    fn like(&self, author_id: &str, target: LikeTarget, id: &str) -> Result<()> {
        let mut state = self.state();
        let likes = match target {
            LikeTarget::Post => {
                if !state.posts.contains_key(id) {
                    return Err(MurmurError::not_found("post", id));
                }
                state.post_likes.entry(id.to_string()).or_default()
            }
            LikeTarget::Reply => {
                if !state.replies.contains_key(id) {
                    return Err(MurmurError::not_found("reply", id));
                }
                state.reply_likes.entry(id.to_string()).or_default()
            }
        };
        likes.insert(author_id.to_string());
        Ok(())
    }

    fn unlike(&self, author_id: &str, target: LikeTarget, id: &str) -> Result<()> {
        let mut state = self.state();
        let likes = match target {
            LikeTarget::Post => {
                if !state.posts.contains_key(id) {
                    return Err(MurmurError::not_found("post", id));
                }
                state.post_likes.entry(id.to_string()).or_default()
            }
            LikeTarget::Reply => {
                if !state.replies.contains_key(id) {
                    return Err(MurmurError::not_found("reply", id));
                }
                state.reply_likes.entry(id.to_string()).or_default()
            }
        };
        likes.remove(author_id);
        Ok(())
    }

    fn likes(&self, target: LikeTarget, id: &str) -> Vec<String> {
        let state = self.state();
        let likes = match target {
            LikeTarget::Post => state.post_likes.get(id),
            LikeTarget::Reply => state.reply_likes.get(id),
        };
        likes
            .map(|likes| likes.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn options(&self) -> Options {
        self.state().options.clone()
    }

    fn set_options(&self, options: Options) -> Result<()> {
        let mut state = self.state();
        state.options = options;
        if let Some(store) = &self.options_store {
            store.save(&state.options)?;
        }
        Ok(())
    }
}
