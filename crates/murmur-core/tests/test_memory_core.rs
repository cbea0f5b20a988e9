use std::sync::{Arc, Mutex};

use murmur_core::author::Author;
use murmur_core::config::{Options, OptionsStore};
use murmur_core::core::{Core, CoreListener, LikeTarget, MemoryCore};
use murmur_core::post::Post;
use murmur_core::reply::Reply;
use tempfile::TempDir;

/// Records every event it receives, for assertions.
#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<String>>,
}

impl RecordingListener {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl CoreListener for RecordingListener {
    fn new_author_found(&self, author: &Author) {
        self.record(format!("new-author:{}", author.id));
    }

    fn new_post_found(&self, post: &Post) {
        self.record(format!("new-post:{}", post.id));
    }

    fn new_reply_found(&self, reply: &Reply) {
        self.record(format!("new-reply:{}", reply.id));
    }

    fn author_marked_known(&self, author: &Author) {
        self.record(format!("known-author:{}", author.id));
    }

    fn post_marked_known(&self, post: &Post) {
        self.record(format!("known-post:{}", post.id));
    }

    fn reply_marked_known(&self, reply: &Reply) {
        self.record(format!("known-reply:{}", reply.id));
    }
}

fn core_with_author(id: &str) -> MemoryCore {
    let core = MemoryCore::new();
    core.register_author(Author::new(id, id.to_uppercase()));
    core
}

#[test]
fn test_create_post_does_not_fire_events() {
    let core = core_with_author("alice");
    let listener = Arc::new(RecordingListener::default());
    let as_listener: Arc<dyn CoreListener> = listener.clone();
    core.add_listener(&as_listener);

    core.create_post("alice", None, "hello").unwrap();
    assert!(listener.events().is_empty());
}

#[test]
fn test_import_post_fires_new_post_event() {
    let core = core_with_author("alice");
    let listener = Arc::new(RecordingListener::default());
    let as_listener: Arc<dyn CoreListener> = listener.clone();
    core.add_listener(&as_listener);

    let post = core.create_post("alice", None, "hello").unwrap();
    core.import_post(post.clone());
    core.mark_post_known(&post.id);

    assert_eq!(
        listener.events(),
        vec![format!("new-post:{}", post.id), format!("known-post:{}", post.id)]
    );
}

#[test]
fn test_dropped_listeners_are_skipped() {
    let core = core_with_author("alice");
    let listener = Arc::new(RecordingListener::default());
    let as_listener: Arc<dyn CoreListener> = listener.clone();
    core.add_listener(&as_listener);
    drop(as_listener);
    drop(listener);

    let post = core.create_post("alice", None, "hello").unwrap();
    core.import_post(post);
}

#[test]
fn test_create_post_requires_a_known_author() {
    let core = MemoryCore::new();
    assert!(core.create_post("nobody", None, "hello").is_err());
}

#[test]
fn test_unknown_recipient_is_dropped() {
    let core = core_with_author("alice");
    let post = core.create_post("alice", Some("nobody"), "hello").unwrap();
    assert_eq!(post.recipient_id, None);

    core.register_author(Author::new("bob", "Bob"));
    let post = core.create_post("alice", Some("bob"), "hi bob").unwrap();
    assert_eq!(post.recipient_id.as_deref(), Some("bob"));
}

#[test]
fn test_posts_for_returns_newest_first() {
    let core = core_with_author("alice");
    let first = core.create_post("alice", None, "first").unwrap();
    let second = core.create_post("alice", None, "second").unwrap();

    let texts: Vec<String> = core
        .posts_for("alice")
        .into_iter()
        .map(|post| post.text)
        .collect();
    assert_eq!(texts.len(), 2);
    // Identical timestamps are possible; only check the order when they differ.
    if first.time != second.time {
        assert_eq!(texts, ["second", "first"]);
    }
}

#[test]
fn test_likes_are_deduplicated_and_sorted() {
    let core = core_with_author("alice");
    core.register_author(Author::new("bob", "Bob"));
    let post = core.create_post("alice", None, "hello").unwrap();

    core.like("bob", LikeTarget::Post, &post.id).unwrap();
    core.like("alice", LikeTarget::Post, &post.id).unwrap();
    core.like("bob", LikeTarget::Post, &post.id).unwrap();

    assert_eq!(core.likes(LikeTarget::Post, &post.id), ["alice", "bob"]);

    core.unlike("bob", LikeTarget::Post, &post.id).unwrap();
    assert_eq!(core.likes(LikeTarget::Post, &post.id), ["alice"]);
}

#[test]
fn test_like_unknown_entity_fails() {
    let core = core_with_author("alice");
    assert!(core.like("alice", LikeTarget::Post, "missing").is_err());
    assert!(core.like("alice", LikeTarget::Reply, "missing").is_err());
}

#[test]
fn test_delete_post_removes_replies_and_likes() {
    let core = core_with_author("alice");
    let post = core.create_post("alice", None, "hello").unwrap();
    let reply = core.create_reply("alice", &post.id, "me too").unwrap();
    core.like("alice", LikeTarget::Post, &post.id).unwrap();
    core.like("alice", LikeTarget::Reply, &reply.id).unwrap();

    core.delete_post(&post.id).unwrap();

    assert!(core.get_post(&post.id).is_none());
    assert!(core.get_reply(&reply.id).is_none());
    assert!(core.likes(LikeTarget::Post, &post.id).is_empty());
    assert!(core.likes(LikeTarget::Reply, &reply.id).is_empty());
}

#[test]
fn test_replies_for_returns_oldest_first() {
    let core = core_with_author("alice");
    let post = core.create_post("alice", None, "hello").unwrap();
    core.create_reply("alice", &post.id, "first").unwrap();
    core.create_reply("alice", &post.id, "second").unwrap();
    assert_eq!(core.replies_for(&post.id).len(), 2);
}

#[test]
fn test_save_author_replaces_the_stored_record() {
    let core = core_with_author("alice");
    let mut author = core.get_author("alice").unwrap();
    let mut profile = author.profile.clone();
    profile.set_first_name(Some("Alice".to_string()));
    assert!(profile.is_modified());
    author.profile = profile;
    core.save_author(&author).unwrap();

    let stored = core.get_author("alice").unwrap();
    assert_eq!(stored.profile.first_name(), Some("Alice"));
}

#[test]
fn test_save_author_requires_a_known_author() {
    let core = MemoryCore::new();
    assert!(core.save_author(&Author::new("ghost", "Ghost")).is_err());
}

#[test]
fn test_options_persist_through_the_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = OptionsStore::new(temp_dir.path().join("options.toml"));
    let core = MemoryCore::with_options_store(store.clone()).unwrap();

    let options = Options {
        insertion_delay_secs: 120,
        require_full_access: false,
    };
    core.set_options(options.clone()).unwrap();
    assert_eq!(core.options(), options);

    // A fresh core picks the saved options back up.
    let reloaded = MemoryCore::with_options_store(store).unwrap();
    assert_eq!(reloaded.options(), options);
}
