use std::sync::Arc;

use murmur_core::author::Author;
use murmur_core::core::{Core, LikeTarget, MemoryCore};
use murmur_web::host::StaticSessionProvider;
use murmur_web::request::Request;
use murmur_web::web_interface::WebInterface;

const FORM_PASSWORD: &str = "form-password";

fn setup() -> (Arc<MemoryCore>, Arc<WebInterface>) {
    let core = Arc::new(MemoryCore::new());
    core.register_author(Author::new("alice", "Alice"));
    let sessions = Arc::new(StaticSessionProvider::new("alice"));
    let web_interface =
        WebInterface::new(core.clone(), sessions, FORM_PASSWORD).expect("web interface");
    (core, web_interface)
}

fn post_request(path: &str) -> Request {
    Request::post(path).with_part("formPassword", FORM_PASSWORD)
}

fn json_body(response: &murmur_web::Response) -> serde_json::Value {
    serde_json::from_slice(response.body()).expect("json body")
}

#[test]
fn test_unknown_path_is_not_found() {
    let (_core, web) = setup();
    let response = web.handle_request(&Request::get("bogus.html"));
    assert_eq!(response.status(), 404);
}

#[test]
fn test_post_without_form_password_is_rejected() {
    let (_core, web) = setup();
    let request = Request::post("createPost.html").with_part("text", "hello");
    let response = web.handle_request(&request);
    assert_eq!(response.location(), Some("noPermission.html"));
}

#[test]
fn test_login_required_page_redirects_without_a_session() {
    let core = Arc::new(MemoryCore::new());
    let sessions = Arc::new(StaticSessionProvider::logged_out());
    let web = WebInterface::new(core, sessions, FORM_PASSWORD).expect("web interface");
    let response = web.handle_request(&Request::get("editProfile.html"));
    assert_eq!(response.location(), Some("noPermission.html"));
}

#[test]
fn test_create_post_with_empty_text_re_renders_with_error() {
    let (core, web) = setup();
    let request = post_request("createPost.html")
        .with_part("text", "   ")
        .with_part("returnPage", "index.html");
    let response = web.handle_request(&request);
    assert_eq!(response.status(), 200);
    assert!(response.body_text().contains("text-empty"));
    assert!(core.posts_for("alice").is_empty());
}

#[test]
fn test_create_post_redirects_to_the_return_page() {
    let (core, web) = setup();
    let request = post_request("createPost.html")
        .with_part("text", "  hello world  ")
        .with_part("returnPage", "index.html");
    let response = web.handle_request(&request);
    assert_eq!(response.location(), Some("index.html"));
    let posts = core.posts_for("alice");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].text, "hello world");
}

#[test]
fn test_create_reply_to_unknown_post_redirects_to_invalid() {
    let (_core, web) = setup();
    let request = post_request("createReply.html")
        .with_part("post", "missing")
        .with_part("text", "me too")
        .with_part("returnPage", "index.html");
    let response = web.handle_request(&request);
    assert_eq!(response.location(), Some("invalid.html"));
}

#[test]
fn test_edit_profile_normalizes_whitespace_names_to_unset() {
    let (core, web) = setup();
    let request = post_request("editProfile.html")
        .with_part("save-profile", "true")
        .with_part("first-name", "  ")
        .with_part("middle-name", "")
        .with_part("last-name", "Lovelace");
    let response = web.handle_request(&request);
    assert_eq!(response.location(), Some("editProfile.html"));

    let profile = core.get_author("alice").unwrap().profile;
    assert_eq!(profile.first_name(), None);
    assert_eq!(profile.middle_name(), None);
    assert_eq!(profile.last_name(), Some("Lovelace"));
}

#[test]
fn test_edit_profile_parses_birth_date_leniently() {
    let (core, web) = setup();
    let request = post_request("editProfile.html")
        .with_part("save-profile", "true")
        .with_part("birth-day", " 10 ")
        .with_part("birth-month", "December")
        .with_part("birth-year", "1815");
    web.handle_request(&request);

    let profile = core.get_author("alice").unwrap().profile;
    assert_eq!(profile.birth_day(), Some(10));
    assert_eq!(profile.birth_month(), None);
    assert_eq!(profile.birth_year(), Some(1815));
}

#[test]
fn test_edit_profile_get_shows_the_stored_values() {
    let (core, web) = setup();
    let mut author = core.get_author("alice").unwrap();
    let mut profile = author.profile.clone();
    profile.set_first_name(Some("Ada".to_string()));
    profile.add_field("Occupation").unwrap();
    author.profile = profile;
    core.save_author(&author).unwrap();

    let response = web.handle_request(&Request::get("editProfile.html"));
    let body = response.body_text();
    assert!(body.contains("value=\"Ada\""));
    assert!(body.contains("Occupation"));
}

#[test]
fn test_add_field_redirects_to_the_field_list() {
    let (core, web) = setup();
    let request = post_request("editProfile.html")
        .with_part("add-field", "true")
        .with_part("field-name", " Occupation ");
    let response = web.handle_request(&request);
    assert_eq!(response.location(), Some("editProfile.html#profile-fields"));

    let profile = core.get_author("alice").unwrap().profile;
    assert!(profile.field_by_name("Occupation").is_some());
}

#[test]
fn test_add_duplicate_field_echoes_the_name_and_keeps_the_list() {
    let (core, web) = setup();
    let first = post_request("editProfile.html")
        .with_part("add-field", "true")
        .with_part("field-name", "Occupation");
    web.handle_request(&first);

    let duplicate = post_request("editProfile.html")
        .with_part("add-field", "true")
        .with_part("field-name", "Occupation");
    let response = web.handle_request(&duplicate);
    assert_eq!(response.status(), 200);
    let body = response.body_text();
    assert!(body.contains("duplicate-field-name"));
    assert!(body.contains("Occupation"));

    let profile = core.get_author("alice").unwrap().profile;
    assert_eq!(profile.fields().len(), 1);
}

#[test]
fn test_field_actions_move_and_delete() {
    let (core, web) = setup();
    for name in ["First", "Second"] {
        web.handle_request(
            &post_request("editProfile.html")
                .with_part("add-field", "true")
                .with_part("field-name", name),
        );
    }
    let profile = core.get_author("alice").unwrap().profile;
    let second_id = profile.field_by_name("Second").unwrap().id().to_string();

    let response = web.handle_request(
        &post_request("editProfile.html").with_part(format!("move-up-field-{second_id}"), "go"),
    );
    assert_eq!(response.location(), Some("editProfile.html#profile-fields"));
    let profile = core.get_author("alice").unwrap().profile;
    assert_eq!(profile.fields()[0].name(), "Second");

    // Deleting goes through the confirmation page.
    let response = web.handle_request(
        &post_request("editProfile.html").with_part(format!("delete-field-{second_id}"), "go"),
    );
    assert_eq!(
        response.location(),
        Some(format!("deleteProfileField.html?field={second_id}").as_str())
    );
    let response = web.handle_request(
        &post_request("deleteProfileField.html")
            .with_part("field", second_id)
            .with_part("confirm", "true"),
    );
    assert_eq!(response.location(), Some("editProfile.html#profile-fields"));
    let profile = core.get_author("alice").unwrap().profile;
    assert!(profile.field_by_name("Second").is_none());
    assert_eq!(profile.fields().len(), 1);
}

#[test]
fn test_move_with_unknown_field_id_redirects_to_invalid() {
    let (_core, web) = setup();
    let response = web.handle_request(
        &post_request("editProfile.html").with_part("move-up-field-missing", "go"),
    );
    assert_eq!(response.location(), Some("invalid.html"));
}

#[test]
fn test_rename_field_to_an_existing_name_shows_the_error() {
    let (core, web) = setup();
    for name in ["First", "Second"] {
        web.handle_request(
            &post_request("editProfile.html")
                .with_part("add-field", "true")
                .with_part("field-name", name),
        );
    }
    let profile = core.get_author("alice").unwrap().profile;
    let second_id = profile.field_by_name("Second").unwrap().id().to_string();

    let response = web.handle_request(
        &post_request("editProfileField.html")
            .with_part("field", second_id)
            .with_part("name", "First"),
    );
    assert_eq!(response.status(), 200);
    assert!(response.body_text().contains("duplicate-field-name"));
    let profile = core.get_author("alice").unwrap().profile;
    assert!(profile.field_by_name("Second").is_some());
}

#[test]
fn test_get_likes_returns_the_count() {
    let (core, web) = setup();
    core.register_author(Author::new("bob", "Bob"));
    let post = core.create_post("alice", None, "hello").unwrap();
    core.like("bob", LikeTarget::Post, &post.id).unwrap();

    let request = Request::get("ajax/getLikes.ajax")
        .with_param("type", "post")
        .with_param("post", &post.id);
    let body = json_body(&web.handle_request(&request));
    assert_eq!(body["success"], true);
    assert_eq!(body["likes"], 1);
}

#[test]
fn test_get_likes_with_an_empty_id_reports_an_invalid_id() {
    let (_core, web) = setup();
    let request = Request::get("ajax/getLikes.ajax")
        .with_param("type", "post")
        .with_param("post", "");
    let body = json_body(&web.handle_request(&request));
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid-post-id");
}

#[test]
fn test_get_likes_with_an_unknown_type_reports_invalid_type() {
    let (_core, web) = setup();
    let request = Request::get("ajax/getLikes.ajax")
        .with_param("type", "author")
        .with_param("author", "alice");
    let body = json_body(&web.handle_request(&request));
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid-type");
}

#[test]
fn test_like_page_records_a_like_and_redirects() {
    let (core, web) = setup();
    let post = core.create_post("alice", None, "hello").unwrap();
    let request = post_request("like.html")
        .with_part("type", "post")
        .with_part("post", &post.id)
        .with_part("returnPage", "index.html");
    let response = web.handle_request(&request);
    assert_eq!(response.location(), Some("index.html"));
    assert_eq!(core.likes(LikeTarget::Post, &post.id), ["alice"]);
}

#[test]
fn test_like_ajax_requires_a_session() {
    let core = Arc::new(MemoryCore::new());
    let sessions = Arc::new(StaticSessionProvider::logged_out());
    let web = WebInterface::new(core, sessions, FORM_PASSWORD).expect("web interface");
    let request = Request::get("ajax/like.ajax")
        .with_param("type", "post")
        .with_param("post", "some-post")
        .with_part("formPassword", FORM_PASSWORD);
    let body = json_body(&web.handle_request(&request));
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "auth-required");
}

#[test]
fn test_delete_post_of_another_author_is_refused() {
    let (core, web) = setup();
    core.register_author(Author::new("bob", "Bob"));
    let post = core.create_post("bob", None, "bobs post").unwrap();
    let request = post_request("deletePost.html")
        .with_part("post", &post.id)
        .with_part("confirmDelete", "true")
        .with_part("returnPage", "index.html");
    let response = web.handle_request(&request);
    assert_eq!(response.location(), Some("noPermission.html"));
    assert!(core.get_post(&post.id).is_some());
}

#[test]
fn test_delete_post_confirm_and_abort() {
    let (core, web) = setup();
    let post = core.create_post("alice", None, "hello").unwrap();

    let abort = post_request("deletePost.html")
        .with_part("post", &post.id)
        .with_part("abortDelete", "true")
        .with_part("returnPage", "index.html");
    let response = web.handle_request(&abort);
    assert_eq!(response.location(), Some("index.html"));
    assert!(core.get_post(&post.id).is_some());

    let confirm = post_request("deletePost.html")
        .with_part("post", &post.id)
        .with_part("confirmDelete", "true")
        .with_part("returnPage", "index.html");
    let response = web.handle_request(&confirm);
    assert_eq!(response.location(), Some("index.html"));
    assert!(core.get_post(&post.id).is_none());
}

#[test]
fn test_index_renders_the_feed() {
    let (core, web) = setup();
    core.create_post("alice", None, "a feed entry").unwrap();
    let response = web.handle_request(&Request::get("index.html"));
    assert_eq!(response.status(), 200);
    assert!(response.body_text().contains("a feed entry"));
}

#[test]
fn test_view_post_shows_replies_and_survives_unknown_ids() {
    let (core, web) = setup();
    let post = core.create_post("alice", None, "hello").unwrap();
    core.create_reply("alice", &post.id, "me too").unwrap();

    let response =
        web.handle_request(&Request::get("viewPost.html").with_param("post", &post.id));
    let body = response.body_text();
    assert!(body.contains("hello"));
    assert!(body.contains("me too"));

    let response =
        web.handle_request(&Request::get("viewPost.html").with_param("post", "missing"));
    assert!(response.body_text().contains("not-found"));
}

#[test]
fn test_options_round_trip() {
    let (core, web) = setup();
    let request = post_request("options.html")
        .with_part("insertion-delay", "300")
        .with_part("require-full-access", "true");
    let response = web.handle_request(&request);
    assert_eq!(response.location(), Some("options.html"));
    let options = core.options();
    assert_eq!(options.insertion_delay_secs, 300);
    assert!(options.require_full_access);

    let response = web.handle_request(&Request::get("options.html"));
    assert!(response.body_text().contains("300"));
}
