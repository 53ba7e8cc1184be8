mod common;

use regex::Regex;
use serde_json::{Value, json};

#[tokio::test]
async fn test_shorten_anonymous() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/page" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    assert_eq!(body["originalUrl"], "https://example.com/page");
    assert_eq!(body["message"], "URL shortened successfully (anonymous).");

    let short_url = body["shortUrl"].as_str().unwrap();
    let pattern = Regex::new(r"^http://localhost:3000/[A-Za-z0-9]{6}$").unwrap();
    assert!(pattern.is_match(short_url), "unexpected short URL {short_url}");

    let code = short_url.rsplit('/').next().unwrap();
    let stored = app.links.get(code).unwrap();
    assert!(stored.is_anonymous());
    assert_eq!(stored.click_count, 0);
}

#[tokio::test]
async fn test_shorten_authenticated_sets_owner() {
    let app = common::spawn_app();
    let token = app.login_as("alice").await;

    let response = app
        .server
        .post("/api/shorten")
        .add_header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "longUrl": "https://rust-lang.org" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    assert_eq!(body["message"], "URL shortened successfully.");

    let code = body["shortUrl"].as_str().unwrap().rsplit('/').next().unwrap();
    let claims = app.state.token_service.verify(&token).unwrap();
    assert!(app.links.get(code).unwrap().is_owned_by(claims.id));
}

#[tokio::test]
async fn test_shorten_stores_url_unchanged() {
    let app = common::spawn_app();
    let url = "HTTPS://Example.com/Path/?b=2&a=1#frag";

    let code = app.shorten(url, None).await;

    assert_eq!(app.links.get(&code).unwrap().long_url, url);
}

#[tokio::test]
async fn test_shorten_invalid_urls() {
    let app = common::spawn_app();

    for bad in [
        "",
        "   ",
        "not a url",
        "/just/a/path",
        "https://example.com/a\nb",
        "https://example.com/\tb",
    ] {
        let response = app
            .server
            .post("/api/shorten")
            .json(&json!({ "longUrl": bad }))
            .await;

        assert_eq!(response.status_code(), 400, "{bad:?} should be rejected");
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "validation_error");
    }

    assert!(app.links.all().is_empty());
}

#[tokio::test]
async fn test_shorten_rejects_control_characters() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/a\nb" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["details"]["reason"], "URL contains control characters");
    assert!(app.links.all().is_empty());
}

#[tokio::test]
async fn test_shorten_missing_field_and_malformed_json() {
    let app = common::spawn_app();

    let missing = app.server.post("/api/shorten").json(&json!({})).await;
    assert_eq!(missing.status_code(), 400);

    let malformed = app
        .server
        .post("/api/shorten")
        .content_type("application/json")
        .text("{\"longUrl\":")
        .await;
    assert_eq!(malformed.status_code(), 400);
}

#[tokio::test]
async fn test_shorten_invalid_token_is_forbidden() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .add_header("Authorization", "Bearer not.a.token")
        .json(&json!({ "longUrl": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 403);
    assert!(app.links.all().is_empty());
}

#[tokio::test]
async fn test_shorten_non_bearer_header_is_anonymous() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .add_header("Authorization", "Basic Ym9iOnNlY3JldA==")
        .json(&json!({ "longUrl": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["message"], "URL shortened successfully (anonymous).");
}

#[tokio::test]
async fn test_shorten_records_forwarded_for() {
    let app = common::spawn_app_with_peer();

    let response = app
        .server
        .post("/api/shorten")
        .add_header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .json(&json!({ "longUrl": "https://example.com" }))
        .await;
    assert_eq!(response.status_code(), 201);

    let link = app.links.all().pop().unwrap();
    assert_eq!(link.ip_address, "203.0.113.7");
}

#[tokio::test]
async fn test_shorten_records_peer_address() {
    let app = common::spawn_app_with_peer();

    app.shorten("https://example.com", None).await;

    let link = app.links.all().pop().unwrap();
    assert_eq!(link.ip_address, "127.0.0.1");
}

#[tokio::test]
async fn test_shorten_without_address_records_unknown() {
    let app = common::spawn_app();

    app.shorten("https://example.com", None).await;

    let link = app.links.all().pop().unwrap();
    assert_eq!(link.ip_address, "unknown");
}

#[tokio::test]
async fn test_shorten_same_url_twice_gives_distinct_codes() {
    let app = common::spawn_app();

    let a = app.shorten("https://example.com", None).await;
    let b = app.shorten("https://example.com", None).await;

    assert_ne!(a, b);
}
