//! End-to-end tests for the content API.
//!
//! Drives the full router (seeded JSON file store, trust-mode extraction,
//! response shaping) with in-process requests.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::Router;
use content_service::store::{ContentStore, JsonFileStore};
use content_service::{cors_layer, router, seed, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

/// Test server backed by a freshly seeded store in a temp directory.
struct TestApp {
    _temp_dir: TempDir,
    db_path: std::path::PathBuf,
    app: Router,
}

impl TestApp {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("database.json");
        let store = JsonFileStore::new(&db_path);
        seed::run(&store).expect("Failed to seed store");

        let app = router(Arc::new(AppState::new(store)));
        Self {
            _temp_dir: temp_dir,
            db_path,
            app,
        }
    }

    /// Send a request and return the status plus the parsed JSON body.
    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).expect("Body is not JSON");
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    fn stored_posts(&self) -> Value {
        let dataset = JsonFileStore::new(&self.db_path).load().unwrap();
        serde_json::to_value(dataset.posts).unwrap()
    }
}

#[tokio::test]
async fn test_list_users_redacts_passwords_by_default() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/users").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": 200,
            "data": [
                { "id": 1, "name": "John" },
                { "id": 2, "name": "Alice" }
            ]
        })
    );
}

#[tokio::test]
async fn test_list_users_vulnerable_exposes_passwords() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/users?vulnerability=true").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"][0]["password"], "super_secret_password_from_john");
    assert_eq!(body["data"][1]["password"], "super_secret_password_from_alice");
}

#[tokio::test]
async fn test_list_users_other_flag_values_are_safe() {
    let app = TestApp::new();

    for uri in ["/api/users?vulnerability=false", "/api/users?vulnerability=yes"] {
        let (_, body) = app.get(uri).await;
        for user in body["data"].as_array().unwrap() {
            assert!(user.get("password").is_none(), "password leaked for {}", uri);
        }
    }
}

#[tokio::test]
async fn test_list_posts_matches_store() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/posts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"], app.stored_posts());
    assert_eq!(body["data"][0]["title"], "Web app security");
    assert_eq!(body["data"][1]["title"], "OWASP Top 10");

    // No writes in between, so a second read is identical
    let (_, again) = app.get("/api/posts").await;
    assert_eq!(body, again);
}

#[tokio::test]
async fn test_create_post_sanitizes_by_default() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/posts",
            json!({ "title": "T", "text": "<script>alert(1)</script>" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["post"]["id"], 3);
    assert_eq!(body["post"]["title"], "T");
    let text = body["post"]["text"].as_str().unwrap();
    assert!(!text.contains("<script"));
    assert!(text.contains("alert(1)"));

    let (_, listed) = app.get("/api/posts").await;
    assert_eq!(listed["data"][2], body["post"]);
}

#[tokio::test]
async fn test_create_post_vulnerable_stores_raw_input() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/posts?vulnerability=true",
            json!({ "title": "T", "text": "<script>alert(1)</script>" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["post"]["id"], 3);
    assert_eq!(body["post"]["text"], "<script>alert(1)</script>");
    assert_eq!(app.stored_posts()[2]["text"], "<script>alert(1)</script>");
}

#[tokio::test]
async fn test_create_post_invalid_input() {
    let app = TestApp::new();
    let before = app.stored_posts();

    for payload in [
        json!({ "title": "", "text": "text" }),
        json!({ "title": "title" }),
        json!({}),
        json!({ "title": 5, "text": "text" }),
    ] {
        let (status, body) = app.post_json("/api/posts", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "status": 400, "error": "Invalid input." }));
    }

    assert_eq!(app.stored_posts(), before);
}

#[tokio::test]
async fn test_create_post_without_json_body() {
    let app = TestApp::new();

    let request = Request::post("/api/posts")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("title=T&text=x"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input.");
}

#[tokio::test]
async fn test_corrupt_store_is_server_error() {
    let app = TestApp::new();
    std::fs::write(&app.db_path, "{ not json").unwrap();

    let (status, body) = app.get("/api/posts").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
}

#[tokio::test]
async fn test_cors_allows_only_configured_origin() {
    let app = TestApp::new();
    let origin = HeaderValue::from_static("http://127.0.0.1:3000");
    let cors_app = app.app.clone().layer(cors_layer(origin.clone()));

    let allowed = Request::builder()
        .method(Method::GET)
        .uri("/api/posts")
        .header(header::ORIGIN, origin.clone())
        .body(Body::empty())
        .unwrap();
    let response = cors_app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&origin)
    );

    let denied = Request::builder()
        .method(Method::GET)
        .uri("/api/posts")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = cors_app.oneshot(denied).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
