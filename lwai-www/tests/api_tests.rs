//! Integration tests for the lwai-www HTTP API
//!
//! Drives `build_router` with `oneshot` against an in-memory store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use lwai_common::db::open_memory_database;
use lwai_common::StorageConfig;
use lwai_www::content::fallback_snapshot;
use lwai_www::store::SqliteSectionStore;
use lwai_www::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method

const PASSWORD: &str = "correct horse";

/// Test helper: empty store and a router with admin login enabled
async fn setup_app() -> (Router, Arc<SqliteSectionStore>) {
    let pool = open_memory_database().await.expect("Should open database");
    let store = Arc::new(SqliteSectionStore::new(pool));
    let storage = StorageConfig::with_public_base("https://cdn.test/storage/v1/object/public", "www-images");
    let state = AppState::new(store.clone(), storage, Some(PASSWORD.to_string()));
    (build_router(state), store)
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Log in and return the `name=value` pair to send back as a Cookie header
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/auth",
            json!({ "password": PASSWORD }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Login should set a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn post_row(app: &Router, cookie: &str, section: &str, body: Value) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/admin/{}", section),
            body,
            Some(cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    body["id"].as_str().unwrap().to_string()
}

fn hero_body(title: &str) -> Value {
    json!({
        "title": title,
        "subtitle": "Sub",
        "cta_primary_text": "Go",
        "cta_primary_link": "#go",
        "cta_secondary_text": "More",
        "cta_secondary_link": "#more",
        "hero_image": "hero.png"
    })
}

// =============================================================================
// Health and build info
// =============================================================================

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let (app, _) = setup_app().await;

    let response = app.oneshot(request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "lwai-www");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let (app, _) = setup_app().await;

    let response = app.oneshot(request("GET", "/api/buildinfo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["version"].is_string());
    assert!(body["git_hash"].is_string());
}

// =============================================================================
// Content endpoint
// =============================================================================

#[tokio::test]
async fn test_content_empty_store_serves_fallback() {
    let (app, _) = setup_app().await;

    let response = app.oneshot(request("GET", "/api/content")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-content-source"], "fallback");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

    let body = extract_json(response.into_body()).await;
    for key in [
        "hero",
        "problem",
        "meet",
        "features",
        "howItWorks",
        "science",
        "personas",
        "cta",
        "techStack",
        "faq",
        "footer",
    ] {
        assert!(body.get(key).is_some(), "missing key {}", key);
    }

    // Placeholder images are root-relative, so resolution leaves them as-is
    let expected = serde_json::to_value(fallback_snapshot()).unwrap();
    assert_eq!(body, expected);
}

#[tokio::test]
async fn test_content_scenario_hero_without_faq() {
    let (app, _) = setup_app().await;
    let cookie = login(&app).await;

    let hero_id = post_row(&app, &cookie, "hero", hero_body("Real hero")).await;
    for order in [2, 0, 1] {
        post_row(
            &app,
            &cookie,
            "features",
            json!({
                "icon": "*",
                "title": format!("Feature {}", order),
                "description": "d",
                "sort_order": order
            }),
        )
        .await;
    }
    post_row(
        &app,
        &cookie,
        "faq",
        json!({ "question": "Hidden?", "answer": "Yes", "is_active": false }),
    )
    .await;

    let response = app.oneshot(request("GET", "/api/content")).await.unwrap();
    assert_eq!(response.headers()["x-content-source"], "store");
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["hero"]["id"], hero_id.as_str());
    assert_eq!(body["hero"]["title"], "Real hero");
    assert_eq!(body["faq"], json!([]));
    assert_eq!(body["problem"], Value::Null);

    let orders: Vec<i64> = body["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["sort_order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_content_resolves_image_urls() {
    let (app, _) = setup_app().await;
    let cookie = login(&app).await;

    post_row(&app, &cookie, "hero", hero_body("Hero")).await;
    post_row(
        &app,
        &cookie,
        "personas",
        json!({ "text": "Absolute", "image": "http://x/y.png", "sort_order": 0 }),
    )
    .await;
    post_row(
        &app,
        &cookie,
        "personas",
        json!({ "text": "Static", "image": "/logo.png", "sort_order": 1 }),
    )
    .await;
    post_row(
        &app,
        &cookie,
        "personas",
        json!({ "text": "Blank", "image": "", "sort_order": 2 }),
    )
    .await;

    let response = app.oneshot(request("GET", "/api/content")).await.unwrap();
    let body = extract_json(response.into_body()).await;

    assert_eq!(
        body["hero"]["hero_image"],
        "https://cdn.test/storage/v1/object/public/www-images/hero.png"
    );
    let images: Vec<&str> = body["personas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["image"].as_str().unwrap())
        .collect();
    assert_eq!(images, vec!["http://x/y.png", "/logo.png", ""]);
}

// =============================================================================
// Admin authentication
// =============================================================================

#[tokio::test]
async fn test_admin_requires_session() {
    let (app, _) = setup_app().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/admin/faq"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());

    let forged = Request::builder()
        .method("GET")
        .uri("/api/admin/faq")
        .header(header::COOKIE, "admin-session=forged")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(forged).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (app, _) = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/auth",
            json!({ "password": "wrong" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Invalid password");
}

#[tokio::test]
async fn test_login_cookie_attributes() {
    let (app, _) = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/auth",
            json!({ "password": PASSWORD }),
            None,
        ))
        .await
        .unwrap();
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();

    assert!(cookie.starts_with("admin-session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(cookie.contains("Path=/"));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (app, _) = setup_app().await;

    let response = app.oneshot(request("DELETE", "/api/admin/auth")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("admin-session=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_admin_disabled_without_password() {
    let pool = open_memory_database().await.unwrap();
    let store = Arc::new(SqliteSectionStore::new(pool));
    let state = AppState::new(store, StorageConfig::new("http://localhost", "www-images"), None);
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/auth",
            json!({ "password": "" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.oneshot(request("GET", "/api/admin/hero")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Admin CRUD
// =============================================================================

#[tokio::test]
async fn test_singleton_post_updates_active_row() {
    let (app, _) = setup_app().await;
    let cookie = login(&app).await;

    let first = post_row(&app, &cookie, "hero", hero_body("One")).await;
    let second = post_row(&app, &cookie, "hero", hero_body("Two")).await;
    assert_eq!(first, second);

    let response = app
        .oneshot(json_request("GET", "/api/admin/hero", Value::Null, Some(&cookie)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], first.as_str());
    assert_eq!(body["title"], "Two");
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn test_collection_crud() {
    let (app, _) = setup_app().await;
    let cookie = login(&app).await;

    let id = post_row(
        &app,
        &cookie,
        "faq",
        json!({ "question": "Q1", "answer": "A1" }),
    )
    .await;
    post_row(
        &app,
        &cookie,
        "faq",
        json!({ "id": id, "question": "Q1", "answer": "Edited", "is_active": false }),
    )
    .await;

    // Admin listing includes inactive rows
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/admin/faq", Value::Null, Some(&cookie)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["answer"], "Edited");
    assert_eq!(rows[0]["is_active"], false);

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            "/api/admin/faq",
            json!({ "id": id }),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "DELETE",
            "/api/admin/faq",
            json!({ "id": id }),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_unknown_section() {
    let (app, _) = setup_app().await;
    let cookie = login(&app).await;

    let response = app
        .oneshot(json_request("GET", "/api/admin/pricing", Value::Null, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_rejects_mismatched_fields() {
    let (app, _) = setup_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/faq",
            json!({ "question": "No answer" }),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid request"));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/faq",
            json!({ "id": "missing", "question": "Q", "answer": "A" }),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_settings_editable_but_not_in_content() {
    let (app, _) = setup_app().await;
    let cookie = login(&app).await;

    post_row(
        &app,
        &cookie,
        "settings",
        json!({
            "site_title": "LearnWhat.ai",
            "site_description": "Flashcards",
            "site_url": "https://learnwhat.ai"
        }),
    )
    .await;

    let response = app.oneshot(request("GET", "/api/content")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body.get("settings").is_none());
}

// =============================================================================
// Malformed input
// =============================================================================

fn raw_request(method: &str, uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn assert_json_bad_request(app: &Router, request: Request<Body>) {
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn test_admin_post_unparsable_body_is_json_400() {
    let (app, _) = setup_app().await;
    let cookie = login(&app).await;

    assert_json_bad_request(
        &app,
        raw_request("POST", "/api/admin/faq", "{not json", Some(&cookie)),
    )
    .await;
}

#[tokio::test]
async fn test_admin_delete_without_id_is_json_400() {
    let (app, _) = setup_app().await;
    let cookie = login(&app).await;

    assert_json_bad_request(
        &app,
        json_request("DELETE", "/api/admin/faq", json!({}), Some(&cookie)),
    )
    .await;
}

#[tokio::test]
async fn test_login_without_password_field_is_json_400() {
    let (app, _) = setup_app().await;

    assert_json_bad_request(
        &app,
        json_request("POST", "/api/admin/auth", json!({ "pw": 1 }), None),
    )
    .await;
}

#[tokio::test]
async fn test_content_skips_unparsable_row_only() {
    let (app, store) = setup_app().await;
    let cookie = login(&app).await;

    post_row(&app, &cookie, "hero", hero_body("Hero")).await;
    let good = post_row(
        &app,
        &cookie,
        "faq",
        json!({ "question": "Q", "answer": "A", "sort_order": 0 }),
    )
    .await;
    sqlx::query(
        "INSERT INTO www_faq (id, data, sort_order, is_active, created_at, updated_at)
         VALUES ('bad', 'not json', 1, 1, '2025-01-01T00:00:00+00:00', '2025-01-01T00:00:00+00:00')",
    )
    .execute(store.pool())
    .await
    .unwrap();

    let response = app.oneshot(request("GET", "/api/content")).await.unwrap();
    let body = extract_json(response.into_body()).await;

    let faq = body["faq"].as_array().unwrap();
    assert_eq!(faq.len(), 1);
    assert_eq!(faq[0]["id"], good.as_str());
}
