//! HTTP-level integration tests for user registration.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get_auth, post_json, send_raw, test_tokens};
use notes_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_user_and_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(app.clone(), "/users", json!({ "user_name": "  alice  " })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["status"], "Created");
    assert_eq!(json["message"], "Success");
    assert_eq!(json["data"]["user_name"], "alice", "username is trimmed");
    assert!(json["data"]["created_at"].is_string());

    let id = json["data"]["id"].as_i64().unwrap();
    let token = json["data"]["token"].as_str().unwrap();

    let identity = test_tokens().verify(token).expect("issued token verifies");
    assert_eq!(identity.user_id, id);
    assert_eq!(identity.username, "alice");

    let stored = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.username, "alice");

    // The token works against the protected routes straight away.
    let response = get_auth(app, &format!("/users/{id}/notes"), token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_usernames_get_distinct_ids(pool: PgPool) {
    let app = common::build_test_app(pool);

    let (first, _) = common::register(app.clone(), "sam").await;
    let (second, _) = common::register(app, "sam").await;
    assert_ne!(first, second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_username_is_a_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/users", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["status"], "Error");
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "field user_name is a required field");
    assert_eq!(json["errors"], json!(["field user_name is a required field"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn short_username_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/users", json!({ "user_name": "ab" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "field user_name must be between 3 and 64 characters"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_and_empty_bodies(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send_raw(app.clone(), Method::POST, "/users", None, "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_JSON");
    assert_eq!(json["message"], "Invalid JSON format");

    let response = send_raw(app, Method::POST, "/users", None, "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_JSON");
    assert_eq!(json["message"], "Request body cannot be empty");
}
