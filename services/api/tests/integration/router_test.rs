use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION};
use axum_test::{TestResponse, TestServer};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use foodgram_api::router::build_router;
use foodgram_api::state::AppState;
use foodgram_core::middleware::REQUEST_ID_HEADER;
use foodgram_testing::auth::MockAuth;

// Requests below are rejected or answered before any query runs, so the
// router is built over a connection that was never opened.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        token_secret: MockAuth::secret(),
        token_ttl_secs: 3600,
        shopping_list_filename: Arc::from("shopping_list.txt"),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn token_header(user_id: i32) -> HeaderValue {
    HeaderValue::from_str(&MockAuth::new(user_id).authorization()).unwrap()
}

// ── probes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_liveness_probe() {
    let response = server().get("/healthz").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let response = server().get("/readyz").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_echo_incoming_request_id() {
    let response = server()
        .get("/healthz")
        .add_header(
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(response.header(REQUEST_ID_HEADER), "req-123");
}

// ── authentication ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_protected_routes_without_token() {
    let server = server();

    server
        .get("/api/users/me/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/users/subscriptions/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/recipes/download_shopping_cart/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/api/recipes/1/favorite/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete("/api/recipes/1/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_malformed_token_even_on_public_routes() {
    let response = server()
        .get("/api/recipes/")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Token not-a-jwt"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_logout_with_valid_token() {
    let response = server()
        .post("/api/auth/token/logout/")
        .add_header(AUTHORIZATION, token_header(7))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);
}

// ── request bodies ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_malformed_json_as_non_field_error() {
    let response = server()
        .post("/api/auth/token/login/")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert!(body["errors"]["non_field_errors"].is_array());
}

#[tokio::test]
async fn should_list_every_missing_recipe_field() {
    let response = server()
        .post("/api/recipes/")
        .add_header(AUTHORIZATION, token_header(7))
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    for field in ["name", "image", "text", "cooking_time", "tags", "ingredients"] {
        assert!(
            body["errors"][field].is_array(),
            "missing error for {field}: {body}"
        );
    }
}

// ── query and path parameters ────────────────────────────────────────────────

fn assert_json_bad_request(response: TestResponse) {
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert!(
        body["errors"]["non_field_errors"].is_array(),
        "unexpected body: {body}"
    );
}

#[tokio::test]
async fn should_report_bad_query_value_as_json() {
    let response = server().get("/api/recipes/?author=abc").await;
    assert_json_bad_request(response);
}

#[tokio::test]
async fn should_report_negative_recipes_limit_as_json() {
    let response = server()
        .get("/api/users/subscriptions/?recipes_limit=-1")
        .add_header(AUTHORIZATION, token_header(7))
        .await;
    assert_json_bad_request(response);
}

#[tokio::test]
async fn should_report_non_numeric_path_id_as_json() {
    let response = server().get("/api/recipes/pancakes/").await;
    assert_json_bad_request(response);
}
