//! HTTP-level tests: routes driven through the full middleware stack
//! with a real temporary SQLite database behind them.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use noticeboard_api::context::AppContext;
use noticeboard_api::router;
use noticeboard_domain::config::Config;

fn app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.database.path = dir.path().join("api.db").to_str().unwrap().to_string();
    let ctx = AppContext::new(config).unwrap();
    (dir, router(ctx))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn empty_list_uses_the_success_envelope() {
    let (_dir, app) = app();

    let (status, body) = send(&app, get("/api/notices")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["pagination"]["totalItems"], json!(0));
    assert!(body["requestId"].as_str().unwrap().starts_with("req_"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn listing_pages_through_notices_newest_first() {
    let (_dir, app) = app();
    for i in 1..=3 {
        let (status, _) = send(
            &app,
            post_json("/api/notices", json!({ "title": format!("공지 {i}"), "content": "본문" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, get("/api/notices?page=2&pageSize=2")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], json!("공지 1"));
    assert_eq!(body["data"]["pagination"]["totalItems"], json!(3));
    assert_eq!(body["data"]["pagination"]["totalPages"], json!(2));
    assert_eq!(body["data"]["pagination"]["hasPrevious"], json!(true));
    assert_eq!(body["data"]["pagination"]["hasNext"], json!(false));
}

#[tokio::test]
async fn create_read_delete_round_trip() {
    let (_dir, app) = app();

    let (status, created) = send(
        &app,
        post_json("/api/notices", json!({ "title": "점검 안내", "content": "본문" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["title"], json!("점검 안내"));
    assert_eq!(created["data"]["category"], json!("general"));
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, get(&format!("/api/notices/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["id"], json!(id));

    let (status, deleted) = send(&app, delete(&format!("/api/notices/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"]["deleted"], json!(true));

    let (status, missing) = send(&app, get(&format!("/api/notices/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["error"]["code"], json!("NOT_FOUND"));
    assert_eq!(missing["error"]["message"], json!("데이터를 찾을 수 없습니다"));
}

#[tokio::test]
async fn duplicate_title_answers_409_with_the_fixed_message() {
    let (_dir, app) = app();
    let body = json!({ "title": "중복", "content": "본문" });

    let (status, _) = send(&app, post_json("/api/notices", body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, conflict) = send(&app, post_json("/api/notices", body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["success"], json!(false));
    assert_eq!(conflict["error"]["code"], json!("ALREADY_EXISTS"));
    assert_eq!(conflict["error"]["message"], json!("이미 존재하는 데이터입니다"));
    // Driver text never appears in the caller-facing message.
    assert!(!conflict["error"]["message"].as_str().unwrap().contains("UNIQUE"));
    assert!(conflict["requestId"].as_str().unwrap().starts_with("req_"));
}

#[tokio::test]
async fn missing_required_fields_answer_400_with_the_field_list() {
    let (_dir, app) = app();

    let (status, body) = send(&app, post_json("/api/notices", json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    assert_eq!(body["error"]["details"]["missing"], json!(["title", "content"]));
}

#[tokio::test]
async fn health_endpoints_answer_in_both_modes() {
    let (_dir, app) = app();

    let (status, quick) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quick["data"]["status"], json!("healthy"));

    let (status, detailed) = send(&app, get("/api/health?mode=detailed")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detailed["data"]["checks"]["database"]["status"], json!("healthy"));
    assert_eq!(detailed["data"]["checks"]["uptime"]["status"], json!("healthy"));
    assert!(detailed["data"]["metadata"]["totalResponseTime"].is_number());

    let (status, live) = send(&app, get("/api/health/live")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(live["data"]["alive"], json!(true));

    let (status, ready) = send(&app, get("/api/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ready["data"]["ready"], json!(true));
}

#[tokio::test]
async fn metrics_reflect_observed_requests() {
    let (_dir, app) = app();

    // Generate traffic through the middleware, including one error.
    let _ = send(&app, get("/api/notices")).await;
    let _ = send(&app, get("/api/notices/12345")).await;

    let (status, stats) = send(&app, get("/api/metrics?type=requests&window=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(stats["data"]["stats"]["totalRequests"].as_u64().unwrap() >= 2);
    assert!(stats["data"]["stats"]["errorRate"].as_f64().unwrap() > 0.0);

    let (status, summary) = send(&app, get("/api/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(summary["data"]["requests"]["totalRequests"].as_u64().unwrap() >= 3);
    assert!(summary["data"]["uptime"]["seconds"].is_number());

    let (status, recent) = send(&app, get("/api/metrics?type=recent&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recent["data"]["requests"].as_array().unwrap().len(), 2);

    let (status, bad) = send(&app, get("/api/metrics?type=nonsense")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(bad["error"]["code"], json!("VALIDATION_ERROR"));
    assert_eq!(bad["error"]["details"]["type"], json!("nonsense"));
}

#[tokio::test]
async fn malformed_json_bodies_get_the_error_envelope() {
    let (_dir, app) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/notices")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("INVALID_INPUT"));
    assert_eq!(body["error"]["message"], json!("요청 본문이 올바르지 않습니다"));
    assert!(body["error"]["details"]["reason"].is_string());
    assert!(body["requestId"].as_str().unwrap().starts_with("req_"));
}

#[tokio::test]
async fn non_numeric_path_parameters_get_the_error_envelope() {
    let (_dir, app) = app();

    let (status, body) = send(&app, get("/api/notices/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("INVALID_INPUT"));
    assert_eq!(body["error"]["message"], json!("요청 경로가 올바르지 않습니다"));
}

#[tokio::test]
async fn unparseable_query_parameters_get_the_error_envelope() {
    let (_dir, app) = app();

    let (status, body) = send(&app, get("/api/metrics?type=requests&window=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("INVALID_INPUT"));
    assert_eq!(body["error"]["message"], json!("요청 쿼리가 올바르지 않습니다"));
}

async fn explode() -> &'static str {
    panic!("일부러 실패");
}

#[tokio::test]
async fn handler_panics_become_internal_error_envelopes() {
    use axum::middleware::{from_fn, from_fn_with_state};
    use axum::routing::get as get_route;

    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.database.path = dir.path().join("api.db").to_str().unwrap().to_string();
    let ctx = AppContext::new(config).unwrap();

    // Same layering as the production router, plus a route that panics.
    let app = Router::new()
        .route("/api/boom", get_route(explode))
        .layer(from_fn(noticeboard_api::middleware::catch_panics))
        .layer(from_fn_with_state(ctx, noticeboard_api::middleware::observe_request));

    let (status, body) = send(&app, get("/api/boom")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("INTERNAL_ERROR"));
    // The panic message stays internal outside verbose mode.
    assert_eq!(body["error"]["message"], json!("서버 내부 오류가 발생했습니다"));
    assert!(body["requestId"].as_str().unwrap().starts_with("req_"));
}
