use actix_web::test;
use backend::state::app_state::AppState;
use serde_json::json;

use crate::common::read_json;
use crate::support::{create_test_app, memory_state};

#[actix_web::test]
async fn api_health_is_ok_without_a_store() {
    let app = create_test_app(AppState::default()).build().await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-trace-id"));
    assert_eq!(read_json(resp).await, json!({"ok": true}));
}

#[actix_web::test]
async fn detailed_health_reports_schema_version() {
    let app = create_test_app(memory_state().await).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = read_json(test::call_service(&app, req).await).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20251016_000001_scores");
    assert!(body.get("db_error").is_none());
    assert!(body["time"].as_str().is_some_and(|t| t.ends_with('Z')));
}

#[actix_web::test]
async fn detailed_health_flags_missing_store() {
    let app = create_test_app(AppState::default()).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body = read_json(resp).await;
    assert_eq!(body["db"], "error");
    assert_eq!(body["migrations"], "unknown");
    assert!(body["db_error"].is_string());
}
