use actix_web::http::header;
use actix_web::test;
use backend::state::app_state::AppState;

use crate::support::create_test_app;

fn preflight(origin: &str) -> actix_http::Request {
    test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/score")
        .insert_header((header::ORIGIN, origin))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
        .to_request()
}

#[actix_web::test]
async fn open_policy_accepts_any_origin() {
    let app = create_test_app(AppState::default()).build().await;

    let resp = test::call_service(&app, preflight("https://anywhere.example")).await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://anywhere.example")
    );
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

#[actix_web::test]
async fn simple_requests_expose_trace_header() {
    let app = create_test_app(AppState::default()).build().await;

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header((header::ORIGIN, "http://localhost:5173"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("x-trace-id"));
    let exposed = resp
        .headers()
        .get(header::ACCESS_CONTROL_EXPOSE_HEADERS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(exposed.contains("x-trace-id"), "exposed headers: {exposed}");
}

#[actix_web::test]
async fn configured_origins_narrow_the_policy() {
    let app = create_test_app(AppState::default())
        .with_cors_origins(&["http://localhost:5173"])
        .build()
        .await;

    let allowed = test::call_service(&app, preflight("http://localhost:5173")).await;
    assert!(allowed.status().is_success());

    let denied = test::call_service(&app, preflight("https://evil.example")).await;
    assert!(denied.status().is_client_error());
    assert!(denied
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
