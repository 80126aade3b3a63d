#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;
use solitaire_test_support::problem_details::{
    assert_problem_details_from_parts, ProblemDetailsLike,
};

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    solitaire_test_support::logging::init();
}

/// Read a response body as JSON, panicking with the raw body on failure.
pub async fn read_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!(
            "response body is not JSON: {}",
            String::from_utf8_lossy(&body)
        )
    })
}

/// Assert a problem+json error and return its parsed body.
pub async fn assert_problem<B: MessageBody>(
    resp: ServiceResponse<B>,
    expected_status: u16,
    expected_code: &str,
    detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;

    let problem = assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        actix_web::http::StatusCode::from_u16(expected_status).expect("valid status"),
        detail_contains,
    );
    assert!(
        problem.type_.starts_with("https://solitaire.local/errors/"),
        "unexpected problem type {}",
        problem.type_
    );
    problem
}
