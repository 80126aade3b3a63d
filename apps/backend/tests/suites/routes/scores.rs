use std::sync::Arc;

use actix_web::test;
use backend::state::app_state::AppState;
use backend::utils::clock::FixedClock;
use serde_json::{json, Value};

use crate::common::{assert_problem, read_json};
use crate::support::test_state::EPOCH;
use crate::support::{create_test_app, memory_state, memory_state_at};

fn post_score(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/score")
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn submit_then_list_round_trips_fields() {
    let clock = Arc::new(FixedClock::at(EPOCH));
    let app = create_test_app(memory_state_at(clock).await).build().await;

    let resp = test::call_service(
        &app,
        post_score(json!({"player": "Ada", "seed": "abc", "moves": 87, "seconds": 240, "won": true})),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(read_json(resp).await, json!({"ok": true}));

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(
        body,
        json!({"scores": [{
            "player": "Ada",
            "seed": "abc",
            "moves": 87,
            "seconds": 240,
            "won": true,
            "created_at": EPOCH
        }]})
    );
}

#[actix_web::test]
async fn optional_fields_may_be_omitted_or_null() {
    let app = create_test_app(memory_state().await).build().await;

    for body in [
        json!({"moves": 5, "seconds": 9, "won": false}),
        json!({"player": null, "seed": null, "moves": 5, "seconds": 9, "won": false}),
    ] {
        let resp = test::call_service(&app, post_score(body)).await;
        assert_eq!(resp.status().as_u16(), 200);
    }

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let scores = body["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 2);
    assert!(scores.iter().all(|s| s["player"].is_null() && s["seed"].is_null()));
}

#[actix_web::test]
async fn client_timestamp_is_ignored() {
    let clock = Arc::new(FixedClock::at(EPOCH));
    let app = create_test_app(memory_state_at(clock).await).build().await;

    let resp = test::call_service(
        &app,
        post_score(json!({"moves": 1, "seconds": 1, "won": true, "created_at": 5})),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["scores"][0]["created_at"], EPOCH);
}

#[actix_web::test]
async fn malformed_bodies_are_rejected_before_storage() {
    let app = create_test_app(memory_state().await).build().await;

    let missing = test::call_service(&app, post_score(json!({"moves": 3, "seconds": 4}))).await;
    assert_problem(missing, 400, "BAD_REQUEST", Some("missing field `won`")).await;

    let mistyped = test::call_service(
        &app,
        post_score(json!({"moves": "three", "seconds": 4, "won": true})),
    )
    .await;
    assert_problem(mistyped, 400, "BAD_REQUEST", Some("invalid type")).await;

    let req = test::TestRequest::post()
        .uri("/api/score")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"moves\": 1,")
        .to_request();
    let truncated = test::call_service(&app, req).await;
    assert_problem(truncated, 400, "BAD_REQUEST", Some("unexpected end of input")).await;

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["scores"], json!([]));
}

#[actix_web::test]
async fn leaderboard_ranks_winners_then_speed_then_moves() {
    let clock = Arc::new(FixedClock::at(EPOCH));
    let app = create_test_app(memory_state_at(clock.clone()).await)
        .build()
        .await;

    // A: won, 100s, 50 moves. B: won, 90s, 60 moves. C: lost, 10s, 5 moves.
    for (player, seconds, moves, won) in [("A", 100, 50, true), ("B", 90, 60, true), ("C", 10, 5, false)] {
        let resp = test::call_service(
            &app,
            post_score(json!({"player": player, "moves": moves, "seconds": seconds, "won": won})),
        )
        .await;
        assert_eq!(resp.status().as_u16(), 200);
        clock.advance(1);
    }

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let order: Vec<&str> = body["scores"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["player"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["B", "A", "C"]);
}

#[actix_web::test]
async fn identical_results_rank_by_submission_time() {
    let clock = Arc::new(FixedClock::at(EPOCH));
    let app = create_test_app(memory_state_at(clock.clone()).await)
        .build()
        .await;

    // "first" lands at EPOCH + 10, "second" at EPOCH; second ranks first.
    clock.set(EPOCH + 10);
    test::call_service(&app, post_score(json!({"player": "first", "moves": 7, "seconds": 7, "won": true}))).await;
    clock.set(EPOCH);
    test::call_service(&app, post_score(json!({"player": "second", "moves": 7, "seconds": 7, "won": true}))).await;

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["scores"][0]["player"], "second");
    assert_eq!(body["scores"][0]["created_at"], EPOCH);
    assert_eq!(body["scores"][1]["player"], "first");
}

#[actix_web::test]
async fn leaderboard_defaults_to_ten_and_honours_limit() {
    let app = create_test_app(memory_state().await).build().await;

    for i in 0..15 {
        let resp = test::call_service(
            &app,
            post_score(json!({"moves": i, "seconds": 100 + i, "won": true})),
        )
        .await;
        assert_eq!(resp.status().as_u16(), 200);
    }

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let scores = body["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 10);
    assert_eq!(scores[0]["seconds"], 100);
    assert_eq!(scores[9]["seconds"], 109);

    let req = test::TestRequest::get().uri("/api/scores?limit=3").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["scores"].as_array().unwrap().len(), 3);

    let req = test::TestRequest::get().uri("/api/scores?limit=100").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["scores"].as_array().unwrap().len(), 15);
}

#[actix_web::test]
async fn out_of_range_limit_is_invalid() {
    let app = create_test_app(memory_state().await).build().await;

    for uri in ["/api/scores?limit=0", "/api/scores?limit=101", "/api/scores?limit=abc"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, 400, "INVALID_LIMIT", Some("between 1 and 100")).await;
    }
}

#[actix_web::test]
async fn missing_store_is_service_unavailable() {
    let app = create_test_app(AppState::default()).build().await;

    let resp = test::call_service(
        &app,
        post_score(json!({"moves": 1, "seconds": 1, "won": true})),
    )
    .await;
    assert_problem(resp, 503, "DB_UNAVAILABLE", None).await;

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 503, "DB_UNAVAILABLE", None).await;
}

#[actix_web::test]
async fn repeated_limit_uses_the_last_value() {
    let app = create_test_app(memory_state().await).build().await;

    for i in 0..4 {
        let resp = test::call_service(
            &app,
            post_score(json!({"moves": i, "seconds": i, "won": false})),
        )
        .await;
        assert_eq!(resp.status().as_u16(), 200);
    }

    let req = test::TestRequest::get().uri("/api/scores?limit=1&limit=3").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["scores"].as_array().unwrap().len(), 3);

    let req = test::TestRequest::get().uri("/api/scores?limit=3&limit=0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 400, "INVALID_LIMIT", None).await;
}

#[actix_web::test]
async fn long_player_names_are_stored_verbatim() {
    let app = create_test_app(memory_state().await).build().await;
    let player = "ß".repeat(20_000);

    let resp = test::call_service(
        &app,
        post_score(json!({"player": player, "moves": 1, "seconds": 2, "won": true})),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["scores"][0]["player"], player);
}

#[actix_web::test]
async fn oversized_bodies_are_rejected() {
    let app = create_test_app(memory_state().await).build().await;
    let player = "x".repeat(2 * 1024 * 1024);

    let resp = test::call_service(
        &app,
        post_score(json!({"player": player, "moves": 1, "seconds": 2, "won": true})),
    )
    .await;
    assert_problem(resp, 400, "BAD_REQUEST", Some("exceeds")).await;

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["scores"], json!([]));
}
