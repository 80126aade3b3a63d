use std::collections::HashSet;

use actix_web::test;
use backend::state::app_state::AppState;
use serde_json::Value;

use crate::common::read_json;
use crate::support::create_test_app;

async fn fetch(uri: &str) -> Value {
    let app = create_test_app(AppState::default()).build().await;
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    read_json(resp).await
}

#[actix_web::test]
async fn seeded_game_is_reproducible_and_echoes_seed() {
    let first = fetch("/api/new-game?seed=abc").await;
    let second = fetch("/api/new-game?seed=abc").await;

    assert_eq!(first["seed"], "abc");
    assert_eq!(first, second);
}

#[actix_web::test]
async fn unseeded_game_has_null_seed() {
    let body = fetch("/api/new-game").await;
    assert!(body["seed"].is_null());
}

#[actix_web::test]
async fn layout_matches_klondike_opening() {
    let body = fetch("/api/new-game?seed=layout").await;
    let state = &body["state"];

    let tableaus = state["tableaus"].as_array().unwrap();
    let sizes: Vec<usize> = tableaus.iter().map(|p| p.as_array().unwrap().len()).collect();
    assert_eq!(sizes, vec![1, 2, 3, 4, 5, 6, 7]);
    for pile in tableaus {
        let pile = pile.as_array().unwrap();
        let (top, rest) = pile.split_last().unwrap();
        assert_eq!(top["faceUp"], true);
        assert!(rest.iter().all(|c| c["faceUp"] == false));
    }

    let stock = state["stock"].as_array().unwrap();
    assert_eq!(stock.len(), 24);
    assert!(stock.iter().all(|c| c["faceUp"] == false));
    assert_eq!(state["waste"].as_array().unwrap().len(), 0);
    for suit in ["S", "H", "D", "C"] {
        assert_eq!(state["foundations"][suit].as_array().unwrap().len(), 0);
    }

    let mut pairs = HashSet::new();
    let mut ids = HashSet::new();
    for card in tableaus.iter().flat_map(|p| p.as_array().unwrap()).chain(stock) {
        pairs.insert((card["suit"].as_str().unwrap().to_string(), card["rank"].as_u64().unwrap()));
        ids.insert(card["id"].as_str().unwrap().to_string());
    }
    assert_eq!(pairs.len(), 52);
    assert_eq!(ids.len(), 52);
}

#[actix_web::test]
async fn empty_and_odd_seeds_are_accepted() {
    let empty = fetch("/api/new-game?seed=").await;
    assert_eq!(empty["seed"], "");

    let odd = fetch("/api/new-game?seed=%F0%9F%83%8F%20%26%3D").await;
    assert_eq!(odd["seed"], "🃏 &=");
    assert_eq!(odd["state"]["stock"].as_array().unwrap().len(), 24);
}

#[actix_web::test]
async fn repeated_seed_uses_the_last_value() {
    let repeated = fetch("/api/new-game?seed=a&seed=b").await;
    let last_only = fetch("/api/new-game?seed=b").await;

    assert_eq!(repeated["seed"], "b");
    assert_eq!(repeated, last_only);
}

#[actix_web::test]
async fn unrelated_params_are_ignored() {
    let body = fetch("/api/new-game?seed=abc&debug=1&debug=2").await;
    assert_eq!(body, fetch("/api/new-game?seed=abc").await);
}
