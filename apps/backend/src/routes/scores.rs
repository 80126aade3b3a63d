use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::extractors::{QueryParams, ValidatedJson};
use crate::repos::scores::{Score, SeaScoreRepo};
use crate::services::scores::{resolve_limit, ScoreService, ScoreSubmission};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct ScoreIn {
    player: Option<String>,
    seed: Option<String>,
    moves: i64,
    seconds: i64,
    won: bool,
}

impl From<ScoreIn> for ScoreSubmission {
    fn from(body: ScoreIn) -> Self {
        Self {
            player: body.player,
            seed: body.seed,
            moves: body.moves,
            seconds: body.seconds,
            won: body.won,
        }
    }
}

#[derive(Debug, Serialize)]
struct Ack {
    ok: bool,
}

#[derive(Debug, Serialize)]
struct ScoreOut {
    player: Option<String>,
    seed: Option<String>,
    moves: i64,
    seconds: i64,
    won: bool,
    created_at: i64,
}

impl From<Score> for ScoreOut {
    fn from(s: Score) -> Self {
        Self {
            player: s.player,
            seed: s.seed,
            moves: s.moves,
            seconds: s.seconds,
            won: s.won,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct Leaderboard {
    scores: Vec<ScoreOut>,
}

fn score_service(state: &AppState) -> Result<ScoreService, AppError> {
    let conn = require_db(state)?.clone();
    Ok(ScoreService::new(
        Arc::new(SeaScoreRepo::new(conn)),
        state.clock(),
    ))
}

/// `POST /api/score`
async fn submit_score(
    state: web::Data<AppState>,
    body: ValidatedJson<ScoreIn>,
) -> Result<HttpResponse, AppError> {
    let service = score_service(&state)?;
    service.record(body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(Ack { ok: true }))
}

/// `GET /api/scores?limit=N`
async fn list_scores(
    state: web::Data<AppState>,
    params: QueryParams,
) -> Result<HttpResponse, AppError> {
    let limit = resolve_limit(params.last("limit")).map_err(|e| match e {
        DomainError::Validation(detail) => AppError::invalid(ErrorCode::InvalidLimit, detail),
        other => AppError::from(other),
    })?;

    let service = score_service(&state)?;
    let scores = service.top_scores(limit).await?;

    Ok(HttpResponse::Ok().json(Leaderboard {
        scores: scores.into_iter().map(ScoreOut::from).collect(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/score", web::post().to(submit_score))
        .route("/scores", web::get().to(list_scores));
}
