use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::QueryParams;
use crate::services::games::new_game;

/// `GET /api/new-game?seed=...`
///
/// A repeated `seed` resolves to its last value.
async fn create_game(params: QueryParams) -> Result<HttpResponse, AppError> {
    let game = new_game(params.last("seed"));
    Ok(HttpResponse::Ok().json(game))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/new-game", web::get().to(create_game));
}
