use actix_web::web;

pub mod games;
pub mod health;
pub mod scores;

/// Register every route. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Detailed health: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Public API: /api/health, /api/new-game, /api/score, /api/scores
    cfg.service(
        web::scope("/api")
            .configure(health::configure_api)
            .configure(games::configure_routes)
            .configure(scores::configure_routes),
    );
}
