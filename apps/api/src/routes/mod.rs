pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::state::AppState;
use crate::strategy::handlers as strategy_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API: upload, classify, assess
        .route(
            "/api/v1/sessions/upload",
            post(analysis_handlers::handle_upload),
        )
        .route(
            "/api/v1/sessions/:id",
            get(analysis_handlers::handle_get_session),
        )
        // Strategy API: SME input and bundle generation
        .route(
            "/api/v1/sessions/:id/sme-responses",
            post(strategy_handlers::handle_sme_responses),
        )
        .route(
            "/api/v1/sessions/:id/strategies",
            post(strategy_handlers::handle_generate_strategies)
                .get(strategy_handlers::handle_get_strategies),
        )
        .with_state(state)
}
