pub mod docs;
pub mod health;
pub mod interview;
pub mod navigation;
pub mod webhook;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth::require_session, cors::cors_layer, rate_limit};
use crate::AppState;

pub fn router(state: AppState) -> Router {
    let base_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(docs::openapi));

    let public_api = Router::new()
        .route("/api/navigation/check", get(navigation::check_navigation))
        .route("/api/navigation/menu", get(navigation::menu))
        .route("/api/navigation/routes", get(navigation::list_routes))
        .route("/api/interviews/empty", get(interview::empty_interview))
        .route("/api/webhook/auth-state", post(webhook::handle_auth_state));

    let interview_api = Router::new()
        .route(
            "/api/interviews",
            get(interview::list_interviews).post(interview::create_interview),
        )
        .route(
            "/api/interviews/:id",
            get(interview::get_interview)
                .put(interview::update_interview)
                .delete(interview::delete_interview),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let api = public_api
        .merge(interview_api)
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(state.config.api_rps, &state.config.jwt_secret),
            rate_limit::rps_middleware,
        ));

    let cors = cors_layer(state.config.cors_origin.as_deref());

    base_routes
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
