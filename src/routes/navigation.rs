use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Json},
};

use crate::{
    error::Result,
    middleware::auth::bearer_claims,
    models::{
        menu::{menu_items, MenuItem},
        route::{RouteDef, ROUTES},
    },
    services::auth_gate::Navigation,
    services::auth_state::AuthState,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/navigation/check",
    params(
        ("to" = String, Query, description = "Requested page"),
        ("from" = Option<String>, Query, description = "Current page")
    ),
    responses(
        (status = 200, description = "Guard decision: proceed, redirect or aborted"),
        (status = 404, description = "Unknown page")
    )
)]
#[axum::debug_handler]
pub async fn check_navigation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(navigation): Query<Navigation>,
) -> Result<impl IntoResponse> {
    let claims = bearer_claims(&headers, &state.config.jwt_secret).ok();
    let cancel = state.navigation_token();
    let decision = state
        .auth_gate
        .check(&navigation, claims.as_ref().map(|c| c.sub.as_str()), &cancel)
        .await?;
    Ok(Json(decision))
}

#[utoipa::path(
    get,
    path = "/api/navigation/menu",
    responses(
        (status = 200, description = "Menu entries for the caller", body = [MenuItem])
    )
)]
#[axum::debug_handler]
pub async fn menu(State(state): State<AppState>, headers: HeaderMap) -> Json<Vec<MenuItem>> {
    let signed_in = bearer_claims(&headers, &state.config.jwt_secret)
        .map(|claims| state.auth_cache.current(&claims.sub) == AuthState::SignedIn)
        .unwrap_or(false);
    Json(menu_items(signed_in, state.auth_gate.login_path()))
}

#[axum::debug_handler]
pub async fn list_routes() -> Json<&'static [RouteDef]> {
    Json(ROUTES)
}
