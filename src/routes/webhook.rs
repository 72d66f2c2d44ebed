use axum::{extract::State, http::StatusCode, Json};
use subtle::ConstantTimeEq;

use crate::{
    dto::webhook_dto::{AuthStateWebhook, AUTH_STATE_CHANGED},
    error::{Error, Result},
    services::auth_state::AuthEvent,
    utils::extract::JsonBody,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/webhook/auth-state",
    request_body = AuthStateWebhook,
    responses(
        (status = 202, description = "Auth state accepted"),
        (status = 400, description = "Unexpected event"),
        (status = 401, description = "Missing or wrong webhook secret")
    )
)]
pub async fn handle_auth_state(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    JsonBody(hook): JsonBody<AuthStateWebhook>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    verify_secret(&headers, &state.config.webhook_secret)?;
    if hook.event != AUTH_STATE_CHANGED {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "unexpected_event" })),
        ));
    }
    if hook.user_id.is_empty() {
        return Err(Error::BadRequest("userId must not be empty".into()));
    }

    tracing::info!(user_id = %hook.user_id, signed_in = hook.signed_in, "auth state webhook");
    let delivered = state.auth_notifier.publish(AuthEvent::from(hook));

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "delivered": delivered > 0 })),
    ))
}

fn verify_secret(headers: &axum::http::HeaderMap, expected: &str) -> Result<()> {
    let Some(secret_hdr) = headers.get("x-webhook-secret") else {
        return Err(Error::Unauthorized("missing_webhook_secret".into()));
    };
    let provided = secret_hdr
        .to_str()
        .map_err(|_| Error::Unauthorized("invalid_secret_header".into()))?;
    if ConstantTimeEq::ct_eq(provided.as_bytes(), expected.as_bytes()).into() {
        Ok(())
    } else {
        Err(Error::Unauthorized("invalid_webhook_secret".into()))
    }
}
