use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::services::auth_gate::GuardDecision;
use crate::AppState;

/// Claims of the session token issued by the identity provider. `sub` is the
/// user id the auth-state cache is keyed by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    MissingAuthorization,
    BadAuthorization,
    UnsupportedScheme,
    InvalidToken,
}

impl TokenRejection {
    pub fn code(&self) -> &'static str {
        match self {
            TokenRejection::MissingAuthorization => "missing_authorization",
            TokenRejection::BadAuthorization => "bad_authorization",
            TokenRejection::UnsupportedScheme => "unsupported_scheme",
            TokenRejection::InvalidToken => "invalid_token",
        }
    }
}

pub fn bearer_claims(headers: &HeaderMap, secret: &str) -> Result<Claims, TokenRejection> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(TokenRejection::MissingAuthorization)?;
    let auth_str = auth_header
        .to_str()
        .map_err(|_| TokenRejection::BadAuthorization)?;
    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or(TokenRejection::UnsupportedScheme)?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| TokenRejection::InvalidToken)
}

/// Lets the request through only when the auth gate proceeds for the token's
/// user. A redirect becomes a 401 that names the login route.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let claims = match bearer_claims(req.headers(), &state.config.jwt_secret) {
        Ok(claims) => Some(claims),
        Err(rejection) => {
            tracing::debug!(reason = rejection.code(), "request without a valid session token");
            None
        }
    };

    let target = req.uri().path().to_string();
    let cancel = state.navigation_token();
    let decision = state
        .auth_gate
        .resolve(&target, claims.as_ref().map(|c| c.sub.as_str()), &cancel)
        .await;

    match (decision, claims) {
        (GuardDecision::Proceed { .. }, Some(claims)) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        (GuardDecision::Redirect { target }, _) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unauthenticated","redirect":target})),
        )
            .into_response(),
        _ => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error":"navigation_aborted"})),
        )
            .into_response(),
    }
}
