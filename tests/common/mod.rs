#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use interview_tracker::{
    config::Config,
    middleware::auth::Claims,
    routes,
    services::{auth_state::AuthState, interview_store::MemoryInterviewStore},
    AppState,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value as JsonValue};
use tokio_util::sync::CancellationToken;

pub const JWT_SECRET: &str = "test_secret_key";
pub const WEBHOOK_SECRET: &str = "whsec_test";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub shutdown: CancellationToken,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

pub fn test_config(auth_gate_timeout_secs: u64) -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        database_url: None,
        jwt_secret: JWT_SECRET.to_string(),
        webhook_secret: WEBHOOK_SECRET.to_string(),
        api_rps: 1000,
        auth_gate_timeout_secs,
        login_path: "/auth".to_string(),
        cors_origin: None,
    }
}

pub fn setup_app(auth_gate_timeout_secs: u64) -> TestApp {
    setup_app_with(test_config(auth_gate_timeout_secs))
}

pub fn setup_app_with(config: Config) -> TestApp {
    let state = AppState::new(config, Arc::new(MemoryInterviewStore::new()));
    let shutdown = state.shutdown.clone();
    state.start_auth_subscription();
    TestApp {
        app: routes::router(state.clone()),
        state,
        shutdown,
    }
}

pub fn token_for(user_id: &str) -> String {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        email: Some(format!("{}@example.com", user_id)),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("encode token")
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<JsonValue>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(resp: Response<Body>) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return JsonValue::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

pub fn auth_hook(user_id: &str, signed_in: bool) -> JsonValue {
    json!({
        "event": "auth_state_changed",
        "userId": user_id,
        "signedIn": signed_in,
    })
}

/// Waits until the subscription task has applied the expected state.
pub async fn wait_for_state(state: &AppState, user_id: &str, expected: AuthState) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while state.auth_cache.current(user_id) != expected {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("auth state was not applied");
}

/// Waits until a navigation for `user_id` is parked in the auth-state cache.
pub async fn wait_for_waiter(state: &AppState, user_id: &str) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while state.auth_cache.waiting(user_id) == 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("navigation never started waiting");
}

/// Posts an auth-state webhook and waits for it to reach the cache.
pub async fn report(test: &TestApp, user_id: &str, signed_in: bool) {
    use tower::ServiceExt;

    let req = Request::builder()
        .method("POST")
        .uri("/api/webhook/auth-state")
        .header("content-type", "application/json")
        .header("x-webhook-secret", WEBHOOK_SECRET)
        .body(Body::from(auth_hook(user_id, signed_in).to_string()))
        .unwrap();
    let resp = test.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), axum::http::StatusCode::ACCEPTED);

    let expected = if signed_in {
        AuthState::SignedIn
    } else {
        AuthState::SignedOut
    };
    wait_for_state(&test.state, user_id, expected).await;
}
