use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::middleware::auth::bearer_claims;

const WINDOW: Duration = Duration::from_secs(1);
const ANONYMOUS: &str = "anonymous";

#[derive(Debug)]
struct WindowState {
    start: Instant,
    count: u32,
}

#[derive(Debug)]
struct Windows {
    by_client: HashMap<String, WindowState>,
    last_sweep: Instant,
}

/// Fixed one-second window per client. Clients are told apart by the user id
/// of a valid session token; requests without one share a single bucket.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    rps: u32,
    jwt_secret: Arc<str>,
    windows: Arc<Mutex<Windows>>,
}

impl RateLimiter {
    pub fn new(rps: u32, jwt_secret: &str) -> Self {
        Self {
            rps: rps.max(1),
            jwt_secret: Arc::from(jwt_secret),
            windows: Arc::new(Mutex::new(Windows {
                by_client: HashMap::new(),
                last_sweep: Instant::now(),
            })),
        }
    }

    fn client_key(&self, headers: &HeaderMap) -> String {
        match bearer_claims(headers, &self.jwt_secret) {
            Ok(claims) => format!("user:{}", claims.sub),
            Err(_) => ANONYMOUS.to_string(),
        }
    }

    fn allow(&self, client: &str) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        let now = Instant::now();
        if now.duration_since(windows.last_sweep) >= WINDOW {
            windows
                .by_client
                .retain(|_, w| now.duration_since(w.start) < WINDOW);
            windows.last_sweep = now;
        }
        let window = windows
            .by_client
            .entry(client.to_string())
            .or_insert(WindowState {
                start: now,
                count: 0,
            });
        if now.duration_since(window.start) >= WINDOW {
            window.start = now;
            window.count = 0;
        }
        if window.count < self.rps {
            window.count += 1;
            true
        } else {
            false
        }
    }
}

pub async fn rps_middleware(
    State(limiter): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let client = limiter.client_key(req.headers());
    if !limiter.allow(&client) {
        tracing::debug!(client = %client, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error":"rate_limit_exceeded"})),
        )
            .into_response();
    }
    next.run(req).await
}
