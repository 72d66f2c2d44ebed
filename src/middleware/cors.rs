use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Restricts CORS to the front end's origin when one is configured and falls
/// back to a permissive policy otherwise.
pub fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(origin) => layer.allow_origin(origin),
        None => {
            if let Some(raw) = origin {
                tracing::warn!(origin = raw, "invalid CORS origin, allowing any");
            }
            layer.allow_origin(Any)
        }
    }
}
