use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Open CORS for the browser frontend; the API itself is guarded by bearer
/// tokens, not by origin.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
