use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Room for multipart boundaries, part headers and the text fields on top
/// of the largest accepted file.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// All routes, with request tracing and the configured body limit.
/// CORS is layered on separately by the binary.
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let api = Router::new()
        // Chat assistant
        .route("/chat", post(handlers::chat))
        .route(
            "/chat/history/:session_id",
            get(handlers::chat_history).delete(handlers::clear_chat_history),
        )
        // Intake
        .route("/contact", post(handlers::submit_contact))
        .route("/upload-document", post(handlers::upload_document))
        // Calculator and catalogue
        .route("/calculate-tax", post(handlers::calculate_tax))
        .route("/services", get(handlers::services));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origins.
///
/// `*` (or an empty list) allows any origin without credentials; an
/// explicit list also allows credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<&str> = origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .collect();

    if origins.is_empty() || origins.contains(&"*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::AllowMethods::mirror_request())
        .allow_headers(tower_http::cors::AllowHeaders::mirror_request())
        .allow_credentials(true)
}
