//! Topic-scoped push notification relay.
//!
//! Bridges register a topic on behalf of a peer (`POST /new`); when the
//! bridge later calls the relay's webhook (`POST /push`), the peer's device
//! receives a localized notification through its push gateway.

pub mod bridge;
pub mod config;
pub mod error;
pub mod handlers;
pub mod i18n;
pub mod keystore;
pub mod push;
pub mod types;
pub mod validate;

use std::sync::Arc;

use axum::http::header::{
    HeaderName, HeaderValue, STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS,
    X_DNS_PREFETCH_CONTROL, X_FRAME_OPTIONS, X_XSS_PROTECTION,
};
use axum::middleware;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;

pub use handlers::RelayState;

async fn security_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));
    headers.insert(X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("off"));
    headers.insert(
        HeaderName::from_static("x-download-options"),
        HeaderValue::from_static("noopen"),
    );
    headers.insert(X_XSS_PROTECTION, HeaderValue::from_static("0"));
    headers.insert(
        STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=15552000; includeSubDomains"),
    );
    response
}

/// Build the HTTP router with the given relay state.
pub fn build_router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/new", post(handlers::register))
        .route("/push", post(handlers::push))
        .layer(middleware::map_response(security_headers))
        .with_state(state)
}
