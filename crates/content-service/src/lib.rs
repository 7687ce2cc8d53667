//! content-service: users and posts over HTTP with a per-request trust toggle.
//!
//! The same endpoints serve a hardened path (passwords withheld, post input
//! sanitized) and a deliberately vulnerable one (full records, raw input
//! echoed back), selected by `?vulnerability=true`. Intended for
//! demonstrating stored XSS and information disclosure.

pub mod api;
pub mod config;
pub mod model;
pub mod sanitize;
pub mod seed;
pub mod store;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::ContentStore;

/// Shared application state
pub struct AppState {
    pub store: Box<dyn ContentStore>,
}

impl AppState {
    pub fn new(store: impl ContentStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }
}

/// CORS policy admitting a single origin
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/users", get(api::users::handler))
        .route(
            "/api/posts",
            get(api::posts::list_handler).post(api::posts::create_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
