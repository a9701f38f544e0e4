// src/routes/mod.rs
pub mod relay;

use std::{any::Any, path::Path};

use crate::{error::AppError, state::SharedState};
use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use relay::relay_handler;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub const BANNER: &str = "YOU ARE CONNECTED ";

/// The complete service the `chat-relay` binary serves: routes, state and
/// permissive CORS so the widget can post from the site's origin.
pub fn app(relay_path: &str, static_dir: Option<&Path>, state: SharedState) -> Router {
    create_router(relay_path, static_dir)
        .with_state(state)
        .layer(CorsLayer::very_permissive())
}

pub fn create_router(relay_path: &str, static_dir: Option<&Path>) -> Router<SharedState> {
    let router = Router::new()
        .route(relay_path, post(relay_handler))
        .route("/health", get(|| async { "OK" }));

    // With a site directory its index.html owns `/`.
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.route("/", get(|| async { BANNER })),
    };

    with_service_layers(router)
}

/// Panic recovery and request tracing shared by every route.
pub fn with_service_layers(router: Router<SharedState>) -> Router<SharedState> {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// A panicking handler becomes a bare 500 instead of a dropped connection.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(detail).into_response()
}
