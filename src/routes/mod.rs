//! Router assembly and the middleware stack shared by every route.

mod common;
mod rotation;

pub use common::common_routes;
pub use rotation::rotation_routes;

use crate::config::ServerConfig;
use crate::state::AppState;
use axum::Router;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: all routes, body limit, request tracing, and CORS when enabled.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(rotation_routes(state))
        .layer(RequestBodyLimitLayer::new(config.body_limit))
        .layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }
    router
}
