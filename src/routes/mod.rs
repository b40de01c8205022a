//! Route tables and the top-level application router.

mod common;
mod product;

pub use common::common_routes;
pub use product::product_routes;

use crate::config::ServerConfig;
use crate::docs::openapi_json;
use crate::error::{AppError, ConfigError};
use crate::handlers::api_info;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

pub const PRODUCTS_BASE_PATH: &str = "/api/products";

/// Full application: products under [`PRODUCTS_BASE_PATH`], `/api` info, OpenAPI document,
/// and health/readiness at the root.
pub fn app(state: AppState, config: &ServerConfig) -> Result<Router, AppError> {
    let mut router = Router::new()
        .merge(common_routes(state.clone()))
        .route("/api", get(api_info))
        .route("/docs/openapi.json", get(openapi_json))
        .nest(PRODUCTS_BASE_PATH, product_routes(state, config.body_limit_bytes))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes));

    if let Some(origin) = &config.cors_origin {
        let origin = HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
            key: "CORS_ORIGIN",
            value: origin.clone(),
        })?;
        router = router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    Ok(router.layer(TraceLayer::new_for_http()))
}
