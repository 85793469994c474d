pub mod handlers;
pub mod models;
pub mod openapi;

use axum::Router;
use http::{Method, header};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use handlers::SharedService;

/// Full application router: `/api/*`, the OpenAPI document and Swagger UI,
/// wrapped in compression, timeout, CORS and request tracing.
pub fn router(service: SharedService, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api", handlers::api_routes(service))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}
