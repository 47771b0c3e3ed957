//! Router assembly.
//!
//! Resource routes sit behind bearer authentication. Health probes and the
//! API documentation are public.

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, StatusCode, header},
    middleware,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers::{health, wishes, wishlists};
use crate::api::headers;
use crate::api::middleware::{
    REQUEST_ID_HEADER, auth_middleware, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// Layers run outermost first: request id, logging, timeout, CORS.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (api_routes, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(wishes::wish_routes())
        .merge(wishlists::wishlist_routes())
        .split_for_parts();
    let api_routes = api_routes.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let (health_routes, health_doc) = health::health_routes().split_for_parts();
    let mut openapi = openapi;
    openapi.merge(health_doc);

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(cors_layer())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Browsers may read the alert and paging headers.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            header::LOCATION,
            header::LINK,
            headers::TOTAL_COUNT_HEADER,
            headers::ALERT_HEADER,
            headers::ERROR_HEADER,
            headers::PARAMS_HEADER,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}
