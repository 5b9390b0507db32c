use crate::docs::openapi_json;
use crate::logging::logging_middleware;
use crate::modules::permissions::router::init_permissions_router;
use crate::modules::role_forms::router::init_role_forms_router;
use crate::modules::roles::router::init_roles_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest(
            "/api",
            Router::new()
                .nest("/permissions", init_permissions_router())
                .nest("/roles", init_roles_router())
                .nest("/role-forms", init_role_forms_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
        })
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
