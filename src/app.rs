use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::state::AppState;

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route(
            "/health",
            get(public::health_get).fallback(public::method_not_allowed),
        )
        .merge(drink_routes())
        .fallback(public::fallback);

    // Global middleware
    if let Some(cors) = cors_layer(config) {
        router = router.layer(cors);
    }
    if config.server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn drink_routes() -> Router<AppState> {
    Router::new()
        // Summary list is public, creation requires post:drinks
        .route(
            "/drinks",
            get(public::drinks_get)
                .post(protected::drinks_post)
                .fallback(public::method_not_allowed),
        )
        .route(
            "/drinks-detail",
            get(protected::drinks_detail_get).fallback(public::method_not_allowed),
        )
        .route(
            "/drinks/:id",
            patch(protected::drink_patch)
                .delete(protected::drink_delete)
                .fallback(public::method_not_allowed),
        )
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    let security = &config.security;
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true),
    )
}
