use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    middleware::logging,
    openapi,
    routes::{comments, health, threads},
    state::AppState,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Threads
        .route(
            "/v1/threads",
            get(threads::list_threads).post(threads::create_thread),
        )
        .route(
            "/v1/threads/:thread_id",
            get(threads::get_thread)
                .put(threads::update_thread)
                .patch(threads::update_thread)
                .delete(threads::delete_thread),
        )
        // Comments
        .route(
            "/v1/threads/:thread_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/v1/threads/:thread_id/comments/:comment_id",
            get(comments::get_comment)
                .put(comments::update_comment)
                .patch(comments::update_comment)
                .delete(comments::delete_comment),
        )
        // Health & docs
        .route("/health", get(health::health_check))
        .route("/api/openapi.json", get(openapi::openapi_json));

    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    api_routes
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            let origins: Vec<HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect();
            cors = cors.allow_origin(origins);
        }

        cors
    } else {
        CorsLayer::permissive()
    }
}
