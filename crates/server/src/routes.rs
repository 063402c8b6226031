use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::customers::{self, ServerState};

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router.
///
/// `/customers/all` is registered alongside `/customers/:id`; the static
/// segment takes priority in axum's matcher.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/customers", post(customers::create).get(customers::lookup))
        .route("/customers/all", get(customers::get_all))
        .route(
            "/customers/:id",
            get(customers::get_by_id)
                .put(customers::update)
                .delete(customers::remove),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
