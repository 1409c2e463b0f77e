//! # API REST
//!
//! REST API for the ICL status board.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON envelopes, CORS, request tracing)
//!
//! Uses `api-shared` for the response envelopes and `iclboard-core` for the listing itself.

#![warn(rust_2018_idioms)]

use axum::{extract::State, response::Json, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{CounterRes, HealthRes, HealthService, ListingRes, ResponseStatus};
use iclboard_core::ListingService;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    listing_service: Arc<ListingService>,
}

impl AppState {
    pub fn new(listing_service: ListingService) -> Self {
        Self {
            listing_service: Arc::new(listing_service),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, get_icl_listing),
    components(schemas(HealthRes, ListingRes, CounterRes, ResponseStatus))
)]
pub struct ApiDoc;

/// Build the board's router.
///
/// CORS is permissive because the board page is served from a different origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/display/geticllisting", get(get_icl_listing))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks. Does not touch the feed or the store.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/display/geticllisting",
    responses(
        (status = 200, description = "Reconciled listing, or a failure envelope with status \"failed\"", body = ListingRes)
    )
)]
/// Today's reconciled cath lab listing with status counters
///
/// Always answers `200 OK`. Failures are reported in the body only, with a fixed message; the
/// error itself is logged with its origin.
#[axum::debug_handler]
async fn get_icl_listing(State(state): State<AppState>) -> Json<ListingRes> {
    match state.listing_service.listing().await {
        Ok(reconciliation) => Json(ListingRes::success(reconciliation)),
        Err(e) => {
            tracing::error!(origin = e.origin(), error = %e, "ICL listing failed");
            Json(ListingRes::failed())
        }
    }
}
