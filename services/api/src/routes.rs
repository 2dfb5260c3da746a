use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use gestao::workflows::maintenance::{
    maintenance_router, MaintenanceService, ProviderRepository, TicketRepository,
};
use gestao::workflows::polls::{poll_router, PollRepository, PollService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_service_routes<R, T, P>(
    polls: Arc<PollService<R>>,
    maintenance: Arc<MaintenanceService<T, P>>,
) -> Router
where
    R: PollRepository + 'static,
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    poll_router(polls)
        .merge(maintenance_router(maintenance))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    if ready {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
