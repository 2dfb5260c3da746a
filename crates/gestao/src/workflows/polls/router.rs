use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{PollFilter, PollId, PollStatusUpdate, PollSubmission, PollView, VoteRequest};
use super::repository::PollRepository;
use super::service::{PollService, PollServiceError};
use super::tally::PollTally;
use crate::workflows::RepositoryError;

/// Router builder exposing the poll endpoints.
pub fn poll_router<R>(service: Arc<PollService<R>>) -> Router
where
    R: PollRepository + 'static,
{
    Router::new()
        .route(
            "/api/enquetes",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/enquetes/:poll_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route("/api/enquetes/:poll_id/votar", post(vote_handler::<R>))
        .route("/api/enquetes/:poll_id/resultado", get(tally_handler::<R>))
        .with_state(service)
}

impl IntoResponse for PollServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            PollServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            PollServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            PollServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            PollServiceError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<PollService<R>>>,
    Query(filter): Query<PollFilter>,
) -> Result<Json<Vec<PollView>>, PollServiceError>
where
    R: PollRepository + 'static,
{
    let polls = service.list(&filter)?;
    Ok(Json(polls.into_iter().map(PollView::from).collect()))
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<PollService<R>>>,
    Json(submission): Json<PollSubmission>,
) -> Result<(StatusCode, Json<PollView>), PollServiceError>
where
    R: PollRepository + 'static,
{
    let poll = service.create(submission)?;
    Ok((StatusCode::CREATED, Json(PollView::from(poll))))
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<PollService<R>>>,
    Path(poll_id): Path<String>,
) -> Result<Json<PollView>, PollServiceError>
where
    R: PollRepository + 'static,
{
    let poll = service.get(&PollId(poll_id))?;
    Ok(Json(PollView::from(poll)))
}

pub(crate) async fn vote_handler<R>(
    State(service): State<Arc<PollService<R>>>,
    Path(poll_id): Path<String>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<PollView>, PollServiceError>
where
    R: PollRepository + 'static,
{
    let poll = service.vote(&PollId(poll_id), request)?;
    Ok(Json(PollView::from(poll)))
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<PollService<R>>>,
    Path(poll_id): Path<String>,
    Json(update): Json<PollStatusUpdate>,
) -> Result<Json<PollView>, PollServiceError>
where
    R: PollRepository + 'static,
{
    let poll = service.update_status(&PollId(poll_id), update)?;
    Ok(Json(PollView::from(poll)))
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<PollService<R>>>,
    Path(poll_id): Path<String>,
) -> Result<StatusCode, PollServiceError>
where
    R: PollRepository + 'static,
{
    service.delete(&PollId(poll_id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn tally_handler<R>(
    State(service): State<Arc<PollService<R>>>,
    Path(poll_id): Path<String>,
) -> Result<Json<PollTally>, PollServiceError>
where
    R: PollRepository + 'static,
{
    Ok(Json(service.tally(&PollId(poll_id))?))
}
