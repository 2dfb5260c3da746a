use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::domain::{
    Provider, ProviderId, ProviderSubmission, ProviderUpdate, Ticket, TicketFilter, TicketId,
    TicketSubmission, TicketUpdate,
};
use super::lifecycle::TicketError;
use super::notification::{template_catalogue, NotificationPreview};
use super::repository::{ProviderRepository, TicketRepository};
use super::service::{CreatedTicket, MaintenanceService, MaintenanceServiceError};
use crate::workflows::RepositoryError;

type Shared<T, P> = State<Arc<MaintenanceService<T, P>>>;

/// Router builder exposing ticket and provider endpoints.
pub fn maintenance_router<T, P>(service: Arc<MaintenanceService<T, P>>) -> Router
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    Router::new()
        .route(
            "/api/chamados",
            get(list_tickets::<T, P>).post(create_ticket::<T, P>),
        )
        .route("/api/chamados/templates", get(templates))
        .route(
            "/api/chamados/:ticket_id",
            get(get_ticket::<T, P>).put(update_ticket::<T, P>),
        )
        .route("/api/chamados/:ticket_id/whatsapp", get(preview::<T, P>))
        .route(
            "/api/prestadores",
            get(list_providers::<T, P>).post(create_provider::<T, P>),
        )
        .route(
            "/api/prestadores/:provider_id",
            get(get_provider::<T, P>)
                .put(update_provider::<T, P>)
                .delete(delete_provider::<T, P>),
        )
        .with_state(service)
}

impl IntoResponse for MaintenanceServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            MaintenanceServiceError::Validation(
                TicketError::InvalidTransition { .. } | TicketError::Finalized { .. },
            ) => StatusCode::CONFLICT,
            MaintenanceServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            MaintenanceServiceError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            MaintenanceServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            MaintenanceServiceError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub(crate) async fn templates() -> Json<serde_json::Value> {
    Json(json!({ "templates": template_catalogue() }))
}

pub(crate) async fn list_tickets<T, P>(
    State(service): Shared<T, P>,
    Query(filter): Query<TicketFilter>,
) -> Result<Json<Vec<Ticket>>, MaintenanceServiceError>
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    Ok(Json(service.list_tickets(&filter)?))
}

pub(crate) async fn create_ticket<T, P>(
    State(service): Shared<T, P>,
    Json(submission): Json<TicketSubmission>,
) -> Result<(StatusCode, Json<CreatedTicket>), MaintenanceServiceError>
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    let created = service.create_ticket(submission)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn get_ticket<T, P>(
    State(service): Shared<T, P>,
    Path(ticket_id): Path<String>,
) -> Result<Json<Ticket>, MaintenanceServiceError>
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    Ok(Json(service.get_ticket(&TicketId(ticket_id))?))
}

pub(crate) async fn update_ticket<T, P>(
    State(service): Shared<T, P>,
    Path(ticket_id): Path<String>,
    Json(update): Json<TicketUpdate>,
) -> Result<Json<Ticket>, MaintenanceServiceError>
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    Ok(Json(service.update_ticket(&TicketId(ticket_id), update)?))
}

pub(crate) async fn preview<T, P>(
    State(service): Shared<T, P>,
    Path(ticket_id): Path<String>,
) -> Result<Json<NotificationPreview>, MaintenanceServiceError>
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    Ok(Json(service.preview(&TicketId(ticket_id))?))
}

pub(crate) async fn list_providers<T, P>(
    State(service): Shared<T, P>,
) -> Result<Json<Vec<Provider>>, MaintenanceServiceError>
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    Ok(Json(service.list_providers()?))
}

pub(crate) async fn create_provider<T, P>(
    State(service): Shared<T, P>,
    Json(submission): Json<ProviderSubmission>,
) -> Result<(StatusCode, Json<Provider>), MaintenanceServiceError>
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    let provider = service.create_provider(submission)?;
    Ok((StatusCode::CREATED, Json(provider)))
}

pub(crate) async fn get_provider<T, P>(
    State(service): Shared<T, P>,
    Path(provider_id): Path<String>,
) -> Result<Json<Provider>, MaintenanceServiceError>
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    Ok(Json(service.get_provider(&ProviderId(provider_id))?))
}

pub(crate) async fn update_provider<T, P>(
    State(service): Shared<T, P>,
    Path(provider_id): Path<String>,
    Json(update): Json<ProviderUpdate>,
) -> Result<Json<Provider>, MaintenanceServiceError>
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    Ok(Json(
        service.update_provider(&ProviderId(provider_id), update)?,
    ))
}

pub(crate) async fn delete_provider<T, P>(
    State(service): Shared<T, P>,
    Path(provider_id): Path<String>,
) -> Result<StatusCode, MaintenanceServiceError>
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    service.delete_provider(&ProviderId(provider_id))?;
    Ok(StatusCode::NO_CONTENT)
}
