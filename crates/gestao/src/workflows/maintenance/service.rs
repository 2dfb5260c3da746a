use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    Provider, ProviderId, ProviderSubmission, ProviderUpdate, Ticket, TicketFilter, TicketId,
    TicketStatus, TicketSubmission, TicketUpdate,
};
use super::lifecycle::TicketError;
use super::notification::{NotificationComposer, NotificationPreview};
use super::repository::{ProviderRepository, TicketRepository};
use crate::config::MessagingConfig;
use crate::workflows::fields::normalize_text;
use crate::workflows::RepositoryError;

/// Newly opened ticket plus the provider notification the caller should
/// offer to the user.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<NotificationPreview>,
}

/// Service composing the ticket lifecycle, the provider registry, and the
/// notification composer.
pub struct MaintenanceService<T, P> {
    tickets: Arc<T>,
    providers: Arc<P>,
    composer: NotificationComposer,
}

impl<T, P> MaintenanceService<T, P>
where
    T: TicketRepository + 'static,
    P: ProviderRepository + 'static,
{
    pub fn new(tickets: Arc<T>, providers: Arc<P>, messaging: MessagingConfig) -> Self {
        Self {
            tickets,
            providers,
            composer: NotificationComposer::new(messaging),
        }
    }

    pub fn composer(&self) -> &NotificationComposer {
        &self.composer
    }

    /// Open a ticket. When the linked provider has a phone the notification
    /// text is stored on the ticket and returned as a preview.
    pub fn create_ticket(
        &self,
        submission: TicketSubmission,
    ) -> Result<CreatedTicket, MaintenanceServiceError> {
        let TicketSubmission {
            structure,
            area,
            description,
            priority,
            kind,
            provider_id,
            requester,
        } = submission;

        let structure = structure.trim().to_string();
        if structure.is_empty() {
            return Err(TicketError::MissingStructure.into());
        }
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(TicketError::MissingDescription.into());
        }

        let provider = match &provider_id {
            Some(id) => {
                let found = self.providers.fetch(id)?;
                if found.is_none() {
                    warn!(provider_id = %id, "ticket references unknown provider");
                }
                found
            }
            None => None,
        };

        let now = Utc::now();
        let draft = Ticket {
            id: TicketId::generate(),
            number: 0,
            structure,
            area,
            description,
            priority,
            kind,
            provider_id,
            provider_name: provider.as_ref().map(|p| p.name.clone()),
            provider_phone: provider.as_ref().map(|p| p.phone.clone()),
            requester,
            message: None,
            status: TicketStatus::Open,
            resolution: None,
            created_at: now,
            updated_at: now,
        };

        let mut preview = None;
        let ticket = self.tickets.insert(draft, |ticket| {
            let Some(provider) = &provider else {
                return;
            };
            match self.composer.preview(ticket, provider, now.date_naive()) {
                Ok(composed) => {
                    ticket.message = Some(composed.message.clone());
                    preview = Some(composed);
                }
                Err(err) => {
                    warn!(provider_id = %provider.id, error = %err, "provider cannot be notified");
                }
            }
        })?;
        info!(
            ticket_id = %ticket.id,
            number = ticket.number,
            kind = ticket.kind.key(),
            notify = preview.is_some(),
            "ticket opened"
        );
        Ok(CreatedTicket { ticket, preview })
    }

    /// Tickets matching `filter`, newest first.
    pub fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, MaintenanceServiceError> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .all()?
            .into_iter()
            .filter(|ticket| filter.matches(ticket))
            .collect();
        tickets.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.number.cmp(&a.number))
        });
        Ok(tickets)
    }

    pub fn get_ticket(&self, id: &TicketId) -> Result<Ticket, MaintenanceServiceError> {
        let ticket = self.tickets.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(ticket)
    }

    /// Generic update: status goes through the lifecycle, resolution and
    /// priority are plain field writes while the ticket is still active.
    pub fn update_ticket(
        &self,
        id: &TicketId,
        mut update: TicketUpdate,
    ) -> Result<Ticket, MaintenanceServiceError> {
        update.resolution = normalize_text(update.resolution);
        let mut ticket = self.get_ticket(id)?;
        let previous = ticket.status;
        ticket.amend(update, Utc::now())?;

        self.tickets.update(ticket.clone())?;
        if previous != ticket.status {
            info!(ticket_id = %id, from = %previous, to = %ticket.status, "ticket status changed");
        }
        Ok(ticket)
    }

    pub fn start_ticket(&self, id: &TicketId) -> Result<Ticket, MaintenanceServiceError> {
        let mut ticket = self.get_ticket(id)?;
        ticket.start(Utc::now())?;
        self.tickets.update(ticket.clone())?;
        info!(ticket_id = %id, "ticket started");
        Ok(ticket)
    }

    pub fn resolve_ticket(
        &self,
        id: &TicketId,
        resolution: Option<String>,
    ) -> Result<Ticket, MaintenanceServiceError> {
        let mut ticket = self.get_ticket(id)?;
        ticket.resolve(normalize_text(resolution), Utc::now())?;
        self.tickets.update(ticket.clone())?;
        info!(ticket_id = %id, "ticket resolved");
        Ok(ticket)
    }

    pub fn preview(&self, id: &TicketId) -> Result<NotificationPreview, MaintenanceServiceError> {
        let ticket = self.get_ticket(id)?;
        Ok(self.composer.preview_for_ticket(&ticket)?)
    }

    /// Providers ordered by name.
    pub fn list_providers(&self) -> Result<Vec<Provider>, MaintenanceServiceError> {
        let mut providers = self.providers.all()?;
        providers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(providers)
    }

    pub fn get_provider(&self, id: &ProviderId) -> Result<Provider, MaintenanceServiceError> {
        let provider = self
            .providers
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(provider)
    }

    pub fn create_provider(
        &self,
        submission: ProviderSubmission,
    ) -> Result<Provider, MaintenanceServiceError> {
        let ProviderSubmission {
            name,
            phone,
            specialty,
            company,
            notes,
            active,
        } = submission;

        let provider = Provider {
            id: ProviderId::generate(),
            name: required(name, TicketError::MissingProviderName)?,
            phone: required(phone, TicketError::MissingProviderPhone)?,
            specialty,
            company,
            notes,
            active,
            created_at: Utc::now(),
        };

        let provider = self.providers.insert(provider)?;
        info!(provider_id = %provider.id, "provider registered");
        Ok(provider)
    }

    pub fn update_provider(
        &self,
        id: &ProviderId,
        update: ProviderUpdate,
    ) -> Result<Provider, MaintenanceServiceError> {
        let mut provider = self.get_provider(id)?;
        let ProviderUpdate {
            name,
            phone,
            specialty,
            company,
            notes,
            active,
        } = update;

        if let Some(name) = name {
            provider.name = required(name, TicketError::MissingProviderName)?;
        }
        if let Some(phone) = phone {
            provider.phone = required(phone, TicketError::MissingProviderPhone)?;
        }
        if specialty.is_some() {
            provider.specialty = normalize_text(specialty);
        }
        if company.is_some() {
            provider.company = normalize_text(company);
        }
        if notes.is_some() {
            provider.notes = normalize_text(notes);
        }
        if let Some(active) = active {
            provider.active = active;
        }

        self.providers.update(provider.clone())?;
        info!(provider_id = %id, "provider updated");
        Ok(provider)
    }

    pub fn delete_provider(&self, id: &ProviderId) -> Result<(), MaintenanceServiceError> {
        self.providers.remove(id)?;
        info!(provider_id = %id, "provider removed");
        Ok(())
    }
}

fn required(value: String, missing: TicketError) -> Result<String, TicketError> {
    normalize_text(Some(value)).ok_or(missing)
}

/// Error raised by the maintenance service.
#[derive(Debug, thiserror::Error)]
pub enum MaintenanceServiceError {
    #[error(transparent)]
    Validation(#[from] TicketError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
