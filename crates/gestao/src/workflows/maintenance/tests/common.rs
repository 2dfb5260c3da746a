use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::config::MessagingConfig;
use crate::workflows::maintenance::domain::{
    Provider, ProviderId, ProviderSubmission, Ticket, TicketId, TicketKind, TicketPriority,
    TicketSubmission,
};
use crate::workflows::maintenance::repository::{ProviderRepository, TicketRepository};
use crate::workflows::maintenance::MaintenanceService;
use crate::workflows::RepositoryError;

#[derive(Default, Clone)]
pub(super) struct MemoryTickets {
    records: Arc<Mutex<HashMap<TicketId, Ticket>>>,
}

impl TicketRepository for MemoryTickets {
    fn insert<F>(&self, mut ticket: Ticket, prepare: F) -> Result<Ticket, RepositoryError>
    where
        F: FnOnce(&mut Ticket),
    {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&ticket.id) {
            return Err(RepositoryError::Conflict);
        }
        ticket.number = guard.values().map(|stored| stored.number).max().unwrap_or(0) + 1;
        prepare(&mut ticket);
        guard.insert(ticket.id.clone(), ticket.clone());
        Ok(ticket)
    }

    fn update(&self, ticket: Ticket) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&ticket.id) {
            Some(slot) => {
                *slot = ticket;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &TicketId) -> Result<Option<Ticket>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Ticket>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryProviders {
    records: Arc<Mutex<HashMap<ProviderId, Provider>>>,
}

impl ProviderRepository for MemoryProviders {
    fn insert(&self, provider: Provider) -> Result<Provider, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&provider.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(provider.id.clone(), provider.clone());
        Ok(provider)
    }

    fn update(&self, provider: Provider) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&provider.id) {
            Some(slot) => {
                *slot = provider;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ProviderId) -> Result<Option<Provider>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Provider>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn remove(&self, id: &ProviderId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

pub(super) type TestService = MaintenanceService<MemoryTickets, MemoryProviders>;

pub(super) fn build_service() -> (Arc<TestService>, MemoryTickets, MemoryProviders) {
    let tickets = MemoryTickets::default();
    let providers = MemoryProviders::default();
    let service = Arc::new(MaintenanceService::new(
        Arc::new(tickets.clone()),
        Arc::new(providers.clone()),
        MessagingConfig::default(),
    ));
    (service, tickets, providers)
}

pub(super) fn plumber() -> ProviderSubmission {
    ProviderSubmission {
        name: "Joana Encanadora".to_string(),
        phone: "(21) 99888-7766".to_string(),
        specialty: Some("Hidráulica".to_string()),
        company: None,
        notes: None,
        active: true,
    }
}

pub(super) fn leak_ticket(provider_id: Option<ProviderId>) -> TicketSubmission {
    TicketSubmission {
        structure: "Caixa d'água".to_string(),
        area: Some("Hidráulica".to_string()),
        description: "Vazamento na boia".to_string(),
        priority: TicketPriority::High,
        kind: TicketKind::Corrective,
        provider_id,
        requester: Some("Zelador".to_string()),
    }
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
