use gestao::workflows::maintenance::{
    Provider, ProviderId, ProviderRepository, Ticket, TicketId, TicketRepository,
};
use gestao::workflows::polls::{Poll, PollId, PollRepository};
use gestao::workflows::RepositoryError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPollRepository {
    records: Arc<Mutex<HashMap<PollId, Poll>>>,
}

impl PollRepository for InMemoryPollRepository {
    fn insert(&self, poll: Poll) -> Result<Poll, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&poll.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(poll.id.clone(), poll.clone());
        Ok(poll)
    }

    fn modify<F, E>(&self, id: &PollId, change: F) -> Result<Poll, E>
    where
        F: FnOnce(&mut Poll) -> Result<(), E>,
        E: From<RepositoryError>,
    {
        let mut guard = lock(&self.records)?;
        let slot = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let mut poll = slot.clone();
        change(&mut poll)?;
        *slot = poll.clone();
        Ok(poll)
    }

    fn fetch(&self, id: &PollId) -> Result<Option<Poll>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Poll>, RepositoryError> {
        Ok(lock(&self.records)?.values().cloned().collect())
    }

    fn remove(&self, id: &PollId) -> Result<(), RepositoryError> {
        lock(&self.records)?
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTicketRepository {
    records: Arc<Mutex<HashMap<TicketId, Ticket>>>,
}

impl TicketRepository for InMemoryTicketRepository {
    fn insert<F>(&self, mut ticket: Ticket, prepare: F) -> Result<Ticket, RepositoryError>
    where
        F: FnOnce(&mut Ticket),
    {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&ticket.id) {
            return Err(RepositoryError::Conflict);
        }
        ticket.number = guard
            .values()
            .map(|stored| stored.number)
            .max()
            .unwrap_or(0)
            + 1;
        prepare(&mut ticket);
        guard.insert(ticket.id.clone(), ticket.clone());
        Ok(ticket)
    }

    fn update(&self, ticket: Ticket) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&ticket.id) {
            guard.insert(ticket.id.clone(), ticket);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &TicketId) -> Result<Option<Ticket>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Ticket>, RepositoryError> {
        Ok(lock(&self.records)?.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProviderRepository {
    records: Arc<Mutex<HashMap<ProviderId, Provider>>>,
}

impl ProviderRepository for InMemoryProviderRepository {
    fn insert(&self, provider: Provider) -> Result<Provider, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&provider.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(provider.id.clone(), provider.clone());
        Ok(provider)
    }

    fn update(&self, provider: Provider) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&provider.id) {
            guard.insert(provider.id.clone(), provider);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ProviderId) -> Result<Option<Provider>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Provider>, RepositoryError> {
        Ok(lock(&self.records)?.values().cloned().collect())
    }

    fn remove(&self, id: &ProviderId) -> Result<(), RepositoryError> {
        lock(&self.records)?
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
