use super::domain::{Provider, ProviderId, Ticket, TicketId};
use crate::workflows::RepositoryError;

/// Ticket storage.
pub trait TicketRepository: Send + Sync {
    /// Stores a new ticket numbered one past the highest number issued so far.
    /// `prepare` sees the numbered ticket before it is stored; numbering and
    /// storing form one atomic step. A duplicate id is a
    /// [`RepositoryError::Conflict`].
    fn insert<F>(&self, ticket: Ticket, prepare: F) -> Result<Ticket, RepositoryError>
    where
        F: FnOnce(&mut Ticket);
    fn update(&self, ticket: Ticket) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &TicketId) -> Result<Option<Ticket>, RepositoryError>;
    fn all(&self) -> Result<Vec<Ticket>, RepositoryError>;
}

/// Provider registry storage.
pub trait ProviderRepository: Send + Sync {
    fn insert(&self, provider: Provider) -> Result<Provider, RepositoryError>;
    fn update(&self, provider: Provider) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ProviderId) -> Result<Option<Provider>, RepositoryError>;
    fn all(&self) -> Result<Vec<Provider>, RepositoryError>;
    fn remove(&self, id: &ProviderId) -> Result<(), RepositoryError>;
}
