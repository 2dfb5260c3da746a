use super::domain::{Poll, PollId};
use crate::workflows::RepositoryError;

/// Storage abstraction so the poll service can be exercised in isolation.
pub trait PollRepository: Send + Sync {
    fn insert(&self, poll: Poll) -> Result<Poll, RepositoryError>;
    /// Applies `change` to the stored poll and persists the result as one
    /// atomic step. A failing `change` leaves the stored poll untouched.
    fn modify<F, E>(&self, id: &PollId, change: F) -> Result<Poll, E>
    where
        F: FnOnce(&mut Poll) -> Result<(), E>,
        E: From<RepositoryError>;
    fn fetch(&self, id: &PollId) -> Result<Option<Poll>, RepositoryError>;
    /// Every stored poll, in no particular order.
    fn all(&self) -> Result<Vec<Poll>, RepositoryError>;
    fn remove(&self, id: &PollId) -> Result<(), RepositoryError>;
}
