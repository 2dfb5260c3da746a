use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::polls::domain::{Poll, PollCategory, PollId, PollSubmission};
use crate::workflows::polls::repository::PollRepository;
use crate::workflows::polls::PollService;
use crate::workflows::RepositoryError;

#[derive(Default, Clone)]
pub(super) struct MemoryPolls {
    records: Arc<Mutex<HashMap<PollId, Poll>>>,
}

impl PollRepository for MemoryPolls {
    fn insert(&self, poll: Poll) -> Result<Poll, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
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
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let slot = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let mut poll = slot.clone();
        change(&mut poll)?;
        *slot = poll.clone();
        Ok(poll)
    }

    fn fetch(&self, id: &PollId) -> Result<Option<Poll>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Poll>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn remove(&self, id: &PollId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailablePolls;

impl PollRepository for UnavailablePolls {
    fn insert(&self, _poll: Poll) -> Result<Poll, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn modify<F, E>(&self, _id: &PollId, _change: F) -> Result<Poll, E>
    where
        F: FnOnce(&mut Poll) -> Result<(), E>,
        E: From<RepositoryError>,
    {
        Err(RepositoryError::Unavailable("maintenance window".to_string()).into())
    }

    fn fetch(&self, _id: &PollId) -> Result<Option<Poll>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn all(&self) -> Result<Vec<Poll>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn remove(&self, _id: &PollId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }
}

pub(super) fn submission(title: &str, options: &[&str]) -> PollSubmission {
    PollSubmission {
        title: title.to_string(),
        description: Some("Reunião de moradores".to_string()),
        category: PollCategory::Decision,
        options: options.iter().map(|option| option.to_string()).collect(),
        creator: Some("Síndico".to_string()),
        multiple_choice: false,
        closes_at: None,
    }
}

pub(super) fn build_service() -> (Arc<PollService<MemoryPolls>>, MemoryPolls) {
    let repository = MemoryPolls::default();
    let service = Arc::new(PollService::new(Arc::new(repository.clone())));
    (service, repository)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
