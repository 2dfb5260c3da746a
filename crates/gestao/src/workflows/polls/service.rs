use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::ballot::PollError;
use super::domain::{
    Poll, PollFilter, PollId, PollStatus, PollStatusUpdate, PollSubmission, VoteRequest,
};
use super::repository::PollRepository;
use super::tally::PollTally;
use crate::workflows::RepositoryError;

/// Service composing the ballot rules with a poll repository.
pub struct PollService<R> {
    repository: Arc<R>,
}

impl<R> PollService<R>
where
    R: PollRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn create(&self, submission: PollSubmission) -> Result<Poll, PollServiceError> {
        let poll = Poll::open(submission, Utc::now())?;
        let stored = self.repository.insert(poll)?;
        info!(
            poll_id = %stored.id,
            options = stored.options.len(),
            multiple_choice = stored.multiple_choice,
            "poll opened"
        );
        Ok(stored)
    }

    /// Polls matching `filter`, newest first.
    pub fn list(&self, filter: &PollFilter) -> Result<Vec<Poll>, PollServiceError> {
        let mut polls: Vec<Poll> = self
            .repository
            .all()?
            .into_iter()
            .filter(|poll| filter.matches(poll))
            .collect();
        polls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(polls)
    }

    pub fn get(&self, id: &PollId) -> Result<Poll, PollServiceError> {
        let poll = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(poll)
    }

    /// Cast a ballot entry. Validation and the count update run inside one
    /// repository write.
    pub fn vote(&self, id: &PollId, request: VoteRequest) -> Result<Poll, PollServiceError> {
        let now = Utc::now();
        let poll = self
            .repository
            .modify(id, |poll| {
                poll.cast_vote(request.option_index, &request.voter, now)
                    .map_err(PollServiceError::from)
            })
            .map_err(|err| {
                debug!(poll_id = %id, error = %err, "vote rejected");
                err
            })?;
        info!(
            poll_id = %id,
            option = request.option_index,
            total = poll.total_votes(),
            "vote recorded"
        );
        Ok(poll)
    }

    /// Apply a status change; an empty update returns the poll as stored.
    pub fn update_status(
        &self,
        id: &PollId,
        update: PollStatusUpdate,
    ) -> Result<Poll, PollServiceError> {
        let Some(status) = update.status else {
            return self.get(id);
        };
        let now = Utc::now();
        let poll = self.repository.modify(id, |poll| {
            poll.set_status(status, now);
            Ok::<(), PollServiceError>(())
        })?;
        info!(poll_id = %id, status = status.key(), "poll status changed");
        Ok(poll)
    }

    pub fn close(&self, id: &PollId) -> Result<Poll, PollServiceError> {
        self.update_status(
            id,
            PollStatusUpdate {
                status: Some(PollStatus::Closed),
            },
        )
    }

    pub fn reopen(&self, id: &PollId) -> Result<Poll, PollServiceError> {
        self.update_status(
            id,
            PollStatusUpdate {
                status: Some(PollStatus::Open),
            },
        )
    }

    pub fn delete(&self, id: &PollId) -> Result<(), PollServiceError> {
        self.repository.remove(id)?;
        info!(poll_id = %id, "poll deleted");
        Ok(())
    }

    pub fn tally(&self, id: &PollId) -> Result<PollTally, PollServiceError> {
        Ok(self.get(id)?.tally())
    }
}

/// Error raised by the poll service.
#[derive(Debug, thiserror::Error)]
pub enum PollServiceError {
    #[error(transparent)]
    Validation(#[from] PollError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
