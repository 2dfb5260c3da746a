use chrono::{DateTime, Utc};

use super::domain::{Poll, PollId, PollStatus, PollSubmission};

pub const MIN_OPTIONS: usize = 2;

/// Validation failures raised before a poll is stored or mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollError {
    #[error("poll title is required")]
    MissingTitle,
    #[error("a poll needs at least 2 options (got {found})")]
    NotEnoughOptions { found: usize },
    #[error("poll is closed")]
    Closed,
    #[error("option {index} does not exist (poll has {available} options)")]
    InvalidOption { index: i64, available: usize },
    #[error("voter name is required")]
    MissingVoter,
    #[error("{voter} already voted in this poll")]
    AlreadyVoted { voter: String },
    #[error("{voter} already voted for option {index}")]
    AlreadyVotedOption { voter: String, index: usize },
}

impl Poll {
    /// Builds an open poll from a submission, seeding a zero count per option.
    pub fn open(submission: PollSubmission, now: DateTime<Utc>) -> Result<Poll, PollError> {
        let PollSubmission {
            title,
            description,
            category,
            options,
            creator,
            multiple_choice,
            closes_at,
        } = submission;

        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(PollError::MissingTitle);
        }

        let options: Vec<String> = options
            .into_iter()
            .map(|option| option.trim().to_string())
            .filter(|option| !option.is_empty())
            .collect();
        if options.len() < MIN_OPTIONS {
            return Err(PollError::NotEnoughOptions {
                found: options.len(),
            });
        }

        let votes = (0..options.len()).map(|index| (index, 0)).collect();

        Ok(Poll {
            id: PollId::generate(),
            title,
            description,
            category,
            options,
            votes,
            voters: Default::default(),
            creator,
            status: PollStatus::Open,
            multiple_choice,
            closes_at,
            created_at: now,
            updated_at: now,
        })
    }

    /// Records one selection for `voter`. The poll is untouched when validation fails.
    pub fn cast_vote(
        &mut self,
        option_index: i64,
        voter: &str,
        now: DateTime<Utc>,
    ) -> Result<(), PollError> {
        if !self.is_open() {
            return Err(PollError::Closed);
        }

        let index = usize::try_from(option_index)
            .ok()
            .filter(|index| *index < self.options.len())
            .ok_or(PollError::InvalidOption {
                index: option_index,
                available: self.options.len(),
            })?;

        let voter = voter.trim();
        if voter.is_empty() {
            return Err(PollError::MissingVoter);
        }

        match self.voters.get(voter) {
            Some(_) if !self.multiple_choice => {
                return Err(PollError::AlreadyVoted {
                    voter: voter.to_string(),
                });
            }
            Some(picked) if picked.contains(&index) => {
                return Err(PollError::AlreadyVotedOption {
                    voter: voter.to_string(),
                    index,
                });
            }
            _ => {}
        }

        self.voters.entry(voter.to_string()).or_default().push(index);
        *self.votes.entry(index).or_insert(0) += 1;
        self.updated_at = now;
        Ok(())
    }

    pub fn close(&mut self, now: DateTime<Utc>) {
        self.set_status(PollStatus::Closed, now);
    }

    pub fn reopen(&mut self, now: DateTime<Utc>) {
        self.set_status(PollStatus::Open, now);
    }

    /// Status toggle; counts are left as they are.
    pub fn set_status(&mut self, status: PollStatus, now: DateTime<Utc>) {
        if self.status != status {
            self.status = status;
            self.updated_at = now;
        }
    }
}
