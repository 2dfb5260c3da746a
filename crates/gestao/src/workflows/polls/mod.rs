//! Community polls: ballot rules, tallies, and the HTTP surface.

pub mod ballot;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod tally;

#[cfg(test)]
mod tests;

pub use ballot::PollError;
pub use domain::{
    Poll, PollCategory, PollFilter, PollId, PollStatus, PollStatusUpdate, PollSubmission,
    PollView, VoteRequest,
};
pub use repository::PollRepository;
pub use router::poll_router;
pub use service::{PollService, PollServiceError};
pub use tally::{percentage, winner, OptionTally, PollTally};
