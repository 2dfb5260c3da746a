//! Workflows backing the community management screens.

pub(crate) mod fields;
pub mod maintenance;
pub mod polls;
mod store;

pub use store::RepositoryError;
