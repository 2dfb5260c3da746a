//! Community management service core: poll tallying, maintenance ticket
//! workflow, and the provider registry tickets notify.

pub mod config;
pub mod error;
pub mod presentation;
pub mod telemetry;
pub mod workflows;
