//! Maintenance tickets, the provider registry, and provider notifications.

pub mod domain;
pub mod lifecycle;
pub mod notification;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Provider, ProviderId, ProviderSubmission, ProviderUpdate, Ticket, TicketFilter, TicketId,
    TicketKind, TicketPriority, TicketStatus, TicketSubmission, TicketUpdate,
};
pub use lifecycle::TicketError;
pub use notification::{
    template_catalogue, NotificationComposer, NotificationPreview, TemplateDescriptor,
};
pub use repository::{ProviderRepository, TicketRepository};
pub use router::maintenance_router;
pub use service::{CreatedTicket, MaintenanceService, MaintenanceServiceError};
