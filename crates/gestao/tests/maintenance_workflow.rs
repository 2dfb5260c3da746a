//! Maintenance ticket scenarios: provider registry, notification previews, and
//! the ticket lifecycle exercised through the public facade.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use gestao::config::MessagingConfig;
    use gestao::workflows::maintenance::{
        MaintenanceService, Provider, ProviderId, ProviderRepository, ProviderSubmission, Ticket,
        TicketId, TicketKind, TicketPriority, TicketRepository, TicketSubmission,
    };
    use gestao::workflows::RepositoryError;

    #[derive(Default, Clone)]
    pub(super) struct MemoryTickets {
        records: Arc<Mutex<HashMap<TicketId, Ticket>>>,
    }

    impl TicketRepository for MemoryTickets {
        fn insert<F>(&self, mut ticket: Ticket, prepare: F) -> Result<Ticket, RepositoryError>
        where
            F: FnOnce(&mut Ticket),
        {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&ticket.id) {
                return Err(RepositoryError::Conflict);
            }
            ticket.number = guard.values().map(|stored| stored.number).max().unwrap_or(0) + 1;
            prepare(&mut ticket);
            guard.insert(ticket.id.clone(), ticket.clone());
            Ok(ticket)
        }

        fn update(&self, ticket: Ticket) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(ticket.id.clone(), ticket);
            Ok(())
        }

        fn fetch(&self, id: &TicketId) -> Result<Option<Ticket>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn all(&self) -> Result<Vec<Ticket>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.values().cloned().collect())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryProviders {
        records: Arc<Mutex<HashMap<ProviderId, Provider>>>,
    }

    impl ProviderRepository for MemoryProviders {
        fn insert(&self, provider: Provider) -> Result<Provider, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(provider.id.clone(), provider.clone());
            Ok(provider)
        }

        fn update(&self, provider: Provider) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(provider.id.clone(), provider);
            Ok(())
        }

        fn fetch(&self, id: &ProviderId) -> Result<Option<Provider>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn all(&self) -> Result<Vec<Provider>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.values().cloned().collect())
        }

        fn remove(&self, id: &ProviderId) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
        }
    }

    pub(super) type Service = MaintenanceService<MemoryTickets, MemoryProviders>;

    pub(super) fn build_service() -> Arc<Service> {
        let messaging = MessagingConfig {
            community_name: "Residencial Ipê".to_string(),
            country_code: "55".to_string(),
        };
        Arc::new(MaintenanceService::new(
            Arc::new(MemoryTickets::default()),
            Arc::new(MemoryProviders::default()),
            messaging,
        ))
    }

    pub(super) fn gardener() -> ProviderSubmission {
        ProviderSubmission {
            name: "Paulo Jardins".to_string(),
            phone: "11 91234-5678".to_string(),
            specialty: Some("Paisagismo".to_string()),
            company: None,
            notes: None,
            active: true,
        }
    }

    pub(super) fn ticket(kind: TicketKind, provider_id: Option<ProviderId>) -> TicketSubmission {
        TicketSubmission {
            structure: "Jardim da entrada".to_string(),
            area: Some("Portaria".to_string()),
            description: "Poda das palmeiras".to_string(),
            priority: TicketPriority::Low,
            kind,
            provider_id,
            requester: Some("Zeladoria".to_string()),
        }
    }
}

mod notifications {
    use super::common::*;
    use gestao::workflows::maintenance::{MaintenanceServiceError, TicketError, TicketKind};

    #[test]
    fn linked_provider_receives_stored_preview() {
        let service = build_service();
        let provider = service.create_provider(gardener()).expect("provider");
        let created = service
            .create_ticket(ticket(TicketKind::Preventive, Some(provider.id.clone())))
            .expect("ticket opened");

        let preview = created.preview.expect("preview offered");
        assert!(preview.whatsapp_url.starts_with("https://wa.me/5511912345678?text="));
        assert!(preview.message.contains("Paulo Jardins"));
        assert!(preview.message.contains("Residencial Ipê"));
        assert!(preview.message.contains("*Jardim da entrada*"));
        assert!(preview.message.contains("Chamado #001"));
        assert_eq!(created.ticket.message.as_deref(), Some(preview.message.as_str()));
        assert_eq!(created.ticket.provider_name.as_deref(), Some("Paulo Jardins"));

        let again = service.preview(&created.ticket.id).expect("preview again");
        assert_eq!(again.message, preview.message);
    }

    #[test]
    fn ticket_without_provider_cannot_be_previewed() {
        let service = build_service();
        let created = service
            .create_ticket(ticket(TicketKind::Corrective, None))
            .expect("ticket opened");
        assert!(created.preview.is_none());

        assert!(matches!(
            service.preview(&created.ticket.id),
            Err(MaintenanceServiceError::Validation(TicketError::NoProviderPhone))
        ));
    }

    #[test]
    fn provider_snapshot_survives_registry_changes() {
        let service = build_service();
        let provider = service.create_provider(gardener()).expect("provider");
        let created = service
            .create_ticket(ticket(TicketKind::Budget, Some(provider.id.clone())))
            .expect("ticket opened");

        service.delete_provider(&provider.id).expect("removed");
        let stored = service.get_ticket(&created.ticket.id).expect("ticket");
        assert_eq!(stored.provider_phone.as_deref(), Some("11 91234-5678"));
        assert!(service.preview(&stored.id).is_ok());
    }
}

mod lifecycle {
    use super::common::*;
    use gestao::workflows::maintenance::{
        MaintenanceServiceError, TicketError, TicketFilter, TicketKind, TicketStatus, TicketUpdate,
    };

    #[test]
    fn numbers_increase_and_filters_apply() {
        let service = build_service();
        let first = service
            .create_ticket(ticket(TicketKind::Corrective, None))
            .expect("first");
        let second = service
            .create_ticket(ticket(TicketKind::Urgent, None))
            .expect("second");
        assert_eq!(first.ticket.number, 1);
        assert_eq!(second.ticket.number, 2);

        service.start_ticket(&second.ticket.id).expect("started");
        let in_progress = service
            .list_tickets(&TicketFilter {
                status: Some(TicketStatus::InProgress),
                priority: None,
            })
            .expect("listed");
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].id, second.ticket.id);
    }

    #[test]
    fn resolved_ticket_is_final() {
        let service = build_service();
        let created = service
            .create_ticket(ticket(TicketKind::Corrective, None))
            .expect("opened");
        let id = created.ticket.id;

        let resolved = service
            .resolve_ticket(&id, Some("  Poda concluída ".to_string()))
            .expect("resolved");
        assert_eq!(resolved.status, TicketStatus::Resolved);
        assert_eq!(resolved.resolution.as_deref(), Some("Poda concluída"));

        assert!(matches!(
            service.start_ticket(&id),
            Err(MaintenanceServiceError::Validation(
                TicketError::InvalidTransition { .. }
            ))
        ));
        assert!(service
            .update_ticket(
                &id,
                TicketUpdate {
                    status: Some(TicketStatus::Cancelled),
                    resolution: None,
                    priority: None,
                },
            )
            .is_err());

        let stored = service.get_ticket(&id).expect("ticket");
        assert_eq!(stored.status, TicketStatus::Resolved);
    }
}
