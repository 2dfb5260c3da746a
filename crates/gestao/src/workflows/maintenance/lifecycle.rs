use chrono::{DateTime, Utc};

use super::domain::{Ticket, TicketStatus, TicketUpdate};

/// Validation failures for tickets and providers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    #[error("ticket structure is required")]
    MissingStructure,
    #[error("ticket description is required")]
    MissingDescription,
    #[error("cannot move ticket from {from} to {to}")]
    InvalidTransition { from: TicketStatus, to: TicketStatus },
    #[error("ticket is {status} and its details can no longer change")]
    Finalized { status: TicketStatus },
    #[error("ticket has no provider phone to notify")]
    NoProviderPhone,
    #[error("'{0}' is not a dialable phone number")]
    InvalidPhone(String),
    #[error("provider name is required")]
    MissingProviderName,
    #[error("provider phone is required")]
    MissingProviderPhone,
}

impl TicketStatus {
    /// Resolved and cancelled tickets accept no further moves.
    pub const fn is_terminal(self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Cancelled)
    }

    pub const fn can_transition_to(self, next: TicketStatus) -> bool {
        matches!(
            (self, next),
            (TicketStatus::Open, TicketStatus::InProgress)
                | (
                    TicketStatus::Open | TicketStatus::InProgress,
                    TicketStatus::Resolved | TicketStatus::Cancelled
                )
        )
    }
}

impl Ticket {
    /// Moves the ticket to `next`. Re-asserting the current status is accepted
    /// and changes nothing.
    pub fn transition(&mut self, next: TicketStatus, now: DateTime<Utc>) -> Result<(), TicketError> {
        if self.status == next {
            return Ok(());
        }
        if !self.status.can_transition_to(next) {
            return Err(TicketError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), TicketError> {
        if self.status != TicketStatus::Open {
            return Err(TicketError::InvalidTransition {
                from: self.status,
                to: TicketStatus::InProgress,
            });
        }
        self.transition(TicketStatus::InProgress, now)
    }

    pub fn resolve(
        &mut self,
        resolution: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), TicketError> {
        if self.status.is_terminal() {
            return Err(TicketError::InvalidTransition {
                from: self.status,
                to: TicketStatus::Resolved,
            });
        }
        self.transition(TicketStatus::Resolved, now)?;
        if resolution.is_some() {
            self.resolution = resolution;
        }
        Ok(())
    }

    /// Applies a generic update. Resolution and priority only change while the
    /// ticket is active; re-sending the stored values to a closed ticket is
    /// accepted. Nothing changes when the update is rejected.
    pub fn amend(&mut self, update: TicketUpdate, now: DateTime<Utc>) -> Result<(), TicketError> {
        let TicketUpdate {
            status,
            resolution,
            priority,
        } = update;

        let edits_resolution = resolution.is_some() && resolution != self.resolution;
        let edits_priority = priority.is_some_and(|priority| priority != self.priority);
        if self.status.is_terminal() && (edits_resolution || edits_priority) {
            return Err(TicketError::Finalized {
                status: self.status,
            });
        }

        if let Some(status) = status {
            self.transition(status, now)?;
        }
        if let Some(priority) = priority.filter(|_| edits_priority) {
            self.priority = priority;
            self.updated_at = now;
        }
        if edits_resolution {
            self.resolution = resolution;
            self.updated_at = now;
        }
        Ok(())
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), TicketError> {
        if self.status.is_terminal() {
            return Err(TicketError::InvalidTransition {
                from: self.status,
                to: TicketStatus::Cancelled,
            });
        }
        self.transition(TicketStatus::Cancelled, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::maintenance::domain::{
        TicketId, TicketKind, TicketPriority, TicketStatus,
    };
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 2, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn ticket(status: TicketStatus) -> Ticket {
        Ticket {
            id: TicketId("t-1".to_string()),
            number: 1,
            structure: "Bomba da piscina".to_string(),
            area: Some("Piscina".to_string()),
            description: "Fazendo barulho".to_string(),
            priority: TicketPriority::High,
            kind: TicketKind::Corrective,
            provider_id: None,
            provider_name: None,
            provider_phone: None,
            requester: None,
            message: None,
            status,
            resolution: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn transition_table_matches_lifecycle() {
        use TicketStatus::*;
        let allowed = [
            (Open, InProgress),
            (Open, Resolved),
            (Open, Cancelled),
            (InProgress, Resolved),
            (InProgress, Cancelled),
        ];
        for from in TicketStatus::ALL {
            for to in TicketStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn resolved_ticket_cannot_restart() {
        let mut resolved = ticket(TicketStatus::Resolved);
        let before = resolved.clone();
        assert_eq!(
            resolved.start(now()),
            Err(TicketError::InvalidTransition {
                from: TicketStatus::Resolved,
                to: TicketStatus::InProgress,
            })
        );
        assert_eq!(
            resolved.transition(TicketStatus::InProgress, now()),
            Err(TicketError::InvalidTransition {
                from: TicketStatus::Resolved,
                to: TicketStatus::InProgress,
            })
        );
        assert_eq!(resolved, before);
    }

    #[test]
    fn start_only_from_open() {
        let mut in_progress = ticket(TicketStatus::InProgress);
        assert!(in_progress.start(now()).is_err());

        let mut open = ticket(TicketStatus::Open);
        open.start(now()).expect("open ticket starts");
        assert_eq!(open.status, TicketStatus::InProgress);
    }

    #[test]
    fn resolve_records_optional_note() {
        let mut with_note = ticket(TicketStatus::InProgress);
        with_note
            .resolve(Some("Rolamento trocado".to_string()), now())
            .expect("resolves");
        assert_eq!(with_note.status, TicketStatus::Resolved);
        assert_eq!(with_note.resolution.as_deref(), Some("Rolamento trocado"));

        let mut without_note = ticket(TicketStatus::Open);
        without_note.resolve(None, now()).expect("resolves");
        assert_eq!(without_note.resolution, None);
    }

    #[test]
    fn terminal_states_reject_cancel_and_resolve() {
        let mut cancelled = ticket(TicketStatus::Cancelled);
        assert!(cancelled.resolve(None, now()).is_err());
        assert!(cancelled.cancel(now()).is_err());

        let mut resolved = ticket(TicketStatus::Resolved);
        assert!(resolved.resolve(Some("again".to_string()), now()).is_err());
        assert_eq!(resolved.resolution, None);
    }

    #[test]
    fn closed_ticket_keeps_its_resolution() {
        let mut resolved = ticket(TicketStatus::Resolved);
        resolved.resolution = Some("Rolamento trocado".to_string());
        let before = resolved.clone();

        let rewrite = TicketUpdate {
            status: Some(TicketStatus::Resolved),
            resolution: Some("Outra coisa".to_string()),
            priority: None,
        };
        assert_eq!(
            resolved.amend(rewrite, now()),
            Err(TicketError::Finalized {
                status: TicketStatus::Resolved,
            })
        );
        let reprioritise = TicketUpdate {
            priority: Some(TicketPriority::Low),
            ..TicketUpdate::default()
        };
        assert!(resolved.amend(reprioritise, now()).is_err());
        assert_eq!(resolved, before);

        let resend = TicketUpdate {
            status: Some(TicketStatus::Resolved),
            resolution: Some("Rolamento trocado".to_string()),
            priority: Some(TicketPriority::High),
        };
        resolved.amend(resend, now()).expect("identical values accepted");
        assert_eq!(resolved, before);
    }

    #[test]
    fn active_ticket_amend_resolves_with_note() {
        let mut active = ticket(TicketStatus::InProgress);
        active
            .amend(
                TicketUpdate {
                    status: Some(TicketStatus::Resolved),
                    resolution: Some("Bomba substituída".to_string()),
                    priority: Some(TicketPriority::Urgent),
                },
                now(),
            )
            .expect("amend applies");
        assert_eq!(active.status, TicketStatus::Resolved);
        assert_eq!(active.resolution.as_deref(), Some("Bomba substituída"));
        assert_eq!(active.priority, TicketPriority::Urgent);
    }

    #[test]
    fn reasserting_current_status_is_a_no_op() {
        let mut resolved = ticket(TicketStatus::Resolved);
        resolved
            .transition(TicketStatus::Resolved, now())
            .expect("same status accepted");
        assert_eq!(resolved.status, TicketStatus::Resolved);
    }
}
