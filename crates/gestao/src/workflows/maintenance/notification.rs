use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use super::domain::{Provider, Ticket, TicketKind};
use super::lifecycle::TicketError;
use crate::config::MessagingConfig;

const WHATSAPP_BASE: &str = "https://wa.me/";
const FALLBACK_RECIPIENT: &str = "Responsável";

/// Everything except unreserved characters and `/` is escaped; spaces become `%20`.
const MESSAGE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Message text plus the deep link that opens it in WhatsApp. Nothing is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPreview {
    #[serde(rename = "mensagem")]
    pub message: String,
    pub whatsapp_url: String,
}

/// Entry of the template catalogue served to the ticket form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub fn template_catalogue() -> Vec<TemplateDescriptor> {
    TicketKind::ALL
        .into_iter()
        .map(|kind| TemplateDescriptor {
            key: kind.key(),
            label: kind.label(),
            description: kind.description(),
        })
        .collect()
}

/// Builds provider notifications from ticket state.
#[derive(Debug, Clone, Default)]
pub struct NotificationComposer {
    config: MessagingConfig,
}

impl NotificationComposer {
    pub fn new(config: MessagingConfig) -> Self {
        Self { config }
    }

    /// Message text for `ticket`, addressed to `recipient` and dated `date`.
    pub fn compose(&self, ticket: &Ticket, recipient: &str, date: NaiveDate) -> String {
        let community = &self.config.community_name;

        let (opening, subject_label, details_label, closing) = match ticket.kind {
            TicketKind::Corrective => (
                format!("Olá {recipient}, aqui é da *{community}*."),
                "Identificamos um problema",
                "Descrição",
                "Pode verificar o mais breve possível? Obrigado!",
            ),
            TicketKind::Preventive => (
                format!("Olá {recipient}, aqui é da *{community}*."),
                "Está na hora da manutenção preventiva",
                "Detalhes",
                "Pode agendar uma visita? Obrigado!",
            ),
            TicketKind::Budget => (
                format!("Olá {recipient}, aqui é da *{community}*."),
                "Precisamos de um orçamento para",
                "Detalhes",
                "Pode nos enviar uma estimativa? Obrigado!",
            ),
            TicketKind::Urgent => (
                format!("🚨 *URGENTE* - Olá {recipient}, aqui é da *{community}*."),
                "Problema crítico",
                "Descrição",
                "Precisamos de atendimento IMEDIATO. Por favor, retorne o mais rápido possível!",
            ),
        };

        let mut lines = vec![
            opening,
            format!("{subject_label}: *{}*", ticket.structure),
        ];
        if let Some(area) = &ticket.area {
            lines.push(format!("Área: {area}"));
        }
        lines.push(format!("{details_label}: {}", ticket.description));
        lines.push(format!("Prioridade: {}", ticket.priority.label()));
        lines.push(format!(
            "Chamado #{:03} - {}",
            ticket.number,
            date.format("%d/%m/%Y")
        ));
        lines.push(closing.to_string());
        lines.join("\n")
    }

    /// WhatsApp deep link for `phone` carrying `message`.
    pub fn link(&self, phone: &str, message: &str) -> Result<String, TicketError> {
        let digits = self.normalize_phone(phone)?;
        let text = utf8_percent_encode(message, MESSAGE_ENCODE_SET);
        Ok(format!("{WHATSAPP_BASE}{digits}?text={text}"))
    }

    /// Strips formatting characters and prefixes the country code when missing.
    pub fn normalize_phone(&self, phone: &str) -> Result<String, TicketError> {
        let digits: String = phone
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TicketError::InvalidPhone(phone.to_string()));
        }
        if digits.starts_with(&self.config.country_code) {
            Ok(digits)
        } else {
            Ok(format!("{}{digits}", self.config.country_code))
        }
    }

    /// Preview addressed to a registry provider.
    pub fn preview(
        &self,
        ticket: &Ticket,
        provider: &Provider,
        date: NaiveDate,
    ) -> Result<NotificationPreview, TicketError> {
        let message = self.compose(ticket, &provider.name, date);
        let whatsapp_url = self.link(&provider.phone, &message)?;
        Ok(NotificationPreview {
            message,
            whatsapp_url,
        })
    }

    /// Preview from the provider snapshot stored on the ticket. The message
    /// generated at creation wins; otherwise one is rebuilt for the creation date.
    pub fn preview_for_ticket(&self, ticket: &Ticket) -> Result<NotificationPreview, TicketError> {
        let phone = ticket
            .provider_phone
            .as_deref()
            .ok_or(TicketError::NoProviderPhone)?;

        let message = match &ticket.message {
            Some(message) => message.clone(),
            None => self.compose(
                ticket,
                ticket.provider_name.as_deref().unwrap_or(FALLBACK_RECIPIENT),
                ticket.created_at.date_naive(),
            ),
        };
        let whatsapp_url = self.link(phone, &message)?;
        Ok(NotificationPreview {
            message,
            whatsapp_url,
        })
    }
}
