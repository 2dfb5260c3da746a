use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workflows::fields::deserialize_optional_text;

/// Identifier wrapper for maintenance tickets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TicketId(pub String);

impl TicketId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for service providers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProviderId(pub String);

impl ProviderId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TicketPriority {
    #[serde(rename = "urgente")]
    Urgent,
    #[serde(rename = "alta")]
    High,
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "baixa")]
    Low,
}

impl TicketPriority {
    pub const ALL: [TicketPriority; 4] = [
        TicketPriority::Urgent,
        TicketPriority::High,
        TicketPriority::Normal,
        TicketPriority::Low,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            TicketPriority::Urgent => "urgente",
            TicketPriority::High => "alta",
            TicketPriority::Normal => "normal",
            TicketPriority::Low => "baixa",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TicketPriority::Urgent => "Urgente",
            TicketPriority::High => "Alta",
            TicketPriority::Normal => "Normal",
            TicketPriority::Low => "Baixa",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| priority.key() == raw)
    }
}

/// Kind of work requested; selects the provider message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TicketKind {
    #[default]
    #[serde(rename = "corretiva")]
    Corrective,
    #[serde(rename = "preventiva")]
    Preventive,
    #[serde(rename = "orcamento")]
    Budget,
    #[serde(rename = "urgente")]
    Urgent,
}

impl TicketKind {
    pub const ALL: [TicketKind; 4] = [
        TicketKind::Corrective,
        TicketKind::Preventive,
        TicketKind::Budget,
        TicketKind::Urgent,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            TicketKind::Corrective => "corretiva",
            TicketKind::Preventive => "preventiva",
            TicketKind::Budget => "orcamento",
            TicketKind::Urgent => "urgente",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TicketKind::Corrective => "Manutenção Corretiva",
            TicketKind::Preventive => "Manutenção Preventiva",
            TicketKind::Budget => "Orçamento",
            TicketKind::Urgent => "Urgente",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            TicketKind::Corrective => "Algo quebrou ou não está funcionando",
            TicketKind::Preventive => "Manutenção programada/periódica",
            TicketKind::Budget => "Solicitar orçamento para serviço",
            TicketKind::Urgent => "Problema crítico que precisa de atenção imediata",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TicketStatus {
    #[default]
    #[serde(rename = "aberto")]
    Open,
    #[serde(rename = "em_andamento")]
    InProgress,
    #[serde(rename = "resolvido")]
    Resolved,
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Cancelled,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            TicketStatus::Open => "aberto",
            TicketStatus::InProgress => "em_andamento",
            TicketStatus::Resolved => "resolvido",
            TicketStatus::Cancelled => "cancelado",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TicketStatus::Open => "Aberto",
            TicketStatus::InProgress => "Em andamento",
            TicketStatus::Resolved => "Resolvido",
            TicketStatus::Cancelled => "Cancelado",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.key() == raw)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Maintenance request tracked through its lifecycle.
///
/// Provider name and phone are copied from the registry when the ticket is
/// opened; later provider edits do not reach existing tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    #[serde(rename = "numero")]
    pub number: u32,
    #[serde(rename = "estrutura")]
    pub structure: String,
    pub area: Option<String>,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "prioridade")]
    pub priority: TicketPriority,
    #[serde(rename = "tipo")]
    pub kind: TicketKind,
    #[serde(rename = "prestador_id")]
    pub provider_id: Option<ProviderId>,
    #[serde(rename = "prestador_nome")]
    pub provider_name: Option<String>,
    #[serde(rename = "prestador_telefone")]
    pub provider_phone: Option<String>,
    #[serde(rename = "solicitante")]
    pub requester: Option<String>,
    #[serde(rename = "mensagem_enviada")]
    pub message: Option<String>,
    pub status: TicketStatus,
    #[serde(rename = "resolucao")]
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload accepted when opening a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSubmission {
    #[serde(rename = "estrutura")]
    pub structure: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub area: Option<String>,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "prioridade", default)]
    pub priority: TicketPriority,
    #[serde(rename = "tipo", default)]
    pub kind: TicketKind,
    #[serde(
        rename = "prestador_id",
        default,
        deserialize_with = "deserialize_optional_provider"
    )]
    pub provider_id: Option<ProviderId>,
    #[serde(
        rename = "solicitante",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub requester: Option<String>,
}

/// Partial update; status changes are checked against the lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketUpdate {
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(
        rename = "resolucao",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub resolution: Option<String>,
    #[serde(rename = "prioridade", default)]
    pub priority: Option<TicketPriority>,
}

/// Query filters for listing tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TicketFilter {
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(rename = "prioridade", default)]
    pub priority: Option<TicketPriority>,
}

impl TicketFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.status.map_or(true, |status| ticket.status == status)
            && self
                .priority
                .map_or(true, |priority| ticket.priority == priority)
    }
}

/// External contractor reachable by phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "especialidade")]
    pub specialty: Option<String>,
    #[serde(rename = "empresa")]
    pub company: Option<String>,
    #[serde(rename = "notas")]
    pub notes: Option<String>,
    #[serde(rename = "ativo")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSubmission {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(
        rename = "especialidade",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub specialty: Option<String>,
    #[serde(
        rename = "empresa",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub company: Option<String>,
    #[serde(
        rename = "notas",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub notes: Option<String>,
    #[serde(rename = "ativo", default = "active_by_default")]
    pub active: bool,
}

/// Partial provider update. Absent fields keep their stored values; for the
/// optional text fields a blank value clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUpdate {
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
    #[serde(rename = "especialidade", default)]
    pub specialty: Option<String>,
    #[serde(rename = "empresa", default)]
    pub company: Option<String>,
    #[serde(rename = "notas", default)]
    pub notes: Option<String>,
    #[serde(rename = "ativo", default)]
    pub active: Option<bool>,
}

fn active_by_default() -> bool {
    true
}

fn deserialize_optional_provider<'de, D>(deserializer: D) -> Result<Option<ProviderId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(deserialize_optional_text(deserializer)?.map(ProviderId))
}
