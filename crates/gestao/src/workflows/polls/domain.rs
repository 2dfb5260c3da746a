use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workflows::fields::deserialize_optional_text;

/// Identifier wrapper for polls.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PollId(pub String);

impl PollId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of question the poll asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PollCategory {
    #[default]
    #[serde(rename = "decisao")]
    Decision,
    #[serde(rename = "prioridade")]
    Priority,
    #[serde(rename = "opiniao")]
    Opinion,
    #[serde(rename = "data")]
    Date,
    #[serde(rename = "compras")]
    Purchase,
}

impl PollCategory {
    pub const ALL: [PollCategory; 5] = [
        PollCategory::Decision,
        PollCategory::Priority,
        PollCategory::Opinion,
        PollCategory::Date,
        PollCategory::Purchase,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            PollCategory::Decision => "decisao",
            PollCategory::Priority => "prioridade",
            PollCategory::Opinion => "opiniao",
            PollCategory::Date => "data",
            PollCategory::Purchase => "compras",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PollCategory::Decision => "Decisão",
            PollCategory::Priority => "Prioridade",
            PollCategory::Opinion => "Opinião",
            PollCategory::Date => "Data/Agenda",
            PollCategory::Purchase => "Compras",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PollStatus {
    #[default]
    #[serde(rename = "aberta")]
    Open,
    #[serde(rename = "encerrada")]
    Closed,
}

impl PollStatus {
    pub const ALL: [PollStatus; 2] = [PollStatus::Open, PollStatus::Closed];

    pub const fn key(self) -> &'static str {
        match self {
            PollStatus::Open => "aberta",
            PollStatus::Closed => "encerrada",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PollStatus::Open => "Aberta",
            PollStatus::Closed => "Encerrada",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.key() == raw)
    }
}

/// Stored poll with its raw ballots.
///
/// `votes` is keyed by option index and `voters` maps each voter to the
/// option indices they picked. Both serialize with string keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "categoria")]
    pub category: PollCategory,
    #[serde(rename = "opcoes")]
    pub options: Vec<String>,
    #[serde(rename = "votos")]
    pub votes: BTreeMap<usize, u32>,
    #[serde(rename = "votantes")]
    pub voters: BTreeMap<String, Vec<usize>>,
    #[serde(rename = "criador")]
    pub creator: Option<String>,
    pub status: PollStatus,
    #[serde(rename = "multipla_escolha")]
    pub multiple_choice: bool,
    #[serde(rename = "data_encerramento")]
    pub closes_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Poll {
    /// Count recorded for an option; options nobody picked yet count as zero.
    pub fn votes_for(&self, option_index: usize) -> u32 {
        self.votes.get(&option_index).copied().unwrap_or(0)
    }

    /// Total option selections across all ballots.
    pub fn total_votes(&self) -> u32 {
        self.votes.values().sum()
    }

    pub fn is_open(&self) -> bool {
        self.status == PollStatus::Open
    }

    pub fn has_voted(&self, voter: &str) -> bool {
        self.voters.contains_key(voter)
    }
}

/// Payload accepted when creating a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSubmission {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(
        rename = "descricao",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub description: Option<String>,
    #[serde(rename = "categoria", default)]
    pub category: PollCategory,
    #[serde(rename = "opcoes")]
    pub options: Vec<String>,
    #[serde(
        rename = "criador",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub creator: Option<String>,
    #[serde(rename = "multipla_escolha", default)]
    pub multiple_choice: bool,
    #[serde(rename = "data_encerramento", default)]
    pub closes_at: Option<DateTime<Utc>>,
}

/// A single ballot entry. The index stays signed so negative input is
/// reported as an invalid option rather than a malformed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    #[serde(rename = "opcao_index")]
    pub option_index: i64,
    #[serde(rename = "votante")]
    pub voter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollStatusUpdate {
    #[serde(default)]
    pub status: Option<PollStatus>,
}

/// Query filters for listing polls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PollFilter {
    #[serde(default)]
    pub status: Option<PollStatus>,
    #[serde(rename = "categoria", default)]
    pub category: Option<PollCategory>,
}

impl PollFilter {
    pub fn matches(&self, poll: &Poll) -> bool {
        self.status.map_or(true, |status| poll.status == status)
            && self.category.map_or(true, |category| poll.category == category)
    }
}

/// Poll as exposed over HTTP, with the derived vote total.
#[derive(Debug, Clone, Serialize)]
pub struct PollView {
    #[serde(flatten)]
    pub poll: Poll,
    pub total_votos: u32,
}

impl From<Poll> for PollView {
    fn from(poll: Poll) -> Self {
        let total_votos = poll.total_votes();
        Self { poll, total_votos }
    }
}
