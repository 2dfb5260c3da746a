//! Display styling for status, category and priority badges.
//!
//! Every enum maps to a tone exhaustively; raw keys coming from older clients
//! or stored data fall back to [`BadgeTone::Neutral`].

use serde::Serialize;

use crate::workflows::maintenance::{TicketKind, TicketPriority, TicketStatus};
use crate::workflows::polls::{PollCategory, PollStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Blue,
    Orange,
    Purple,
    Pink,
    Emerald,
    Green,
    Yellow,
    Red,
    Neutral,
}

impl BadgeTone {
    /// Tailwind utility classes used by the web client.
    pub const fn css_classes(self) -> &'static str {
        match self {
            BadgeTone::Blue => "bg-blue-100 text-blue-800",
            BadgeTone::Orange => "bg-orange-100 text-orange-800",
            BadgeTone::Purple => "bg-purple-100 text-purple-800",
            BadgeTone::Pink => "bg-pink-100 text-pink-800",
            BadgeTone::Emerald => "bg-emerald-100 text-emerald-800",
            BadgeTone::Green => "bg-green-100 text-green-800",
            BadgeTone::Yellow => "bg-yellow-100 text-yellow-800",
            BadgeTone::Red => "bg-red-100 text-red-800",
            BadgeTone::Neutral => "bg-gray-100 text-gray-600",
        }
    }
}

/// Anything rendered as a labelled badge.
pub trait Badge: Copy {
    fn label(self) -> &'static str;
    fn tone(self) -> BadgeTone;
    fn from_key(raw: &str) -> Option<Self>;
}

/// Badge payload for a raw key. Unknown keys echo the key as their label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    pub label: String,
    pub tone: BadgeTone,
    pub classes: &'static str,
}

pub fn badge_for<B: Badge>(raw: &str) -> BadgeView {
    match B::from_key(raw) {
        Some(badge) => badge_of(badge),
        None => BadgeView {
            label: raw.to_string(),
            tone: BadgeTone::Neutral,
            classes: BadgeTone::Neutral.css_classes(),
        },
    }
}

pub fn badge_of<B: Badge>(badge: B) -> BadgeView {
    let tone = badge.tone();
    BadgeView {
        label: badge.label().to_string(),
        tone,
        classes: tone.css_classes(),
    }
}

impl Badge for PollCategory {
    fn label(self) -> &'static str {
        PollCategory::label(self)
    }

    fn tone(self) -> BadgeTone {
        match self {
            PollCategory::Decision => BadgeTone::Blue,
            PollCategory::Priority => BadgeTone::Orange,
            PollCategory::Opinion => BadgeTone::Purple,
            PollCategory::Date => BadgeTone::Pink,
            PollCategory::Purchase => BadgeTone::Emerald,
        }
    }

    fn from_key(raw: &str) -> Option<Self> {
        PollCategory::from_key(raw)
    }
}

impl Badge for PollStatus {
    fn label(self) -> &'static str {
        PollStatus::label(self)
    }

    fn tone(self) -> BadgeTone {
        match self {
            PollStatus::Open => BadgeTone::Green,
            PollStatus::Closed => BadgeTone::Neutral,
        }
    }

    fn from_key(raw: &str) -> Option<Self> {
        PollStatus::from_key(raw)
    }
}

impl Badge for TicketStatus {
    fn label(self) -> &'static str {
        TicketStatus::label(self)
    }

    fn tone(self) -> BadgeTone {
        match self {
            TicketStatus::Open => BadgeTone::Yellow,
            TicketStatus::InProgress => BadgeTone::Blue,
            TicketStatus::Resolved => BadgeTone::Green,
            TicketStatus::Cancelled => BadgeTone::Neutral,
        }
    }

    fn from_key(raw: &str) -> Option<Self> {
        TicketStatus::from_key(raw)
    }
}

impl Badge for TicketPriority {
    fn label(self) -> &'static str {
        TicketPriority::label(self)
    }

    fn tone(self) -> BadgeTone {
        match self {
            TicketPriority::Urgent => BadgeTone::Red,
            TicketPriority::High => BadgeTone::Orange,
            TicketPriority::Normal => BadgeTone::Blue,
            TicketPriority::Low => BadgeTone::Neutral,
        }
    }

    fn from_key(raw: &str) -> Option<Self> {
        TicketPriority::from_key(raw)
    }
}

impl Badge for TicketKind {
    fn label(self) -> &'static str {
        TicketKind::label(self)
    }

    fn tone(self) -> BadgeTone {
        BadgeTone::Neutral
    }

    fn from_key(raw: &str) -> Option<Self> {
        TicketKind::from_key(raw)
    }
}
