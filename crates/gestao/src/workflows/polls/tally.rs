use serde::Serialize;

use super::domain::{Poll, PollId, PollStatus};

/// Share of `total` held by `count`, rounded to the nearest whole percent (halves round up).
/// An empty poll reports 0 for every option.
pub fn percentage(count: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let count = u64::from(count);
    let total = u64::from(total);
    ((200 * count + total) / (2 * total)) as u32
}

/// Index of the single option with the most votes. Ties for first place and
/// polls without votes have no winner.
pub fn winner(poll: &Poll) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    let mut tied = false;

    for index in 0..poll.options.len() {
        let count = poll.votes_for(index);
        match best {
            Some((_, top)) if count == top => tied = true,
            Some((_, top)) if count < top => {}
            _ => {
                best = Some((index, count));
                tied = false;
            }
        }
    }

    match best {
        Some((index, count)) if count > 0 && !tied => Some(index),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionTally {
    pub index: usize,
    #[serde(rename = "opcao")]
    pub label: String,
    #[serde(rename = "votos")]
    pub votes: u32,
    #[serde(rename = "percentual")]
    pub percentage: u32,
    #[serde(rename = "vencedor")]
    pub leading: bool,
}

/// Display-ready results for a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollTally {
    pub poll_id: PollId,
    pub status: PollStatus,
    #[serde(rename = "opcoes")]
    pub options: Vec<OptionTally>,
    pub total_votos: u32,
    #[serde(rename = "vencedor")]
    pub winner: Option<usize>,
}

impl Poll {
    pub fn tally(&self) -> PollTally {
        let total = self.total_votes();
        let winner = winner(self);
        let options = self
            .options
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let votes = self.votes_for(index);
                OptionTally {
                    index,
                    label: label.clone(),
                    votes,
                    percentage: percentage(votes, total),
                    leading: winner == Some(index),
                }
            })
            .collect();

        PollTally {
            poll_id: self.id.clone(),
            status: self.status,
            options,
            total_votos: total,
            winner,
        }
    }
}
