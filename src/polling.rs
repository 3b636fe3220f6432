// Live polling: vote tallies per option.
use crate::model::PollError;
use serde::{Deserialize, Serialize};

/// A non-blank option and the slot it was offered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub slot: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub question: String,
    pub options: Vec<PollOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionCount {
    pub slot: usize,
    pub option: String,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PollTally {
    pub counts: Vec<OptionCount>,
}

impl Poll {
    /// Blank options are dropped but the others keep their slot; at least one must remain.
    pub fn new(question: impl Into<String>, options: Vec<String>) -> Result<Self, PollError> {
        let question = question.into().trim().to_string();
        if question.is_empty() {
            return Err(PollError::EmptyQuestion);
        }
        let options: Vec<PollOption> = options
            .into_iter()
            .enumerate()
            .map(|(slot, o)| PollOption {
                slot,
                text: o.trim().to_string(),
            })
            .filter(|o| !o.text.is_empty())
            .collect();
        if options.is_empty() {
            return Err(PollError::NoOptions);
        }
        Ok(Self { question, options })
    }

    /// Votes are slot indices; blank or unknown slots are ignored.
    pub fn tally(&self, votes: &[usize]) -> PollTally {
        let mut counts: Vec<OptionCount> = self
            .options
            .iter()
            .map(|option| OptionCount {
                slot: option.slot,
                option: option.text.clone(),
                votes: 0,
            })
            .collect();

        for &vote in votes {
            if let Some(entry) = counts.iter_mut().find(|c| c.slot == vote) {
                entry.votes += 1;
            }
        }

        PollTally { counts }
    }
}

impl PollTally {
    pub fn total_votes(&self) -> u64 {
        self.counts.iter().map(|c| c.votes).sum()
    }

    /// First option with the most votes, `None` if nobody voted.
    pub fn most_popular(&self) -> Option<&OptionCount> {
        self.counts
            .iter()
            .fold(None, |best: Option<&OptionCount>, c| match best {
                Some(current) if current.votes >= c.votes => Some(current),
                _ => Some(c),
            })
            .filter(|c| c.votes > 0)
    }
}
