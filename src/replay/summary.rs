//! Per-episode statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::EpisodeRecord;

/// Aggregate counts over one recorded episode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub steps: usize,
    /// Sum of rewards, penalties included.
    pub total_reward: f64,
    /// Final score (positive clear rewards only).
    pub score: f64,
    pub full_chains: usize,
    pub forced_clears: usize,
    pub invalid_actions: usize,
    /// Turns completed, i.e. clears.
    pub turns: usize,
}

impl EpisodeSummary {
    /// Summarize a record.
    pub fn from_record(record: &EpisodeRecord) -> Self {
        record.steps.iter().fold(
            Self {
                score: record.final_score,
                ..Self::default()
            },
            |mut summary, step| {
                summary.steps += 1;
                summary.total_reward += step.reward;
                summary.full_chains += usize::from(step.full_chain);
                summary.forced_clears += usize::from(step.forced_clear);
                summary.invalid_actions += usize::from(step.penalized);
                summary.turns += usize::from(step.cleared);
                summary
            },
        )
    }

    /// Fraction of completed turns that ended in a full chain.
    pub fn full_chain_rate(&self) -> f64 {
        if self.turns == 0 {
            0.0
        } else {
            self.full_chains as f64 / self.turns as f64
        }
    }
}

impl fmt::Display for EpisodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score {} over {} turns ({} steps): {} full chains, {} forced clears, {} invalid",
            self.score,
            self.turns,
            self.steps,
            self.full_chains,
            self.forced_clears,
            self.invalid_actions
        )
    }
}
