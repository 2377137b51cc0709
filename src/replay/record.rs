//! Episode recording and the on-disk codec.

use serde::{Deserialize, Serialize};

use crate::core::RulesConfig;
use crate::env::StepOutcome;

use super::ReplayError;

/// One recorded `step` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Submitted action id.
    pub action: usize,
    /// Reward returned by the engine.
    pub reward: f64,
    /// The engine cleared the stack instead of applying `action`.
    pub forced_clear: bool,
    /// The step cleared the stack (voluntarily or not).
    pub cleared: bool,
    /// The clear was a full chain.
    pub full_chain: bool,
    /// The action broke a rule and drew the penalty.
    pub penalized: bool,
}

impl StepRecord {
    /// Build from the outcome of stepping `action`.
    ///
    /// `legal` is the mask entry for `action` before the step and
    /// `turn_before` the turn it was taken on.
    #[must_use]
    pub fn from_outcome(
        action: usize,
        legal: bool,
        turn_before: u32,
        outcome: &StepOutcome,
    ) -> Self {
        let cleared = outcome.info.current_turn > turn_before;
        Self {
            action,
            reward: outcome.reward,
            forced_clear: outcome.info.forced_clear,
            cleared,
            full_chain: cleared && outcome.info.last_clear_full_chain,
            penalized: !legal && !outcome.info.forced_clear,
        }
    }
}

/// A complete recorded episode.
///
/// Episodes played on the default random draw can be reproduced from
/// `seed` and `config` alone; see [`replay`](super::replay).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Draw seed the episode was reset with.
    pub seed: u64,
    /// Rules in force.
    pub config: RulesConfig,
    /// Every step, in order.
    pub steps: Vec<StepRecord>,
    /// Score when recording stopped.
    pub final_score: f64,
    /// Did the episode reach its turn limit?
    pub terminated: bool,
}

impl EpisodeRecord {
    /// Start an empty record.
    pub fn new(seed: u64, config: RulesConfig) -> Self {
        Self {
            seed,
            config,
            steps: Vec::new(),
            final_score: 0.0,
            terminated: false,
        }
    }

    /// Append a step.
    pub fn push(&mut self, step: StepRecord) {
        self.steps.push(step);
    }

    /// Close the record.
    pub fn finish(&mut self, final_score: f64, terminated: bool) {
        self.final_score = final_score;
        self.terminated = terminated;
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// No steps recorded?
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Submitted action ids, in order.
    pub fn actions(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps.iter().map(|s| s.action)
    }

    /// Sum of all step rewards, penalties included.
    pub fn total_reward(&self) -> f64 {
        self.steps.iter().map(|s| s.reward).sum()
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ReplayError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReplayError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
