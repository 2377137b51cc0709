//! Rule constants.
//!
//! `RulesConfig::default()` is the standard game. The builder setters exist
//! for experiments (shorter episodes, different payouts); the action space
//! and hand size are fixed and not configurable.

use serde::{Deserialize, Serialize};

/// Turns per episode.
pub const MAX_TURNS: u32 = 20;
/// Successful merges allowed per turn.
pub const MAX_MERGES_PER_TURN: u32 = 2;
/// Probability that a draw yields the wildcard.
pub const ZERO_DRAW_RATE: f64 = 0.05;
/// Payout for clearing a full chain.
pub const REWARD_FULL_CHAIN: f64 = 1000.0;
/// Each wildcard in a full-chain clear multiplies the payout by this.
pub const REWARD_ZERO_MULTIPLIER: f64 = 2.0;
/// Reward for an action the rules reject.
pub const PENALTY_INVALID_ACTION: f64 = -0.1;

/// Tunable rule constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Episode ends once the turn counter exceeds this.
    pub max_turns: u32,

    /// Merge budget per turn.
    pub max_merges_per_turn: u32,

    /// Wildcard draw probability, in `[0, 1]`.
    pub zero_draw_rate: f64,

    /// Base full-chain payout.
    pub reward_full_chain: f64,

    /// Per-wildcard payout multiplier.
    pub reward_zero_multiplier: f64,

    /// Penalty for rejected actions.
    pub penalty_invalid_action: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_turns: MAX_TURNS,
            max_merges_per_turn: MAX_MERGES_PER_TURN,
            zero_draw_rate: ZERO_DRAW_RATE,
            reward_full_chain: REWARD_FULL_CHAIN,
            reward_zero_multiplier: REWARD_ZERO_MULTIPLIER,
            penalty_invalid_action: PENALTY_INVALID_ACTION,
        }
    }
}

impl RulesConfig {
    /// Create the standard configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of turns.
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    /// Set the merge budget per turn.
    #[must_use]
    pub fn with_max_merges_per_turn(mut self, merges: u32) -> Self {
        self.max_merges_per_turn = merges;
        self
    }

    /// Set the wildcard draw probability.
    #[must_use]
    pub fn with_zero_draw_rate(mut self, rate: f64) -> Self {
        self.zero_draw_rate = rate;
        self
    }

    /// Set the full-chain payout.
    #[must_use]
    pub fn with_reward_full_chain(mut self, reward: f64) -> Self {
        self.reward_full_chain = reward;
        self
    }

    /// Set the per-wildcard multiplier.
    #[must_use]
    pub fn with_reward_zero_multiplier(mut self, multiplier: f64) -> Self {
        self.reward_zero_multiplier = multiplier;
        self
    }

    /// Set the invalid-action penalty.
    #[must_use]
    pub fn with_penalty_invalid_action(mut self, penalty: f64) -> Self {
        self.penalty_invalid_action = penalty;
        self
    }
}
