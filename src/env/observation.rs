//! What the engine reports back to a driver.
//!
//! `Observation` is the agent-facing view: small integers with fixed
//! encodings. `Info` is diagnostic and carries raw values.

use serde::{Deserialize, Serialize};

use crate::core::{Card, GameState, RulesConfig, HAND_SIZE};

/// Length of `Observation::to_vec`.
pub const OBSERVATION_LEN: usize = HAND_SIZE + 6;

/// Agent-visible state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Raw hand values, `0..=5`.
    pub hand: [i64; HAND_SIZE],
    /// `0` when the hold is empty, `1` when it holds the wildcard.
    pub hold: i64,
    /// `0` if unset, otherwise next card + 1.
    pub next: i64,
    /// `0` for an empty stack, otherwise top card + 1.
    pub stack_top: i64,
    /// Wildcards on the stack.
    pub stacked_zeros: i64,
    /// `max_turns - current_turn + 1`.
    pub remaining_turns: i64,
    /// `max_merges_per_turn - merges_this_turn`.
    pub remaining_merges: i64,
}

/// Encode an optional card as `0` (absent) or value + 1.
fn shifted(card: Option<Card>) -> i64 {
    card.map_or(0, |c| i64::from(c.value()) + 1)
}

impl Observation {
    /// Encode a state.
    #[must_use]
    pub fn from_state(state: &GameState, config: &RulesConfig) -> Self {
        Self {
            hand: state.hand.map(|c| i64::from(c.value())),
            hold: i64::from(!state.hold.is_empty()),
            next: shifted(state.next_card),
            stack_top: shifted(state.stack_top()),
            stacked_zeros: state.stacked_zeros() as i64,
            remaining_turns: i64::from(config.max_turns) - i64::from(state.current_turn) + 1,
            remaining_merges: i64::from(config.max_merges_per_turn)
                - i64::from(state.merges_this_turn),
        }
    }

    /// Flatten to `[hand.., hold, next, stack_top, stacked_zeros,
    /// remaining_turns, remaining_merges]`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(OBSERVATION_LEN);
        out.extend_from_slice(&self.hand);
        out.extend_from_slice(&[
            self.hold,
            self.next,
            self.stack_top,
            self.stacked_zeros,
            self.remaining_turns,
            self.remaining_merges,
        ]);
        out
    }
}

/// Diagnostic state. Not needed to choose legal actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub current_turn: u32,
    pub merges_this_turn: u32,
    /// Raw stack, bottom first.
    pub stack: Vec<u8>,
    /// Raw hold content: `None` or `Some(0)`.
    pub hold: Option<u8>,
    pub score: f64,
    /// Whether the most recent clear was a full chain.
    pub last_clear_full_chain: bool,
    /// Wildcards in the most recently cleared stack.
    pub last_clear_zeros: u32,
    /// The step took the forced-clear path: nothing was playable, so the
    /// engine cleared the stack without looking at the submitted action.
    /// Also set when that action was itself a clear.
    pub forced_clear: bool,
}

impl Info {
    /// Build from a state.
    #[must_use]
    pub fn from_state(state: &GameState, forced_clear: bool) -> Self {
        Self {
            current_turn: state.current_turn,
            merges_this_turn: state.merges_this_turn,
            stack: state.stack.iter().map(|&c| u8::from(c)).collect(),
            hold: state.hold.card().map(u8::from),
            score: state.score,
            last_clear_full_chain: state.last_clear.full_chain,
            last_clear_zeros: state.last_clear.zeros,
            forced_clear,
        }
    }
}

/// Result of one `step`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f64,
    /// The turn limit has been passed.
    pub terminated: bool,
    /// Always false: episodes only end by termination.
    pub truncated: bool,
    pub info: Info,
}

impl StepOutcome {
    /// Terminated or truncated.
    #[must_use]
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClearOutcome, Hold};

    fn sample_state() -> GameState {
        let mut state = GameState::new(
            [Card::new(1), Card::ZERO, Card::new(4), Card::new(5)],
            Some(Card::new(2)),
        )
        .with_stack(&[Card::ZERO, Card::ZERO, Card::new(3)])
        .with_hold(Hold::Wildcard)
        .with_merges(1)
        .with_turn(4);
        state.score = 2000.0;
        state.last_clear = ClearOutcome {
            reward: 2000.0,
            full_chain: true,
            zeros: 1,
        };
        state
    }

    #[test]
    fn test_observation_encoding() {
        let obs = Observation::from_state(&sample_state(), &RulesConfig::default());

        assert_eq!(obs.hand, [1, 0, 4, 5]);
        assert_eq!(obs.hold, 1);
        assert_eq!(obs.next, 3);
        assert_eq!(obs.stack_top, 4);
        assert_eq!(obs.stacked_zeros, 2);
        assert_eq!(obs.remaining_turns, 17);
        assert_eq!(obs.remaining_merges, 1);
    }

    #[test]
    fn test_observation_empty_encodings() {
        let state = GameState::new([Card::new(2); HAND_SIZE], None);
        let obs = Observation::from_state(&state, &RulesConfig::default());

        assert_eq!(obs.hold, 0);
        assert_eq!(obs.next, 0);
        assert_eq!(obs.stack_top, 0);
        assert_eq!(obs.remaining_turns, 20);
        assert_eq!(obs.remaining_merges, 2);
    }

    #[test]
    fn test_wildcard_top_is_one() {
        let state = GameState::new([Card::new(2); HAND_SIZE], Some(Card::ZERO))
            .with_stack(&[Card::ZERO]);
        let obs = Observation::from_state(&state, &RulesConfig::default());
        assert_eq!(obs.stack_top, 1);
        assert_eq!(obs.next, 1);
    }

    #[test]
    fn test_observation_to_vec() {
        let obs = Observation::from_state(&sample_state(), &RulesConfig::default());
        let flat = obs.to_vec();
        assert_eq!(flat.len(), OBSERVATION_LEN);
        assert_eq!(flat, vec![1, 0, 4, 5, 1, 3, 4, 2, 17, 1]);
    }

    #[test]
    fn test_info_raw_values() {
        let info = Info::from_state(&sample_state(), true);

        assert_eq!(info.current_turn, 4);
        assert_eq!(info.merges_this_turn, 1);
        assert_eq!(info.stack, vec![0, 0, 3]);
        assert_eq!(info.hold, Some(0));
        assert_eq!(info.score, 2000.0);
        assert!(info.last_clear_full_chain);
        assert_eq!(info.last_clear_zeros, 1);
        assert!(info.forced_clear);
    }
}
