//! The fixed action space.
//!
//! Sixteen ids, split into five contiguous bands:
//!
//! | Ids      | Action                                   |
//! |----------|------------------------------------------|
//! | `0..4`   | play hand slot `id`                      |
//! | `4`      | play the held card                       |
//! | `5..11`  | merge a hand pair (see `MERGE_PAIRS`)    |
//! | `11..15` | move hand slot `id - 11` into the hold   |
//! | `15`     | clear the stack and end the turn         |
//!
//! Agents and recorded episodes refer to actions by id, so band boundaries
//! and the merge-pair order must never change.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::state::{GameState, HAND_SIZE};

/// First play-from-hand id.
pub const ACTION_PLAY_HAND_OFFSET: usize = 0;
/// Play the held card.
pub const ACTION_PLAY_HOLD: usize = ACTION_PLAY_HAND_OFFSET + HAND_SIZE;
/// First merge id.
pub const ACTION_MERGE_OFFSET: usize = ACTION_PLAY_HOLD + 1;
/// Number of unordered slot pairs in a 4-card hand.
pub const MERGE_PAIR_COUNT: usize = 6;
/// First hold id.
pub const ACTION_HOLD_OFFSET: usize = ACTION_MERGE_OFFSET + MERGE_PAIR_COUNT;
/// Clear the stack.
pub const ACTION_CLEAR_STACK: usize = ACTION_HOLD_OFFSET + HAND_SIZE;
/// Size of the action space.
pub const ACTION_COUNT: usize = ACTION_CLEAR_STACK + 1;

/// Merge pairs in id order: merge id `5 + i` merges `MERGE_PAIRS[i]`.
pub const MERGE_PAIRS: [(usize, usize); MERGE_PAIR_COUNT] =
    [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// A decoded action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play the card in a hand slot onto the stack.
    PlayHand(usize),
    /// Play the held wildcard onto the stack.
    PlayHold,
    /// Merge a hand pair. The payload indexes `MERGE_PAIRS`.
    Merge(usize),
    /// Move a wildcard from a hand slot into the hold.
    Hold(usize),
    /// Clear the stack, scoring it and ending the turn.
    ClearStack,
}

impl Action {
    /// Decode an action id.
    pub fn from_index(id: usize) -> Result<Self, EngineError> {
        let action = match id {
            _ if id < ACTION_PLAY_HOLD => Action::PlayHand(id - ACTION_PLAY_HAND_OFFSET),
            ACTION_PLAY_HOLD => Action::PlayHold,
            _ if id < ACTION_HOLD_OFFSET => Action::Merge(id - ACTION_MERGE_OFFSET),
            _ if id < ACTION_CLEAR_STACK => Action::Hold(id - ACTION_HOLD_OFFSET),
            ACTION_CLEAR_STACK => Action::ClearStack,
            _ => return Err(EngineError::InvalidAction { id }),
        };
        Ok(action)
    }

    /// Encode this action as its id.
    ///
    /// # Panics
    /// Panics if a slot or pair payload is out of range.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Action::PlayHand(slot) => {
                assert!(slot < HAND_SIZE, "PlayHand slot out of range: {}", slot);
                ACTION_PLAY_HAND_OFFSET + slot
            }
            Action::PlayHold => ACTION_PLAY_HOLD,
            Action::Merge(pair) => {
                assert!(pair < MERGE_PAIR_COUNT, "Merge pair out of range: {}", pair);
                ACTION_MERGE_OFFSET + pair
            }
            Action::Hold(slot) => {
                assert!(slot < HAND_SIZE, "Hold slot out of range: {}", slot);
                ACTION_HOLD_OFFSET + slot
            }
            Action::ClearStack => ACTION_CLEAR_STACK,
        }
    }

    /// Build the merge action for an unordered slot pair.
    ///
    /// Returns `None` for equal or out-of-range slots.
    #[must_use]
    pub fn merge_of(a: usize, b: usize) -> Option<Self> {
        let pair = (a.min(b), a.max(b));
        MERGE_PAIRS
            .iter()
            .position(|&p| p == pair)
            .map(Action::Merge)
    }

    /// The hand slots a merge action combines, lower slot first.
    #[must_use]
    pub fn merge_slots(self) -> Option<(usize, usize)> {
        match self {
            Action::Merge(pair) => MERGE_PAIRS.get(pair).copied(),
            _ => None,
        }
    }

    /// Iterate over every action in id order.
    pub fn all() -> impl Iterator<Item = Action> {
        (0..ACTION_COUNT).filter_map(|id| Action::from_index(id).ok())
    }

    /// Describe this action against a concrete state, naming the cards involved.
    #[must_use]
    pub fn describe(self, state: &GameState) -> String {
        match self {
            Action::PlayHand(slot) => match state.hand.get(slot) {
                Some(card) => format!("play hand slot {} ({})", slot + 1, card),
                None => self.to_string(),
            },
            Action::PlayHold => match state.hold.card() {
                Some(card) => format!("play held card ({})", card),
                None => "play held card (empty)".to_string(),
            },
            Action::Merge(_) => match self.merge_slots() {
                Some((a, b)) => format!(
                    "merge hand slots {} ({}) and {} ({})",
                    a + 1,
                    state.hand[a],
                    b + 1,
                    state.hand[b]
                ),
                None => self.to_string(),
            },
            Action::Hold(slot) => match state.hand.get(slot) {
                Some(card) => format!("hold hand slot {} ({})", slot + 1, card),
                None => self.to_string(),
            },
            Action::ClearStack => self.to_string(),
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = EngineError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        Action::from_index(id)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PlayHand(slot) => write!(f, "play hand slot {}", slot + 1),
            Action::PlayHold => write!(f, "play held card"),
            Action::Merge(_) => match self.merge_slots() {
                Some((a, b)) => write!(f, "merge hand slots {} and {}", a + 1, b + 1),
                None => write!(f, "merge (invalid pair)"),
            },
            Action::Hold(slot) => write!(f, "hold hand slot {}", slot + 1),
            Action::ClearStack => write!(f, "clear stack"),
        }
    }
}
