//! Play validity and the legality mask.
//!
//! The predicates here are the only place the rules are written down.
//! `action_masks` and the engine's `step` both call them, so the mask
//! always agrees with what `step` accepts.

use serde::{Deserialize, Serialize};

use crate::core::{
    Action, Card, GameState, RulesConfig, ACTION_COUNT, ACTION_PLAY_HOLD, HAND_SIZE,
};

/// Can `card` go on top of `stack`?
///
/// - No card (an empty hold) is never playable.
/// - Anything goes on an empty stack or onto a wildcard.
/// - A wildcard never goes onto a rank.
/// - Otherwise ranks must strictly ascend.
#[must_use]
pub fn is_valid_play(stack: &[Card], card: Option<Card>) -> bool {
    let Some(card) = card else {
        return false;
    };

    match stack.last() {
        None => true,
        Some(top) if top.is_wildcard() => true,
        Some(_) if card.is_wildcard() => false,
        Some(&top) => card > top,
    }
}

/// Can hand slot `slot` be played?
#[must_use]
pub fn can_play_hand(state: &GameState, slot: usize) -> bool {
    is_valid_play(&state.stack, state.hand.get(slot).copied())
}

/// Can the held card be played?
#[must_use]
pub fn can_play_hold(state: &GameState) -> bool {
    is_valid_play(&state.stack, state.hold.card())
}

/// Can hand slots `a` and `b` be merged?
///
/// Needs merge budget left, two distinct in-range slots, and equal cards
/// in `1..=4`.
#[must_use]
pub fn can_merge(state: &GameState, config: &RulesConfig, a: usize, b: usize) -> bool {
    if state.merges_this_turn >= config.max_merges_per_turn || a == b {
        return false;
    }

    match (state.hand.get(a), state.hand.get(b)) {
        (Some(x), Some(y)) => x == y && x.is_mergeable(),
        _ => false,
    }
}

/// Can hand slot `slot` move into the hold? Only wildcards can, and an
/// occupied hold is simply overwritten.
#[must_use]
pub fn can_hold(state: &GameState, slot: usize) -> bool {
    state.hand.get(slot).is_some_and(|card| card.is_wildcard())
}

/// Can the stack be cleared?
#[must_use]
pub fn can_clear(state: &GameState) -> bool {
    !state.stack.is_empty()
}

/// Is any play (from hand or hold) legal?
#[must_use]
pub fn any_play_legal(state: &GameState) -> bool {
    (0..HAND_SIZE).any(|slot| can_play_hand(state, slot)) || can_play_hold(state)
}

/// Must the engine clear the stack instead of taking the submitted action?
///
/// True when nothing can be played and the stack is non-empty.
#[must_use]
pub fn forced_clear_pending(state: &GameState) -> bool {
    can_clear(state) && !any_play_legal(state)
}

/// Is `action` legal in `state`?
#[must_use]
pub fn is_legal(state: &GameState, config: &RulesConfig, action: Action) -> bool {
    match action {
        Action::PlayHand(slot) => can_play_hand(state, slot),
        Action::PlayHold => can_play_hold(state),
        Action::Merge(_) => action
            .merge_slots()
            .is_some_and(|(a, b)| can_merge(state, config, a, b)),
        Action::Hold(slot) => can_hold(state, slot),
        Action::ClearStack => can_clear(state),
    }
}

/// Legality of every action id, computed fresh from a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMask([bool; ACTION_COUNT]);

impl ActionMask {
    /// Is action `id` legal? Out-of-range ids are not.
    #[must_use]
    pub fn is_legal(&self, id: usize) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Legal action ids in ascending order.
    pub fn legal_actions(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(id, &legal)| legal.then_some(id))
    }

    /// Number of legal actions.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&legal| legal).count()
    }

    /// Is any action legal?
    #[must_use]
    pub fn any(&self) -> bool {
        self.0.iter().any(|&legal| legal)
    }

    /// Is any play action (ids `0..=4`) legal?
    #[must_use]
    pub fn any_play(&self) -> bool {
        self.0[..=ACTION_PLAY_HOLD].iter().any(|&legal| legal)
    }

    /// The raw mask.
    #[must_use]
    pub fn as_array(&self) -> &[bool; ACTION_COUNT] {
        &self.0
    }

    /// The mask as a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<bool> {
        self.0.to_vec()
    }
}

impl std::ops::Index<usize> for ActionMask {
    type Output = bool;

    fn index(&self, id: usize) -> &bool {
        &self.0[id]
    }
}

/// Compute the legality mask for `state`.
#[must_use]
pub fn action_masks(state: &GameState, config: &RulesConfig) -> ActionMask {
    let mut mask = [false; ACTION_COUNT];
    for action in Action::all() {
        mask[action.index()] = is_legal(state, config, action);
    }
    ActionMask(mask)
}
