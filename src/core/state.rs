//! Game state.
//!
//! One mutable `GameState` per engine instance. `reset` builds it and
//! `step` is the only thing that mutates it afterwards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, Hold};

/// Cards in hand. Every slot always holds a card.
pub const HAND_SIZE: usize = 4;

/// The pile being built this turn.
///
/// A full chain is five ranks plus any leading wildcards, so eight inline
/// slots cover every realistic stack without a heap allocation.
pub type Stack = SmallVec<[Card; 8]>;

/// Result of clearing a stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClearOutcome {
    /// Reward paid for the clear (zero unless it was a full chain).
    pub reward: f64,
    /// Did the cleared stack contain every rank `1..=5`?
    pub full_chain: bool,
    /// Wildcards in the cleared stack.
    pub zeros: u32,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Hand slots, always full.
    pub hand: [Card; HAND_SIZE],

    /// Hold slot: empty or a wildcard.
    pub hold: Hold,

    /// Card that refills the next vacated hand slot.
    ///
    /// Only `None` transiently, before the first deal.
    pub next_card: Option<Card>,

    /// Current stack, bottom first.
    pub stack: Stack,

    /// Turn number (starts at 1).
    pub current_turn: u32,

    /// Successful merges this turn.
    pub merges_this_turn: u32,

    /// Sum of positive clear rewards this episode. Penalties never touch it.
    pub score: f64,

    /// Metadata of the most recent clear. Reporting only.
    pub last_clear: ClearOutcome,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new([Card::ZERO; HAND_SIZE], None)
    }
}

impl GameState {
    /// Create a turn-1 state with the given hand and next card.
    ///
    /// Hold and stack start empty.
    #[must_use]
    pub fn new(hand: [Card; HAND_SIZE], next_card: Option<Card>) -> Self {
        Self {
            hand,
            hold: Hold::Empty,
            next_card,
            stack: Stack::new(),
            current_turn: 1,
            merges_this_turn: 0,
            score: 0.0,
            last_clear: ClearOutcome::default(),
        }
    }

    /// Set the stack contents.
    #[must_use]
    pub fn with_stack(mut self, stack: &[Card]) -> Self {
        self.stack = Stack::from_slice(stack);
        self
    }

    /// Set the hold slot.
    #[must_use]
    pub fn with_hold(mut self, hold: Hold) -> Self {
        self.hold = hold;
        self
    }

    /// Set the merges already used this turn.
    #[must_use]
    pub fn with_merges(mut self, merges: u32) -> Self {
        self.merges_this_turn = merges;
        self
    }

    /// Set the turn number.
    #[must_use]
    pub fn with_turn(mut self, turn: u32) -> Self {
        self.current_turn = turn;
        self
    }

    /// Top card of the stack.
    #[must_use]
    pub fn stack_top(&self) -> Option<Card> {
        self.stack.last().copied()
    }

    /// Wildcards currently on the stack.
    #[must_use]
    pub fn stacked_zeros(&self) -> usize {
        self.stack.iter().filter(|c| c.is_wildcard()).count()
    }

    /// Copies of `card` across hand, hold, next card and stack.
    #[must_use]
    pub fn count_on_board(&self, card: Card) -> usize {
        let in_hand = self.hand.iter().filter(|&&c| c == card).count();
        let in_hold = usize::from(self.hold.card() == Some(card));
        let in_next = usize::from(self.next_card == Some(card));
        let in_stack = self.stack.iter().filter(|&&c| c == card).count();
        in_hand + in_hold + in_next + in_stack
    }

    /// Is a `5` anywhere on the board?
    #[must_use]
    pub fn five_in_play(&self) -> bool {
        self.count_on_board(Card::FIVE) > 0
    }
}
