//! Card values and the hold slot.
//!
//! Cards are plain ranks in `0..=5`:
//! - `0` is the wildcard. It stacks onto an empty or wildcard-topped stack
//!   and is the only value the hold slot accepts.
//! - `1..=5` are ordinary ranks that stack in strictly ascending order.
//!
//! At most one `5` is ever in play; the draw policy enforces this.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Highest card rank.
pub const MAX_CARD_VALUE: u8 = 5;

/// Merging two cards of this rank yields the same rank again.
pub const MERGE_LIMIT_VALUE: u8 = 4;

/// A single card value in `0..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// The wildcard.
    pub const ZERO: Card = Card(0);

    /// The single-instance top rank.
    pub const FIVE: Card = Card(MAX_CARD_VALUE);

    /// Create a card from a raw value.
    ///
    /// # Panics
    /// Panics if `value > 5`. Use `Card::try_from` for unchecked input.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        assert!(value <= MAX_CARD_VALUE, "Card value out of range");
        Self(value)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Is this the wildcard (`0`)?
    #[must_use]
    pub const fn is_wildcard(self) -> bool {
        self.0 == 0
    }

    /// Can two copies of this card be merged? True for ranks `1..=4`.
    #[must_use]
    pub const fn is_mergeable(self) -> bool {
        self.0 > 0 && self.0 < MAX_CARD_VALUE
    }

    /// Result of merging two copies of this card.
    ///
    /// Saturates at 4: two 4s merge into a 4, never a 5.
    #[must_use]
    pub const fn merged(self) -> Card {
        if self.0 < MERGE_LIMIT_VALUE {
            Card(self.0 + 1)
        } else {
            Card(MERGE_LIMIT_VALUE)
        }
    }

    /// All ordinary (non-wildcard) ranks.
    pub fn ranks() -> impl Iterator<Item = Card> {
        (1..=MAX_CARD_VALUE).map(Card)
    }
}

impl TryFrom<u8> for Card {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= MAX_CARD_VALUE {
            Ok(Card(value))
        } else {
            Err(EngineError::InvalidCard { value })
        }
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The hold slot.
///
/// Only the wildcard may be held, so the slot is either empty or holds a `0`.
/// Holding nothing and holding the wildcard are distinct states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hold {
    /// Nothing held.
    #[default]
    Empty,
    /// A wildcard is held.
    Wildcard,
}

impl Hold {
    /// The held card, if any.
    #[must_use]
    pub const fn card(self) -> Option<Card> {
        match self {
            Hold::Empty => None,
            Hold::Wildcard => Some(Card::ZERO),
        }
    }

    /// Is the slot empty?
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Hold::Empty)
    }
}
