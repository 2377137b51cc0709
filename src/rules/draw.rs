//! Card draw policies.
//!
//! The engine asks its `DrawPolicy` for a card whenever a slot must be
//! refilled, telling it whether a `5` is already in play.

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::core::config::ZERO_DRAW_RATE;
use crate::core::{Card, EngineError, GameRng, GameRngState};

/// Source of new cards.
pub trait DrawPolicy {
    /// Produce one card.
    ///
    /// `five_in_play` is true when a `5` sits anywhere on the board (hand,
    /// hold, next card or stack). An error here is fatal to the episode.
    fn draw(&mut self, five_in_play: bool) -> Result<Card, EngineError>;

    /// Restart the draw sequence from `seed`.
    fn reseed(&mut self, _seed: u64) {}
}

/// The standard random draw.
///
/// - With probability `zero_rate`, the wildcard.
/// - Otherwise uniform over `1..=5`, leaving out `5` while one is in play.
#[derive(Clone, Debug)]
pub struct RandomDraw {
    rng: GameRng,
    zero_rate: f64,
}

impl RandomDraw {
    /// Create a random draw seeded with `seed`, using the standard wildcard rate.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            zero_rate: ZERO_DRAW_RATE,
        }
    }

    /// Set the wildcard probability.
    #[must_use]
    pub fn with_zero_rate(mut self, rate: f64) -> Self {
        self.zero_rate = rate;
        self
    }

    /// The wildcard probability.
    #[must_use]
    pub fn zero_rate(&self) -> f64 {
        self.zero_rate
    }

    /// Current RNG position, for checkpointing.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Resume a random draw from a checkpointed RNG position.
    #[must_use]
    pub fn from_rng_state(state: &GameRngState, zero_rate: f64) -> Self {
        Self {
            rng: GameRng::from_state(state),
            zero_rate,
        }
    }
}

impl DrawPolicy for RandomDraw {
    fn draw(&mut self, five_in_play: bool) -> Result<Card, EngineError> {
        if self.rng.gen_bool(self.zero_rate) {
            return Ok(Card::ZERO);
        }

        let pool: SmallVec<[Card; 5]> = Card::ranks()
            .filter(|&card| !(five_in_play && card == Card::FIVE))
            .collect();

        self.rng
            .choose(&pool)
            .copied()
            .ok_or(EngineError::DrawExhausted)
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = GameRng::new(seed);
    }
}

/// A fixed card sequence.
///
/// Cards come out in the order given, verbatim: the wildcard rate and the
/// single-five rule are not applied. Running out is `DrawExhausted`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDraw {
    cards: VecDeque<Card>,
}

impl ScriptedDraw {
    /// Create a script from cards.
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Create a script from raw values.
    ///
    /// # Panics
    /// Panics if any value is outside `0..=5`.
    pub fn from_values(values: &[u8]) -> Self {
        Self::new(values.iter().map(|&v| Card::new(v)))
    }

    /// Append a card to the end of the script.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Cards left in the script.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl DrawPolicy for ScriptedDraw {
    fn draw(&mut self, _five_in_play: bool) -> Result<Card, EngineError> {
        self.cards.pop_front().ok_or(EngineError::DrawExhausted)
    }
}
