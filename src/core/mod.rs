//! Core types: cards, actions, state, RNG, configuration, errors.
//!
//! Nothing here knows the rules; `rules` and `env` build on these types.

pub mod action;
pub mod card;
pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use action::{
    Action, ACTION_CLEAR_STACK, ACTION_COUNT, ACTION_HOLD_OFFSET, ACTION_MERGE_OFFSET,
    ACTION_PLAY_HAND_OFFSET, ACTION_PLAY_HOLD, MERGE_PAIRS, MERGE_PAIR_COUNT,
};
pub use card::{Card, Hold, MAX_CARD_VALUE, MERGE_LIMIT_VALUE};
pub use config::RulesConfig;
pub use error::EngineError;
pub use rng::{GameRng, GameRngState};
pub use state::{ClearOutcome, GameState, Stack, HAND_SIZE};
