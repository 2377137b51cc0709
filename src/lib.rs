//! # stack-chain
//!
//! A deterministic single-player card stacking game, built as an RL
//! environment.
//!
//! ## Rules in brief
//!
//! The player holds four cards valued `0..=5` and builds a stack in
//! strictly ascending order. `0` is a wildcard: anything goes on top of it,
//! but it never goes on top of a rank. Clearing a stack that contains every
//! rank `1..=5` pays a reward, doubled once per wildcard in the stack.
//! Each clear ends a turn; an episode lasts a fixed number of turns.
//!
//! ## Design Principles
//!
//! 1. **Total transition function**: every action id in `[0, 16)` is
//!    accepted. Rule violations cost a small penalty and change nothing.
//!
//! 2. **One source of truth for legality**: the mask and `step` call the
//!    same predicates.
//!
//! 3. **Per-instance randomness**: each game owns a seedable ChaCha8
//!    generator. No global RNG.
//!
//! ## Modules
//!
//! - `core`: Cards, actions, state, RNG, configuration, errors
//! - `rules`: Draw policies, legality, scoring
//! - `env`: The `StackGame` engine and its observation/info types
//! - `policy`: Baseline action policies and the episode driver
//! - `replay`: Episode records, replay verification, statistics

pub mod core;
pub mod env;
pub mod policy;
pub mod replay;
pub mod rules;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, Card, ClearOutcome, EngineError, GameRng, GameRngState, GameState, Hold,
    RulesConfig, ACTION_COUNT, HAND_SIZE,
};

pub use crate::rules::{
    action_masks, is_valid_play, score_clear, ActionMask, DrawPolicy, RandomDraw, ScriptedDraw,
};

pub use crate::env::{Info, Observation, StackGame, StepOutcome, OBSERVATION_LEN};

pub use crate::policy::{play_episode, ActionPolicy, FirstLegal, UniformRandom};

pub use crate::replay::{replay, EpisodeRecord, EpisodeSummary, ReplayError, StepRecord};
