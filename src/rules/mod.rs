//! Game rules: card draws, legality, scoring.
//!
//! Everything here is a pure function of `GameState` and `RulesConfig`,
//! except the draw policies, which own their randomness.

pub mod draw;
pub mod legality;
pub mod scoring;

pub use draw::{DrawPolicy, RandomDraw, ScriptedDraw};
pub use legality::{
    action_masks, any_play_legal, can_clear, can_hold, can_merge, can_play_hand, can_play_hold,
    forced_clear_pending, is_legal, is_valid_play, ActionMask,
};
pub use scoring::{is_full_chain, score_clear};
