//! Recorded episodes: capture, storage, deterministic replay, statistics.
//!
//! The engine is deterministic given its draw seed and rules, so a record
//! only stores the seed, the config, and what each step returned.
//! `replay` re-runs the actions and checks every step still matches.

mod record;
mod summary;

pub use record::{EpisodeRecord, StepRecord};
pub use summary::EpisodeSummary;

use thiserror::Error;

use crate::core::EngineError;
use crate::env::StackGame;

/// Errors reading or replaying a record.
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("episode codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("engine error during replay: {0}")]
    Engine(#[from] EngineError),

    #[error("replay diverged at step {step} (action {action}): recorded reward {expected}, got {actual}")]
    Diverged {
        step: usize,
        action: usize,
        expected: f64,
        actual: f64,
    },

    #[error("replay finished with score {actual}, record says {expected}")]
    ScoreMismatch { expected: f64, actual: f64 },
}

/// Re-run `record` on a fresh random-draw game and check every step.
///
/// Returns the game in its final state. A step counts as diverged if any
/// of its recorded fields differ, not just the reward.
pub fn replay(record: &EpisodeRecord) -> Result<StackGame, ReplayError> {
    let mut game = StackGame::with_config(record.config.clone(), record.seed)?;

    for (index, expected) in record.steps.iter().enumerate() {
        let turn = game.state().current_turn;
        let legal = game.action_masks().is_legal(expected.action);
        let outcome = game.step(expected.action)?;
        let actual = StepRecord::from_outcome(expected.action, legal, turn, &outcome);

        if actual != *expected {
            return Err(ReplayError::Diverged {
                step: index,
                action: expected.action,
                expected: expected.reward,
                actual: actual.reward,
            });
        }
    }

    let score = game.state().score;
    if score != record.final_score {
        return Err(ReplayError::ScoreMismatch {
            expected: record.final_score,
            actual: score,
        });
    }

    log::info!(
        "replayed episode {}: {}",
        record.seed,
        EpisodeSummary::from_record(record)
    );
    Ok(game)
}
