//! Baseline action policies and the episode driver.
//!
//! A policy sees exactly what an external agent sees: the observation and
//! the legality mask. `play_episode` drives a game with one and records
//! every step for later replay.

use crate::core::{EngineError, GameRng};
use crate::env::{Observation, StackGame};
use crate::replay::{EpisodeRecord, StepRecord};
use crate::rules::{ActionMask, DrawPolicy};

/// Steps `play_episode` takes before giving up on an episode.
///
/// A policy that keeps submitting penalized actions never advances the
/// turn counter, so some cap is needed.
pub const DEFAULT_STEP_CAP: usize = 10_000;

/// Chooses an action id from an observation and legality mask.
pub trait ActionPolicy {
    /// Pick an action. Returns `None` if the mask has no legal action.
    fn select(&mut self, observation: &Observation, mask: &ActionMask) -> Option<usize>;
}

/// Uniform over legal actions.
#[derive(Clone, Debug)]
pub struct UniformRandom {
    rng: GameRng,
}

impl UniformRandom {
    /// Create with its own seeded generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl ActionPolicy for UniformRandom {
    fn select(&mut self, _observation: &Observation, mask: &ActionMask) -> Option<usize> {
        let count = mask.count();
        if count == 0 {
            return None;
        }
        let pick = self.rng.gen_range_usize(0..count);
        mask.legal_actions().nth(pick)
    }
}

/// Lowest legal action id.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl ActionPolicy for FirstLegal {
    fn select(&mut self, _observation: &Observation, mask: &ActionMask) -> Option<usize> {
        mask.legal_actions().next()
    }
}

/// Reset `game` from `seed` and play it out with `policy`.
///
/// Stops at termination, after `DEFAULT_STEP_CAP` steps, or when the policy
/// has nothing to pick.
pub fn play_episode<D, P>(
    game: &mut StackGame<D>,
    policy: &mut P,
    seed: u64,
) -> Result<EpisodeRecord, EngineError>
where
    D: DrawPolicy,
    P: ActionPolicy + ?Sized,
{
    play_episode_capped(game, policy, seed, DEFAULT_STEP_CAP)
}

/// `play_episode` with an explicit step cap.
pub fn play_episode_capped<D, P>(
    game: &mut StackGame<D>,
    policy: &mut P,
    seed: u64,
    max_steps: usize,
) -> Result<EpisodeRecord, EngineError>
where
    D: DrawPolicy,
    P: ActionPolicy + ?Sized,
{
    let (mut observation, _) = game.reset(Some(seed))?;
    let mut record = EpisodeRecord::new(seed, game.config().clone());

    while !game.is_terminated() {
        if record.steps.len() >= max_steps {
            log::warn!(
                "episode {} stopped at the step cap ({}) on turn {}",
                seed,
                max_steps,
                game.state().current_turn
            );
            break;
        }

        let mask = game.action_masks();
        let Some(action) = policy.select(&observation, &mask) else {
            log::warn!("policy found no legal action on turn {}", game.state().current_turn);
            break;
        };

        let turn = game.state().current_turn;
        let outcome = game.step(action)?;
        record.push(StepRecord::from_outcome(
            action,
            mask.is_legal(action),
            turn,
            &outcome,
        ));
        observation = outcome.observation;
    }

    record.finish(game.state().score, game.is_terminated());
    log::debug!(
        "episode {}: {} steps, score {}",
        seed,
        record.steps.len(),
        record.final_score
    );
    Ok(record)
}
