//! Environment bindings for Python.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::config::{MAX_MERGES_PER_TURN, MAX_TURNS};
use crate::core::{EngineError, RulesConfig};
use crate::env::{Info, Observation, StackGame};
use crate::policy::{play_episode, ActionPolicy, FirstLegal, UniformRandom};
use crate::replay::EpisodeSummary;

fn engine_err(err: EngineError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn observation_dict<'py>(py: Python<'py>, obs: &Observation) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("hand", PyArray1::from_slice_bound(py, &obs.hand))?;
    dict.set_item("hold", obs.hold)?;
    dict.set_item("next", obs.next)?;
    dict.set_item("stack_top", obs.stack_top)?;
    dict.set_item("stacked_zeros", obs.stacked_zeros)?;
    dict.set_item("remaining_turns", obs.remaining_turns)?;
    dict.set_item("remaining_merges", obs.remaining_merges)?;
    Ok(dict)
}

fn info_dict<'py>(py: Python<'py>, info: &Info) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("current_turn", info.current_turn)?;
    dict.set_item("merges_this_turn", info.merges_this_turn)?;
    dict.set_item("stack", info.stack.clone())?;
    dict.set_item("hold", info.hold)?;
    dict.set_item("score", info.score)?;
    dict.set_item("last_clear_full_chain", info.last_clear_full_chain)?;
    dict.set_item("last_clear_zeros", info.last_clear_zeros)?;
    dict.set_item("forced_clear", info.forced_clear)?;
    Ok(dict)
}

/// Python wrapper for StackGame.
///
/// Mirrors the usual reset/step environment protocol: observations and
/// infos are dicts, the action mask is a bool ndarray.
#[pyclass(name = "StackGame")]
pub struct PyStackGame {
    game: StackGame,
}

#[pymethods]
impl PyStackGame {
    /// Create a new game.
    ///
    /// # Arguments
    /// - seed: draw seed
    /// - max_turns: turns per episode
    /// - max_merges_per_turn: merge budget per turn
    #[new]
    #[pyo3(signature = (
        seed = 0,
        max_turns = MAX_TURNS,
        max_merges_per_turn = MAX_MERGES_PER_TURN
    ))]
    fn new(seed: u64, max_turns: u32, max_merges_per_turn: u32) -> PyResult<Self> {
        let config = RulesConfig::new()
            .with_max_turns(max_turns)
            .with_max_merges_per_turn(max_merges_per_turn);
        let game = StackGame::with_config(config, seed).map_err(engine_err)?;
        Ok(Self { game })
    }

    /// Start a new episode. Returns `(observation, info)`.
    #[pyo3(signature = (seed = None))]
    fn reset<'py>(
        &mut self,
        py: Python<'py>,
        seed: Option<u64>,
    ) -> PyResult<(Bound<'py, PyDict>, Bound<'py, PyDict>)> {
        let (obs, info) = self.game.reset(seed).map_err(engine_err)?;
        Ok((observation_dict(py, &obs)?, info_dict(py, &info)?))
    }

    /// Apply an action id.
    ///
    /// Returns `(observation, reward, terminated, truncated, info)`.
    /// Raises `ValueError` for ids outside `[0, 16)`.
    #[allow(clippy::type_complexity)]
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: usize,
    ) -> PyResult<(Bound<'py, PyDict>, f64, bool, bool, Bound<'py, PyDict>)> {
        let outcome = self.game.step(action).map_err(engine_err)?;
        Ok((
            observation_dict(py, &outcome.observation)?,
            outcome.reward,
            outcome.terminated,
            outcome.truncated,
            info_dict(py, &outcome.info)?,
        ))
    }

    /// Legality mask of length 16.
    fn action_masks<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_slice_bound(py, self.game.action_masks().as_array())
    }

    /// Legal action ids.
    fn legal_actions(&self) -> Vec<usize> {
        self.game.legal_actions()
    }

    /// Current observation as a dict.
    fn observation<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        observation_dict(py, &self.game.observation())
    }

    /// Current observation flattened to an int64 vector.
    fn observation_vector<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i64>> {
        PyArray1::from_vec_bound(py, self.game.observation().to_vec())
    }

    /// Human-readable description of an action id.
    fn describe_action(&self, action: usize) -> PyResult<String> {
        self.game.describe_action(action).map_err(engine_err)
    }

    /// Play one episode with a built-in policy (`"random"` or `"first"`).
    ///
    /// Returns summary statistics as a dict.
    #[pyo3(signature = (seed, policy = "random", policy_seed = 0))]
    fn run_episode<'py>(
        &mut self,
        py: Python<'py>,
        seed: u64,
        policy: &str,
        policy_seed: u64,
    ) -> PyResult<Bound<'py, PyDict>> {
        let mut driver: Box<dyn ActionPolicy> = match policy {
            "random" => Box::new(UniformRandom::new(policy_seed)),
            "first" => Box::new(FirstLegal),
            other => {
                return Err(PyValueError::new_err(format!("unknown policy '{}'", other)));
            }
        };
        let record = play_episode(&mut self.game, driver.as_mut(), seed).map_err(engine_err)?;
        let summary = EpisodeSummary::from_record(&record);

        let dict = PyDict::new_bound(py);
        dict.set_item("steps", summary.steps)?;
        dict.set_item("total_reward", summary.total_reward)?;
        dict.set_item("score", summary.score)?;
        dict.set_item("full_chains", summary.full_chains)?;
        dict.set_item("forced_clears", summary.forced_clears)?;
        dict.set_item("invalid_actions", summary.invalid_actions)?;
        dict.set_item("turns", summary.turns)?;
        dict.set_item("terminated", record.terminated)?;
        Ok(dict)
    }

    /// Is the episode over?
    #[getter]
    fn terminated(&self) -> bool {
        self.game.is_terminated()
    }

    /// Will the next step clear the stack regardless of action?
    #[getter]
    fn forced_clear_pending(&self) -> bool {
        self.game.forced_clear_pending()
    }

    #[getter]
    fn score(&self) -> f64 {
        self.game.state().score
    }

    #[getter]
    fn current_turn(&self) -> u32 {
        self.game.state().current_turn
    }

    fn __repr__(&self) -> String {
        let state = self.game.state();
        format!(
            "StackGame(turn={}/{}, score={}, stack={:?})",
            state.current_turn,
            self.game.config().max_turns,
            state.score,
            state.stack.iter().map(|c| c.value()).collect::<Vec<_>>()
        )
    }
}
