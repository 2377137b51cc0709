//! Python bindings for the stack-chain environment.
//!
//! # Quick Start
//!
//! ```python
//! import stack_chain
//!
//! env = stack_chain.StackGame(seed=42)
//! obs, info = env.reset(seed=42)
//! while True:
//!     mask = env.action_masks()
//!     action = int(mask.nonzero()[0][0])
//!     obs, reward, terminated, truncated, info = env.step(action)
//!     if terminated or truncated:
//!         break
//! print(info["score"])
//! ```

use pyo3::prelude::*;

mod py_env;

pub use py_env::*;

use crate::core::{ACTION_COUNT, HAND_SIZE};
use crate::env::OBSERVATION_LEN;

/// stack_chain: a single-player card stacking environment.
#[pymodule]
fn stack_chain(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyStackGame>()?;

    m.add("ACTION_COUNT", ACTION_COUNT)?;
    m.add("HAND_SIZE", HAND_SIZE)?;
    m.add("OBSERVATION_LEN", OBSERVATION_LEN)?;

    Ok(())
}
