//! The stepping engine and what it reports.

pub mod game;
pub mod observation;

pub use game::StackGame;
pub use observation::{Info, Observation, StepOutcome, OBSERVATION_LEN};
