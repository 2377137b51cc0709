//! Fatal engine errors.
//!
//! Rule violations inside the action space are not errors: `step` answers
//! them with the invalid-action penalty. The variants here mean the caller
//! broke the contract or an engine invariant no longer holds.

use thiserror::Error;

use super::action::ACTION_COUNT;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Action id outside the fixed action space.
    #[error("action id {id} is outside the action space [0, {})", ACTION_COUNT)]
    InvalidAction { id: usize },

    /// Raw card value outside `0..=5`.
    #[error("card value {value} is outside 0..=5")]
    InvalidCard { value: u8 },

    /// The draw policy has no card it is allowed to produce.
    #[error("draw policy exhausted: no legal card to draw")]
    DrawExhausted,
}
