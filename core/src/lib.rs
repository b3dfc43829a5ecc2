//! Core types for the waterswitch toggle.
//!
//! This crate holds everything a two-state control needs that is not tied to a
//! particular widget:
//!
//! - [`value`] - value tokens and the rules deriving `checked` from a bound value
//! - [`guard`] - synchronous and deferred change guards
//! - [`id`] - process-wide identity generation for label association
//! - [`task`] - the thread-local pool deferred guards run on

#[macro_use]
mod macros;
pub mod guard;
pub mod id;
pub mod size;
pub mod task;
pub mod value;

pub use guard::{BeforeChange, Deferred, Denial, GuardError, GuardResult, Verdict};
pub use id::Identity;
pub use size::Size;
pub use value::{ToggleTokens, ToggleValue};
