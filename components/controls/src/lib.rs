//! `WaterSwitch` Controls
//! This crate provides the guarded [`Switch`] control and its change gate.
//!

pub mod gate;
pub use gate::{Attempt, GateState};
pub mod switch;
pub use switch::{Switch, SwitchAria, SwitchConfig, SwitchController, switch};

#[cfg(test)]
mod test_support;
