#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod logging;

pub mod prelude {
    //! A collection of commonly used types for easy importing.
    //!
    //! # Example
    //!
    //! ```rust
    //! use waterswitch::prelude::*;
    //!
    //! let enabled: Binding<ToggleValue> = binding(ToggleValue::from(false));
    //! let control = switch(&enabled).mount();
    //! control.toggle();
    //! assert!(control.checked());
    //! ```
    pub use crate::reactive::{Binding, Signal, binding};
    pub use waterswitch_controls::{Attempt, GateState, Switch, SwitchController, switch};
    pub use waterswitch_core::{GuardError, Identity, Size, ToggleValue, Verdict};
    pub use waterswitch_form::{FormItem, LabelAssociation, Role, ValidateTrigger};
}

pub use nami as reactive;
pub use waterswitch_controls as controls;
pub use waterswitch_form as form;

#[doc(inline)]
pub use waterswitch_core::{
    BeforeChange, Deferred, Denial, GuardError, GuardResult, Identity, Size, ToggleTokens,
    ToggleValue, Verdict, guard, id, value,
};

pub use controls::{Attempt, Switch, SwitchController, switch};
pub use form::FormItem;

/// Task management for deferred guards.
pub mod task {
    pub use waterswitch_core::task::{run, run_until_stalled, shutdown, spawn_local};
}

pub use tracing as log;
