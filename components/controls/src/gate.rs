//! The change gate standing between a click and an emitted value.
//!
//! At most one guard evaluation is outstanding per switch. While it is pending
//! the gate reports [`GateState::Pending`] and further attempts are dropped,
//! not queued.

use core::cell::Cell;

use waterswitch_core::{BeforeChange, Deferred, Denial, ToggleValue, Verdict};

/// Whether a guard evaluation is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    /// No guard call is in flight.
    #[default]
    Idle,
    /// A deferred guard has not settled yet.
    Pending,
}

/// The outcome of one user toggle attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    /// The switch was disabled, loading or pending; no guard was consulted.
    Ignored,
    /// The change was approved and this value was emitted.
    Approved(ToggleValue),
    /// The guard denied the change; nothing was emitted.
    Denied(Denial),
    /// A deferred guard is running; the outcome arrives when it settles.
    Pending,
}

impl Attempt {
    /// The emitted value, if the attempt was approved synchronously.
    #[must_use]
    pub const fn emitted(&self) -> Option<&ToggleValue> {
        match self {
            Self::Approved(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ChangeGate {
    state: Cell<GateState>,
    guard: Option<BeforeChange>,
}

impl ChangeGate {
    pub(crate) const fn new(guard: Option<BeforeChange>) -> Self {
        Self {
            state: Cell::new(GateState::Idle),
            guard,
        }
    }

    pub(crate) fn state(&self) -> GateState {
        self.state.get()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.state() == GateState::Pending
    }

    pub(crate) fn set_state(&self, state: GateState) {
        self.state.set(state);
    }

    /// Consults the guard. An unguarded gate approves immediately.
    pub(crate) fn evaluate(&self, candidate: &ToggleValue) -> Result<Verdict, Deferred> {
        match &self.guard {
            None => Ok(Ok(true)),
            Some(guard) => guard.check(candidate).settled(),
        }
    }
}
