//! Guards consulted before a toggle commits a new value.
//!
//! A guard may answer right away with a plain `bool`, or hand back a
//! [`Deferred`] verdict that settles later. Both shapes are carried by
//! [`GuardResult`]; [`GuardResult::settled`] folds the synchronous case into an
//! already-settled [`Verdict`] so callers only ever settle through one path.

use core::{
    fmt::{self, Display},
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{
    FutureExt,
    channel::oneshot,
    future::{LocalBoxFuture, ready},
    task::SpawnError,
};
use thiserror::Error;

use crate::{impl_debug, value::ToggleValue};

/// Why a deferred guard failed to produce a verdict.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    /// The guard explicitly rejected the change.
    #[error("change rejected: {0}")]
    Rejected(String),
    /// The sender side of the guard went away before settling.
    #[error("guard was dropped before it settled")]
    Canceled,
    /// The deferred verdict could not be scheduled.
    #[error("failed to schedule guard: {0}")]
    Spawn(String),
}

impl GuardError {
    /// Creates a [`GuardError::Rejected`] from any displayable reason.
    pub fn rejected(reason: impl Display) -> Self {
        Self::Rejected(reason.to_string())
    }
}

impl From<oneshot::Canceled> for GuardError {
    fn from(_: oneshot::Canceled) -> Self {
        Self::Canceled
    }
}

impl From<SpawnError> for GuardError {
    fn from(error: SpawnError) -> Self {
        Self::Spawn(error.to_string())
    }
}

/// The settled answer of a guard. `Ok(true)` approves the change.
pub type Verdict = Result<bool, GuardError>;

/// A verdict that settles asynchronously.
pub struct Deferred(LocalBoxFuture<'static, Verdict>);

impl_debug!(Deferred);

impl Deferred {
    /// Wraps a future resolving to a [`Verdict`].
    pub fn new(future: impl Future<Output = Verdict> + 'static) -> Self {
        Self(future.boxed_local())
    }

    /// A deferred verdict that is already settled.
    #[must_use]
    pub fn settled(verdict: Verdict) -> Self {
        Self::new(ready(verdict))
    }
}

impl Future for Deferred {
    type Output = Verdict;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.0.as_mut().poll(cx)
    }
}

/// What a guard returns for one toggle attempt.
#[derive(Debug)]
pub enum GuardResult {
    /// Answered within the same turn.
    Settled(bool),
    /// Answered later; the toggle is pending until it settles.
    Deferred(Deferred),
}

impl GuardResult {
    /// Splits the result into an immediate verdict or the deferred one.
    ///
    /// # Errors
    ///
    /// Returns the [`Deferred`] verdict when the guard did not answer synchronously.
    pub fn settled(self) -> Result<Verdict, Deferred> {
        match self {
            Self::Settled(approved) => Ok(Ok(approved)),
            Self::Deferred(deferred) => Err(deferred),
        }
    }
}

impl From<bool> for GuardResult {
    fn from(approved: bool) -> Self {
        Self::Settled(approved)
    }
}

impl From<Deferred> for GuardResult {
    fn from(deferred: Deferred) -> Self {
        Self::Deferred(deferred)
    }
}

/// A guard consulted with the value a toggle is about to emit.
pub struct BeforeChange(Box<dyn Fn(&ToggleValue) -> GuardResult>);

impl_debug!(BeforeChange);

impl BeforeChange {
    /// Creates a guard from a closure returning a `bool` or a [`Deferred`].
    pub fn new<F, R>(guard: F) -> Self
    where
        F: Fn(&ToggleValue) -> R + 'static,
        R: Into<GuardResult>,
    {
        Self(Box::new(move |candidate: &ToggleValue| guard(candidate).into()))
    }

    /// Creates a guard from a closure returning a future verdict.
    pub fn deferred<F, Fut>(guard: F) -> Self
    where
        F: Fn(&ToggleValue) -> Fut + 'static,
        Fut: Future<Output = Verdict> + 'static,
    {
        Self(Box::new(move |candidate: &ToggleValue| {
            GuardResult::Deferred(Deferred::new(guard(candidate)))
        }))
    }

    /// Asks the guard whether `candidate` may be committed.
    #[must_use]
    pub fn check(&self, candidate: &ToggleValue) -> GuardResult {
        (self.0)(candidate)
    }
}

/// Why a toggle attempt was not committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// The guard answered `false`.
    Refused,
    /// The guard failed; the failure is swallowed and reported as a denial.
    Failed(GuardError),
}

impl Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refused => f.write_str("guard refused the change"),
            Self::Failed(error) => write!(f, "some error occurred: {error}"),
        }
    }
}

/// Interprets a settled verdict.
///
/// # Errors
///
/// Returns a [`Denial`] unless the verdict is `Ok(true)`.
pub fn decide(verdict: Verdict) -> Result<(), Denial> {
    match verdict {
        Ok(true) => Ok(()),
        Ok(false) => Err(Denial::Refused),
        Err(error) => Err(Denial::Failed(error)),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn plain_bool_settles_immediately() {
        let guard = BeforeChange::new(|_: &ToggleValue| false);
        let verdict = guard.check(&true.into()).settled().unwrap();
        assert_eq!(decide(verdict), Err(Denial::Refused));
    }

    #[test]
    fn guard_sees_candidate() {
        let guard = BeforeChange::new(|candidate: &ToggleValue| candidate == &ToggleValue::from("0"));
        assert!(matches!(guard.check(&"0".into()), GuardResult::Settled(true)));
        assert!(matches!(guard.check(&"100".into()), GuardResult::Settled(false)));
    }

    #[test]
    fn deferred_guard_defers() {
        let guard = BeforeChange::deferred(|_| async { Err(GuardError::rejected("Error")) });
        let deferred = guard.check(&false.into()).settled().unwrap_err();
        let denial = decide(block_on(deferred)).unwrap_err();
        assert_eq!(denial, Denial::Failed(GuardError::Rejected("Error".into())));
        assert_eq!(denial.to_string(), "some error occurred: change rejected: Error");
    }

    #[test]
    fn closure_may_return_deferred() {
        let guard = BeforeChange::new(|_: &ToggleValue| Deferred::settled(Ok(true)));
        let deferred = guard.check(&true.into()).settled().unwrap_err();
        assert_eq!(decide(block_on(deferred)), Ok(()));
    }

    #[test]
    fn dropped_sender_is_canceled() {
        let (sender, receiver) = oneshot::channel::<Verdict>();
        drop(sender);
        let deferred = Deferred::new(async move { receiver.await? });
        assert_eq!(block_on(deferred), Err(GuardError::Canceled));
    }
}
