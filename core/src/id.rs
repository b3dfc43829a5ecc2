//! Stable identifiers for labelable controls.
//!
//! Every control resolves its identity once, when it is created: either the id
//! supplied by the caller or a fresh one drawn from the process-wide
//! [`IdGenerator`]. The resolved [`Identity`] is then shared with whatever label
//! system associates a caption with the control.

use core::{
    fmt::{self, Display},
    ops::Deref,
    sync::atomic::{AtomicU64, Ordering},
};
use std::rc::Rc;

/// Hands out unique ids of the form `{namespace}-id-{n}`.
#[derive(Debug)]
pub struct IdGenerator {
    namespace: &'static str,
    next: AtomicU64,
}

impl IdGenerator {
    /// Creates a generator whose ids start at `0`.
    #[must_use]
    pub const fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            next: AtomicU64::new(0),
        }
    }

    /// Returns the next unused identity.
    #[must_use]
    pub fn generate(&self) -> Identity {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Identity(format!("{}-id-{n}", self.namespace).into())
    }
}

static GLOBAL: IdGenerator = IdGenerator::new("ws");

/// The generator shared by every control in the process.
#[must_use]
pub fn global() -> &'static IdGenerator {
    &GLOBAL
}

/// A resolved control id. Cloning shares the same string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(Rc<str>);

impl Identity {
    /// Uses `id` verbatim, or draws a new one from the global generator.
    pub fn resolve(id: Option<impl Into<Self>>) -> Self {
        id.map_or_else(|| global().generate(), Into::into)
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Identity {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

impl From<String> for Identity {
    fn from(id: String) -> Self {
        Self(id.into())
    }
}

impl PartialEq<str> for Identity {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Identity {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
