//! Value tokens carried by a switch and the rules that reconcile them.
//!
//! A switch never owns its value. It compares the externally bound value with
//! its configured active token to decide whether it is checked, and it computes
//! the opposite token when a change is approved. Both rules live here so they
//! can be reused by any control that flips between two tokens.

use core::fmt::{self, Display};

/// A primitive value a switch can be bound to.
///
/// Tokens of different variants never compare equal, so `true`, `1` and `"true"`
/// are three distinct tokens. Comparison is strict: `Number(f64::NAN)` is not
/// equal to itself.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleValue {
    /// A boolean token.
    Bool(bool),
    /// A numeric token.
    Number(f64),
    /// A textual token.
    Text(String),
}

impl Default for ToggleValue {
    fn default() -> Self {
        Self::Bool(false)
    }
}

impl Display for ToggleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for ToggleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ToggleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ToggleValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for ToggleValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for ToggleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ToggleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Returns `true` iff `bound` is strictly equal to the `active` token.
///
/// A bound value matching neither token is simply unchecked.
#[must_use]
pub fn derive_checked(bound: &ToggleValue, active: &ToggleValue) -> bool {
    bound == active
}

/// Returns the token a switch should emit when it flips away from `checked`.
///
/// The payload of the tokens plays no part: an active token of `false` or `0`
/// is as valid as `true`.
#[must_use]
pub fn next_value(checked: bool, active: &ToggleValue, inactive: &ToggleValue) -> ToggleValue {
    if checked {
        inactive.clone()
    } else {
        active.clone()
    }
}

/// The pair of tokens a switch flips between.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleTokens {
    /// Token emitted when the switch turns on.
    pub active: ToggleValue,
    /// Token emitted when the switch turns off.
    pub inactive: ToggleValue,
}

impl ToggleTokens {
    /// Creates a token pair.
    ///
    /// Equal tokens are accepted; such a switch is checked whenever the bound
    /// value equals the shared token and always emits it.
    pub fn new(active: impl Into<ToggleValue>, inactive: impl Into<ToggleValue>) -> Self {
        Self {
            active: active.into(),
            inactive: inactive.into(),
        }
    }

    /// See [`derive_checked`].
    #[must_use]
    pub fn is_checked(&self, bound: &ToggleValue) -> bool {
        derive_checked(bound, &self.active)
    }

    /// The token to emit when flipping from `bound`.
    #[must_use]
    pub fn flip(&self, bound: &ToggleValue) -> ToggleValue {
        next_value(self.is_checked(bound), &self.active, &self.inactive)
    }

    /// Returns `true` if `value` is one of the two tokens.
    #[must_use]
    pub fn contains(&self, value: &ToggleValue) -> bool {
        value == &self.active || value == &self.inactive
    }
}

impl Default for ToggleTokens {
    fn default() -> Self {
        Self::new(true, false)
    }
}
