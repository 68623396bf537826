//! Boolean gates for option visibility.
//!
//! A [`Flag`] is a shared mutable leaf: cloning it shares the underlying
//! cell, so several options can gate on the same fact and a single `set`
//! flips them all at once. [`Condition`] combines leaves with `not`/`or`;
//! derived nodes hold no cached state and re-read their operands on every
//! [`Condition::value`] call.

use std::cell::Cell;
use std::rc::Rc;

/// A shared mutable boolean leaf.
#[derive(Debug, Clone, Default)]
pub struct Flag(Rc<Cell<bool>>);

impl Flag {
    /// Create a flag with an initial value.
    pub fn new(value: bool) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    /// Read the current value.
    pub fn get(&self) -> bool {
        self.0.get()
    }

    /// Set the value. Visible immediately through every clone and every
    /// condition built on this leaf.
    pub fn set(&self, value: bool) {
        self.0.set(value);
    }
}

/// A boolean expression over shared flags.
///
/// The graph is acyclic by construction: combinators only wrap
/// already-built conditions.
#[derive(Debug, Clone)]
pub enum Condition {
    /// Reads a shared mutable leaf.
    Flag(Flag),
    /// Logical NOT of the inner condition.
    Not(Box<Condition>),
    /// Logical OR of the two operands.
    Or(Box<Condition>, Box<Condition>),
    /// A constant, for gating fixed at authoring time.
    Fixed(bool),
}

impl Default for Condition {
    fn default() -> Self {
        Self::Fixed(true)
    }
}

impl Condition {
    /// A condition that always holds.
    pub fn always() -> Self {
        Self::Fixed(true)
    }

    /// A condition that never holds.
    pub fn never() -> Self {
        Self::Fixed(false)
    }

    /// Evaluate the condition. Derived nodes recompute from their operands
    /// each call.
    pub fn value(&self) -> bool {
        match self {
            Self::Flag(flag) => flag.get(),
            Self::Not(inner) => !inner.value(),
            Self::Or(a, b) => a.value() || b.value(),
            Self::Fixed(value) => *value,
        }
    }

    /// Negate this condition.
    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Combine with another condition; holds when either does.
    #[must_use]
    pub fn or(self, other: impl Into<Condition>) -> Self {
        Self::Or(Box::new(self), Box::new(other.into()))
    }
}

impl From<Flag> for Condition {
    fn from(flag: Flag) -> Self {
        Self::Flag(flag)
    }
}

impl From<bool> for Condition {
    fn from(value: bool) -> Self {
        Self::Fixed(value)
    }
}
