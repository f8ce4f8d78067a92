//! Type-safe wrapper for BDD variables.
//!
//! The variable order of a [`Builder`][crate::builder::Builder] is the natural
//! order of variable indices: `x0` is tested before `x1`, and so on.
use std::fmt;

/// A variable identifier (0-indexed).
///
/// Variables are caller-supplied non-negative integers. The only upper bound
/// is the range of `u32`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given index.
    pub const fn new(index: u32) -> Self {
        Var(index)
    }

    /// Returns the raw variable index as a `u32`.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns `true` if `self` is tested before `other` in the variable order.
    pub fn precedes(self, other: Var) -> bool {
        self.0 < other.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<u32> for Var {
    fn from(index: u32) -> Self {
        Var(index)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}
