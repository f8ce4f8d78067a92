use std::fmt::{Display, Formatter};

/// Index of a node in the node table of a [`Builder`][crate::builder::Builder].
///
/// # Invariants
///
/// - `NodeId(0)` is the FALSE terminal
/// - `NodeId(1)` is the TRUE terminal
/// - Inner (decision) nodes start at index 2
///
/// Since nodes are hash-consed, two ids from the same builder are equal
/// if and only if they denote the same boolean function.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The FALSE terminal.
    pub const FALSE: NodeId = NodeId(0);

    /// The TRUE terminal.
    pub const TRUE: NodeId = NodeId(1);

    /// Index of the first inner node.
    pub(crate) const FIRST_INNER: u32 = 2;

    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }

    /// Returns the terminal for the given truth value.
    pub const fn terminal(value: bool) -> Self {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    /// Return the internal representation of the id.
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_terminal(self) -> bool {
        self.0 < Self::FIRST_INNER
    }

    pub const fn is_false(self) -> bool {
        self.0 == Self::FALSE.0
    }

    pub const fn is_true(self) -> bool {
        self.0 == Self::TRUE.0
    }

    /// Returns the truth value of a terminal, or `None` for inner nodes.
    pub const fn as_bool(self) -> Option<bool> {
        match self.0 {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.as_bool() {
            Some(false) => write!(f, "@0"),
            Some(true) => write!(f, "@1"),
            None => write!(f, "@{}", self.0),
        }
    }
}
