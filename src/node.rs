use crate::reference::NodeId;
use crate::types::Var;

/// A decision node: if `variable` then `high` else `low`.
///
/// Only inner nodes have a record; the terminals are the reserved ids
/// [`NodeId::FALSE`] and [`NodeId::TRUE`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Node {
    pub variable: Var,
    pub low: NodeId,
    pub high: NodeId,
}

impl Node {
    pub fn new(variable: Var, low: NodeId, high: NodeId) -> Self {
        Self {
            variable,
            low,
            high,
        }
    }

    /// Returns the child followed when `variable` takes the given value.
    pub fn child(&self, value: bool) -> NodeId {
        if value {
            self.high
        } else {
            self.low
        }
    }
}
