//! Unique table for BDD nodes.
//!
//! The table owns every inner node of a builder and is the only way to create
//! one. It maintains two of the canonical-form invariants:
//!
//! 1. **Reduction**: a node with `low == high` is never created.
//! 2. **Uniqueness**: each `(variable, low, high)` triple is stored at most once.
//!
//! Nodes live in a block [`Storage`]; the uniqueness map goes from the node
//! record to its [`NodeId`], so canonical equality is an id comparison.

use std::collections::HashMap;

use log::debug;

use crate::node::Node;
use crate::reference::NodeId;
use crate::storage::Storage;
use crate::types::Var;

pub struct NodeTable {
    storage: Storage<Node>,
    unique: HashMap<Node, NodeId>,
}

impl NodeTable {
    /// Create an empty table whose storage grows by blocks of `2^block_bits` nodes.
    pub fn new(block_bits: usize) -> Self {
        Self {
            storage: Storage::new(block_bits),
            unique: HashMap::new(),
        }
    }

    /// Get the number of inner nodes.
    pub fn len(&self) -> usize {
        self.storage.size()
    }
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
    /// Get the number of storage blocks allocated so far.
    pub fn num_blocks(&self) -> usize {
        self.storage.num_blocks()
    }

    /// Get the record of an inner node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is a terminal or does not belong to this table.
    pub fn node(&self, id: NodeId) -> &Node {
        assert!(!id.is_terminal(), "Terminal {} has no node record", id);
        &self.storage[(id.raw() - NodeId::FIRST_INNER) as usize]
    }

    /// Get the variable tested by `id`, or `None` for terminals.
    pub fn variable(&self, id: NodeId) -> Option<Var> {
        if id.is_terminal() {
            None
        } else {
            Some(self.node(id).variable)
        }
    }

    /// Look up an existing node without creating it.
    pub fn find(&self, variable: Var, low: NodeId, high: NodeId) -> Option<NodeId> {
        self.unique.get(&Node::new(variable, low, high)).copied()
    }

    /// Return the canonical node for `(variable, low, high)`.
    pub fn get_or_create(&mut self, variable: Var, low: NodeId, high: NodeId) -> NodeId {
        if low == high {
            debug!("mk: duplicates {} == {}", low, high);
            return low;
        }

        debug_assert!(
            self.variable(low).map_or(true, |v| variable.precedes(v)),
            "Variable {} must precede the variable of the low child {}",
            variable,
            low
        );
        debug_assert!(
            self.variable(high).map_or(true, |v| variable.precedes(v)),
            "Variable {} must precede the variable of the high child {}",
            variable,
            high
        );

        if let Some(id) = self.find(variable, low, high) {
            debug!("mk({}, {}, {}) -> {} (existing)", variable, low, high, id);
            return id;
        }

        let raw = u32::try_from(self.storage.size())
            .ok()
            .and_then(|n| n.checked_add(NodeId::FIRST_INNER))
            .unwrap_or_else(|| panic!("Node table is full"));
        let node = Node::new(variable, low, high);
        let index = self.storage.add(node);
        let id = NodeId::new(raw);
        debug_assert_eq!(index, (raw - NodeId::FIRST_INNER) as usize);
        self.unique.insert(node, id);
        debug!("mk({}, {}, {}) -> {} (new)", variable, low, high, id);
        id
    }
}
