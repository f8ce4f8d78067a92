//! Memo table of the Apply algorithm.
//!
//! Apply results are keyed by the operator and the pair of operand ids. The
//! memo never loses entries, so within its lifetime a sub-problem is solved at
//! most once. Its lifetime is set by the [`CachePolicy`].

use std::collections::HashMap;

use log::debug;

use crate::op::BoolOp;
use crate::reference::NodeId;

/// Lifetime of the Apply memo table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum CachePolicy {
    /// A fresh memo for every `apply` call.
    #[default]
    PerCall,
    /// One memo shared by all `apply` calls of the builder.
    Persistent,
}

pub(crate) struct ApplyMemo {
    policy: CachePolicy,
    bits: usize,
    map: HashMap<(BoolOp, NodeId, NodeId), NodeId>,
    hits: usize,
    misses: usize,
}

impl ApplyMemo {
    pub(crate) fn new(policy: CachePolicy, bits: usize) -> Self {
        assert!(bits <= 31, "Memo bits should be in the range 0..=31");
        let map = match policy {
            CachePolicy::PerCall => HashMap::new(),
            CachePolicy::Persistent => HashMap::with_capacity(1 << bits),
        };
        Self {
            policy,
            bits,
            map,
            hits: 0,
            misses: 0,
        }
    }

    /// Prepare the memo for a new `apply` call.
    pub(crate) fn start(&mut self) {
        if self.policy == CachePolicy::PerCall {
            if !self.map.is_empty() {
                debug!("memo: dropping {} entries", self.map.len());
                self.map.clear();
            }
            self.map.reserve(1 << self.bits);
        }
    }

    pub(crate) fn get(&mut self, op: BoolOp, u: NodeId, v: NodeId) -> Option<NodeId> {
        match self.map.get(&(op, u, v)) {
            Some(&res) => {
                self.hits += 1;
                Some(res)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub(crate) fn insert(&mut self, op: BoolOp, u: NodeId, v: NodeId, res: NodeId) {
        self.map.insert((op, u, v), res);
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Cumulative over all `apply` calls, whatever the policy.
    pub(crate) fn hits(&self) -> usize {
        self.hits
    }

    pub(crate) fn misses(&self) -> usize {
        self.misses
    }
}
