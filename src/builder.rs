//! The ROBDD builder.
//!
//! A [`Builder`] owns the node table and is the sharing boundary of the crate:
//! every [`Diagram`] it hands out references nodes stored inside it, and only
//! diagrams from the same builder can be combined.
//!
//! # Apply
//!
//! All binary operators go through [`Builder::apply`], a synchronized
//! co-traversal of both operands. At each step the top variable `m` is the
//! smaller of the two root variables; each operand is split into its
//! cofactors with respect to `m` (an operand not testing `m` is held fixed),
//! the cofactor pairs are combined recursively, and the result is rebuilt with
//! [`NodeTable::get_or_create`]. Sub-problems are memoized on the pair of node
//! ids, which bounds the work by `|A| * |B|`.
//!
//! # Threads
//!
//! The builder is single-writer. It mutates its table through a `RefCell`,
//! which makes it `Send` but not `Sync`: concurrent mutation does not compile.
//! To share one builder between threads, wrap it in a `Mutex`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

pub use crate::cache::CachePolicy;

use crate::cache::ApplyMemo;
use crate::diagram::Diagram;
use crate::error::{BddError, Result};
use crate::node::Node;
use crate::op::BoolOp;
use crate::reference::NodeId;
use crate::table::NodeTable;
use crate::types::Var;

static NEXT_BUILDER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Builder`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BuilderId(u64);

impl BuilderId {
    fn fresh() -> Self {
        BuilderId(NEXT_BUILDER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BuilderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BuilderConfig {
    /// Node storage grows by blocks of `2^block_bits` nodes.
    pub block_bits: usize,
    /// Initial capacity of the Apply memo is `2^memo_bits` entries.
    pub memo_bits: usize,
    pub cache_policy: CachePolicy,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            block_bits: 10,
            memo_bits: 10,
            cache_policy: CachePolicy::PerCall,
        }
    }
}

impl BuilderConfig {
    pub fn with_block_bits(mut self, bits: usize) -> Self {
        self.block_bits = bits;
        self
    }

    pub fn with_memo_bits(mut self, bits: usize) -> Self {
        self.memo_bits = bits;
        self
    }

    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }
}

pub struct Builder {
    id: BuilderId,
    config: BuilderConfig,
    table: RefCell<NodeTable>,
    memo: RefCell<ApplyMemo>,
    /// One past the largest variable index seen by `new_literal`.
    num_vars: Cell<u64>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("Builder")
            .field("id", &self.id)
            .field("num_vars", &self.num_vars.get())
            .field("num_nodes", &table.len())
            .field("num_blocks", &table.num_blocks())
            .field("memo_len", &self.memo_len())
            .finish()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        assert!(
            config.block_bits <= 31,
            "Block bits should be in the range 0..=31"
        );
        assert!(
            config.memo_bits <= 31,
            "Memo bits should be in the range 0..=31"
        );

        let id = BuilderId::fresh();
        debug!("builder {}: created with {:?}", id, config);

        Self {
            id,
            config,
            table: RefCell::new(NodeTable::new(config.block_bits)),
            memo: RefCell::new(ApplyMemo::new(config.cache_policy, config.memo_bits)),
            num_vars: Cell::new(0),
        }
    }

    pub fn id(&self) -> BuilderId {
        self.id
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// One past the largest variable index passed to [`Builder::new_literal`].
    ///
    /// Bookkeeping only: it plays no role in the construction of diagrams.
    pub fn num_vars(&self) -> u64 {
        self.num_vars.get()
    }

    /// Number of inner nodes allocated so far.
    pub fn num_nodes(&self) -> usize {
        self.table.borrow().len()
    }

    /// Cumulative number of Apply memo hits.
    pub fn cache_hits(&self) -> usize {
        self.memo.borrow().hits()
    }

    /// Cumulative number of Apply memo misses.
    pub fn cache_misses(&self) -> usize {
        self.memo.borrow().misses()
    }

    /// Number of entries currently held by the Apply memo.
    pub(crate) fn memo_len(&self) -> usize {
        self.memo.borrow().len()
    }

    pub(crate) fn table(&self) -> std::cell::Ref<'_, NodeTable> {
        self.table.borrow()
    }

    /// Copy of the record of an inner node, or `None` for terminals.
    pub fn node(&self, id: NodeId) -> Option<Node> {
        if id.is_terminal() {
            None
        } else {
            Some(*self.table.borrow().node(id))
        }
    }

    /// Canonical constructor: the diagram `if variable then high else low`.
    ///
    /// # Panics
    ///
    /// Panics if `variable` does not precede the top variables of both children.
    pub fn get_or_create<'b>(
        &'b self,
        variable: Var,
        low: Diagram<'_>,
        high: Diagram<'_>,
    ) -> Result<Diagram<'b>> {
        self.check_owner(low)?;
        self.check_owner(high)?;
        for child in [low, high] {
            if let Some(v) = child.variable() {
                assert!(
                    variable.precedes(v),
                    "Variable {} must precede the top variable {} of child {}",
                    variable,
                    v,
                    child.root()
                );
            }
        }
        let root = self
            .table
            .borrow_mut()
            .get_or_create(variable, low.root(), high.root());
        Ok(Diagram::new(self, root))
    }

    pub fn constant(&self, value: bool) -> Diagram<'_> {
        Diagram::new(self, NodeId::terminal(value))
    }

    pub fn zero(&self) -> Diagram<'_> {
        self.constant(false)
    }

    pub fn one(&self) -> Diagram<'_> {
        self.constant(true)
    }

    /// The diagram of "`variable` is true".
    ///
    /// ```
    /// use robdd::builder::Builder;
    ///
    /// let builder = Builder::new();
    /// let x = builder.new_literal(3);
    /// assert_eq!(x, builder.new_literal(3));
    /// assert_eq!(x.size(), 3);
    /// ```
    pub fn new_literal(&self, index: u32) -> Diagram<'_> {
        let variable = Var::new(index);
        let root = self
            .table
            .borrow_mut()
            .get_or_create(variable, NodeId::FALSE, NodeId::TRUE);
        let seen = index as u64 + 1;
        if seen > self.num_vars.get() {
            self.num_vars.set(seen);
        }
        Diagram::new(self, root)
    }

    fn check_owner(&self, diagram: Diagram<'_>) -> Result<()> {
        let found = diagram.builder().id();
        if found != self.id {
            return Err(BddError::IncompatibleBuilder {
                expected: self.id,
                found,
            });
        }
        Ok(())
    }

    /// Combine two diagrams of this builder with a boolean operator.
    ///
    /// Fails with [`BddError::IncompatibleBuilder`] if either operand belongs
    /// to another builder; nothing is traversed or allocated in that case.
    ///
    /// ```
    /// use robdd::builder::Builder;
    /// use robdd::op::BoolOp;
    ///
    /// let builder = Builder::new();
    /// let x = builder.new_literal(0);
    /// let y = builder.new_literal(1);
    /// let f = builder.apply(BoolOp::And, x, y)?;
    /// let g = builder.apply(BoolOp::And, y, x)?;
    /// assert_eq!(f, g);
    /// # Ok::<(), robdd::error::BddError>(())
    /// ```
    pub fn apply<'b>(&'b self, op: BoolOp, a: Diagram<'_>, b: Diagram<'_>) -> Result<Diagram<'b>> {
        self.check_owner(a)?;
        self.check_owner(b)?;
        debug!("apply(op = {}, a = {}, b = {})", op, a.root(), b.root());

        let mut table = self.table.borrow_mut();
        let mut memo = self.memo.borrow_mut();
        memo.start();
        let root = apply_iter(&mut table, &mut memo, op, a.root(), b.root());
        debug!("apply(op = {}, a = {}, b = {}) -> {}", op, a.root(), b.root(), root);
        Ok(Diagram::new(self, root))
    }

    /// Like [`Builder::apply`], with the operator given by its code.
    ///
    /// Codes outside the enumerated set fail with [`BddError::UnknownOperator`].
    pub fn apply_code<'b>(&'b self, code: u8, a: Diagram<'_>, b: Diagram<'_>) -> Result<Diagram<'b>> {
        let op = BoolOp::try_from(code)?;
        self.apply(op, a, b)
    }

    pub fn and<'b>(&'b self, a: Diagram<'_>, b: Diagram<'_>) -> Result<Diagram<'b>> {
        self.apply(BoolOp::And, a, b)
    }

    pub fn or<'b>(&'b self, a: Diagram<'_>, b: Diagram<'_>) -> Result<Diagram<'b>> {
        self.apply(BoolOp::Or, a, b)
    }

    pub fn xor<'b>(&'b self, a: Diagram<'_>, b: Diagram<'_>) -> Result<Diagram<'b>> {
        self.apply(BoolOp::Xor, a, b)
    }

    pub fn iff<'b>(&'b self, a: Diagram<'_>, b: Diagram<'_>) -> Result<Diagram<'b>> {
        self.apply(BoolOp::Iff, a, b)
    }

    pub fn implies<'b>(&'b self, a: Diagram<'_>, b: Diagram<'_>) -> Result<Diagram<'b>> {
        self.apply(BoolOp::Implies, a, b)
    }

    /// Negation, computed as `a XOR true`.
    pub fn not<'b>(&'b self, a: Diagram<'_>) -> Result<Diagram<'b>> {
        self.apply(BoolOp::Xor, a, self.one())
    }

    pub fn and_all<'b, 'd>(
        &'b self,
        diagrams: impl IntoIterator<Item = Diagram<'d>>,
    ) -> Result<Diagram<'b>> {
        debug!("and_all(...)");
        diagrams
            .into_iter()
            .try_fold(self.one(), |acc, d| self.and(acc, d))
    }

    pub fn or_all<'b, 'd>(
        &'b self,
        diagrams: impl IntoIterator<Item = Diagram<'d>>,
    ) -> Result<Diagram<'b>> {
        debug!("or_all(...)");
        diagrams
            .into_iter()
            .try_fold(self.zero(), |acc, d| self.or(acc, d))
    }
}

/// Cofactors of `node` with respect to the top variable `m`.
///
/// A node that does not test `m` (including a terminal) does not depend on it,
/// so both cofactors are the node itself.
fn top_cofactors(table: &NodeTable, node: NodeId, m: Var) -> (NodeId, NodeId) {
    if node.is_terminal() {
        return (node, node);
    }
    let n = table.node(node);
    if n.variable == m {
        (n.low, n.high)
    } else {
        debug_assert!(m.precedes(n.variable));
        (node, node)
    }
}

/// Pending work of the Apply traversal.
enum Step {
    /// Solve the pair `(u, v)`, leaving its result on the result stack.
    Visit(NodeId, NodeId),
    /// Both cofactor results of `(u, v)` are on the result stack: high on top.
    Build(NodeId, NodeId, Var),
}

/// The top variable of a pair with at least one inner node.
///
/// Terminals order after every variable, so this is the smallest variable
/// among the non-terminal operands.
fn top_variable(table: &NodeTable, u: NodeId, v: NodeId) -> Var {
    match (table.variable(u), table.variable(v)) {
        (Some(i), Some(j)) => i.min(j),
        (Some(i), None) => i,
        (None, Some(j)) => j,
        (None, None) => unreachable!("both operands are terminals"),
    }
}

/// Depth-first Apply on an explicit work stack.
///
/// The low pair is solved before the high pair. The depth of the operands is
/// bounded by memory, not by the call stack.
fn apply_iter(
    table: &mut NodeTable,
    memo: &mut ApplyMemo,
    op: BoolOp,
    u: NodeId,
    v: NodeId,
) -> NodeId {
    let mut steps = vec![Step::Visit(u, v)];
    let mut results: Vec<NodeId> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(u, v) => {
                if let (Some(a), Some(b)) = (u.as_bool(), v.as_bool()) {
                    results.push(NodeId::terminal(op.eval(a, b)));
                    continue;
                }
                if let Some(res) = memo.get(op, u, v) {
                    debug!("cache: apply(op = {}, u = {}, v = {}) -> {}", op, u, v, res);
                    results.push(res);
                    continue;
                }

                let m = top_variable(table, u, v);
                let (u0, u1) = top_cofactors(table, u, m);
                let (v0, v1) = top_cofactors(table, v, m);
                steps.push(Step::Build(u, v, m));
                steps.push(Step::Visit(u1, v1));
                steps.push(Step::Visit(u0, v0));
            }
            Step::Build(u, v, m) => {
                let (Some(high), Some(low)) = (results.pop(), results.pop()) else {
                    unreachable!("cofactor results of ({}, {}) are missing", u, v);
                };
                let res = table.get_or_create(m, low, high);
                memo.insert(op, u, v, res);
                results.push(res);
            }
        }
    }

    debug_assert_eq!(results.len(), 1);
    match results.pop() {
        Some(root) => root,
        None => unreachable!("apply left no result"),
    }
}
