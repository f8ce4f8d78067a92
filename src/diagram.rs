use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::builder::Builder;
use crate::reference::NodeId;
use crate::table::NodeTable;
use crate::types::Var;

/// A handle to a boolean function: a root node of some [`Builder`].
///
/// Diagrams are cheap `Copy` values. They never own nodes; all nodes stay in
/// the builder, which the borrow keeps alive.
///
/// Two diagrams are equal exactly when they come from the same builder and
/// share the root node, which by canonicity means they denote the same
/// function.
#[derive(Copy, Clone)]
pub struct Diagram<'b> {
    builder: &'b Builder,
    root: NodeId,
}

impl<'b> Diagram<'b> {
    pub(crate) fn new(builder: &'b Builder, root: NodeId) -> Self {
        Self { builder, root }
    }

    pub fn builder(&self) -> &'b Builder {
        self.builder
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_zero(&self) -> bool {
        self.root.is_false()
    }

    pub fn is_one(&self) -> bool {
        self.root.is_true()
    }

    pub fn is_terminal(&self) -> bool {
        self.root.is_terminal()
    }

    /// The top variable, or `None` for a constant.
    pub fn variable(&self) -> Option<Var> {
        self.builder.table().variable(self.root)
    }

    /// The cofactor for top variable = false. A constant is its own cofactor.
    pub fn low(&self) -> Diagram<'b> {
        self.child(false)
    }

    /// The cofactor for top variable = true. A constant is its own cofactor.
    pub fn high(&self) -> Diagram<'b> {
        self.child(true)
    }

    fn child(&self, value: bool) -> Diagram<'b> {
        match self.builder.node(self.root) {
            Some(node) => Diagram::new(self.builder, node.child(value)),
            None => *self,
        }
    }

    /// Variables the function depends on, in order.
    pub fn support(&self) -> BTreeSet<Var> {
        let table = self.builder.table();
        self.descendants()
            .into_iter()
            .filter_map(|id| table.variable(id))
            .collect()
    }

    pub fn to_bracket_string(&self) -> String {
        let table = self.builder.table();
        let mut out = String::new();
        bracket(&table, self.root, &mut out);
        out
    }
}

enum Piece {
    Node(NodeId),
    Text(&'static str),
}

/// Writes `@id:(var, high, low)` for inner nodes and `(0)`/`(1)` for terminals.
fn bracket(table: &NodeTable, root: NodeId, out: &mut String) {
    let mut pieces = vec![Piece::Node(root)];
    while let Some(piece) = pieces.pop() {
        let id = match piece {
            Piece::Text(text) => {
                out.push_str(text);
                continue;
            }
            Piece::Node(id) => id,
        };
        match id.as_bool() {
            Some(false) => out.push_str("(0)"),
            Some(true) => out.push_str("(1)"),
            None => {
                let node = table.node(id);
                out.push_str(&format!("{}:({}, ", id, node.variable));
                pieces.push(Piece::Text(")"));
                pieces.push(Piece::Node(node.low));
                pieces.push(Piece::Text(", "));
                pieces.push(Piece::Node(node.high));
            }
        }
    }
}

impl PartialEq for Diagram<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.builder.id() == other.builder.id() && self.root == other.root
    }
}

impl Eq for Diagram<'_> {}

impl Hash for Diagram<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.builder.id().hash(state);
        self.root.hash(state);
    }
}

impl fmt::Debug for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagram")
            .field("builder", &self.builder.id())
            .field("root", &self.root)
            .finish()
    }
}

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bracket_string())
    }
}
