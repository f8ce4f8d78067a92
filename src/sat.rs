//! Satisfiability queries and node counting.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use log::debug;
use num_bigint::BigUint;

use crate::diagram::Diagram;
use crate::reference::NodeId;
use crate::table::NodeTable;
use crate::types::Var;

/// A (possibly partial) assignment of truth values to variables.
///
/// Variables absent from the map are don't-care.
pub type Assignment = BTreeMap<Var, bool>;

impl Diagram<'_> {
    /// Returns one satisfying assignment, or `None` if the function is FALSE.
    ///
    /// The walk starts at the root and never enters a dead branch: when the
    /// low child is FALSE the variable is set to true and the high child is
    /// followed, otherwise the variable is set to false and the low child is
    /// followed. Only the variables on that path are assigned; any completion
    /// of the returned assignment satisfies the function.
    ///
    /// ```
    /// use robdd::builder::Builder;
    ///
    /// let builder = Builder::new();
    /// let x = builder.new_literal(0);
    /// let y = builder.new_literal(1);
    /// let f = builder.and(x, y)?;
    ///
    /// let model = f.any_sat().unwrap();
    /// assert!(f.eval(&model));
    /// assert_eq!(builder.zero().any_sat(), None);
    /// # Ok::<(), robdd::error::BddError>(())
    /// ```
    pub fn any_sat(&self) -> Option<Assignment> {
        let table = self.builder().table();
        let mut assignment = Assignment::new();
        let mut current = self.root();

        loop {
            match current.as_bool() {
                Some(false) => return None,
                Some(true) => return Some(assignment),
                None => {}
            }
            let node = table.node(current);
            if node.low.is_false() {
                assignment.insert(node.variable, true);
                current = node.high;
            } else {
                assignment.insert(node.variable, false);
                current = node.low;
            }
        }
    }

    /// All node ids reachable from the root, terminals included.
    pub fn descendants(&self) -> HashSet<NodeId> {
        let table = self.builder().table();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([self.root()]);

        while let Some(id) = queue.pop_front() {
            if visited.insert(id) && !id.is_terminal() {
                let node = table.node(id);
                queue.push_back(node.low);
                queue.push_back(node.high);
            }
        }

        visited
    }

    /// Number of distinct nodes reachable from the root, terminals included.
    ///
    /// This measures sharing in the DAG, not the number of models.
    pub fn size(&self) -> usize {
        let size = self.descendants().len();
        debug!("size({}) -> {}", self.root(), size);
        size
    }

    /// Evaluate the function on an assignment.
    ///
    /// Variables missing from the assignment read as false.
    pub fn eval(&self, assignment: &Assignment) -> bool {
        let table = self.builder().table();
        let mut current = self.root();
        loop {
            if let Some(value) = current.as_bool() {
                return value;
            }
            let node = table.node(current);
            let value = assignment.get(&node.variable).copied().unwrap_or(false);
            current = node.child(value);
        }
    }

    /// Number of assignments to the variables `0..num_vars` that satisfy the
    /// function.
    ///
    /// # Panics
    ///
    /// Panics if the function depends on a variable outside `0..num_vars`.
    pub fn sat_count(&self, num_vars: u32) -> BigUint {
        let table = self.builder().table();
        let count = sat_count_iter(&table, self.root(), num_vars);
        // The count covers the variables from the root's level downwards.
        count << level(&table, self.root(), num_vars)
    }
}

/// Position of `id` in the variable order; terminals sit below every variable.
fn level(table: &NodeTable, id: NodeId, num_vars: u32) -> u32 {
    table.variable(id).map_or(num_vars, |v| v.index())
}

enum Step {
    Visit(NodeId),
    /// Both child counts are on the result stack: high on top.
    Combine(NodeId),
}

/// Number of satisfying assignments to the variables `level(id)..num_vars`.
///
/// Counting relative to the node's own level keeps the numbers small near
/// the bottom of the diagram. The children's counts are scaled by the levels
/// skipped between the node and each child.
fn sat_count_iter(table: &NodeTable, root: NodeId, num_vars: u32) -> BigUint {
    let mut cache: HashMap<NodeId, BigUint> = HashMap::new();
    let mut steps = vec![Step::Visit(root)];
    let mut results: Vec<BigUint> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(id) => {
                match id.as_bool() {
                    Some(false) => results.push(BigUint::ZERO),
                    Some(true) => results.push(BigUint::from(1u32)),
                    None => match cache.get(&id) {
                        Some(count) => results.push(count.clone()),
                        None => {
                            let node = table.node(id);
                            assert!(
                                node.variable.index() < num_vars,
                                "Variable {} is out of range 0..{}",
                                node.variable,
                                num_vars
                            );
                            steps.push(Step::Combine(id));
                            steps.push(Step::Visit(node.high));
                            steps.push(Step::Visit(node.low));
                        }
                    },
                }
            }
            Step::Combine(id) => {
                let (Some(count_high), Some(count_low)) = (results.pop(), results.pop()) else {
                    unreachable!("child counts of {} are missing", id);
                };
                let node = table.node(id);
                let here = node.variable.index() + 1;
                let skip_low = level(table, node.low, num_vars) - here;
                let skip_high = level(table, node.high, num_vars) - here;
                let count = (count_low << skip_low) + (count_high << skip_high);
                cache.insert(id, count.clone());
                results.push(count);
            }
        }
    }

    match results.pop() {
        Some(count) => count,
        None => unreachable!("sat_count left no result"),
    }
}
