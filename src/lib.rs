//! # robdd: Reduced Ordered Binary Decision Diagrams
//!
//! **`robdd`** builds canonical, maximally-shared DAG representations of
//! boolean functions, combines them with binary boolean operators, and answers
//! satisfiability queries.
//!
//! ## What is an ROBDD?
//!
//! A Reduced Ordered Binary Decision Diagram represents a boolean function as
//! a DAG of decision nodes, each testing one variable. Variables are tested
//! in a fixed order along every path, no node has two equal children, and no
//! two nodes are structurally equal. Under these rules every function has
//! exactly one diagram, so equivalence of two functions is an id comparison.
//!
//! ## Key Features
//!
//! - **Builder-Centric Architecture**: All nodes live in a [`Builder`], which
//!   hash-conses them and hands out lightweight [`Diagram`] handles.
//! - **Apply**: every binary operator ([`BoolOp`]) is computed by one memoized
//!   co-traversal of both operands.
//! - **Monotonic Growth**: nodes are never freed while the builder lives, so
//!   node ids stay stable.
//! - **0-Based Indexing**: variables are plain `u32` indices starting at 0.
//!
//! ## Basic Usage
//!
//! ```rust
//! use robdd::builder::Builder;
//! use robdd::op::BoolOp;
//!
//! let builder = Builder::new();
//!
//! let x0 = builder.new_literal(0);
//! let x1 = builder.new_literal(1);
//!
//! // f = x0 AND x1
//! let f = builder.apply(BoolOp::And, x0, x1)?;
//!
//! let model = f.any_sat().expect("f is satisfiable");
//! assert!(f.eval(&model));
//! assert_eq!(f.size(), 4);
//!
//! // Diagrams of different builders do not mix.
//! let other = Builder::new();
//! assert!(builder.apply(BoolOp::Or, f, other.new_literal(0)).is_err());
//! # Ok::<(), robdd::error::BddError>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`builder`]**: the [`Builder`] and the Apply algorithm.
//! - **[`diagram`]**: the [`Diagram`] handle.
//! - **[`sat`]**: satisfying assignments, node and model counting.
//! - **[`table`]**: the unique table enforcing reduction and hash consing.

pub mod builder;
pub mod cache;
pub mod diagram;
pub mod error;
pub mod node;
pub mod op;
pub mod reference;
pub mod sat;
pub mod storage;
pub mod table;
pub mod types;

pub use builder::{Builder, BuilderConfig, CachePolicy};
pub use diagram::Diagram;
pub use error::{BddError, Result};
pub use op::BoolOp;
pub use sat::Assignment;
pub use types::Var;
