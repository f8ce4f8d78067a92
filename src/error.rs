use thiserror::Error;

use crate::builder::BuilderId;

/// Errors reported by [`Builder`][crate::builder::Builder] operations.
///
/// Both kinds are caller misuse. A failed call leaves the builder unchanged.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum BddError {
    #[error("diagram from builder {found} cannot be combined by builder {expected}")]
    IncompatibleBuilder {
        expected: BuilderId,
        found: BuilderId,
    },

    #[error("unknown boolean operator {0}")]
    UnknownOperator(u8),
}

pub type Result<T> = std::result::Result<T, BddError>;
