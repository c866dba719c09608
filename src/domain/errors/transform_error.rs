//! Content tree transformation error types.

use thiserror::Error;

/// Faults found while transforming a content tree.
///
/// These never reach callers of the transformer; they are logged and the
/// untransformed tree is rendered instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A node flagged as trusted link carries no target.
    #[error("trusted link at depth {depth} has no target")]
    MissingLinkTarget {
        /// Nesting depth of the offending node.
        depth: usize,
    },

    /// The tree nests deeper than the transformer is willing to recurse.
    #[error("content tree exceeds maximum depth of {max}")]
    TooDeep {
        /// Configured limit.
        max: usize,
    },
}
