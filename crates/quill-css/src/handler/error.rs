//! Conversion failures.

use quill_tree::NodeKind;
use thiserror::Error;

/// Why a parse tree could not be turned into domain objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The tree was produced for the other entry point.
    #[error("expected a {expected} parse tree but found {found}")]
    WrongRoot {
        /// The entry kind the conversion needs.
        expected: NodeKind,
        /// The entry kind of the supplied tree.
        found: NodeKind,
    },
    /// Strict mode met a node with no domain mapping in its position.
    #[error("no domain mapping for {0} node")]
    UnknownNode(NodeKind),
    /// Strict mode met a node missing a required part.
    #[error("malformed parse tree: {0}")]
    Malformed(String),
}
