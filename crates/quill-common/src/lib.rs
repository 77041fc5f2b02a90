//! Common utilities for the Quill CSS toolkit.
//!
//! This crate provides shared infrastructure used by all Quill components:
//! - **CSS versions** - the ordered set of CSS levels a construct can require
//! - **Source locations** - 1-based line/column positions attached to tokens, nodes and rules
//! - **Warning System** - deduplicated warnings routed through `tracing`

/// Source positions and spans.
pub mod location;
/// CSS language levels.
pub mod version;
/// Deduplicated warnings.
pub mod warning;

pub use location::{LocationSlot, SourceArea, SourceLocation};
pub use version::{CssVersion, VersionedObject};
pub use warning::{clear_warnings, has_warned, warn_once};
