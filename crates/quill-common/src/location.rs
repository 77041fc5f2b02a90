//! Source positions attached to tokens, parse nodes and domain objects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 1-based line/column position in the decoded source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1. Counts codepoints, not bytes.
    pub column: usize,
}

impl SourceLocation {
    /// The first character of a document.
    pub const START: Self = Self { line: 1, column: 1 };

    /// Create a location from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span between two locations, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceArea {
    /// Where the span starts.
    pub begin: SourceLocation,
    /// Where the span ends.
    pub end: SourceLocation,
}

impl SourceArea {
    /// Create a span from two locations.
    #[must_use]
    pub const fn new(begin: SourceLocation, end: SourceLocation) -> Self {
        Self { begin, end }
    }

    /// A zero-width span at a single location.
    #[must_use]
    pub const fn at(location: SourceLocation) -> Self {
        Self {
            begin: location,
            end: location,
        }
    }
}

impl fmt::Display for SourceArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}-{}", self.begin, self.end)
        }
    }
}

/// An optional source span carried by a domain object.
///
/// Two slots always compare equal: where a rule came from in the source
/// is not part of what the rule *is*, so structural comparison of two
/// parsed stylesheets ignores positions entirely.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationSlot(Option<SourceArea>);

impl LocationSlot {
    /// An empty slot.
    pub const NONE: Self = Self(None);

    /// Create a slot from an optional span.
    #[must_use]
    pub const fn new(area: Option<SourceArea>) -> Self {
        Self(area)
    }

    /// The stored span, if any.
    #[must_use]
    pub const fn get(&self) -> Option<SourceArea> {
        self.0
    }

    /// Replace the stored span.
    pub const fn set(&mut self, area: Option<SourceArea>) {
        self.0 = area;
    }

    /// Returns `true` if a span is stored.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl PartialEq for LocationSlot {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for LocationSlot {}

impl From<Option<SourceArea>> for LocationSlot {
    fn from(area: Option<SourceArea>) -> Self {
        Self(area)
    }
}

impl From<SourceArea> for LocationSlot {
    fn from(area: SourceArea) -> Self {
        Self(Some(area))
    }
}
