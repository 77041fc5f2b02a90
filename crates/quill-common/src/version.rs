//! CSS language levels.
//!
//! Every serializable construct reports the minimum level it needs; the
//! writer compares that against the level it was asked to emit.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// A CSS language level.
///
/// Variants are ordered, so `CssVersion::Css21 < CssVersion::Css30`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CssVersion {
    /// [CSS level 1](https://www.w3.org/TR/CSS1/)
    #[strum(serialize = "CSS 1.0")]
    Css10,
    /// [CSS level 2 revision 1](https://www.w3.org/TR/CSS21/)
    #[strum(serialize = "CSS 2.1")]
    Css21,
    /// CSS level 3 modules (selectors, media queries, values, animations, ...)
    #[default]
    #[strum(serialize = "CSS 3.0")]
    Css30,
}

impl CssVersion {
    /// The newest level this toolkit understands.
    pub const LATEST: Self = Self::Css30;

    /// The dotted version number, e.g. `"2.1"`.
    #[must_use]
    pub const fn version_number(self) -> &'static str {
        match self {
            Self::Css10 => "1.0",
            Self::Css21 => "2.1",
            Self::Css30 => "3.0",
        }
    }

    /// Returns `true` when a construct requiring `required` can be written at this level.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        self >= required
    }
}

/// Anything that needs a minimum CSS level to be expressible.
pub trait VersionedObject {
    /// The lowest CSS level in which this object can be written.
    fn min_version(&self) -> CssVersion;
}
