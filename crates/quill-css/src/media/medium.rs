//! [Media Queries § 2.3 Media types](https://www.w3.org/TR/mediaqueries-4/#media-types)

use quill_common::{CssVersion, VersionedObject};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Medium {
    /// Every device.
    All,
    /// Speech synthesizers. Replaced by `speech` after CSS 2.0.
    Aural,
    /// Braille tactile feedback devices.
    Braille,
    /// Paged braille printers.
    Embossed,
    /// Handheld devices.
    Handheld,
    /// Paged material and print preview.
    Print,
    /// Projected presentations.
    Projection,
    /// Color computer screens.
    Screen,
    /// Speech synthesizers.
    Speech,
    /// Fixed-pitch character grids.
    Tty,
    /// Television-type devices.
    Tv,
}

impl Medium {
    /// The keyword as written in CSS.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Look up a medium by name, ignoring ASCII case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    /// Returns `true` for media types deprecated by CSS 2.1.
    #[must_use]
    pub const fn is_deprecated(self) -> bool {
        matches!(self, Self::Aural)
    }
}

impl VersionedObject for Medium {
    fn min_version(&self) -> CssVersion {
        match self {
            Self::Speech => CssVersion::Css21,
            _ => CssVersion::Css10,
        }
    }
}
