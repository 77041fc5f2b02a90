//! [CSS Values § 5-7](https://www.w3.org/TR/css-values-3/#lengths) units.

use std::fmt::Display;

use quill_common::{CssVersion, VersionedObject};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// What a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// `em`, `ex`, `rem`, `ch`
    FontRelativeLength,
    /// `vw`, `vh`, `vmin`
    ViewportRelativeLength,
    /// `px`, `in`, `cm`, `mm`, `pt`, `pc`
    AbsoluteLength,
    /// `%`
    Percentage,
    /// `deg`, `rad`, `grad`, `turn`
    Angle,
    /// `ms`, `s`
    Time,
    /// `hz`, `khz`
    Frequency,
    /// `dpi`, `dpcm`, `dppx`
    Resolution,
    /// `fr`
    Flex,
}

/// A CSS unit. The textual form is the lowercase suffix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CssUnit {
    /// Font size of the element.
    Em,
    /// x-height of the font.
    Ex,
    /// Pixels.
    Px,
    /// Font size of the root element.
    Rem,
    /// 1% of the viewport width.
    Vw,
    /// 1% of the viewport height.
    Vh,
    /// The smaller of `vw` and `vh`.
    Vmin,
    /// Width of the "0" glyph.
    Ch,
    /// Inches.
    In,
    /// Centimeters.
    Cm,
    /// Millimeters.
    Mm,
    /// Points.
    Pt,
    /// Picas.
    Pc,
    /// Percentage of a reference value.
    #[strum(serialize = "%")]
    Percentage,
    /// Degrees.
    Deg,
    /// Radians.
    Rad,
    /// Gradians.
    Grad,
    /// Turns.
    Turn,
    /// Milliseconds.
    Ms,
    /// Seconds.
    S,
    /// Hertz.
    Hz,
    /// Kilohertz.
    Khz,
    /// Dots per inch.
    Dpi,
    /// Dots per centimeter.
    Dpcm,
    /// Dots per pixel.
    Dppx,
    /// Fraction of the leftover space in a grid container.
    Fr,
}

impl CssUnit {
    /// What the unit measures.
    #[must_use]
    pub const fn kind(self) -> UnitKind {
        match self {
            Self::Em | Self::Ex | Self::Rem | Self::Ch => UnitKind::FontRelativeLength,
            Self::Vw | Self::Vh | Self::Vmin => UnitKind::ViewportRelativeLength,
            Self::Px | Self::In | Self::Cm | Self::Mm | Self::Pt | Self::Pc => UnitKind::AbsoluteLength,
            Self::Percentage => UnitKind::Percentage,
            Self::Deg | Self::Rad | Self::Grad | Self::Turn => UnitKind::Angle,
            Self::Ms | Self::S => UnitKind::Time,
            Self::Hz | Self::Khz => UnitKind::Frequency,
            Self::Dpi | Self::Dpcm | Self::Dppx => UnitKind::Resolution,
            Self::Fr => UnitKind::Flex,
        }
    }

    /// The unit spelled exactly as `suffix`, ignoring ASCII case.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        suffix.parse().ok()
    }

    /// The unit `value` ends with, trying longer unit names first so `1khz`
    /// is not read as `hz`.
    ///
    /// ```
    /// use quill_css::property::unit::CssUnit;
    ///
    /// assert_eq!(CssUnit::of_value("2vmin"), Some(CssUnit::Vmin));
    /// assert_eq!(CssUnit::of_value("50%"), Some(CssUnit::Percentage));
    /// assert_eq!(CssUnit::of_value("auto"), None);
    /// ```
    #[must_use]
    pub fn of_value(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        let mut units: Vec<Self> = Self::iter().collect();
        units.sort_by_key(|unit| std::cmp::Reverse(unit.suffix().len()));
        units.into_iter().find(|unit| value.ends_with(unit.suffix()))
    }

    /// The unit text, e.g. `"px"`.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        self.into()
    }

    /// Render `value` followed by this unit, e.g. `3px`.
    #[must_use]
    pub fn format(self, value: impl Display) -> String {
        format!("{value}{}", self.suffix())
    }
}

impl VersionedObject for CssUnit {
    fn min_version(&self) -> CssVersion {
        match self {
            Self::Em
            | Self::Ex
            | Self::Px
            | Self::In
            | Self::Cm
            | Self::Mm
            | Self::Pt
            | Self::Pc
            | Self::Percentage => CssVersion::Css10,
            Self::Deg | Self::Rad | Self::Grad | Self::Ms | Self::S | Self::Hz | Self::Khz => {
                CssVersion::Css21
            }
            Self::Rem
            | Self::Vw
            | Self::Vh
            | Self::Vmin
            | Self::Ch
            | Self::Turn
            | Self::Dpi
            | Self::Dpcm
            | Self::Dppx
            | Self::Fr => CssVersion::Css30,
        }
    }
}
