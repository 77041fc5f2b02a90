//! Browser vendor prefixes.

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A vendor prefix as it appears in front of a property or at-rule name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum VendorPrefix {
    /// Apple
    #[strum(serialize = "-apple-")]
    Apple,
    /// ATSC digital television
    #[strum(serialize = "-atsc-")]
    Atsc,
    /// EPUB
    #[strum(serialize = "-epub-")]
    Epub,
    /// Konqueror
    #[strum(serialize = "-khtml-")]
    Khtml,
    /// Microsoft
    #[strum(serialize = "-ms-")]
    Microsoft,
    /// Microsoft Office
    #[strum(serialize = "mso-")]
    MicrosoftOffice,
    /// Mozilla
    #[strum(serialize = "-moz-")]
    Mozilla,
    /// Opera
    #[strum(serialize = "-o-")]
    Opera,
    /// Internet Explorer scrollbar colors
    #[strum(serialize = "scrollbar-")]
    Scrollbar,
    /// WAP forum
    #[strum(serialize = "-wap-")]
    Wap,
    /// WebKit and Blink
    #[strum(serialize = "-webkit-")]
    Webkit,
}

impl VendorPrefix {
    /// The prefix text, e.g. `"-moz-"`.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        self.into()
    }

    /// The prefix `name` starts with, if any.
    ///
    /// ```
    /// use quill_css::property::vendor::VendorPrefix;
    ///
    /// assert_eq!(VendorPrefix::of_name("-webkit-transition"), Some(VendorPrefix::Webkit));
    /// assert_eq!(VendorPrefix::of_name("transition"), None);
    /// ```
    #[must_use]
    pub fn of_name(name: &str) -> Option<Self> {
        Self::iter().find(|vendor| name.starts_with(vendor.prefix()))
    }

    /// `name` with this prefix in front.
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        format!("{}{name}", self.prefix())
    }
}

/// Returns `true` if `name` starts with a known vendor prefix.
#[must_use]
pub fn is_vendor_specific(name: &str) -> bool {
    VendorPrefix::of_name(name).is_some()
}
