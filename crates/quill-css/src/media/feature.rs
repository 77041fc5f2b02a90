//! [Media Queries § 4 Media features](https://www.w3.org/TR/mediaqueries-4/#mq-features)

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A known media feature name, vendor extensions included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum MediaExpressionFeature {
    Width,
    MinWidth,
    MaxWidth,
    Height,
    MinHeight,
    MaxHeight,
    DeviceWidth,
    MinDeviceWidth,
    MaxDeviceWidth,
    DeviceHeight,
    MinDeviceHeight,
    MaxDeviceHeight,
    Orientation,
    AspectRatio,
    MinAspectRatio,
    MaxAspectRatio,
    DeviceAspectRatio,
    MinDeviceAspectRatio,
    MaxDeviceAspectRatio,
    Color,
    MinColor,
    MaxColor,
    ColorIndex,
    MinColorIndex,
    MaxColorIndex,
    Monochrome,
    MinMonochrome,
    MaxMonochrome,
    Resolution,
    MinResolution,
    MaxResolution,
    Scan,
    Grid,
    MaxDevicePixelRatio,
    MinDevicePixelRatio,
    #[strum(serialize = "transform-3d")]
    Transform3d,
    PrefersColorScheme,
    PrefersReducedMotion,
    Hover,
    AnyHover,
    Pointer,
    AnyPointer,
    #[strum(serialize = "-webkit-device-pixel-ratio")]
    WebkitDevicePixelRatio,
    #[strum(serialize = "-webkit-max-device-pixel-ratio")]
    WebkitMaxDevicePixelRatio,
    #[strum(serialize = "-webkit-min-device-pixel-ratio")]
    WebkitMinDevicePixelRatio,
    #[strum(serialize = "-webkit-transform-3d")]
    WebkitTransform3d,
    #[strum(serialize = "-ms-high-contrast")]
    MsHighContrast,
    #[strum(serialize = "-ms-view-state")]
    MsViewState,
    #[strum(serialize = "-moz-max-device-pixel-ratio")]
    MozMaxDevicePixelRatio,
    #[strum(serialize = "-moz-min-device-pixel-ratio")]
    MozMinDevicePixelRatio,
    #[strum(serialize = "max--moz-device-pixel-ratio")]
    MaxMozDevicePixelRatio,
    #[strum(serialize = "min--moz-device-pixel-ratio")]
    MinMozDevicePixelRatio,
    #[strum(serialize = "-moz-images-in-menus")]
    MozImagesInMenus,
    #[strum(serialize = "-moz-mac-graphite-theme")]
    MozMacGraphiteTheme,
    #[strum(serialize = "-moz-maemo-classic")]
    MozMaemoClassic,
    #[strum(serialize = "-moz-device-pixel-ratio")]
    MozDevicePixelRatio,
    #[strum(serialize = "-moz-os-version")]
    MozOsVersion,
    #[strum(serialize = "-moz-scrollbar-end-backward")]
    MozScrollbarEndBackward,
    #[strum(serialize = "-moz-scrollbar-end-forward")]
    MozScrollbarEndForward,
    #[strum(serialize = "-moz-scrollbar-start-backward")]
    MozScrollbarStartBackward,
    #[strum(serialize = "-moz-scrollbar-start-forward")]
    MozScrollbarStartForward,
    #[strum(serialize = "-moz-scrollbar-thumb-proportional")]
    MozScrollbarThumbProportional,
    #[strum(serialize = "-moz-touch-enabled")]
    MozTouchEnabled,
    #[strum(serialize = "-moz-windows-classic")]
    MozWindowsClassic,
    #[strum(serialize = "-moz-windows-compositor")]
    MozWindowsCompositor,
    #[strum(serialize = "-moz-windows-default-theme")]
    MozWindowsDefaultTheme,
    #[strum(serialize = "-moz-windows-glass")]
    MozWindowsGlass,
    #[strum(serialize = "-moz-windows-theme")]
    MozWindowsTheme,
}

impl MediaExpressionFeature {
    /// The feature name as written in CSS.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Look up a feature by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    /// Returns `true` for `-webkit-` features.
    #[must_use]
    pub fn is_webkit_specific(self) -> bool {
        self.name().starts_with("-webkit-")
    }

    /// Returns `true` for Mozilla features, including `min--moz-*`.
    #[must_use]
    pub fn is_mozilla_specific(self) -> bool {
        self.name().contains("-moz-")
    }

    /// Returns `true` for `-ms-` features.
    #[must_use]
    pub fn is_microsoft_specific(self) -> bool {
        self.name().starts_with("-ms-")
    }

    /// Returns `true` for any vendor extension.
    #[must_use]
    pub fn is_vendor_specific(self) -> bool {
        let name = self.name();
        name.starts_with('-') || name.contains("--")
    }
}
