//! The process-wide table of known properties.
//!
//! Built on first use and never mutated afterwards, so it can be shared
//! between threads without locking.

use std::collections::HashMap;
use std::sync::LazyLock;

use quill_common::{CssVersion, VersionedObject};

use super::customizer::{Customizer, customize_border_radius, customize_opacity};
use super::grammar::PropertyKind;
use super::value::CssValue;
use super::vendor::VendorPrefix;

const ATTACHMENT: &[&str] = &["scroll", "fixed", "local"];
const BORDER_STYLE: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];
const OUTLINE_STYLE: &[&str] = &[
    "auto", "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];
const BOX: &[&str] = &["border-box", "padding-box", "content-box"];
const LINE_WIDTH: &[&str] = &["thin", "medium", "thick"];
const REPEAT_STYLE: &[&str] = &["repeat-x", "repeat-y", "repeat", "space", "round", "no-repeat"];
const AUTO: &[&str] = &["auto"];
const NORMAL: &[&str] = &["normal"];

const LENGTH_OR_AUTO: PropertyKind = PropertyKind::EnumOrNumber {
    percentage: true,
    values: AUTO,
};
const LENGTH: PropertyKind = PropertyKind::Number { percentage: true };
const LINE_WIDTH_KIND: PropertyKind = PropertyKind::EnumOrNumber {
    percentage: false,
    values: LINE_WIDTH,
};
const RADIUS: PropertyKind = PropertyKind::Numbers {
    percentage: true,
    min: 1,
    max: 2,
};

/// A known property: its canonical name, value grammar and optional
/// output customizer.
#[derive(Clone, Copy)]
pub struct Property {
    name: &'static str,
    kind: PropertyKind,
    min_version: CssVersion,
    multi_layer: bool,
    customizer: Option<Customizer>,
}

impl Property {
    const fn new(name: &'static str, kind: PropertyKind, min_version: CssVersion) -> Self {
        Self {
            name,
            kind,
            min_version,
            multi_layer: false,
            customizer: None,
        }
    }

    const fn customized(mut self, customizer: Customizer) -> Self {
        self.customizer = Some(customizer);
        self
    }

    /// The canonical lowercase name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The value grammar.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Returns `true` if output of this property is customized.
    #[must_use]
    pub const fn has_customizer(&self) -> bool {
        self.customizer.is_some()
    }

    /// Returns `true` if the property accepts comma separated value layers.
    #[must_use]
    pub const fn is_multi_layer(&self) -> bool {
        self.multi_layer
    }

    /// Check a raw value against the property's grammar.
    #[must_use]
    pub fn is_valid_value(&self, value: &str) -> bool {
        if self.multi_layer {
            self.kind.is_valid_layered_value(value)
        } else {
            self.kind.is_valid_value(value)
        }
    }

    /// The value as it should be emitted, validated against the grammar.
    #[must_use]
    pub fn create_value(&self, value: &str, important: bool) -> CssValue {
        CssValue::new(self, value, important)
    }

    /// Every declaration to emit for `value`: the vendor specific variants
    /// produced by the customizer, if any, followed by the standard one.
    #[must_use]
    pub fn create_values(&self, value: &str, important: bool) -> Vec<CssValue> {
        let mut values = self
            .customizer
            .and_then(|customizer| customizer(self, value.trim(), important))
            .unwrap_or_default();
        values.push(self.create_value(value, important));
        values
    }
}

impl VersionedObject for Property {
    fn min_version(&self) -> CssVersion {
        self.min_version
    }
}

impl core::fmt::Debug for Property {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("min_version", &self.min_version)
            .field("multi_layer", &self.multi_layer)
            .field("customizer", &self.customizer.is_some())
            .finish()
    }
}

static PROPERTIES: LazyLock<HashMap<&'static str, Property>> = LazyLock::new(|| {
    use CssVersion::{Css10, Css21, Css30};
    use PropertyKind::{
        Color, Colors, Double, Enum, EnumOrColor, EnumOrColors, EnumOrInt, EnumOrNumber, EnumOrNumbers, EnumOrRect,
        EnumOrUrl, Enums, Free, Long, Number,
    };

    let mut table = vec![
        // Fonts
        Property::new("font-family", Free, Css10),
        Property::new("font-style", Enum(&["italic", "oblique", "normal"]), Css10),
        Property::new("font-variant", Enum(&["small-caps", "normal"]), Css10),
        Property::new(
            "font-size",
            EnumOrNumber {
                percentage: true,
                values: &[
                    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "smaller", "larger",
                ],
            },
            Css10,
        ),
        Property::new(
            "font-weight",
            Enum(&[
                "bold", "bolder", "lighter", "normal", "100", "200", "300", "400", "500", "600", "700", "800", "900",
            ]),
            Css10,
        ),
        // Text
        Property::new("word-spacing", Number { percentage: false }, Css10),
        Property::new("letter-spacing", Number { percentage: false }, Css10),
        Property::new(
            "text-decoration",
            Enum(&["underline", "overline", "line-through", "blink", "none"]),
            Css10,
        ),
        Property::new(
            "text-transform",
            Enum(&["capitalize", "uppercase", "lowercase", "none"]),
            Css10,
        ),
        Property::new("color", Color, Css10),
        Property::new("text-indent", LENGTH, Css10),
        Property::new(
            "line-height",
            EnumOrNumber {
                percentage: true,
                values: NORMAL,
            },
            Css10,
        ),
        Property::new(
            "vertical-align",
            Enum(&["top", "middle", "bottom", "baseline", "sub", "super", "text-top", "text-bottom"]),
            Css10,
        ),
        Property::new("text-align", Enum(&["left", "center", "right", "justify"]), Css10),
        Property::new(
            "white-space",
            Enum(&["normal", "pre", "nowrap", "pre-line", "pre-wrap"]),
            Css10,
        ),
        // Box
        Property::new("margin-top", LENGTH_OR_AUTO, Css10),
        Property::new("margin-right", LENGTH_OR_AUTO, Css10),
        Property::new("margin-bottom", LENGTH_OR_AUTO, Css10),
        Property::new("margin-left", LENGTH_OR_AUTO, Css10),
        Property::new(
            "margin",
            EnumOrNumbers {
                percentage: true,
                min: 1,
                max: 4,
                values: AUTO,
            },
            Css10,
        ),
        Property::new("padding-top", LENGTH_OR_AUTO, Css10),
        Property::new("padding-right", LENGTH_OR_AUTO, Css10),
        Property::new("padding-bottom", LENGTH_OR_AUTO, Css10),
        Property::new("padding-left", LENGTH_OR_AUTO, Css10),
        Property::new(
            "padding",
            EnumOrNumbers {
                percentage: true,
                min: 1,
                max: 4,
                values: AUTO,
            },
            Css10,
        ),
        // Lists and tables
        Property::new(
            "list-style-type",
            Enum(&[
                "decimal",
                "lower-roman",
                "upper-roman",
                "lower-alpha",
                "upper-alpha",
                "lower-latin",
                "upper-latin",
                "disc",
                "circle",
                "square",
                "none",
            ]),
            Css10,
        ),
        Property::new("list-style-position", Enum(&["inside", "outside"]), Css10),
        Property::new("list-style-image", EnumOrUrl(&["none"]), Css10),
        Property::new("list-style", Free, Css10),
        Property::new("caption-side", Enum(&["top", "bottom"]), Css21),
        Property::new("table-layout", Enum(&["auto", "fixed"]), Css21),
        Property::new("border-collapse", Enum(&["separate", "collapse"]), Css21),
        Property::new("border-spacing", LENGTH, Css21),
        Property::new("empty-cells", Enum(&["show", "hide"]), Css21),
        Property::new("speak-header", Enum(&["always", "once"]), Css21),
        // Positioning
        Property::new("position", Enum(&["static", "relative", "absolute", "fixed", "sticky"]), Css21),
        Property::new("top", LENGTH_OR_AUTO, Css21),
        Property::new("left", LENGTH_OR_AUTO, Css21),
        Property::new("bottom", LENGTH_OR_AUTO, Css21),
        Property::new("right", LENGTH_OR_AUTO, Css21),
        Property::new("width", LENGTH_OR_AUTO, Css10),
        Property::new("min-width", LENGTH, Css21),
        Property::new("max-width", LENGTH, Css21),
        Property::new("height", LENGTH_OR_AUTO, Css10),
        Property::new("min-height", LENGTH, Css21),
        Property::new("max-height", LENGTH, Css21),
        Property::new("overflow", Enum(&["visible", "hidden", "scroll", "auto"]), Css21),
        Property::new("float", Enum(&["left", "right", "none"]), Css10),
        Property::new("clear", Enum(&["left", "right", "both", "none"]), Css10),
        Property::new("z-index", EnumOrInt(AUTO), Css21),
        Property::new(
            "display",
            Enum(&[
                "block",
                "inline",
                "inline-block",
                "list-item",
                "run-in",
                "none",
                "table",
                "inline-table",
                "table-row",
                "table-cell",
                "table-row-group",
                "table-header-group",
                "table-footer-group",
                "table-column",
                "table-column-group",
                "table-caption",
                "flex",
                "inline-flex",
                "grid",
                "inline-grid",
                "contents",
            ]),
            Css10,
        ),
        Property::new("visibility", Enum(&["visible", "hidden", "collapse"]), Css21),
        Property::new("clip", EnumOrRect(AUTO), Css21),
        Property::new("opacity", Double, Css30).customized(customize_opacity),
        // Writing modes
        Property::new("direction", Enum(&["ltr", "rtl"]), Css21),
        Property::new("text-combine-upright", Enum(&["none", "all"]), Css30),
        Property::new("text-orientation", Enum(&["mixed", "upright", "sideways"]), Css30),
        Property::new(
            "unicode-bidi",
            Enum(&["normal", "embed", "isolate", "bidi-override", "isolate-override", "plaintext"]),
            Css21,
        ),
        Property::new(
            "writing-mode",
            Enum(&["horizontal-tb", "vertical-rl", "vertical-lr"]),
            Css30,
        ),
        // User interface
        Property::new("box-sizing", Enum(&["content-box", "border-box"]), Css30),
        Property::new("caret-color", EnumOrColor(AUTO), Css30),
        Property::new(
            "cursor",
            Enum(&[
                "auto",
                "default",
                "none",
                "context-menu",
                "help",
                "pointer",
                "progress",
                "wait",
                "cell",
                "crosshair",
                "text",
                "vertical-text",
                "alias",
                "copy",
                "move",
                "no-drop",
                "not-allowed",
                "grab",
                "grabbing",
                "e-resize",
                "n-resize",
                "ne-resize",
                "nw-resize",
                "s-resize",
                "se-resize",
                "sw-resize",
                "w-resize",
                "ew-resize",
                "ns-resize",
                "nesw-resize",
                "nwse-resize",
                "col-resize",
                "row-resize",
                "all-scroll",
                "zoom-in",
                "zoom-out",
            ]),
            Css21,
        ),
        Property::new("outline", Free, Css21),
        Property::new(
            "outline-color",
            EnumOrColors {
                min: 1,
                max: 4,
                values: &["invert"],
            },
            Css21,
        ),
        Property::new("outline-offset", Number { percentage: false }, Css30),
        Property::new(
            "outline-style",
            Enums {
                min: 1,
                max: 4,
                values: OUTLINE_STYLE,
            },
            Css21,
        ),
        Property::new(
            "outline-width",
            EnumOrNumbers {
                percentage: false,
                min: 1,
                max: 4,
                values: LINE_WIDTH,
            },
            Css21,
        ),
        Property::new("resize", Enum(&["none", "both", "horizontal", "vertical"]), Css30),
        Property::new("text-overflow", Enum(&["clip", "ellipsis"]), Css30),
        // Backgrounds
        Property::new("background", Free, Css10),
        Property::new("background-attachment", Enum(ATTACHMENT), Css10),
        Property::new("background-clip", Enum(BOX), Css30),
        Property::new("background-color", Color, Css10),
        Property::new("background-image", EnumOrUrl(&["none"]), Css10),
        Property::new("background-origin", Enum(BOX), Css30),
        Property::new(
            "background-position",
            EnumOrNumbers {
                percentage: true,
                min: 1,
                max: 2,
                values: &["top", "bottom", "center", "left", "right"],
            },
            Css10,
        ),
        Property::new(
            "background-repeat",
            Enums {
                min: 1,
                max: 2,
                values: REPEAT_STYLE,
            },
            Css10,
        ),
        Property::new(
            "background-size",
            EnumOrNumbers {
                percentage: true,
                min: 1,
                max: 2,
                values: &["auto", "cover", "contain"],
            },
            Css30,
        ),
        // Borders
        Property::new("border", Free, Css10),
        Property::new("border-top", Free, Css10),
        Property::new("border-right", Free, Css10),
        Property::new("border-bottom", Free, Css10),
        Property::new("border-left", Free, Css10),
        Property::new("border-top-width", LINE_WIDTH_KIND, Css10),
        Property::new("border-right-width", LINE_WIDTH_KIND, Css10),
        Property::new("border-bottom-width", LINE_WIDTH_KIND, Css10),
        Property::new("border-left-width", LINE_WIDTH_KIND, Css10),
        Property::new(
            "border-width",
            EnumOrNumbers {
                percentage: false,
                min: 1,
                max: 4,
                values: LINE_WIDTH,
            },
            Css10,
        ),
        Property::new("border-top-color", Color, Css21),
        Property::new("border-right-color", Color, Css21),
        Property::new("border-bottom-color", Color, Css21),
        Property::new("border-left-color", Color, Css21),
        Property::new("border-color", Colors { min: 1, max: 4 }, Css10),
        Property::new("border-top-style", Enum(BORDER_STYLE), Css21),
        Property::new("border-right-style", Enum(BORDER_STYLE), Css21),
        Property::new("border-bottom-style", Enum(BORDER_STYLE), Css21),
        Property::new("border-left-style", Enum(BORDER_STYLE), Css21),
        Property::new(
            "border-style",
            Enums {
                min: 1,
                max: 4,
                values: BORDER_STYLE,
            },
            Css10,
        ),
        Property::new("border-top-left-radius", RADIUS, Css30).customized(customize_border_radius),
        Property::new("border-top-right-radius", RADIUS, Css30).customized(customize_border_radius),
        Property::new("border-bottom-left-radius", RADIUS, Css30).customized(customize_border_radius),
        Property::new("border-bottom-right-radius", RADIUS, Css30).customized(customize_border_radius),
        Property::new("border-radius", Free, Css30).customized(customize_border_radius),
        // Flexible boxes
        Property::new("flex", Free, Css30),
        Property::new("flex-basis", LENGTH_OR_AUTO, Css30),
        Property::new("flex-grow", Long, Css30),
        Property::new("flex-shrink", Long, Css30),
        Property::new(
            "flex-direction",
            Enum(&["row", "row-reverse", "column", "column-reverse"]),
            Css30,
        ),
        Property::new("flex-wrap", Enum(&["nowrap", "wrap", "wrap-reverse"]), Css30),
        Property::new("flex-flow", Free, Css30),
        Property::new("order", Long, Css30),
        Property::new("font", Free, Css10),
    ];

    table.extend(FREE_CSS3.iter().map(|name| Property::new(name, Free, Css30)));
    table
        .into_iter()
        .map(|mut p| {
            p.multi_layer = MULTI_LAYER.contains(&p.name);
            (p.name, p)
        })
        .collect()
});

/// Properties whose value is a comma separated list of layers.
const MULTI_LAYER: &[&str] = &[
    "background",
    "background-attachment",
    "background-blend-mode",
    "background-clip",
    "background-image",
    "background-origin",
    "background-position",
    "background-repeat",
    "background-size",
    "box-shadow",
    "text-shadow",
    "transition",
    "transition-delay",
    "transition-duration",
    "transition-property",
    "transition-timing-function",
    "animation",
    "animation-delay",
    "animation-direction",
    "animation-duration",
    "animation-fill-mode",
    "animation-iteration-count",
    "animation-name",
    "animation-play-state",
    "animation-timing-function",
];

/// CSS 3 properties without a dedicated value grammar.
const FREE_CSS3: &[&str] = &[
    "align-content",
    "align-items",
    "align-self",
    "all",
    "animation",
    "animation-delay",
    "animation-direction",
    "animation-duration",
    "animation-fill-mode",
    "animation-iteration-count",
    "animation-name",
    "animation-play-state",
    "animation-timing-function",
    "backface-visibility",
    "background-blend-mode",
    "border-image",
    "border-image-outset",
    "border-image-repeat",
    "border-image-slice",
    "border-image-source",
    "border-image-width",
    "box-decoration-break",
    "box-shadow",
    "break-after",
    "break-before",
    "break-inside",
    "clip-path",
    "column-count",
    "column-fill",
    "column-gap",
    "column-rule",
    "column-rule-color",
    "column-rule-style",
    "column-rule-width",
    "column-span",
    "column-width",
    "columns",
    "contain",
    "content",
    "counter-increment",
    "counter-reset",
    "counter-set",
    "filter",
    "font-feature-settings",
    "font-kerning",
    "font-size-adjust",
    "font-stretch",
    "font-synthesis",
    "font-variant-caps",
    "font-variant-ligatures",
    "font-variant-numeric",
    "gap",
    "grid",
    "grid-area",
    "grid-auto-columns",
    "grid-auto-flow",
    "grid-auto-rows",
    "grid-column",
    "grid-column-end",
    "grid-column-start",
    "grid-row",
    "grid-row-end",
    "grid-row-start",
    "grid-template",
    "grid-template-areas",
    "grid-template-columns",
    "grid-template-rows",
    "hyphens",
    "isolation",
    "justify-content",
    "justify-items",
    "justify-self",
    "mask",
    "mix-blend-mode",
    "object-fit",
    "object-position",
    "overflow-wrap",
    "overflow-x",
    "overflow-y",
    "perspective",
    "perspective-origin",
    "pointer-events",
    "quotes",
    "row-gap",
    "scroll-behavior",
    "tab-size",
    "text-align-last",
    "text-decoration-color",
    "text-decoration-line",
    "text-decoration-style",
    "text-shadow",
    "touch-action",
    "transform",
    "transform-origin",
    "transform-style",
    "transition",
    "transition-delay",
    "transition-duration",
    "transition-property",
    "transition-timing-function",
    "user-select",
    "will-change",
    "word-break",
    "word-wrap",
];

/// The property registered under `name`, ignoring ASCII case.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Property> {
    let name = name.trim();
    match PROPERTIES.get(name) {
        Some(property) => Some(property),
        None => PROPERTIES.get(name.to_ascii_lowercase().as_str()),
    }
}

/// Returns `true` if `name` is a known property, with or without a vendor
/// prefix, or a custom property.
#[must_use]
pub fn is_known_property(name: &str) -> bool {
    let name = name.trim();
    if name.starts_with("--") {
        return true;
    }
    if lookup(name).is_some() {
        return true;
    }
    let lower = name.to_ascii_lowercase();
    VendorPrefix::of_name(&lower)
        .and_then(|vendor| lower.strip_prefix(vendor.prefix()))
        .is_some_and(|unprefixed| lookup(unprefixed).is_some())
}

/// Check `value` against the grammar of `property`.
///
/// Unknown and custom properties accept any value.
#[must_use]
pub fn is_valid_value(property: &str, value: &str) -> bool {
    lookup(property).is_none_or(|p| p.is_valid_value(value))
}

/// Every registered property, in no particular order.
pub fn all_properties() -> impl Iterator<Item = &'static Property> {
    PROPERTIES.values()
}
