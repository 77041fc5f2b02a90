//! Property metadata: value grammars, output customizers and shorthands.

/// Vendor specific output for selected properties.
pub mod customizer;
mod grammar;
mod registry;
/// Shorthand expansion.
pub mod shorthand;
/// Length, angle, time and other units.
pub mod unit;
/// Checking declarations against the registry.
pub mod validate;
mod value;
/// Browser vendor prefixes.
pub mod vendor;

pub use grammar::{PropertyKind, is_rect_value};
pub use registry::{Property, all_properties, is_known_property, is_valid_value, lookup};
pub use shorthand::{ShorthandDescriptor, ShorthandLayout, ShorthandMismatch, is_shorthand, shorthand};
pub use unit::{CssUnit, UnitKind};
pub use validate::{ValidationIssue, ValidationProblem, validate_declarations, validate_stylesheet};
pub use value::CssValue;
pub use vendor::{VendorPrefix, is_vendor_specific};
