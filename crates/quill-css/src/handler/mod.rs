//! Conversion of parse trees into the domain model.
//!
//! A stylesheet tree becomes a [`CascadingStyleSheet`](crate::decl::CascadingStyleSheet),
//! a declaration-list tree a [`DeclarationList`](crate::decl::DeclarationList).
//! The entry kind of the tree is checked before anything is converted.

/// The tree walker and its entry points.
pub mod converter;
/// Conversion failures.
pub mod error;
/// Converter options and hooks.
pub mod settings;

pub use converter::{CssConverter, convert_declaration_list, convert_stylesheet};
pub use error::ConvertError;
pub use settings::{ConverterSettings, InterpretErrorHook, default_interpret_error_hook};
