//! Serialization of the domain model back to CSS text.
//!
//! Every domain object implements [`CssWritable`]; [`CssWriter`] adds the
//! stylesheet-level framing (header comment, `@charset`, footer comment).

/// Whole-stylesheet output.
pub mod css_writer;
/// Serialization failures.
pub mod error;
/// Serialization options.
pub mod settings;
/// The serialization seam.
pub mod writable;

pub use css_writer::CssWriter;
pub use error::WriteError;
pub use settings::WriterSettings;
pub use writable::CssWritable;
