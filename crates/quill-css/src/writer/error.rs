//! Serialization failures.

use core::fmt;

use quill_common::CssVersion;
use thiserror::Error;

/// Why a domain object could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// The object uses a construct newer than the requested CSS level.
    #[error("{construct} requires {required} but the output is {requested}")]
    VersionRequirement {
        /// What could not be written, e.g. `"@keyframes"`.
        construct: String,
        /// The level the construct needs.
        required: CssVersion,
        /// The level the writer was asked for.
        requested: CssVersion,
    },
    /// Writing to the output sink failed.
    #[error("failed to write CSS output")]
    Fmt(#[from] fmt::Error),
}
