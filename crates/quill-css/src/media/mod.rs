//! The media model: media types, media features and media lists.

mod feature;
mod list;
mod medium;

pub use feature::MediaExpressionFeature;
pub use list::{MEDIA_STRING_SEPARATOR, MediaList, UnknownMedium};
pub use medium::Medium;
