//! An ordered set of media types, as used by `@import` and `<link media>`.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use super::medium::Medium;
use crate::decl::Change;

/// Separator used by [`MediaList::media_string`].
pub const MEDIA_STRING_SEPARATOR: &str = ", ";

/// Unique media types in insertion order.
///
/// An empty list applies to all media.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaList {
    media: Vec<Medium>,
}

impl MediaList {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { media: Vec::new() }
    }

    /// Add a medium. Adding one that is already present does nothing.
    pub fn add(&mut self, medium: Medium) -> Change {
        if self.media.contains(&medium) {
            Change::Unchanged
        } else {
            self.media.push(medium);
            Change::Changed
        }
    }

    /// Add several media.
    pub fn add_all(&mut self, media: impl IntoIterator<Item = Medium>) -> Change {
        media
            .into_iter()
            .fold(Change::Unchanged, |change, medium| {
                if self.add(medium).is_changed() { Change::Changed } else { change }
            })
    }

    /// Remove a medium.
    pub fn remove(&mut self, medium: Medium) -> Change {
        let before = self.media.len();
        self.media.retain(|m| *m != medium);
        Change::from(self.media.len() != before)
    }

    /// Remove every medium.
    pub fn clear(&mut self) -> Change {
        let changed = !self.media.is_empty();
        self.media.clear();
        Change::from(changed)
    }

    /// Number of media.
    #[must_use]
    pub fn count(&self) -> usize {
        self.media.len()
    }

    /// Returns `true` if no medium is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    /// Returns `true` if `medium` is listed.
    #[must_use]
    pub fn contains(&self, medium: Medium) -> bool {
        self.media.contains(&medium)
    }

    /// Returns `true` if `medium` or `all` is listed.
    #[must_use]
    pub fn contains_or_all(&self, medium: Medium) -> bool {
        self.contains(medium) || self.contains(Medium::All)
    }

    /// Returns `true` if the list is empty or contains `all`.
    #[must_use]
    pub fn has_no_media_or_all(&self) -> bool {
        self.media.is_empty() || self.contains(Medium::All)
    }

    /// Returns `true` if the list applies to screen display.
    #[must_use]
    pub fn is_usable_for_screen(&self) -> bool {
        self.has_no_media_or_all() || self.contains(Medium::Screen)
    }

    /// The media in insertion order.
    #[must_use]
    pub fn media(&self) -> &[Medium] {
        &self.media
    }

    /// The media names joined by `", "`, or an empty string.
    #[must_use]
    pub fn media_string(&self) -> String {
        self.media_string_with(MEDIA_STRING_SEPARATOR)
    }

    /// The media names joined by `separator`.
    #[must_use]
    pub fn media_string_with(&self, separator: &str) -> String {
        self.media.iter().map(|m| m.name()).collect::<Vec<_>>().join(separator)
    }
}

impl From<Medium> for MediaList {
    fn from(medium: Medium) -> Self {
        Self { media: vec![medium] }
    }
}

impl FromIterator<Medium> for MediaList {
    fn from_iter<I: IntoIterator<Item = Medium>>(iter: I) -> Self {
        let mut list = Self::new();
        let _ = list.add_all(iter);
        list
    }
}

/// A name in a media string that is not a known media type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown medium '{0}'")]
pub struct UnknownMedium(pub String);

impl FromStr for MediaList {
    type Err = UnknownMedium;

    /// Parse a comma separated list such as `"screen, print"`. Empty
    /// entries are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Medium::from_name(name).ok_or_else(|| UnknownMedium(name.to_string())))
            .collect()
    }
}

impl fmt::Display for MediaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.media_string())
    }
}
