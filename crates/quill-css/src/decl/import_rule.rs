//! `@import` and `@namespace`, the rules that must precede all others.

use quill_common::{CssVersion, LocationSlot, VersionedObject};

use super::expression::CssUri;
use super::list::CssList;
use super::media_rule::{MediaQuery, write_media_queries};
use crate::utils::get_as_css_url;
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// [CSS Cascade § 2 Importing](https://www.w3.org/TR/css-cascade-4/#at-import)
///
/// `@import url media-queries;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRule {
    location_uri: CssUri,
    media_queries: CssList<MediaQuery>,
    pub(crate) location: LocationSlot,
}

impl ImportRule {
    /// Import `uri` for all media.
    #[must_use]
    pub fn new(uri: CssUri) -> Self {
        Self {
            location_uri: uri,
            media_queries: CssList::new(),
            location: LocationSlot::NONE,
        }
    }

    /// The imported stylesheet.
    #[must_use]
    pub const fn location_uri(&self) -> &CssUri {
        &self.location_uri
    }

    /// Replace the imported stylesheet.
    pub fn set_location_uri(&mut self, uri: CssUri) {
        self.location_uri = uri;
    }

    /// The media the import is restricted to; empty means all.
    #[must_use]
    pub const fn media_queries(&self) -> &CssList<MediaQuery> {
        &self.media_queries
    }

    /// Mutable access to the media queries.
    pub const fn media_queries_mut(&mut self) -> &mut CssList<MediaQuery> {
        &mut self.media_queries
    }

    /// Append a media query.
    pub fn add_media_query(&mut self, query: MediaQuery) {
        self.media_queries.add(query);
    }
}

impl VersionedObject for ImportRule {
    fn min_version(&self) -> CssVersion {
        self.media_queries
            .iter()
            .map(VersionedObject::min_version)
            .max()
            .unwrap_or(CssVersion::Css10)
    }
}

impl CssWritable for ImportRule {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        let mut out = format!("@import {}", self.location_uri.as_css_string(settings, indent_level)?);
        if self.media_queries.has_any() {
            out.push(' ');
            out.push_str(&write_media_queries(&self.media_queries, settings, indent_level)?);
        }
        out.push(';');
        out.push_str(settings.newline());
        Ok(out)
    }
}

/// [CSS Namespaces § 3](https://www.w3.org/TR/css-namespaces-3/#declaration)
///
/// `@namespace prefix url;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRule {
    prefix: Option<String>,
    url: String,
    pub(crate) location: LocationSlot,
}

impl NamespaceRule {
    /// Declare `url` as the default namespace or the namespace of `prefix`.
    #[must_use]
    pub fn new(prefix: Option<String>, url: impl Into<String>) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()),
            url: url.into(),
            location: LocationSlot::NONE,
        }
    }

    /// The prefix, or `None` for the default namespace.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The namespace URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl VersionedObject for NamespaceRule {
    fn min_version(&self) -> CssVersion {
        CssVersion::Css30
    }
}

impl CssWritable for NamespaceRule {
    fn as_css_string(&self, settings: &WriterSettings, _indent_level: usize) -> Result<String, WriteError> {
        if !settings.write_namespace_rules {
            return Ok(String::new());
        }
        let mut out = String::from("@namespace ");
        if let Some(prefix) = &self.prefix {
            out.push_str(prefix);
            out.push(' ');
        }
        if self.url.is_empty() {
            out.push_str("\"\"");
        } else {
            out.push_str(&get_as_css_url(&self.url, false));
        }
        out.push(';');
        out.push_str(settings.newline());
        Ok(out)
    }
}
