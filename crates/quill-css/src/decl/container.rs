//! Ordered declaration lists.
//!
//! Later declarations win over earlier ones when a consumer applies them,
//! so the order is kept exactly as written.

use core::ops::{Deref, DerefMut};

use quill_common::{CssVersion, VersionedObject};

use super::declaration::Declaration;
use super::list::{Change, CssList};
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// The declarations of a rule, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationContainer {
    declarations: CssList<Declaration>,
}

impl DeclarationContainer {
    /// An empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there is at least one declaration.
    #[must_use]
    pub fn has_declarations(&self) -> bool {
        self.declarations.has_any()
    }

    /// The first declaration of `property`, ignoring ASCII case.
    #[must_use]
    pub fn declaration_of_property(&self, property: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|decl| decl.has_property(property))
    }

    /// Mutable access to the first declaration of `property`.
    pub fn declaration_of_property_mut(&mut self, property: &str) -> Option<&mut Declaration> {
        self.declarations.iter_mut().find(|decl| decl.has_property(property))
    }

    /// Every declaration of `property`, in order.
    #[must_use]
    pub fn declarations_of_property(&self, property: &str) -> Vec<&Declaration> {
        self.declarations
            .iter()
            .filter(|decl| decl.has_property(property))
            .collect()
    }

    /// Remove every declaration of `property`.
    pub fn remove_declarations_of_property(&mut self, property: &str) -> Change {
        self.declarations.remove_if(|decl| decl.has_property(property))
    }

    /// The declarations as a list body: one per line, each ended by `;`.
    ///
    /// A single declaration is written inline. In optimized output the
    /// last `;` is dropped.
    ///
    /// # Errors
    ///
    /// Fails if a declaration needs a newer CSS level than requested.
    pub fn list_as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        write_list(&self.declarations, settings, indent_level)
    }
}

/// Write `items` as a `;` separated list body.
pub(crate) fn write_list<T: CssWritable>(
    items: &[T],
    settings: &WriterSettings,
    indent_level: usize,
) -> Result<String, WriteError> {
    let optimized = settings.optimized_output;
    match items {
        [] => Ok(String::new()),
        [single] => {
            let mut out = single.as_css_string(settings, indent_level)?;
            if !optimized && single.needs_terminator() {
                out.push(';');
            }
            Ok(out)
        }
        _ => {
            let mut out = String::new();
            for (index, item) in items.iter().enumerate() {
                out.push_str(&settings.indent(indent_level + 1));
                out.push_str(&item.as_css_string(settings, indent_level + 1)?);
                if item.needs_terminator() && (!optimized || index + 1 < items.len()) {
                    out.push(';');
                }
                out.push_str(settings.newline());
            }
            Ok(out)
        }
    }
}

/// Write `items` as a `{ ... }` block, including the leading space in
/// pretty output.
pub(crate) fn write_block<T: CssWritable>(
    items: &[T],
    settings: &WriterSettings,
    indent_level: usize,
) -> Result<String, WriteError> {
    let optimized = settings.optimized_output;
    let body = write_list(items, settings, indent_level)?;
    Ok(match items.len() {
        0 if optimized => "{}".to_string(),
        0 => " {}".to_string(),
        1 if optimized => format!("{{{body}}}"),
        1 => format!(" {{ {body} }}"),
        _ if optimized => format!("{{{body}}}"),
        _ => format!(
            " {{{}{body}{}}}",
            settings.newline(),
            settings.indent(indent_level)
        ),
    })
}

impl Deref for DeclarationContainer {
    type Target = CssList<Declaration>;

    fn deref(&self) -> &Self::Target {
        &self.declarations
    }
}

impl DerefMut for DeclarationContainer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.declarations
    }
}

impl FromIterator<Declaration> for DeclarationContainer {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        Self {
            declarations: iter.into_iter().collect(),
        }
    }
}

impl VersionedObject for DeclarationContainer {
    fn min_version(&self) -> CssVersion {
        self.declarations
            .iter()
            .map(VersionedObject::min_version)
            .max()
            .unwrap_or(CssVersion::Css10)
    }
}

impl CssWritable for DeclarationContainer {
    /// ` { a:1; }` style block.
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        write_block(&self.declarations, settings, indent_level)
    }
}

/// A bare declaration list, as found in a `style` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationList {
    declarations: DeclarationContainer,
}

impl DeclarationList {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for DeclarationList {
    type Target = DeclarationContainer;

    fn deref(&self) -> &Self::Target {
        &self.declarations
    }
}

impl DerefMut for DeclarationList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.declarations
    }
}

impl FromIterator<Declaration> for DeclarationList {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        Self {
            declarations: iter.into_iter().collect(),
        }
    }
}

impl CssWritable for DeclarationList {
    /// The list body without braces.
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        self.declarations.list_as_css_string(settings, indent_level)
    }
}
