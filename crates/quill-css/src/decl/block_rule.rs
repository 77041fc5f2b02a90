//! At-rules whose body is a single declaration block: `@font-face` and
//! `@viewport`. The keyword is kept as written, vendor prefix included.

use quill_common::{CssVersion, LocationSlot, VersionedObject};

use super::container::DeclarationContainer;
use super::declaration::Declaration;
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// [CSS Fonts § 4.1](https://www.w3.org/TR/css-fonts-4/#font-face-rule)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceRule {
    declaration: String,
    declarations: DeclarationContainer,
    pub(crate) location: LocationSlot,
}

/// [CSS Device Adaptation § 4](https://www.w3.org/TR/css-device-adapt-1/#atviewport-rule)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportRule {
    declaration: String,
    declarations: DeclarationContainer,
    pub(crate) location: LocationSlot,
}

impl Default for FontFaceRule {
    fn default() -> Self {
        Self::new("@font-face")
    }
}

impl Default for ViewportRule {
    fn default() -> Self {
        Self::new("@viewport")
    }
}

macro_rules! impl_block_rule {
    ($ty:ty, $construct:literal, $flag:ident) => {
        impl $ty {
            /// An empty rule introduced by `declaration`, e.g. `@-ms-viewport`.
            #[must_use]
            pub fn new(declaration: impl Into<String>) -> Self {
                Self {
                    declaration: declaration.into(),
                    declarations: DeclarationContainer::new(),
                    location: LocationSlot::NONE,
                }
            }

            /// The at-keyword as written.
            #[must_use]
            pub fn declaration(&self) -> &str {
                &self.declaration
            }

            /// The declarations.
            #[must_use]
            pub const fn declarations(&self) -> &DeclarationContainer {
                &self.declarations
            }

            /// Mutable access to the declarations.
            pub const fn declarations_mut(&mut self) -> &mut DeclarationContainer {
                &mut self.declarations
            }

            /// Append a declaration.
            pub fn add_declaration(&mut self, declaration: Declaration) {
                self.declarations.add(declaration);
            }

            /// Returns `true` if there is at least one declaration.
            #[must_use]
            pub fn has_declarations(&self) -> bool {
                self.declarations.has_declarations()
            }
        }

        impl VersionedObject for $ty {
            fn min_version(&self) -> CssVersion {
                CssVersion::Css30
            }
        }

        impl CssWritable for $ty {
            fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
                settings.check_version($construct, self)?;
                if !settings.$flag || (settings.remove_unnecessary_code && !self.has_declarations()) {
                    return Ok(String::new());
                }
                let mut out = self.declaration.clone();
                out.push_str(&self.declarations.as_css_string(settings, indent_level)?);
                out.push_str(settings.newline());
                Ok(out)
            }
        }
    };
}

impl_block_rule!(FontFaceRule, "@font-face", write_font_face_rules);
impl_block_rule!(ViewportRule, "@viewport", write_viewport_rules);
