//! Checking declarations against the property registry.
//!
//! Validation is a separate pass over already built declarations. It
//! never changes or rejects anything; problems are reported as
//! [`ValidationIssue`]s and logged once per distinct message through
//! [`warn_once`].

use core::fmt;

use quill_common::{SourceArea, warn_once};

use super::registry::{is_known_property, lookup};
use crate::decl::visit::{CssVisitor, visit_declaration_list, visit_stylesheet};
use crate::decl::{CascadingStyleSheet, Declaration, DeclarationContainer, SourceLocationAware};

/// What is wrong with a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationProblem {
    /// The property is not in the registry, even without a vendor prefix.
    UnknownProperty,
    /// The value does not match the property's grammar.
    InvalidValue,
}

/// One flagged declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// What is wrong.
    pub problem: ValidationProblem,
    /// The property name as written.
    pub property: String,
    /// The value as written.
    pub value: String,
    /// Where the declaration was read from, if known.
    pub location: Option<SourceArea>,
}

impl ValidationIssue {
    /// The problem without its location.
    #[must_use]
    pub fn message(&self) -> String {
        match self.problem {
            ValidationProblem::UnknownProperty => format!("unknown property '{}'", self.property),
            ValidationProblem::InvalidValue => {
                format!("invalid value '{}' for property '{}'", self.value, self.property)
            }
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location {
            write!(f, "{location}: ")?;
        }
        f.write_str(&self.message())
    }
}

/// Check a single declaration.
#[must_use]
pub fn validate_declaration(declaration: &Declaration) -> Option<ValidationIssue> {
    let property = declaration.property();
    if declaration.is_custom_property() {
        return None;
    }
    let problem = if !is_known_property(property) {
        ValidationProblem::UnknownProperty
    } else if lookup(property).is_some_and(|p| !p.is_valid_value(&declaration.expression().text())) {
        ValidationProblem::InvalidValue
    } else {
        return None;
    };
    Some(ValidationIssue {
        problem,
        property: property.to_string(),
        value: declaration.expression().text(),
        location: declaration.source_location(),
    })
}

#[derive(Default)]
struct Validator {
    issues: Vec<ValidationIssue>,
}

impl CssVisitor for Validator {
    fn on_declaration(&mut self, declaration: &Declaration) {
        if let Some(issue) = validate_declaration(declaration) {
            warn_once("CSS", &issue.message());
            self.issues.push(issue);
        }
    }
}

/// Check every declaration of `css`, in document order.
#[must_use]
pub fn validate_stylesheet(css: &CascadingStyleSheet) -> Vec<ValidationIssue> {
    let mut validator = Validator::default();
    visit_stylesheet(css, &mut validator);
    validator.issues
}

/// Check every declaration of a bare declaration list.
#[must_use]
pub fn validate_declarations(declarations: &DeclarationContainer) -> Vec<ValidationIssue> {
    let mut validator = Validator::default();
    visit_declaration_list(declarations, &mut validator);
    validator.issues
}
