//! Splitting shorthand declarations into their longhands.
//!
//! Declarations keep their source order, so a shorthand written after a
//! longhand overrides it and a longhand written after a shorthand only
//! replaces its own part. Resolving that is left to the caller; splitting
//! just makes every part explicit.

use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

use super::registry::lookup;
use crate::decl::{Declaration, Expression, ExpressionMember, TermSimple};
use crate::writer::{CssWritable, WriterSettings};

/// How expression members are rearranged before they are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShorthandLayout {
    /// Members are matched as written.
    Plain,
    /// Box sides: one, two or three values are repeated into four
    /// (top, right, bottom, left).
    Alignment,
    /// `flex`: keywords and lone numbers are expanded first.
    Flex,
}

/// A shorthand property with its longhands and their default values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandDescriptor {
    property: &'static str,
    layout: ShorthandLayout,
    sub_properties: &'static [(&'static str, &'static str)],
}

/// A declaration handed to the wrong descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot split '{found}' as '{expected}'")]
pub struct ShorthandMismatch {
    /// The shorthand the descriptor handles.
    pub expected: String,
    /// The property of the declaration.
    pub found: String,
}

impl ShorthandDescriptor {
    /// The shorthand property name.
    #[must_use]
    pub const fn property(&self) -> &'static str {
        self.property
    }

    /// How members are rearranged before matching.
    #[must_use]
    pub const fn layout(&self) -> ShorthandLayout {
        self.layout
    }

    /// The longhands with their default values, in matching order.
    #[must_use]
    pub const fn sub_properties(&self) -> &'static [(&'static str, &'static str)] {
        self.sub_properties
    }

    /// Split `declaration` into one declaration per longhand.
    ///
    /// Each value is assigned to the first longhand not yet handled whose
    /// grammar accepts it; longhands that received nothing get their
    /// default. A longhand taking several parts (such as
    /// `background-position`) consumes as many as its grammar accepts.
    /// Operators between values are not assigned. The `!important` flag
    /// is copied to every part.
    ///
    /// # Errors
    ///
    /// Returns [`ShorthandMismatch`] if `declaration` is not a declaration
    /// of this shorthand.
    pub fn split(&self, declaration: &Declaration) -> Result<Vec<Declaration>, ShorthandMismatch> {
        if !declaration.has_property(self.property) {
            return Err(ShorthandMismatch {
                expected: self.property.to_string(),
                found: declaration.property().to_string(),
            });
        }

        let members: Vec<ExpressionMember> = declaration
            .expression()
            .members()
            .iter()
            .filter(|member| !member.is_operator())
            .cloned()
            .collect();
        let members = match self.layout {
            ShorthandLayout::Plain => members,
            ShorthandLayout::Alignment => align_box_sides(members),
            ShorthandLayout::Flex => expand_flex(members),
        };
        let texts: Vec<String> = members.iter().map(member_text).collect();

        let important = declaration.is_important();
        let mut assigned: Vec<Option<Expression>> = vec![None; self.sub_properties.len()];
        let mut index = 0;
        while index < members.len() {
            let found = self.sub_properties.iter().enumerate().find_map(|(sub, (name, _))| {
                if assigned[sub].is_some() {
                    return None;
                }
                let (min, max) = lookup(name).map_or((1, 1), |p| {
                    (p.kind().min_argument_count(), p.kind().max_argument_count())
                });
                let available = members.len() - index;
                (min..=max.min(available)).rev().find_map(|count| {
                    let candidate = texts[index..index + count].join(" ");
                    lookup(name)
                        .is_none_or(|p| p.is_valid_value(&candidate))
                        .then_some((sub, count))
                })
            });
            match found {
                Some((sub, count)) => {
                    let mut expression = Expression::new();
                    for member in &members[index..index + count] {
                        expression.add_member(member.clone());
                    }
                    assigned[sub] = Some(expression);
                    index += count;
                }
                None => {
                    tracing::debug!(
                        property = self.property,
                        value = %texts[index],
                        "no longhand accepts the value"
                    );
                    index += 1;
                }
            }
        }

        Ok(self
            .sub_properties
            .iter()
            .zip(assigned)
            .map(|((name, default), expression)| {
                let expression = expression.unwrap_or_else(|| Expression::simple(*default));
                Declaration::new(name, expression, important)
            })
            .collect())
    }
}

fn member_text(member: &ExpressionMember) -> String {
    member
        .as_css_string(&WriterSettings::default(), 0)
        .unwrap_or_default()
}

/// `a` → `a a a a`, `a b` → `a b a b`, `a b c` → `a b c b`.
fn align_box_sides(mut members: Vec<ExpressionMember>) -> Vec<ExpressionMember> {
    match members.as_slice() {
        [a] => {
            let a = a.clone();
            members.extend([a.clone(), a.clone(), a]);
        }
        [y, x] => {
            let (y, x) = (y.clone(), x.clone());
            members.extend([y, x]);
        }
        [_, x, _] => {
            let x = x.clone();
            members.push(x);
        }
        _ => {}
    }
    members
}

/// [CSS Flexbox § 7.1.1](https://www.w3.org/TR/css-flexbox-1/#flex-common)
fn expand_flex(mut members: Vec<ExpressionMember>) -> Vec<ExpressionMember> {
    fn term(value: &str) -> ExpressionMember {
        ExpressionMember::from(TermSimple::new(value))
    }

    match members.len() {
        1 => match member_text(&members[0]).to_ascii_lowercase().as_str() {
            "initial" => vec![term("0"), term("1"), term("auto")],
            "auto" => vec![term("1"), term("1"), term("auto")],
            "none" => vec![term("0"), term("0"), term("auto")],
            _ => {
                members.extend([term("1"), term("0")]);
                members
            }
        },
        2 => {
            if member_text(&members[1]).parse::<i64>().is_err() {
                members.insert(1, term("1"));
            }
            members
        }
        _ => members,
    }
}

const fn descriptor(
    property: &'static str,
    layout: ShorthandLayout,
    sub_properties: &'static [(&'static str, &'static str)],
) -> ShorthandDescriptor {
    ShorthandDescriptor {
        property,
        layout,
        sub_properties,
    }
}

static SHORTHANDS: LazyLock<HashMap<&'static str, ShorthandDescriptor>> = LazyLock::new(|| {
    use ShorthandLayout::{Alignment, Flex, Plain};

    [
        descriptor(
            "background",
            Plain,
            &[
                ("background-color", "transparent"),
                ("background-image", "none"),
                ("background-repeat", "repeat"),
                ("background-position", "top left"),
                ("background-attachment", "scroll"),
                ("background-clip", "border-box"),
                ("background-origin", "padding-box"),
                ("background-size", "auto auto"),
            ],
        ),
        descriptor(
            "font",
            Plain,
            &[
                ("font-style", "normal"),
                ("font-variant", "normal"),
                ("font-weight", "normal"),
                ("font-size", "inherit"),
                ("line-height", "normal"),
                ("font-family", "inherit"),
            ],
        ),
        descriptor(
            "border",
            Plain,
            &[("border-width", "3px"), ("border-style", "solid"), ("border-color", "black")],
        ),
        descriptor(
            "border-top",
            Plain,
            &[
                ("border-top-width", "3px"),
                ("border-top-style", "solid"),
                ("border-top-color", "black"),
            ],
        ),
        descriptor(
            "border-right",
            Plain,
            &[
                ("border-right-width", "3px"),
                ("border-right-style", "solid"),
                ("border-right-color", "black"),
            ],
        ),
        descriptor(
            "border-bottom",
            Plain,
            &[
                ("border-bottom-width", "3px"),
                ("border-bottom-style", "solid"),
                ("border-bottom-color", "black"),
            ],
        ),
        descriptor(
            "border-left",
            Plain,
            &[
                ("border-left-width", "3px"),
                ("border-left-style", "solid"),
                ("border-left-color", "black"),
            ],
        ),
        descriptor(
            "border-width",
            Alignment,
            &[
                ("border-top-width", "3px"),
                ("border-right-width", "3px"),
                ("border-bottom-width", "3px"),
                ("border-left-width", "3px"),
            ],
        ),
        descriptor(
            "border-style",
            Alignment,
            &[
                ("border-top-style", "solid"),
                ("border-right-style", "solid"),
                ("border-bottom-style", "solid"),
                ("border-left-style", "solid"),
            ],
        ),
        descriptor(
            "border-color",
            Alignment,
            &[
                ("border-top-color", "black"),
                ("border-right-color", "black"),
                ("border-bottom-color", "black"),
                ("border-left-color", "black"),
            ],
        ),
        descriptor(
            "margin",
            Alignment,
            &[
                ("margin-top", "auto"),
                ("margin-right", "auto"),
                ("margin-bottom", "auto"),
                ("margin-left", "auto"),
            ],
        ),
        descriptor(
            "padding",
            Alignment,
            &[
                ("padding-top", "auto"),
                ("padding-right", "auto"),
                ("padding-bottom", "auto"),
                ("padding-left", "auto"),
            ],
        ),
        descriptor(
            "outline",
            Plain,
            &[("outline-width", "3px"), ("outline-style", "solid"), ("outline-color", "black")],
        ),
        descriptor(
            "list-style",
            Plain,
            &[
                ("list-style-type", "disc"),
                ("list-style-position", "outside"),
                ("list-style-image", "none"),
            ],
        ),
        descriptor(
            "flex",
            Flex,
            &[("flex-grow", "0"), ("flex-shrink", "1"), ("flex-basis", "auto")],
        ),
    ]
    .into_iter()
    .map(|d| (d.property, d))
    .collect()
});

/// The descriptor for shorthand `property`, ignoring ASCII case.
#[must_use]
pub fn shorthand(property: &str) -> Option<&'static ShorthandDescriptor> {
    SHORTHANDS.get(property.trim().to_ascii_lowercase().as_str())
}

/// Returns `true` if `property` is a registered shorthand.
#[must_use]
pub fn is_shorthand(property: &str) -> bool {
    shorthand(property).is_some()
}

/// Every registered shorthand, in no particular order.
pub fn all_shorthands() -> impl Iterator<Item = &'static ShorthandDescriptor> {
    SHORTHANDS.values()
}
