//! Variant composition
//!
//! Output order is fixed: the base fragment, then each group in declaration
//! order, then matching compound variants in declaration order. Invalid
//! selections never fail; they fall back to the group default and leave a
//! [`VariantDiagnostic`] on the composition.

use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use strata_tokens::{try_resolve, TokenTree, TokenValue};

use crate::fragment::{Fragment, StyleValue};
use crate::schema::VariantSchema;
use crate::selection::Selections;

/// Recoverable problem found while composing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VariantDiagnostic {
    /// The selected value isn't declared by the group; the default applied
    UnknownValue {
        group: String,
        value: String,
        applied: Option<String>,
    },
    /// The selection names a group the schema doesn't declare; ignored
    UnknownGroup { group: String },
}

impl fmt::Display for VariantDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantDiagnostic::UnknownValue {
                group,
                value,
                applied: Some(applied),
            } => write!(f, "unknown value `{value}` for group `{group}`, using `{applied}`"),
            VariantDiagnostic::UnknownValue { group, value, applied: None } => {
                write!(f, "unknown value `{value}` for group `{group}`, group has no default")
            }
            VariantDiagnostic::UnknownGroup { group } => write!(f, "unknown variant group `{group}`"),
        }
    }
}

/// Fragments selected for one component instance, in application order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Composition {
    fragments: Vec<Fragment>,
    effective: IndexMap<String, String>,
    diagnostics: Vec<VariantDiagnostic>,
}

impl Composition {
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Value each group ended up with, in declaration order
    pub fn effective(&self) -> impl Iterator<Item = (&str, &str)> {
        self.effective.iter().map(|(g, v)| (g.as_str(), v.as_str()))
    }

    pub fn diagnostics(&self) -> &[VariantDiagnostic] {
        &self.diagnostics
    }

    /// Classes in application order, first occurrence of each kept
    pub fn classes(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.fragments
            .iter()
            .flat_map(|fragment| fragment.class_list())
            .map(String::as_str)
            .filter(|class| !class.is_empty() && seen.insert(*class))
            .collect()
    }

    pub fn class_string(&self) -> String {
        self.classes().join(" ")
    }

    /// Resolve token-valued declarations against `tokens`
    ///
    /// A later declaration of the same property replaces an earlier one but
    /// keeps its position.
    pub fn resolve(&self, tokens: &TokenTree) -> ResolvedStyle {
        let mut style = IndexMap::new();
        for fragment in &self.fragments {
            for (property, value) in fragment.declarations() {
                style.insert(property.clone(), resolve_value(tokens, value));
            }
        }
        ResolvedStyle {
            classes: self.class_string(),
            style,
        }
    }
}

fn resolve_value(tokens: &TokenTree, value: &StyleValue) -> String {
    match value {
        StyleValue::Literal(literal) => literal.clone(),
        StyleValue::Token { path, fallback } => match try_resolve::<TokenValue>(tokens, path) {
            Ok(value) => value.to_string(),
            Err(miss) => {
                tracing::debug!("style token fell back to `{}`: {}", fallback, miss);
                fallback.clone()
            }
        },
    }
}

/// Final class string and inline style of a composition
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub classes: String,
    pub style: IndexMap<String, String>,
}

impl ResolvedStyle {
    /// Inline `style` attribute text (`color: #fff; padding: 8px`)
    pub fn style_string(&self) -> String {
        self.style
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Select fragments from `schema` for `selections`
pub fn compose(schema: &VariantSchema, selections: &Selections) -> Composition {
    let mut composition = Composition::default();
    composition.fragments.push(schema.base().clone());

    for group in schema.groups() {
        let chosen = match selections.get(group.name()) {
            Some(value) if group.contains(value) => Some(value),
            Some(value) => {
                let diagnostic = VariantDiagnostic::UnknownValue {
                    group: group.name().to_string(),
                    value: value.to_string(),
                    applied: group.default_value().map(str::to_string),
                };
                tracing::warn!("{}: {}", schema.name(), diagnostic);
                composition.diagnostics.push(diagnostic);
                group.default_value()
            }
            None => group.default_value(),
        };

        if let Some(value) = chosen {
            if let Some(fragment) = group.get(value) {
                composition.fragments.push(fragment.clone());
            }
            composition
                .effective
                .insert(group.name().to_string(), value.to_string());
        }
    }

    for (group, _) in selections.iter() {
        if schema.group(group).is_none() {
            let diagnostic = VariantDiagnostic::UnknownGroup {
                group: group.to_string(),
            };
            tracing::warn!("{}: {}", schema.name(), diagnostic);
            composition.diagnostics.push(diagnostic);
        }
    }

    for compound in schema.compounds() {
        if compound.matches(&composition.effective) {
            composition.fragments.push(compound.fragment().clone());
        }
    }

    tracing::trace!(
        "compose {} -> {} fragments, {} diagnostics",
        schema.name(),
        composition.fragments.len(),
        composition.diagnostics.len()
    );
    composition
}
