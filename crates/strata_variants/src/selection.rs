//! Caller-supplied variant selections

use indexmap::IndexMap;

use crate::typed::VariantKey;

/// Partial map of group name -> chosen value
///
/// Groups missing from the selection use the schema default. Order of
/// insertion does not matter for composition or caching.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selections {
    values: IndexMap<String, String>,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, group: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(group, value);
        self
    }

    pub fn with_variant<V: VariantKey>(self, value: V) -> Self {
        self.with(V::GROUP, value.key())
    }

    /// Set a group's value, replacing any earlier choice
    pub fn set(&mut self, group: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(group.into(), value.into())
    }

    pub fn unset(&mut self, group: &str) -> Option<String> {
        self.values.shift_remove(group)
    }

    pub fn get(&self, group: &str) -> Option<&str> {
        self.values.get(group).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(g, v)| (g.as_str(), v.as_str()))
    }

    /// Sorted `(group, value)` pairs, independent of insertion order
    pub fn normalized(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = self
            .values
            .iter()
            .map(|(g, v)| (g.clone(), v.clone()))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

impl<G: Into<String>, V: Into<String>> FromIterator<(G, V)> for Selections {
    fn from_iter<I: IntoIterator<Item = (G, V)>>(iter: I) -> Self {
        let mut selections = Selections::new();
        for (group, value) in iter {
            selections.set(group, value);
        }
        selections
    }
}
