//! Variant schemas
//!
//! A schema declares a component's always-applied base fragment, its variant
//! groups (each an ordered map of value -> fragment with an optional
//! default) and compound variants that apply when several selections
//! coincide. Group order is declaration order and is preserved in output.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::fragment::Fragment;
use crate::typed::VariantKey;

static NEXT_SCHEMA_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema `{schema}` declares group `{group}` twice")]
    DuplicateGroup { schema: String, group: String },

    #[error("group `{group}` declares value `{value}` twice")]
    DuplicateValue { group: String, value: String },

    #[error("group `{group}` has no values")]
    EmptyGroup { group: String },

    #[error("default `{value}` of group `{group}` is not one of its values")]
    UnknownDefault { group: String, value: String },

    #[error("compound variant refers to unknown group `{group}`")]
    UnknownCompoundGroup { group: String },

    #[error("compound variant refers to unknown value `{value}` of group `{group}`")]
    UnknownCompoundValue { group: String, value: String },
}

/// One variant group (`size`, `intent`, ...)
#[derive(Clone, Debug, PartialEq)]
pub struct VariantGroup {
    name: String,
    values: IndexMap<String, Fragment>,
    default: Option<String>,
}

impl VariantGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn get(&self, value: &str) -> Option<&Fragment> {
        self.values.get(value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains_key(value)
    }

    /// Allowed values in declaration order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Builder for a [`VariantGroup`]
#[derive(Debug, Default)]
pub struct GroupBuilder {
    values: Vec<(String, Fragment)>,
    default: Option<String>,
}

impl GroupBuilder {
    pub fn value(mut self, value: impl Into<String>, fragment: impl Into<Fragment>) -> Self {
        self.values.push((value.into(), fragment.into()));
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn build(self, group: &str) -> Result<VariantGroup, SchemaError> {
        if self.values.is_empty() {
            return Err(SchemaError::EmptyGroup {
                group: group.to_string(),
            });
        }
        let mut values = IndexMap::with_capacity(self.values.len());
        for (value, fragment) in self.values {
            if values.contains_key(&value) {
                return Err(SchemaError::DuplicateValue {
                    group: group.to_string(),
                    value,
                });
            }
            values.insert(value, fragment);
        }
        if let Some(default) = &self.default {
            if !values.contains_key(default) {
                return Err(SchemaError::UnknownDefault {
                    group: group.to_string(),
                    value: default.clone(),
                });
            }
        }
        Ok(VariantGroup {
            name: group.to_string(),
            values,
            default: self.default,
        })
    }
}

/// Fragment applied when every condition matches the effective selection
///
/// A condition lists one or more accepted values for a group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompoundVariant {
    conditions: Vec<(String, SmallVec<[String; 2]>)>,
    fragment: Fragment,
}

impl CompoundVariant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `group` to be `value`
    pub fn when(mut self, group: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = SmallVec::new();
        values.push(value.into());
        self.conditions.push((group.into(), values));
        self
    }

    /// Require `group` to be any of `values`
    pub fn when_any<I, S>(mut self, group: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions
            .push((group.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    /// Typed form of [`CompoundVariant::when`]
    pub fn when_variant<V: VariantKey>(self, value: V) -> Self {
        self.when(V::GROUP, value.key())
    }

    pub fn then(mut self, fragment: impl Into<Fragment>) -> Self {
        self.fragment = fragment.into();
        self
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub(crate) fn matches(&self, effective: &IndexMap<String, String>) -> bool {
        self.conditions.iter().all(|(group, accepted)| {
            effective
                .get(group)
                .is_some_and(|value| accepted.iter().any(|a| a == value))
        })
    }
}

/// A component's complete variant schema
#[derive(Clone, Debug)]
pub struct VariantSchema {
    id: u64,
    name: String,
    base: Fragment,
    groups: Vec<VariantGroup>,
    compounds: Vec<CompoundVariant>,
}

impl VariantSchema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            base: Fragment::new(),
            groups: Vec::new(),
            compounds: Vec::new(),
        }
    }

    /// Process-unique id, stable for the schema's lifetime
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> &Fragment {
        &self.base
    }

    /// Groups in declaration order
    pub fn groups(&self) -> &[VariantGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&VariantGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn compounds(&self) -> &[CompoundVariant] {
        &self.compounds
    }
}

/// Builder for [`VariantSchema`]
///
/// ```
/// use strata_variants::{CompoundVariant, VariantSchema};
///
/// let button = VariantSchema::builder("button")
///     .base("inline-flex items-center rounded-md")
///     .group("intent", |g| g.value("primary", "bg-primary text-white").value("ghost", "bg-transparent").default_value("primary"))
///     .group("size", |g| g.value("sm", "h-8 px-3").value("md", "h-10 px-4").default_value("md"))
///     .compound(CompoundVariant::new().when("intent", "primary").when("size", "sm").then("shadow-sm"))
///     .build()
///     .unwrap();
/// assert_eq!(button.groups().len(), 2);
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    base: Fragment,
    groups: Vec<(String, GroupBuilder)>,
    compounds: Vec<CompoundVariant>,
}

impl SchemaBuilder {
    /// Set the always-applied base fragment
    pub fn base(mut self, fragment: impl Into<Fragment>) -> Self {
        self.base = fragment.into();
        self
    }

    /// Declare a variant group; declaration order is output order
    pub fn group(mut self, name: impl Into<String>, build: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        self.groups.push((name.into(), build(GroupBuilder::default())));
        self
    }

    /// Declare a group from a typed variant enum, one fragment per variant
    pub fn typed_group<V: VariantKey>(mut self, default: Option<V>, fragment: impl Fn(V) -> Fragment) -> Self {
        let mut group = GroupBuilder::default();
        for &variant in V::all() {
            group = group.value(variant.key(), fragment(variant));
        }
        if let Some(default) = default {
            group = group.default_value(default.key());
        }
        self.groups.push((V::GROUP.to_string(), group));
        self
    }

    pub fn compound(mut self, compound: CompoundVariant) -> Self {
        self.compounds.push(compound);
        self
    }

    pub fn build(self) -> Result<VariantSchema, SchemaError> {
        let mut groups: Vec<VariantGroup> = Vec::with_capacity(self.groups.len());
        for (name, builder) in self.groups {
            if groups.iter().any(|g| g.name == name) {
                return Err(SchemaError::DuplicateGroup {
                    schema: self.name,
                    group: name,
                });
            }
            groups.push(builder.build(&name)?);
        }

        for compound in &self.compounds {
            for (group_name, accepted) in &compound.conditions {
                let group = groups
                    .iter()
                    .find(|g| &g.name == group_name)
                    .ok_or_else(|| SchemaError::UnknownCompoundGroup {
                        group: group_name.clone(),
                    })?;
                if let Some(value) = accepted.iter().find(|v| !group.contains(v)) {
                    return Err(SchemaError::UnknownCompoundValue {
                        group: group_name.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(VariantSchema {
            id: NEXT_SCHEMA_ID.fetch_add(1, Ordering::Relaxed),
            name: self.name,
            base: self.base,
            groups,
            compounds: self.compounds,
        })
    }
}
