//! Override layers applied on top of a theme
//!
//! Priority is fixed by tier: white-label < tenant < runtime, all above the
//! theme itself. Each tier holds at most one layer, so two layers can never
//! tie on priority.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::tree::TokenTree;

/// Priority tier of an override layer, in ascending priority order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverrideTier {
    WhiteLabel,
    Tenant,
    Runtime,
}

impl OverrideTier {
    /// All tiers, lowest priority first
    pub const ALL: [OverrideTier; 3] = [
        OverrideTier::WhiteLabel,
        OverrideTier::Tenant,
        OverrideTier::Runtime,
    ];

    /// Stable id for config/serialization
    pub fn id(self) -> &'static str {
        match self {
            OverrideTier::WhiteLabel => "white-label",
            OverrideTier::Tenant => "tenant",
            OverrideTier::Runtime => "runtime",
        }
    }

    fn slot(self) -> usize {
        match self {
            OverrideTier::WhiteLabel => 0,
            OverrideTier::Tenant => 1,
            OverrideTier::Runtime => 2,
        }
    }
}

impl fmt::Display for OverrideTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A partial token tree applied at one tier
#[derive(Clone, Debug, PartialEq)]
pub struct OverrideLayer {
    tier: OverrideTier,
    source: String,
    tokens: TokenTree,
}

impl OverrideLayer {
    /// `source` names where the layer came from (a config file, a tenant id)
    pub fn new(tier: OverrideTier, source: impl Into<String>, tokens: TokenTree) -> Self {
        Self {
            tier,
            source: source.into(),
            tokens,
        }
    }

    pub fn runtime(source: impl Into<String>, tokens: TokenTree) -> Self {
        Self::new(OverrideTier::Runtime, source, tokens)
    }

    pub fn tier(&self) -> OverrideTier {
        self.tier
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &TokenTree {
        &self.tokens
    }

    pub fn info(&self) -> LayerInfo {
        LayerInfo {
            tier: self.tier,
            source: self.source.clone(),
        }
    }
}

/// Identity of an applied layer, without its tokens
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerInfo {
    pub tier: OverrideTier,
    pub source: String,
}

/// The set of active override layers, at most one per tier
#[derive(Clone, Debug, Default)]
pub struct OverrideStack {
    slots: [Option<OverrideLayer>; 3],
}

impl OverrideStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer to an empty tier
    pub fn push(&mut self, layer: OverrideLayer) -> Result<(), RegistryError> {
        let slot = &mut self.slots[layer.tier.slot()];
        if let Some(existing) = slot.as_ref() {
            return Err(RegistryError::TierOccupied {
                tier: layer.tier,
                existing: existing.source.clone(),
            });
        }
        *slot = Some(layer);
        Ok(())
    }

    /// Put a layer at its tier, returning the one it displaced
    pub fn replace(&mut self, layer: OverrideLayer) -> Option<OverrideLayer> {
        self.slots[layer.tier.slot()].replace(layer)
    }

    /// Remove the layer at `tier`
    pub fn pop(&mut self, tier: OverrideTier) -> Option<OverrideLayer> {
        self.slots[tier.slot()].take()
    }

    pub fn get(&self, tier: OverrideTier) -> Option<&OverrideLayer> {
        self.slots[tier.slot()].as_ref()
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Present layers, lowest priority first
    pub fn iter(&self) -> impl Iterator<Item = &OverrideLayer> {
        self.slots.iter().flatten()
    }
}
