use thiserror::Error;

use crate::layer::OverrideTier;
use crate::theme::ColorScheme;
use crate::tree::NodeKind;

/// A layer whose shape disagrees with the layers beneath it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("structural mismatch at `{path}`: cannot merge a {incoming} over a {existing}")]
    StructuralMismatch {
        path: String,
        existing: NodeKind,
        incoming: NodeKind,
    },
}

/// Failure to expand `{path}` references in a merged tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("token `{path}` refers to `{target}`, which does not exist")]
    Dangling { path: String, target: String },

    #[error("token `{path}` refers to `{target}`, which is a tree rather than a value")]
    NotALeaf { path: String, target: String },

    #[error("alias cycle: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    #[error("alias chain starting at `{path}` is deeper than {max}")]
    TooDeep { path: String, max: usize },
}

/// Configuration-time failures of the theme registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    #[error("no active theme")]
    NoActiveTheme,

    #[error("no registered `{category}` theme for the {scheme} scheme")]
    NoSchemeVariant {
        category: String,
        scheme: ColorScheme,
    },

    #[error("the {tier} tier is already occupied by `{existing}`")]
    TierOccupied { tier: OverrideTier, existing: String },

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Alias(#[from] AliasError),
}
