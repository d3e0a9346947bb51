//! Strata Tokens
//!
//! Hierarchical design tokens, layered theme overrides, and path resolution.
//!
//! # Overview
//!
//! - **Token trees**: [`TokenTree`] is an explicit tagged tree of
//!   [`TokenNode::Leaf`] values and [`TokenNode::Branch`] subtrees
//! - **Global and semantic tokens**: semantic tokens reference global ones
//!   with `{palette.sky.500}` aliases, expanded after merging
//! - **Override layers**: white-label, tenant and runtime layers deep-merge
//!   over the active theme, highest tier winning per leaf
//! - **Resolution**: [`resolve`] never fails; it returns the caller's
//!   fallback and logs a diagnostic on a miss
//!
//! # Quick Start
//!
//! ```rust
//! use strata_tokens::{ColorScheme, OverrideLayer, OverrideTier, ThemePreset, ThemeRegistry, TokenTree};
//!
//! let registry = ThemeRegistry::with_bundle(ThemePreset::Default.bundle(), ColorScheme::Light).unwrap();
//!
//! // White-label brand color
//! let brand = TokenTree::new().with("colors", TokenTree::new().with("primary", "#ff0000"));
//! registry
//!     .push_override(OverrideLayer::new(OverrideTier::WhiteLabel, "acme", brand))
//!     .unwrap();
//!
//! let snapshot = registry.snapshot();
//! assert_eq!(snapshot.resolve("colors.primary", "#000000".to_string()), "#ff0000");
//! assert_eq!(snapshot.resolve("space.4", 0.0), 16.0);
//! ```
//!
//! # Snapshots
//!
//! Every registry change publishes a new [`TokenSnapshot`] behind an `Arc`.
//! Readers keep whichever snapshot they grabbed; nothing mutates under them.

pub mod alias;
pub mod config;
pub mod css;
pub mod error;
pub mod layer;
pub mod merge;
pub mod path;
pub mod presets;
pub mod registry;
pub mod resolve;
pub mod theme;
pub mod tree;

// Re-export commonly used types
pub use alias::{alias_target, resolve_aliases, MAX_ALIAS_DEPTH};
pub use config::{BrandInfo, ConfigDocument, ConfigError, TenantConfig, WhiteLabelConfig};
pub use error::{AliasError, MergeError, RegistryError};
pub use layer::{LayerInfo, OverrideLayer, OverrideStack, OverrideTier};
pub use merge::{merge, merge_pair};
pub use path::{PathError, TokenPath};
pub use presets::{global_tokens, preset_bundle, ThemePreset};
pub use registry::{ThemeRegistry, TokenSnapshot};
pub use resolve::{lookup, lookup_path, resolve, resolve_path, try_resolve, FromToken, ResolveMiss};
pub use theme::{AccessibilityLevel, ColorScheme, Theme, ThemeBundle, ThemeMeta};
pub use tree::{NodeKind, ShapeError, TokenNode, TokenTree, TokenValue, ValueKind};
