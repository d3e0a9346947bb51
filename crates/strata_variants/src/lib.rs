//! Strata Variants
//!
//! Class-variance style composition: a component declares a base fragment,
//! variant groups with defaults, and compound variants. [`compose`] turns a
//! caller's selections into an ordered list of fragments, and
//! [`Composition::resolve`] resolves their token references against a merged
//! token tree.
//!
//! # Example
//!
//! ```rust
//! use strata_tokens::{ColorScheme, ThemePreset, ThemeRegistry};
//! use strata_variants::{compose, Fragment, Selections, VariantSchema};
//!
//! let registry = ThemeRegistry::with_bundle(ThemePreset::Default.bundle(), ColorScheme::Light).unwrap();
//!
//! let button = VariantSchema::builder("button")
//!     .base(Fragment::from("inline-flex rounded-md").token("background", "colors.primary", "blue"))
//!     .group("size", |g| g.value("sm", "text-sm").value("md", "text-base").default_value("md"))
//!     .build()
//!     .unwrap();
//!
//! // Unknown values fall back to the default and leave a diagnostic
//! let composition = compose(&button, &Selections::new().with("size", "xl"));
//! assert_eq!(composition.class_string(), "inline-flex rounded-md text-base");
//! assert_eq!(composition.diagnostics().len(), 1);
//!
//! let style = composition.resolve(registry.snapshot().tokens());
//! assert_eq!(style.style["background"], "#0ea5e9");
//! ```

pub mod cache;
pub mod compose;
pub mod fragment;
pub mod schema;
pub mod selection;
pub mod typed;

pub use cache::{CacheStats, StyleCache};
pub use compose::{compose, Composition, ResolvedStyle, VariantDiagnostic};
pub use fragment::{Fragment, StyleValue};
pub use schema::{CompoundVariant, GroupBuilder, SchemaBuilder, SchemaError, VariantGroup, VariantSchema};
pub use selection::Selections;
pub use typed::VariantKey;
