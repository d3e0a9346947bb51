//! Strata SSR
//!
//! Carries a published token snapshot across the server/client boundary.
//!
//! - [`serialize`] / [`deserialize`]: the bare token tree wire format
//! - [`dehydrate`] / [`rehydrate`]: versioned payload with theme metadata
//! - [`embed_script`]: the payload as an inert `<script>` element
//! - [`Hydrator`]: reconciles the client tree with the server one, allowing
//!   at most one re-render
//!
//! ```rust
//! use strata_ssr::{dehydrate, embed_script, Hydrator, Reconciliation, DEFAULT_SCRIPT_ID};
//! use strata_tokens::{ColorScheme, ThemePreset, ThemeRegistry};
//!
//! // Server
//! let registry = ThemeRegistry::with_bundle(ThemePreset::Default.bundle(), ColorScheme::Light).unwrap();
//! let blob = dehydrate(&registry.snapshot()).unwrap();
//! let html = embed_script(&blob, DEFAULT_SCRIPT_ID);
//! assert!(html.starts_with("<script type=\"application/json\""));
//!
//! // Client
//! let mut hydrator = Hydrator::from_blob(&blob).unwrap();
//! let client_tree = registry.snapshot().tokens().clone();
//! assert_eq!(hydrator.reconcile(&client_tree), Reconciliation::Hydrated);
//! ```

pub mod codec;
pub mod error;
pub mod hydrate;
pub mod payload;

pub use codec::{deserialize, serialize};
pub use error::SsrError;
pub use hydrate::{ClientEnvironment, ClientOverrides, Hydrator, Reconciliation};
pub use payload::{dehydrate, embed_script, rehydrate, HydrationPayload, DEFAULT_SCRIPT_ID, PAYLOAD_VERSION};
