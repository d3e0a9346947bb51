//! Client-side hydration
//!
//! The client starts from the server's snapshot and renders with it as-is.
//! If the tree the client computes disagrees (a runtime layer that loaded
//! late, say), the hydrator asks for one re-render with the client tree.
//! Any later disagreement is only reported; it never triggers another.

use std::sync::Arc;

use strata_tokens::{ColorScheme, OverrideLayer, TokenSnapshot, TokenTree};

use crate::error::SsrError;
use crate::payload::HydrationPayload;

/// Client-only state, such as a stored scheme preference
///
/// Implemented by the client runtime. Nothing in this crate calls it before
/// hydration has completed.
pub trait ClientEnvironment {
    /// Scheme the user or platform prefers, if known
    fn preferred_scheme(&self) -> Option<ColorScheme>;

    /// Runtime override persisted from an earlier session
    fn stored_runtime_override(&self) -> Option<TokenTree>;
}

/// Client state to apply once hydration is done
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientOverrides {
    pub scheme: Option<ColorScheme>,
    pub runtime: Option<OverrideLayer>,
}

/// Outcome of comparing the client tree with the current one
#[derive(Clone, Debug, PartialEq)]
pub enum Reconciliation {
    /// Trees agree; keep the server render
    Hydrated,
    /// First disagreement: re-render once with this tree
    Rerender(TokenTree),
    /// Disagreement after the one re-render; logged and ignored
    Suppressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pending,
    Hydrated,
    Rerendered,
}

/// One-shot reconciler between the server payload and the client tree
#[derive(Debug)]
pub struct Hydrator {
    snapshot: Arc<TokenSnapshot>,
    server_revision: u64,
    phase: Phase,
    suppressed: u32,
}

impl Hydrator {
    pub fn new(payload: HydrationPayload) -> Self {
        let server_revision = payload.revision;
        Self {
            snapshot: Arc::new(payload.into_snapshot()),
            server_revision,
            phase: Phase::Pending,
            suppressed: 0,
        }
    }

    /// Build from the embedded blob
    pub fn from_blob(blob: &str) -> Result<Self, SsrError> {
        Ok(Self::new(HydrationPayload::from_json(blob)?))
    }

    /// Snapshot to render with; the server's until a re-render replaces it
    pub fn snapshot(&self) -> Arc<TokenSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn tokens(&self) -> &TokenTree {
        self.snapshot.tokens()
    }

    pub fn server_revision(&self) -> u64 {
        self.server_revision
    }

    pub fn is_hydrated(&self) -> bool {
        self.phase != Phase::Pending
    }

    /// Number of mismatches reported without a re-render
    pub fn suppressed(&self) -> u32 {
        self.suppressed
    }

    /// Compare the client-computed tree with the one being rendered
    pub fn reconcile(&mut self, client: &TokenTree) -> Reconciliation {
        if client == self.snapshot.tokens() {
            if self.phase == Phase::Pending {
                self.phase = Phase::Hydrated;
                tracing::debug!("Hydrator::reconcile - hydrated revision {}", self.server_revision);
            }
            return Reconciliation::Hydrated;
        }

        if self.phase == Phase::Rerendered {
            self.suppressed = self.suppressed.saturating_add(1);
            tracing::warn!(
                "Hydrator::reconcile - client tree differs again after re-render ({} suppressed)",
                self.suppressed
            );
            return Reconciliation::Suppressed;
        }

        tracing::debug!(
            "Hydrator::reconcile - client tree differs from server revision {}, re-rendering once",
            self.server_revision
        );
        let theme = self.snapshot.theme().clone();
        let layers = self.snapshot.layers().to_vec();
        self.snapshot = Arc::new(TokenSnapshot::from_parts(theme, layers, client.clone()));
        self.phase = Phase::Rerendered;
        Reconciliation::Rerender(client.clone())
    }

    /// Read client-only state, available only after hydration
    pub fn client_overrides(&self, env: &dyn ClientEnvironment) -> Option<ClientOverrides> {
        if !self.is_hydrated() {
            tracing::debug!("Hydrator::client_overrides - not hydrated yet");
            return None;
        }
        Some(ClientOverrides {
            scheme: env.preferred_scheme(),
            runtime: env
                .stored_runtime_override()
                .map(|tokens| OverrideLayer::runtime("client-storage", tokens)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use strata_tokens::ThemeMeta;

    fn payload() -> HydrationPayload {
        HydrationPayload {
            version: crate::payload::PAYLOAD_VERSION,
            theme: ThemeMeta::new("default-light", "Default", ColorScheme::Light),
            layers: Vec::new(),
            revision: 7,
            tokens: TokenTree::new().with("colors", TokenTree::new().with("primary", "#0ea5e9")),
        }
    }

    fn colors(primary: &str) -> TokenTree {
        TokenTree::new().with("colors", TokenTree::new().with("primary", primary))
    }

    struct Browser {
        calls: Cell<u32>,
    }

    impl ClientEnvironment for Browser {
        fn preferred_scheme(&self) -> Option<ColorScheme> {
            self.calls.set(self.calls.get() + 1);
            Some(ColorScheme::Dark)
        }

        fn stored_runtime_override(&self) -> Option<TokenTree> {
            self.calls.set(self.calls.get() + 1);
            Some(colors("#ff00ff"))
        }
    }

    #[test]
    fn matching_tree_hydrates_without_rerender() {
        let mut hydrator = Hydrator::new(payload());
        assert_eq!(hydrator.reconcile(&colors("#0ea5e9")), Reconciliation::Hydrated);
        assert!(hydrator.is_hydrated());
        assert_eq!(hydrator.server_revision(), 7);
    }

    #[test]
    fn at_most_one_rerender() {
        let mut hydrator = Hydrator::new(payload());
        assert_eq!(
            hydrator.reconcile(&colors("#ff0000")),
            Reconciliation::Rerender(colors("#ff0000"))
        );
        assert_eq!(hydrator.tokens(), &colors("#ff0000"));

        assert_eq!(hydrator.reconcile(&colors("#ff0000")), Reconciliation::Hydrated);
        assert_eq!(hydrator.reconcile(&colors("#00ff00")), Reconciliation::Suppressed);
        assert_eq!(hydrator.reconcile(&colors("#0000ff")), Reconciliation::Suppressed);
        assert_eq!(hydrator.suppressed(), 2);
        assert_eq!(hydrator.tokens(), &colors("#ff0000"));
    }

    #[test]
    fn suppressed_count_saturates() {
        let mut hydrator = Hydrator::new(payload());
        hydrator.reconcile(&colors("#ff0000"));
        hydrator.suppressed = u32::MAX;
        assert_eq!(hydrator.reconcile(&colors("#00ff00")), Reconciliation::Suppressed);
        assert_eq!(hydrator.suppressed(), u32::MAX);
    }

    #[test]
    fn client_environment_is_untouched_before_hydration() {
        let browser = Browser { calls: Cell::new(0) };
        let mut hydrator = Hydrator::new(payload());
        assert_eq!(hydrator.client_overrides(&browser), None);
        assert_eq!(browser.calls.get(), 0);

        hydrator.reconcile(&colors("#0ea5e9"));
        let overrides = hydrator.client_overrides(&browser).unwrap();
        assert_eq!(overrides.scheme, Some(ColorScheme::Dark));
        assert_eq!(overrides.runtime.unwrap().tokens(), &colors("#ff00ff"));
    }
}
