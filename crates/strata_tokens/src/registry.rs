//! Theme registry and published token snapshots
//!
//! The registry owns the registered themes, the active theme id and the
//! override stack. Every change rebuilds the merged tree and publishes it as
//! a new immutable [`TokenSnapshot`]. Style computation only ever reads a
//! snapshot, so in-flight resolutions keep the tree they started with.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::alias::resolve_aliases;
use crate::error::RegistryError;
use crate::layer::{LayerInfo, OverrideLayer, OverrideStack, OverrideTier};
use crate::merge::merge;
use crate::resolve::{resolve, try_resolve, FromToken, ResolveMiss};
use crate::theme::{ColorScheme, Theme, ThemeBundle, ThemeMeta};
use crate::tree::TokenTree;

/// Process-wide revision counter, so revisions never collide across registries
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// One published, fully merged and alias-expanded token tree
#[derive(Debug)]
pub struct TokenSnapshot {
    theme: ThemeMeta,
    layers: Vec<LayerInfo>,
    tokens: TokenTree,
    revision: u64,
}

impl TokenSnapshot {
    /// Merge `theme` with `overrides` and expand aliases
    pub fn build(theme: &Theme, overrides: &OverrideStack) -> Result<Self, RegistryError> {
        let layers = std::iter::once(theme.tokens()).chain(overrides.iter().map(OverrideLayer::tokens));
        let merged = merge(layers)?;
        let tokens = resolve_aliases(&merged)?;

        Ok(Self {
            theme: theme.meta().clone(),
            layers: overrides.iter().map(OverrideLayer::info).collect(),
            tokens,
            revision: next_revision(),
        })
    }

    /// A snapshot with no tokens; every resolution falls back
    pub fn empty() -> Self {
        Self {
            theme: ThemeMeta::unthemed(),
            layers: Vec::new(),
            tokens: TokenTree::new(),
            revision: next_revision(),
        }
    }

    /// Rebuild a snapshot from parts received elsewhere (e.g. an SSR payload)
    ///
    /// The tokens are taken as already merged; a fresh revision is assigned.
    pub fn from_parts(theme: ThemeMeta, layers: Vec<LayerInfo>, tokens: TokenTree) -> Self {
        Self {
            theme,
            layers,
            tokens,
            revision: next_revision(),
        }
    }

    pub fn theme(&self) -> &ThemeMeta {
        &self.theme
    }

    pub fn layers(&self) -> &[LayerInfo] {
        &self.layers
    }

    pub fn tokens(&self) -> &TokenTree {
        &self.tokens
    }

    /// Unique per publish; identifies the (theme, overrides) pair for caching
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn resolve<T: FromToken>(&self, path: &str, fallback: T) -> T {
        resolve(&self.tokens, path, fallback)
    }

    pub fn try_resolve<T: FromToken>(&self, path: &str) -> Result<T, ResolveMiss> {
        try_resolve(&self.tokens, path)
    }
}

#[derive(Default)]
struct RegistryState {
    themes: IndexMap<String, Arc<Theme>>,
    active: Option<String>,
    overrides: OverrideStack,
}

impl RegistryState {
    fn active_theme(&self) -> Option<&Arc<Theme>> {
        self.active.as_ref().and_then(|id| self.themes.get(id))
    }
}

/// Registry of themes and override layers
///
/// An explicit handle rather than a global: create one per app (or per
/// tenant) and share it behind an `Arc`.
///
/// ```
/// use strata_tokens::{ThemePreset, ThemeRegistry, ColorScheme};
///
/// let registry = ThemeRegistry::with_bundle(ThemePreset::Default.bundle(), ColorScheme::Light).unwrap();
/// let primary: String = registry.resolve("colors.primary", "#000000".to_string());
/// assert_eq!(primary, "#0ea5e9");
/// ```
pub struct ThemeRegistry {
    state: RwLock<RegistryState>,
    published: RwLock<Arc<TokenSnapshot>>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            published: RwLock::new(Arc::new(TokenSnapshot::empty())),
        }
    }

    /// Registry with both themes of a bundle registered, `scheme` active
    pub fn with_bundle(bundle: ThemeBundle, scheme: ColorScheme) -> Result<Self, RegistryError> {
        let registry = Self::new();
        let active = bundle.for_scheme(scheme).id().to_string();
        registry.register_bundle(bundle)?;
        registry.set_active_theme(&active)?;
        Ok(registry)
    }

    fn state(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, snapshot: TokenSnapshot) {
        tracing::debug!(
            "ThemeRegistry::publish - theme `{}`, {} override layers, revision {}",
            snapshot.theme.id,
            snapshot.layers.len(),
            snapshot.revision
        );
        *self.published.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
    }

    // ========== Themes ==========

    /// Register a theme, replacing any theme with the same id
    ///
    /// The theme must merge and expand on its own. The first registered theme
    /// becomes active. Replacing the active theme republishes it with the
    /// current overrides; if that fails nothing changes.
    pub fn register_theme(&self, theme: Theme) -> Result<(), RegistryError> {
        let mut state = self.state_mut();
        TokenSnapshot::build(&theme, &OverrideStack::new())?;

        let id = theme.id().to_string();
        let becomes_active = match state.active.as_deref() {
            None => true,
            Some(active) => active == id,
        };
        if becomes_active {
            let snapshot = TokenSnapshot::build(&theme, &state.overrides)?;
            state.active = Some(id.clone());
            state.themes.insert(id.clone(), Arc::new(theme));
            self.publish(snapshot);
        } else {
            state.themes.insert(id.clone(), Arc::new(theme));
        }
        tracing::debug!("ThemeRegistry::register_theme - `{}`", id);
        Ok(())
    }

    /// Register both themes of a light/dark bundle
    pub fn register_bundle(&self, bundle: ThemeBundle) -> Result<(), RegistryError> {
        for theme in bundle.into_themes() {
            self.register_theme(theme)?;
        }
        Ok(())
    }

    /// Metadata of every registered theme, in registration order
    pub fn themes(&self) -> Vec<ThemeMeta> {
        self.state().themes.values().map(|t| t.meta().clone()).collect()
    }

    pub fn theme(&self, id: &str) -> Option<Arc<Theme>> {
        self.state().themes.get(id).cloned()
    }

    pub fn active_theme_id(&self) -> Option<String> {
        self.state().active.clone()
    }

    /// Switch the active theme
    pub fn set_active_theme(&self, id: &str) -> Result<(), RegistryError> {
        let mut state = self.state_mut();
        if state.active.as_deref() == Some(id) {
            return Ok(());
        }
        let theme = state
            .themes
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownTheme(id.to_string()))?;
        let snapshot = TokenSnapshot::build(&theme, &state.overrides)?;

        tracing::debug!(
            "ThemeRegistry::set_active_theme - switching from {:?} to `{}`",
            state.active,
            id
        );
        state.active = Some(id.to_string());
        self.publish(snapshot);
        Ok(())
    }

    /// Switch to the active theme's sibling for `scheme`
    ///
    /// The sibling is the registered theme with the same category and the
    /// requested scheme.
    pub fn set_scheme(&self, scheme: ColorScheme) -> Result<(), RegistryError> {
        let target = {
            let state = self.state();
            let active = state.active_theme().ok_or(RegistryError::NoActiveTheme)?;
            if active.scheme() == scheme {
                return Ok(());
            }
            let category = &active.meta().category;
            state
                .themes
                .values()
                .find(|t| t.scheme() == scheme && &t.meta().category == category)
                .map(|t| t.id().to_string())
                .ok_or_else(|| RegistryError::NoSchemeVariant {
                    category: category.clone(),
                    scheme,
                })?
        };
        self.set_active_theme(&target)
    }

    /// Toggle the active theme between light and dark
    pub fn toggle_scheme(&self) -> Result<(), RegistryError> {
        let current = self.snapshot().theme().scheme;
        self.set_scheme(current.toggle())
    }

    // ========== Overrides ==========

    fn update_overrides(
        &self,
        change: impl FnOnce(&mut OverrideStack) -> Result<Option<OverrideLayer>, RegistryError>,
    ) -> Result<Option<OverrideLayer>, RegistryError> {
        let mut state = self.state_mut();
        let mut overrides = state.overrides.clone();
        let displaced = change(&mut overrides)?;

        if let Some(theme) = state.active_theme() {
            let snapshot = TokenSnapshot::build(theme, &overrides)?;
            state.overrides = overrides;
            self.publish(snapshot);
        } else {
            state.overrides = overrides;
        }
        Ok(displaced)
    }

    /// Add a layer at an unoccupied tier
    pub fn push_override(&self, layer: OverrideLayer) -> Result<(), RegistryError> {
        tracing::debug!(
            "ThemeRegistry::push_override - {} layer `{}`",
            layer.tier(),
            layer.source()
        );
        self.update_overrides(|stack| stack.push(layer).map(|()| None))
            .map(|_| ())
    }

    /// Put a layer at its tier, returning the layer it displaced
    pub fn replace_override(&self, layer: OverrideLayer) -> Result<Option<OverrideLayer>, RegistryError> {
        tracing::debug!(
            "ThemeRegistry::replace_override - {} layer `{}`",
            layer.tier(),
            layer.source()
        );
        self.update_overrides(|stack| Ok(stack.replace(layer)))
    }

    /// Remove the layer at `tier`
    pub fn pop_override(&self, tier: OverrideTier) -> Result<Option<OverrideLayer>, RegistryError> {
        tracing::debug!("ThemeRegistry::pop_override - {} tier", tier);
        self.update_overrides(|stack| Ok(stack.pop(tier)))
    }

    /// Remove every override layer
    pub fn clear_overrides(&self) -> Result<(), RegistryError> {
        self.update_overrides(|stack| {
            stack.clear();
            Ok(None)
        })
        .map(|_| ())
    }

    /// Currently applied layers, lowest priority first
    pub fn overrides(&self) -> Vec<LayerInfo> {
        self.state().overrides.iter().map(OverrideLayer::info).collect()
    }

    // ========== Resolution ==========

    /// The current merged tree
    pub fn snapshot(&self) -> Arc<TokenSnapshot> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Resolve against the current snapshot
    pub fn resolve<T: FromToken>(&self, path: &str, fallback: T) -> T {
        self.snapshot().resolve(path, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMeta;
    use pretty_assertions::assert_eq;

    fn theme(id: &str, scheme: ColorScheme, primary: &str) -> Theme {
        Theme::new(
            ThemeMeta::new(id, id, scheme),
            TokenTree::new().with("colors", TokenTree::new().with("primary", primary)),
        )
        .with_category("test")
    }

    #[test]
    fn empty_registry_resolves_to_fallbacks() {
        let registry = ThemeRegistry::new();
        assert_eq!(registry.resolve("colors.primary", String::from("#000")), "#000");
        assert!(registry.active_theme_id().is_none());
    }

    #[test]
    fn first_registered_theme_becomes_active() {
        let registry = ThemeRegistry::new();
        registry.register_theme(theme("a", ColorScheme::Light, "#aaa")).unwrap();
        registry.register_theme(theme("b", ColorScheme::Dark, "#bbb")).unwrap();

        assert_eq!(registry.active_theme_id().as_deref(), Some("a"));
        assert_eq!(registry.resolve("colors.primary", String::new()), "#aaa");
        let ids: Vec<_> = registry.themes().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn set_scheme_picks_sibling_in_category() {
        let registry = ThemeRegistry::new();
        registry.register_theme(theme("a", ColorScheme::Light, "#aaa")).unwrap();
        registry.register_theme(theme("b", ColorScheme::Dark, "#bbb")).unwrap();

        registry.set_scheme(ColorScheme::Dark).unwrap();
        assert_eq!(registry.active_theme_id().as_deref(), Some("b"));
        registry.toggle_scheme().unwrap();
        assert_eq!(registry.active_theme_id().as_deref(), Some("a"));
    }

    #[test]
    fn set_scheme_without_sibling_fails() {
        let registry = ThemeRegistry::new();
        registry.register_theme(theme("a", ColorScheme::Light, "#aaa")).unwrap();
        assert_eq!(
            registry.set_scheme(ColorScheme::Dark),
            Err(RegistryError::NoSchemeVariant {
                category: "test".to_string(),
                scheme: ColorScheme::Dark,
            })
        );
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let registry = ThemeRegistry::new();
        assert_eq!(
            registry.set_active_theme("missing"),
            Err(RegistryError::UnknownTheme("missing".to_string()))
        );
    }

    #[test]
    fn every_publish_gets_a_new_revision() {
        let registry = ThemeRegistry::new();
        registry.register_theme(theme("a", ColorScheme::Light, "#aaa")).unwrap();
        let before = registry.snapshot();
        registry
            .push_override(OverrideLayer::runtime("user", TokenTree::new()))
            .unwrap();
        let after = registry.snapshot();

        assert_ne!(before.revision(), after.revision());
        assert_eq!(after.layers().len(), 1);
    }
}
