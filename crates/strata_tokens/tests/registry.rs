use pretty_assertions::assert_eq;
use strata_tokens::{
    AliasError, ColorScheme, MergeError, NodeKind, OverrideLayer, OverrideTier, RegistryError,
    TenantConfig, ConfigDocument, ThemePreset, ThemeRegistry, TokenTree, WhiteLabelConfig,
};

fn registry() -> ThemeRegistry {
    ThemeRegistry::with_bundle(ThemePreset::Default.bundle(), ColorScheme::Light).unwrap()
}

fn colors(key: &str, value: &str) -> TokenTree {
    TokenTree::new().with("colors", TokenTree::new().with(key, value))
}

#[test]
fn white_label_overrides_base_primary() {
    let registry = registry();
    assert_eq!(registry.resolve("colors.primary", String::from("#000000")), "#0ea5e9");

    let config = WhiteLabelConfig::from_json_str(
        r##"{ "brand": { "name": "Acme" }, "tokens": { "colors": { "primary": "#ff0000" } } }"##,
    )
    .unwrap();
    registry.push_override(config.into_layer()).unwrap();
    let tenant = TenantConfig::from_json_str(r#"{ "tenantId": "t-1" }"#).unwrap();
    registry.push_override(tenant.into_layer()).unwrap();
    registry
        .push_override(OverrideLayer::runtime("user", TokenTree::new()))
        .unwrap();

    assert_eq!(registry.resolve("colors.primary", String::from("#000000")), "#ff0000");
    let tiers: Vec<_> = registry.overrides().into_iter().map(|l| l.tier).collect();
    assert_eq!(tiers, OverrideTier::ALL);
}

#[test]
fn overriding_a_global_token_retargets_semantic_aliases() {
    let registry = registry();
    let layer = TokenTree::new().with(
        "palette",
        TokenTree::new().with("sky", TokenTree::new().with("500", "#123456")),
    );
    registry
        .push_override(OverrideLayer::new(OverrideTier::Tenant, "t-9", layer))
        .unwrap();

    assert_eq!(registry.resolve("colors.primary", String::new()), "#123456");
    assert_eq!(registry.resolve("colors.ring", String::new()), "#123456");
}

#[test]
fn runtime_beats_tenant_beats_white_label() {
    let registry = registry();
    registry
        .push_override(OverrideLayer::runtime("user", colors("primary", "#333333")))
        .unwrap();
    registry
        .push_override(OverrideLayer::new(
            OverrideTier::WhiteLabel,
            "acme",
            colors("primary", "#111111"),
        ))
        .unwrap();
    registry
        .push_override(OverrideLayer::new(
            OverrideTier::Tenant,
            "t-1",
            colors("primary", "#222222"),
        ))
        .unwrap();
    assert_eq!(registry.resolve("colors.primary", String::new()), "#333333");

    registry.pop_override(OverrideTier::Runtime).unwrap();
    assert_eq!(registry.resolve("colors.primary", String::new()), "#222222");

    registry.clear_overrides().unwrap();
    assert_eq!(registry.resolve("colors.primary", String::new()), "#0ea5e9");
}

#[test]
fn structural_mismatch_leaves_registry_untouched() {
    let registry = registry();
    let before = registry.snapshot();

    let bad = TokenTree::new().with("colors", "red");
    let err = registry
        .push_override(OverrideLayer::new(OverrideTier::Tenant, "broken", bad))
        .unwrap_err();

    assert_eq!(
        err,
        RegistryError::Merge(MergeError::StructuralMismatch {
            path: "colors".to_string(),
            existing: NodeKind::Branch,
            incoming: NodeKind::Leaf,
        })
    );
    assert!(registry.overrides().is_empty());
    assert_eq!(registry.snapshot().revision(), before.revision());
}

#[test]
fn dangling_alias_in_layer_is_rejected() {
    let registry = registry();
    let err = registry
        .push_override(OverrideLayer::runtime("user", colors("primary", "{palette.pink.500}")))
        .unwrap_err();
    assert!(matches!(err, RegistryError::Alias(AliasError::Dangling { .. })));
    assert_eq!(registry.resolve("colors.primary", String::new()), "#0ea5e9");
}

#[test]
fn replace_override_swaps_the_tier() {
    let registry = registry();
    registry
        .push_override(OverrideLayer::runtime("first", colors("primary", "#111111")))
        .unwrap();
    assert!(registry
        .push_override(OverrideLayer::runtime("second", colors("primary", "#222222")))
        .is_err());

    let displaced = registry
        .replace_override(OverrideLayer::runtime("second", colors("primary", "#222222")))
        .unwrap()
        .unwrap();
    assert_eq!(displaced.source(), "first");
    assert_eq!(registry.resolve("colors.primary", String::new()), "#222222");
}

#[test]
fn old_snapshots_are_not_affected_by_updates() {
    let registry = registry();
    let snapshot = registry.snapshot();
    registry
        .push_override(OverrideLayer::runtime("user", colors("primary", "#abcdef")))
        .unwrap();

    assert_eq!(snapshot.resolve("colors.primary", String::new()), "#0ea5e9");
    assert_eq!(registry.resolve("colors.primary", String::new()), "#abcdef");
}

#[test]
fn scheme_switch_keeps_overrides() {
    let registry = registry();
    registry
        .push_override(OverrideLayer::runtime("user", colors("danger", "#ff00ff")))
        .unwrap();
    registry.set_scheme(ColorScheme::Dark).unwrap();

    let snapshot = registry.snapshot();
    assert_eq!(snapshot.theme().id, "default-dark");
    assert_eq!(snapshot.resolve("colors.primary", String::new()), "#38bdf8");
    assert_eq!(snapshot.resolve("colors.danger", String::new()), "#ff00ff");
}

#[test]
fn registry_is_shareable_across_threads() {
    let registry = std::sync::Arc::new(registry());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || registry.resolve("colors.primary", String::new()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "#0ea5e9");
    }
}
