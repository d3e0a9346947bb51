use pretty_assertions::assert_eq;
use strata_tokens::{ColorScheme, OverrideLayer, OverrideTier, ThemePreset, ThemeRegistry, TokenTree};
use strata_variants::{
    compose, variant_enum, CompoundVariant, Fragment, Selections, StyleCache, VariantDiagnostic,
    VariantSchema,
};

variant_enum! {
    pub enum Intent("intent") {
        Primary => "primary",
        Secondary => "secondary",
        Danger => "danger",
    }
}

variant_enum! {
    pub enum Size("size") {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
    }
}

fn button() -> VariantSchema {
    VariantSchema::builder("button")
        .base(Fragment::from("inline-flex items-center").token("color", "colors.primary-foreground", "#fff"))
        .typed_group(Some(Intent::Primary), |intent| match intent {
            Intent::Primary => Fragment::from("bg-primary").token("background", "colors.primary", "blue"),
            Intent::Secondary => Fragment::from("bg-secondary"),
            Intent::Danger => Fragment::from("bg-danger").token("background", "colors.danger", "red"),
        })
        .typed_group(Some(Size::Md), |size| match size {
            Size::Sm => Fragment::from("h-8 text-sm"),
            Size::Md => Fragment::from("h-10 text-base"),
            Size::Lg => Fragment::from("h-12 text-lg"),
        })
        .compound(
            CompoundVariant::new()
                .when_variant(Intent::Danger)
                .when_any("size", ["md", "lg"])
                .then("font-semibold"),
        )
        .build()
        .unwrap()
}

#[test]
fn unknown_size_composes_like_the_default() {
    let schema = VariantSchema::builder("text")
        .group("size", |g| g.value("sm", "text-sm").value("md", "text-base").default_value("md"))
        .build()
        .unwrap();

    let xl = compose(&schema, &Selections::new().with("size", "xl"));
    let md = compose(&schema, &Selections::new().with("size", "md"));
    assert_eq!(xl.class_string(), "text-base");
    assert_eq!(xl.class_string(), md.class_string());
    assert!(matches!(
        xl.diagnostics(),
        [VariantDiagnostic::UnknownValue { value, .. }] if value == "xl"
    ));
}

#[test]
fn typed_selections_and_compounds() {
    let schema = button();

    let danger_lg = compose(
        &schema,
        &Selections::new().with_variant(Size::Lg).with_variant(Intent::Danger),
    );
    assert_eq!(
        danger_lg.class_string(),
        "inline-flex items-center bg-danger h-12 text-lg font-semibold"
    );

    let danger_sm = compose(
        &schema,
        &Selections::new().with_variant(Intent::Danger).with_variant(Size::Sm),
    );
    assert_eq!(danger_sm.class_string(), "inline-flex items-center bg-danger h-8 text-sm");
}

#[test]
fn styles_follow_the_published_snapshot() {
    let registry = ThemeRegistry::with_bundle(ThemePreset::Default.bundle(), ColorScheme::Light).unwrap();
    let schema = button();
    let cache = StyleCache::default();
    let selections = Selections::new();

    let before = cache.get_or_compose(&registry.snapshot(), &schema, &selections);
    assert_eq!(before.style["background"], "#0ea5e9");
    assert_eq!(before.style_string(), "color: #ffffff; background: #0ea5e9");

    registry
        .push_override(OverrideLayer::new(
            OverrideTier::WhiteLabel,
            "acme",
            TokenTree::new().with("colors", TokenTree::new().with("primary", "#ff0000")),
        ))
        .unwrap();

    let after = cache.get_or_compose(&registry.snapshot(), &schema, &selections);
    assert_eq!(after.style["background"], "#ff0000");
    assert_eq!(cache.stats().misses, 2);

    // Same snapshot, same selections: served from the cache
    let again = cache.get_or_compose(&registry.snapshot(), &schema, &selections);
    assert!(std::sync::Arc::ptr_eq(&after, &again));
}

#[test]
fn missing_tokens_use_declared_fallbacks() {
    let schema = button();
    let style = compose(&schema, &Selections::new().with_variant(Intent::Danger)).resolve(&TokenTree::new());
    assert_eq!(style.style["background"], "red");
    assert_eq!(style.style["color"], "#fff");
}
