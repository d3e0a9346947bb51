use std::fs;

use strata_tokens::{ConfigDocument, ConfigError, TenantConfig, Theme, WhiteLabelConfig};

#[test]
fn loads_json_and_toml_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let json = dir.path().join("acme.json");
    fs::write(
        &json,
        r##"{ "brand": { "name": "Acme" }, "tokens": { "colors": { "primary": "#ff0000" } } }"##,
    )
    .unwrap();
    let white_label = WhiteLabelConfig::load(&json).unwrap();
    assert_eq!(white_label.brand.name, "Acme");

    let toml = dir.path().join("tenant.TOML");
    fs::write(&toml, "tenantId = \"t-7\"\n[tokens.space]\n4 = 18\n").unwrap();
    let tenant = TenantConfig::load(&toml).unwrap();
    assert_eq!(
        strata_tokens::resolve(&tenant.tokens, "space.4", 0.0_f64),
        18.0
    );
}

#[test]
fn loads_a_theme_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ocean.toml");
    fs::write(
        &path,
        r##"
id = "ocean-light"
name = "Ocean"
scheme = "light"
category = "ocean"

[tokens.colors]
primary = "#0891b2"
"##,
    )
    .unwrap();

    let theme = Theme::load(&path).unwrap();
    assert_eq!(theme.id(), "ocean-light");
    assert_eq!(theme.tokens().leaf_count(), 1);
}

#[test]
fn missing_file_reports_path() {
    let err = TenantConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn authoring_order_survives_loading() {
    let dir = tempfile::tempdir().unwrap();

    let json = dir.path().join("tenant.json");
    fs::write(
        &json,
        r##"{ "tenantId": "t-1", "tokens": { "space": { "8": 32, "2": 8, "4": 16 }, "colors": { "text": "#111" } } }"##,
    )
    .unwrap();
    let toml = dir.path().join("tenant.toml");
    fs::write(
        &toml,
        "tenantId = \"t-1\"\n[tokens.space]\n8 = 32\n2 = 8\n4 = 16\n[tokens.colors]\ntext = \"#111\"\n",
    )
    .unwrap();

    for path in [&json, &toml] {
        let tenant = TenantConfig::load(path).unwrap();
        assert_eq!(tenant.tokens.keys().collect::<Vec<_>>(), ["space", "colors"], "{}", path.display());
        let space = tenant
            .tokens
            .get("space")
            .and_then(strata_tokens::TokenNode::as_branch)
            .unwrap();
        assert_eq!(space.keys().collect::<Vec<_>>(), ["8", "2", "4"], "{}", path.display());
    }

    // Theme documents flatten their metadata; token order must survive that too
    let theme = dir.path().join("ocean.json");
    fs::write(
        &theme,
        r##"{ "id": "ocean", "name": "Ocean", "tokens": { "z": "#000", "a": "#fff" } }"##,
    )
    .unwrap();
    let theme = Theme::load(&theme).unwrap();
    assert_eq!(
        strata_tokens::css::to_custom_properties(theme.tokens(), "ui")
            .keys()
            .collect::<Vec<_>>(),
        ["--ui-z", "--ui-a"]
    );
}
