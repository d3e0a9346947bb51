//! Built-in theme presets
//!
//! Every preset is built the same way: the shared global token store
//! (palette, spacing, type scale, radii, shadows) plus a semantic layer of
//! `{path}` references into it. Presets differ only in their semantic layer.

use std::fmt::{Display, Formatter};

use crate::theme::{AccessibilityLevel, ColorScheme, Theme, ThemeBundle, ThemeMeta};
use crate::tree::TokenTree;

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Sky-blue brand on slate neutrals.
    Default,
    /// Darker brand and pure black/white text for high-contrast needs.
    HighContrast,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::HighContrast => "high-contrast",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::HighContrast => "High Contrast",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 2] = [ThemePreset::Default, ThemePreset::HighContrast];
        &PRESETS
    }

    fn accessibility(self) -> AccessibilityLevel {
        match self {
            Self::Default => AccessibilityLevel::Standard,
            Self::HighContrast => AccessibilityLevel::HighContrast,
        }
    }

    /// Build a light/dark theme bundle for this preset.
    pub fn bundle(self) -> ThemeBundle {
        let theme = |scheme: ColorScheme| {
            let meta = ThemeMeta::new(
                format!("{}-{}", self.id(), scheme),
                self.display_name(),
                scheme,
            );
            let tokens = global_tokens()
                .with("colors", semantic_colors(self, scheme))
                .with("typography", semantic_typography());
            Theme::new(meta, tokens)
                .with_accessibility(self.accessibility())
                .with_category(self.id())
        };
        ThemeBundle::new(
            self.display_name(),
            theme(ColorScheme::Light),
            theme(ColorScheme::Dark),
        )
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Convenience free function for ergonomic imports.
pub fn preset_bundle(preset: ThemePreset) -> ThemeBundle {
    preset.bundle()
}

fn scale(entries: &[(&str, &str)]) -> TokenTree {
    entries
        .iter()
        .fold(TokenTree::new(), |tree, (key, value)| tree.with(*key, *value))
}

fn numeric_scale(entries: &[(&str, f64)]) -> TokenTree {
    entries
        .iter()
        .fold(TokenTree::new(), |tree, (key, value)| tree.with(*key, *value))
}

/// The global token store shared by every preset
pub fn global_tokens() -> TokenTree {
    TokenTree::new()
        .with("palette", palette())
        .with("space", space())
        .with(
            "font",
            TokenTree::new()
                .with(
                    "family",
                    scale(&[
                        ("sans", "Inter, ui-sans-serif, system-ui, sans-serif"),
                        ("mono", "JetBrains Mono, ui-monospace, monospace"),
                    ]),
                )
                .with(
                    "size",
                    numeric_scale(&[
                        ("xs", 12.0),
                        ("sm", 14.0),
                        ("base", 16.0),
                        ("lg", 18.0),
                        ("xl", 20.0),
                        ("2xl", 24.0),
                        ("3xl", 30.0),
                        ("4xl", 36.0),
                    ]),
                )
                .with(
                    "weight",
                    numeric_scale(&[
                        ("normal", 400.0),
                        ("medium", 500.0),
                        ("semibold", 600.0),
                        ("bold", 700.0),
                    ]),
                )
                .with(
                    "leading",
                    numeric_scale(&[("tight", 1.25), ("normal", 1.5), ("relaxed", 1.625)]),
                ),
        )
        .with(
            "radius",
            numeric_scale(&[
                ("none", 0.0),
                ("sm", 4.0),
                ("md", 6.0),
                ("lg", 8.0),
                ("xl", 12.0),
                ("full", 9999.0),
            ]),
        )
        .with(
            "shadow",
            scale(&[
                ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
                ("md", "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)"),
                ("lg", "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)"),
            ]),
        )
}

fn palette() -> TokenTree {
    TokenTree::new()
        .with("white", "#ffffff")
        .with("black", "#000000")
        .with(
            "slate",
            scale(&[
                ("50", "#f8fafc"),
                ("100", "#f1f5f9"),
                ("200", "#e2e8f0"),
                ("300", "#cbd5e1"),
                ("400", "#94a3b8"),
                ("500", "#64748b"),
                ("600", "#475569"),
                ("700", "#334155"),
                ("800", "#1e293b"),
                ("900", "#0f172a"),
                ("950", "#020617"),
            ]),
        )
        .with(
            "sky",
            scale(&[
                ("300", "#7dd3fc"),
                ("400", "#38bdf8"),
                ("500", "#0ea5e9"),
                ("600", "#0284c7"),
                ("700", "#0369a1"),
                ("800", "#075985"),
            ]),
        )
        .with(
            "red",
            scale(&[("400", "#f87171"), ("500", "#ef4444"), ("700", "#b91c1c")]),
        )
        .with(
            "green",
            scale(&[("400", "#4ade80"), ("600", "#16a34a"), ("700", "#15803d")]),
        )
        .with(
            "amber",
            scale(&[("400", "#fbbf24"), ("600", "#d97706"), ("700", "#b45309")]),
        )
}

fn space() -> TokenTree {
    numeric_scale(&[
        ("0", 0.0),
        ("1", 4.0),
        ("2", 8.0),
        ("3", 12.0),
        ("4", 16.0),
        ("6", 24.0),
        ("8", 32.0),
        ("12", 48.0),
        ("16", 64.0),
    ])
}

fn semantic_colors(preset: ThemePreset, scheme: ColorScheme) -> TokenTree {
    let pick = |light: &str, dark: &str| match scheme {
        ColorScheme::Light => format!("{{palette.{light}}}"),
        ColorScheme::Dark => format!("{{palette.{dark}}}"),
    };

    let (primary, primary_hover) = match preset {
        ThemePreset::Default => (pick("sky.500", "sky.400"), pick("sky.600", "sky.300")),
        ThemePreset::HighContrast => (pick("sky.800", "sky.300"), pick("sky.700", "sky.400")),
    };
    let (text, text_muted, border) = match preset {
        ThemePreset::Default => (
            pick("slate.900", "slate.50"),
            pick("slate.500", "slate.400"),
            pick("slate.200", "slate.800"),
        ),
        ThemePreset::HighContrast => (
            pick("black", "white"),
            pick("slate.700", "slate.300"),
            pick("slate.900", "slate.100"),
        ),
    };

    TokenTree::new()
        .with("primary", primary)
        .with("primary-hover", primary_hover)
        .with("primary-foreground", pick("white", "slate.950"))
        .with("secondary", pick("slate.100", "slate.800"))
        .with("secondary-foreground", pick("slate.900", "slate.50"))
        .with("background", pick("white", "slate.950"))
        .with("surface", pick("slate.50", "slate.900"))
        .with("text", text)
        .with("text-muted", text_muted)
        .with("border", border)
        .with("ring", pick("sky.500", "sky.400"))
        .with("success", pick("green.600", "green.400"))
        .with("warning", pick("amber.600", "amber.400"))
        .with("danger", pick("red.500", "red.400"))
}

fn semantic_typography() -> TokenTree {
    let style = |size: &str, weight: &str, leading: &str| {
        TokenTree::new()
            .with("family", "{font.family.sans}")
            .with("size", format!("{{font.size.{size}}}"))
            .with("weight", format!("{{font.weight.{weight}}}"))
            .with("leading", format!("{{font.leading.{leading}}}"))
    };

    TokenTree::new()
        .with(
            "heading",
            TokenTree::new()
                .with("h1", style("4xl", "bold", "tight"))
                .with("h2", style("3xl", "bold", "tight"))
                .with("h3", style("2xl", "semibold", "tight"))
                .with("h4", style("xl", "semibold", "normal")),
        )
        .with(
            "body",
            TokenTree::new()
                .with("small", style("sm", "normal", "normal"))
                .with("medium", style("base", "normal", "normal"))
                .with("large", style("lg", "normal", "relaxed")),
        )
        .with(
            "code",
            TokenTree::new()
                .with("family", "{font.family.mono}")
                .with("size", "{font.size.sm}"),
        )
}
