//! Themes: a named, versioned token tree plus metadata

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::TokenTree;

/// Color scheme (light or dark mode)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Toggle between light and dark
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::Light => f.write_str("light"),
            ColorScheme::Dark => f.write_str("dark"),
        }
    }
}

/// Accessibility level a theme was designed for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessibilityLevel {
    #[default]
    Standard,
    Enhanced,
    HighContrast,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Theme metadata
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeMeta {
    pub id: String,
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub scheme: ColorScheme,
    #[serde(default)]
    pub accessibility: AccessibilityLevel,
    /// Family the theme belongs to; light and dark variants share it
    #[serde(default)]
    pub category: String,
}

impl ThemeMeta {
    pub fn new(id: impl Into<String>, name: impl Into<String>, scheme: ColorScheme) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: default_version(),
            scheme,
            accessibility: AccessibilityLevel::default(),
            category: String::new(),
        }
    }

    /// Placeholder metadata for a registry with no theme yet
    pub(crate) fn unthemed() -> Self {
        Self::new("", "Unthemed", ColorScheme::default())
    }
}

/// A complete token tree for one visual mode
///
/// Themes are values: every `with_*` method returns a new theme and leaves
/// the original untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(flatten)]
    meta: ThemeMeta,
    #[serde(default)]
    tokens: TokenTree,
}

impl Theme {
    pub fn new(meta: ThemeMeta, tokens: TokenTree) -> Self {
        Self { meta, tokens }
    }

    pub fn meta(&self) -> &ThemeMeta {
        &self.meta
    }

    pub fn tokens(&self) -> &TokenTree {
        &self.tokens
    }

    pub fn id(&self) -> &str {
        &self.meta.id
    }

    pub fn scheme(&self) -> ColorScheme {
        self.meta.scheme
    }

    pub fn with_tokens(&self, tokens: TokenTree) -> Self {
        Self {
            meta: self.meta.clone(),
            tokens,
        }
    }

    pub fn with_version(&self, version: impl Into<String>) -> Self {
        let mut theme = self.clone();
        theme.meta.version = version.into();
        theme
    }

    pub fn with_accessibility(&self, accessibility: AccessibilityLevel) -> Self {
        let mut theme = self.clone();
        theme.meta.accessibility = accessibility;
        theme
    }

    pub fn with_category(&self, category: impl Into<String>) -> Self {
        let mut theme = self.clone();
        theme.meta.category = category.into();
        theme
    }
}

/// A light/dark pair of themes
#[derive(Clone, Debug)]
pub struct ThemeBundle {
    pub name: String,
    pub light: Theme,
    pub dark: Theme,
}

impl ThemeBundle {
    pub fn new(name: impl Into<String>, light: Theme, dark: Theme) -> Self {
        Self {
            name: name.into(),
            light,
            dark,
        }
    }

    /// Get the theme for a color scheme
    pub fn for_scheme(&self, scheme: ColorScheme) -> &Theme {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    pub fn into_themes(self) -> [Theme; 2] {
        [self.light, self.dark]
    }
}
