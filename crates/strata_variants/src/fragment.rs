//! Style fragments: the unit a variant contributes
//!
//! A fragment is an ordered list of classes plus ordered style declarations.
//! Declaration values are literals or references to design tokens, resolved
//! against a merged token tree at composition time.

/// Value of a style declaration
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleValue {
    Literal(String),
    /// A token path, with the value used when it doesn't resolve
    Token { path: String, fallback: String },
}

/// Classes and style declarations contributed by one variant value
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fragment {
    classes: Vec<String>,
    declarations: Vec<(String, StyleValue)>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append whitespace-separated classes
    pub fn classes(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    /// Append a literal style declaration
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations
            .push((property.into(), StyleValue::Literal(value.into())));
        self
    }

    /// Append a style declaration whose value comes from a token
    pub fn token(
        mut self,
        property: impl Into<String>,
        path: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        self.declarations.push((
            property.into(),
            StyleValue::Token {
                path: path.into(),
                fallback: fallback.into(),
            },
        ));
        self
    }

    pub fn class_list(&self) -> &[String] {
        &self.classes
    }

    pub fn declarations(&self) -> &[(String, StyleValue)] {
        &self.declarations
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.declarations.is_empty()
    }
}

impl From<&str> for Fragment {
    fn from(classes: &str) -> Self {
        Fragment::new().classes(classes)
    }
}

impl From<String> for Fragment {
    fn from(classes: String) -> Self {
        Fragment::new().classes(&classes)
    }
}
