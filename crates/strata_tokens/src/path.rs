//! Dotted token paths (`colors.primary`, `typography.heading.h1.size`)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use thiserror::Error;

/// A non-empty sequence of non-empty path segments
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenPath {
    segments: SmallVec<[String; 4]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("token path is empty")]
    Empty,

    #[error("token path `{path}` has an empty segment at position {index}")]
    EmptySegment { path: String, index: usize },
}

impl TokenPath {
    /// Parse a dotted path
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        Self::from_segments(path.split('.'))
    }

    /// Build a path from already-split segments
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: SmallVec<[String; 4]> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        if let Some(index) = segments.iter().position(String::is_empty) {
            return Err(PathError::EmptySegment {
                path: segments.join("."),
                index,
            });
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Paths are never empty; provided for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Extend this path by one segment
    pub fn child(&self, segment: impl Into<String>) -> Result<Self, PathError> {
        let segment = segment.into();
        if segment.is_empty() {
            return Err(PathError::EmptySegment {
                path: format!("{self}."),
                index: self.segments.len(),
            });
        }
        let mut segments = self.segments.clone();
        segments.push(segment);
        Ok(Self { segments })
    }

    /// The path without its last segment, `None` for single-segment paths
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self { segments })
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for TokenPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for TokenPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for TokenPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let path = TokenPath::parse("typography.heading.h1").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_string(), "typography.heading.h1");
        assert_eq!(path.parent().unwrap().to_string(), "typography.heading");
    }

    #[test]
    fn rejects_empty_paths_and_segments() {
        assert_eq!(TokenPath::parse(""), Err(PathError::Empty));
        assert_eq!(
            TokenPath::parse("colors..primary"),
            Err(PathError::EmptySegment {
                path: "colors..primary".to_string(),
                index: 1,
            })
        );
        assert!(TokenPath::parse("colors.").is_err());
        assert!(TokenPath::from_segments(Vec::<String>::new()).is_err());
    }

    #[test]
    fn child_extends_path() {
        let path = TokenPath::parse("colors").unwrap().child("primary").unwrap();
        assert_eq!(path.segments(), ["colors", "primary"]);
        assert!(path.child("").is_err());
    }
}
