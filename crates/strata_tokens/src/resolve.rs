//! Token path resolution
//!
//! [`lookup`] is the strict form and reports why a path didn't resolve.
//! [`resolve`] is the total form used at style-computation time: it never
//! fails, it returns the caller's fallback and logs the miss instead.

use smallvec::SmallVec;
use thiserror::Error;

use crate::path::TokenPath;
use crate::tree::{TokenNode, TokenTree, TokenValue, ValueKind};

/// Why a path did not resolve to a usable value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveMiss {
    #[error("empty token path")]
    EmptyPath,

    #[error("token path `{path}` has an empty segment")]
    EmptySegment { path: String },

    #[error("token `{path}` not found (no `{segment}` at that level)")]
    NotFound { path: String, segment: String },

    #[error("token `{path}` is a tree, not a value")]
    NotALeaf { path: String },

    #[error("token `{path}` is a {found}, expected {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: ValueKind,
    },
}

/// Conversion from a leaf value, without coercion between kinds
pub trait FromToken: Sized {
    /// Human-readable name of the expected kind, for diagnostics
    const EXPECTED: &'static str;

    fn from_token(value: &TokenValue) -> Option<Self>;
}

impl FromToken for TokenValue {
    const EXPECTED: &'static str = "a value";

    fn from_token(value: &TokenValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromToken for String {
    const EXPECTED: &'static str = "a string";

    fn from_token(value: &TokenValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromToken for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_token(value: &TokenValue) -> Option<Self> {
        value.as_f64()
    }
}

impl FromToken for f32 {
    const EXPECTED: &'static str = "a number";

    fn from_token(value: &TokenValue) -> Option<Self> {
        value.as_f64().map(|n| n as f32)
    }
}

impl FromToken for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_token(value: &TokenValue) -> Option<Self> {
        let n = value.as_f64()?;
        let in_range = n >= i64::MIN as f64 && n <= i64::MAX as f64;
        (n.fract() == 0.0 && in_range).then_some(n as i64)
    }
}

/// Look up the leaf at a dotted `path`
pub fn lookup<'t>(tree: &'t TokenTree, path: &str) -> Result<&'t TokenValue, ResolveMiss> {
    if path.is_empty() {
        return Err(ResolveMiss::EmptyPath);
    }
    let segments: SmallVec<[&str; 8]> = path.split('.').collect();
    walk(tree, &segments)
}

/// Look up the leaf at an already-parsed `path`
pub fn lookup_path<'t>(tree: &'t TokenTree, path: &TokenPath) -> Result<&'t TokenValue, ResolveMiss> {
    let segments: SmallVec<[&str; 8]> = path.segments().iter().map(String::as_str).collect();
    walk(tree, &segments)
}

fn walk<'t>(tree: &'t TokenTree, segments: &[&str]) -> Result<&'t TokenValue, ResolveMiss> {
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ResolveMiss::EmptySegment {
            path: segments.join("."),
        });
    }

    let mut current = tree;
    for (index, segment) in segments.iter().enumerate() {
        let is_last = index + 1 == segments.len();
        match current.get(segment) {
            None => {
                return Err(ResolveMiss::NotFound {
                    path: segments.join("."),
                    segment: segment.to_string(),
                })
            }
            Some(TokenNode::Leaf(value)) if is_last => return Ok(value),
            Some(TokenNode::Leaf(_)) => {
                // A value sits where the path expects to keep descending.
                return Err(ResolveMiss::NotFound {
                    path: segments.join("."),
                    segment: segments[index + 1].to_string(),
                });
            }
            Some(TokenNode::Branch(_)) if is_last => {
                return Err(ResolveMiss::NotALeaf {
                    path: segments.join("."),
                })
            }
            Some(TokenNode::Branch(child)) => current = child,
        }
    }
    Err(ResolveMiss::EmptyPath)
}

fn convert<T: FromToken>(path: &str, value: &TokenValue) -> Result<T, ResolveMiss> {
    T::from_token(value).ok_or_else(|| ResolveMiss::TypeMismatch {
        path: path.to_string(),
        expected: T::EXPECTED,
        found: value.kind(),
    })
}

/// Resolve `path` to a `T`, reporting why it failed
pub fn try_resolve<T: FromToken>(tree: &TokenTree, path: &str) -> Result<T, ResolveMiss> {
    convert(path, lookup(tree, path)?)
}

/// Resolve `path` to a `T`, or return `fallback`
///
/// Never panics. Misses are logged at debug level, type mismatches as
/// warnings since they usually point at a broken theme document.
pub fn resolve<T: FromToken>(tree: &TokenTree, path: &str, fallback: T) -> T {
    match try_resolve(tree, path) {
        Ok(value) => value,
        Err(miss) => {
            report_miss(&miss);
            fallback
        }
    }
}

/// [`resolve`] for an already-parsed path
pub fn resolve_path<T: FromToken>(tree: &TokenTree, path: &TokenPath, fallback: T) -> T {
    let result = lookup_path(tree, path).and_then(|value| convert(&path.to_string(), value));
    match result {
        Ok(value) => value,
        Err(miss) => {
            report_miss(&miss);
            fallback
        }
    }
}

pub(crate) fn report_miss(miss: &ResolveMiss) {
    match miss {
        ResolveMiss::TypeMismatch { .. } => tracing::warn!("token resolution fell back: {}", miss),
        _ => tracing::debug!("token resolution fell back: {}", miss),
    }
}
