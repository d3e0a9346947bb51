//! Token tree data model
//!
//! A token tree is pure data: branches map string keys to child nodes and
//! leaves hold a scalar. Trees are built bottom-up, so they can't contain
//! cycles. Key order is preserved (it drives CSS export order) but is not
//! part of equality.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, DeserializeSeed, Error as _, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::path::TokenPath;

/// A scalar token value
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Str(String),
    Num(f64),
}

/// The kind of a scalar value, used in diagnostics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Str,
    Num,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Str => f.write_str("string"),
            ValueKind::Num => f.write_str("number"),
        }
    }
}

impl TokenValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TokenValue::Str(_) => ValueKind::Str,
            TokenValue::Num(_) => ValueKind::Num,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::Str(s) => Some(s),
            TokenValue::Num(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Num(n) => Some(*n),
            TokenValue::Str(_) => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Str(s) => f.write_str(s),
            // f64's Display already drops a trailing `.0`
            TokenValue::Num(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Str(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Str(value)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Num(value)
    }
}

impl From<i32> for TokenValue {
    fn from(value: i32) -> Self {
        TokenValue::Num(f64::from(value))
    }
}

impl From<u32> for TokenValue {
    fn from(value: u32) -> Self {
        TokenValue::Num(f64::from(value))
    }
}

/// A node in a token tree: either a leaf value or a nested tree
#[derive(Clone, Debug, PartialEq)]
pub enum TokenNode {
    Leaf(TokenValue),
    Branch(TokenTree),
}

/// Shape of a node, used in structural diagnostics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Leaf,
    Branch,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Leaf => f.write_str("value"),
            NodeKind::Branch => f.write_str("tree"),
        }
    }
}

impl TokenNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            TokenNode::Leaf(_) => NodeKind::Leaf,
            TokenNode::Branch(_) => NodeKind::Branch,
        }
    }

    pub fn as_leaf(&self) -> Option<&TokenValue> {
        match self {
            TokenNode::Leaf(value) => Some(value),
            TokenNode::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&TokenTree> {
        match self {
            TokenNode::Branch(tree) => Some(tree),
            TokenNode::Leaf(_) => None,
        }
    }
}

impl From<TokenValue> for TokenNode {
    fn from(value: TokenValue) -> Self {
        TokenNode::Leaf(value)
    }
}

impl From<TokenTree> for TokenNode {
    fn from(tree: TokenTree) -> Self {
        TokenNode::Branch(tree)
    }
}

impl From<&str> for TokenNode {
    fn from(value: &str) -> Self {
        TokenNode::Leaf(value.into())
    }
}

impl From<String> for TokenNode {
    fn from(value: String) -> Self {
        TokenNode::Leaf(value.into())
    }
}

impl From<f64> for TokenNode {
    fn from(value: f64) -> Self {
        TokenNode::Leaf(value.into())
    }
}

impl From<i32> for TokenNode {
    fn from(value: i32) -> Self {
        TokenNode::Leaf(value.into())
    }
}

/// A hierarchical collection of tokens
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenTree {
    nodes: IndexMap<String, TokenNode>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for literal trees
    ///
    /// ```
    /// use strata_tokens::TokenTree;
    ///
    /// let tree = TokenTree::new()
    ///     .with("colors", TokenTree::new().with("primary", "#0ea5e9"))
    ///     .with("radius", 8);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn with(mut self, key: impl Into<String>, node: impl Into<TokenNode>) -> Self {
        self.nodes.insert(key.into(), node.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<TokenNode>) -> Option<TokenNode> {
        self.nodes.insert(key.into(), node.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<TokenNode> {
        self.nodes.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        self.nodes.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut TokenNode> {
        self.nodes.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenNode)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut TokenNode)> {
        self.nodes.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Get the node at `path`, if every segment exists
    pub fn get_path(&self, path: &TokenPath) -> Option<&TokenNode> {
        let (first, rest) = path.segments().split_first()?;
        let mut node = self.get(first)?;
        for segment in rest {
            node = node.as_branch()?.get(segment)?;
        }
        Some(node)
    }

    /// Set a leaf at `path`, creating intermediate trees as needed
    ///
    /// Fails if a leaf sits where a tree is needed (or the other way around);
    /// the tree is left untouched in that case.
    pub fn set_path(
        &mut self,
        path: &TokenPath,
        value: impl Into<TokenValue>,
    ) -> Result<Option<TokenValue>, ShapeError> {
        let segments = path.segments();
        let Some((last, parents)) = segments.split_last() else {
            return Ok(None);
        };

        // Validate before mutating so a failure leaves the tree intact.
        let mut cursor = Some(self as &TokenTree);
        for (depth, segment) in parents.iter().enumerate() {
            let Some(tree) = cursor else { break };
            cursor = match tree.get(segment) {
                Some(TokenNode::Branch(child)) => Some(child),
                Some(TokenNode::Leaf(_)) => {
                    return Err(ShapeError {
                        path: segments[..=depth].join("."),
                        found: "value",
                    })
                }
                None => None,
            };
        }
        if let Some(TokenNode::Branch(_)) = cursor.and_then(|tree| tree.get(last)) {
            return Err(ShapeError {
                path: path.to_string(),
                found: "tree",
            });
        }

        let mut current = self;
        for segment in parents {
            let node = current
                .nodes
                .entry(segment.clone())
                .or_insert_with(|| TokenNode::Branch(TokenTree::new()));
            current = match node {
                TokenNode::Branch(child) => child,
                TokenNode::Leaf(_) => unreachable!("validated above"),
            };
        }
        match current.nodes.insert(last.clone(), TokenNode::Leaf(value.into())) {
            Some(TokenNode::Leaf(previous)) => Ok(Some(previous)),
            _ => Ok(None),
        }
    }

    /// Visit every leaf depth-first, in key order
    pub fn for_each_leaf<'a>(&'a self, mut f: impl FnMut(&[&'a str], &'a TokenValue)) {
        fn walk<'a>(
            tree: &'a TokenTree,
            prefix: &mut Vec<&'a str>,
            f: &mut impl FnMut(&[&'a str], &'a TokenValue),
        ) {
            for (key, node) in tree.iter() {
                prefix.push(key);
                match node {
                    TokenNode::Leaf(value) => f(prefix, value),
                    TokenNode::Branch(child) => walk(child, prefix, f),
                }
                prefix.pop();
            }
        }

        walk(self, &mut Vec::new(), &mut f);
    }

    /// Number of leaves in the whole tree
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.for_each_leaf(|_, _| count += 1);
        count
    }
}

impl FromIterator<(String, TokenNode)> for TokenTree {
    fn from_iter<I: IntoIterator<Item = (String, TokenNode)>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

/// A document that doesn't have the shape of a token tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid token at `{path}`: expected a string, number or nested table, found {found}")]
pub struct ShapeError {
    pub path: String,
    pub found: &'static str,
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "table",
    }
}

fn node_from_json(value: serde_json::Value, path: &mut Vec<String>) -> Result<TokenNode, ShapeError> {
    match value {
        serde_json::Value::String(s) => Ok(TokenNode::Leaf(TokenValue::Str(s))),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(n) => Ok(TokenNode::Leaf(TokenValue::Num(n))),
            None => Err(ShapeError {
                path: path.join("."),
                found: "out-of-range number",
            }),
        },
        serde_json::Value::Object(map) => {
            let mut tree = TokenTree::new();
            for (key, child) in map {
                path.push(key.clone());
                let node = node_from_json(child, path)?;
                path.pop();
                tree.nodes.insert(key, node);
            }
            Ok(TokenNode::Branch(tree))
        }
        other => Err(ShapeError {
            path: path.join("."),
            found: json_kind(&other),
        }),
    }
}

impl TryFrom<serde_json::Value> for TokenTree {
    type Error = ShapeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let found = json_kind(&value);
        match node_from_json(value, &mut Vec::new())? {
            TokenNode::Branch(tree) => Ok(tree),
            TokenNode::Leaf(_) => Err(ShapeError {
                path: "<root>".to_string(),
                found,
            }),
        }
    }
}

impl Serialize for TokenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenValue::Str(s) => serializer.serialize_str(s),
            TokenValue::Num(n) => serializer.serialize_f64(*n),
        }
    }
}

impl Serialize for TokenNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenNode::Leaf(value) => value.serialize(serializer),
            TokenNode::Branch(tree) => tree.serialize(serializer),
        }
    }
}

impl Serialize for TokenTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.nodes.len()))?;
        for (key, node) in &self.nodes {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

/// Deserializes one node, tracking the key path for shape errors
struct NodeSeed<'p> {
    path: &'p mut Vec<String>,
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_> {
    type Value = TokenNode;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<TokenNode, D::Error> {
        deserializer.deserialize_any(NodeVisitor { path: self.path })
    }
}

struct NodeVisitor<'p> {
    path: &'p mut Vec<String>,
}

impl NodeVisitor<'_> {
    fn shape<E: de::Error>(&self, found: &'static str) -> E {
        E::custom(ShapeError {
            path: self.path.join("."),
            found,
        })
    }
}

impl<'de> Visitor<'de> for NodeVisitor<'_> {
    type Value = TokenNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or nested table")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TokenNode, E> {
        Ok(TokenNode::Leaf(TokenValue::Str(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<TokenNode, E> {
        Ok(TokenNode::Leaf(TokenValue::Str(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TokenNode, E> {
        Ok(TokenNode::Leaf(TokenValue::Num(v as f64)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TokenNode, E> {
        Ok(TokenNode::Leaf(TokenValue::Num(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<TokenNode, E> {
        Ok(TokenNode::Leaf(TokenValue::Num(v)))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<TokenNode, E> {
        Err(self.shape("boolean"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<TokenNode, E> {
        Err(self.shape("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<TokenNode, E> {
        Err(self.shape("null"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, _: A) -> Result<TokenNode, A::Error> {
        Err(self.shape("array"))
    }

    // Entries go straight into the tree, keeping document order.
    fn visit_map<A: MapAccess<'de>>(mut self, mut map: A) -> Result<TokenNode, A::Error> {
        let mut tree = TokenTree::new();
        while let Some(key) = map.next_key::<String>()? {
            self.path.push(key.clone());
            let node = map.next_value_seed(NodeSeed {
                path: &mut *self.path,
            })?;
            self.path.pop();
            tree.nodes.insert(key, node);
        }
        Ok(TokenNode::Branch(tree))
    }
}

impl<'de> Deserialize<'de> for TokenTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match (NodeSeed { path: &mut Vec::new() }).deserialize(deserializer)? {
            TokenNode::Branch(tree) => Ok(tree),
            TokenNode::Leaf(value) => Err(D::Error::custom(ShapeError {
                path: "<root>".to_string(),
                found: match value.kind() {
                    ValueKind::Str => "string",
                    ValueKind::Num => "number",
                },
            })),
        }
    }
}
