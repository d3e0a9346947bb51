//! Semantic token layer
//!
//! Semantic tokens name intent (`colors.primary`, `typography.heading.h1.size`)
//! and point at global tokens with `{palette.sky.500}`-style references.
//! References are expanded after layers are merged, so overriding a global
//! token re-targets every semantic token that refers to it.

use rustc_hash::FxHashMap;

use crate::error::AliasError;
use crate::resolve::{lookup, ResolveMiss};
use crate::tree::{TokenNode, TokenTree, TokenValue};

/// Longest reference chain followed before giving up
pub const MAX_ALIAS_DEPTH: usize = 32;

/// The referenced path if `value` is a `{path}` reference
pub fn alias_target(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('{')?.strip_suffix('}')?;
    let valid = !inner.is_empty()
        && inner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    valid.then_some(inner)
}

/// Expand every reference in `tree`, following chains
pub fn resolve_aliases(tree: &TokenTree) -> Result<TokenTree, AliasError> {
    let mut resolved = tree.clone();
    let mut expander = Expander {
        source: tree,
        prefix: Vec::new(),
        memo: FxHashMap::default(),
        expanded: 0,
    };
    expander.rewrite(&mut resolved)?;
    if expander.expanded > 0 {
        tracing::trace!(
            "expanded {} token aliases ({} distinct targets)",
            expander.expanded,
            expander.memo.len()
        );
    }
    Ok(resolved)
}

struct Expander<'a> {
    source: &'a TokenTree,
    prefix: Vec<String>,
    /// Reference -> final value, for references already followed
    memo: FxHashMap<String, TokenValue>,
    expanded: usize,
}

impl Expander<'_> {
    fn rewrite(&mut self, target: &mut TokenTree) -> Result<(), AliasError> {
        for (key, node) in target.iter_mut() {
            self.prefix.push(key.to_string());
            match node {
                TokenNode::Branch(child) => self.rewrite(child)?,
                TokenNode::Leaf(value) => {
                    if let Some(reference) = value.as_str().and_then(alias_target) {
                        let reference = reference.to_string();
                        *value = match self.memo.get(&reference) {
                            Some(resolved) => resolved.clone(),
                            None => {
                                let resolved = follow(self.source, self.prefix.join("."), &reference)?;
                                self.memo.insert(reference, resolved.clone());
                                resolved
                            }
                        };
                        self.expanded += 1;
                    }
                }
            }
            self.prefix.pop();
        }
        Ok(())
    }
}

fn follow(source: &TokenTree, origin: String, first: &str) -> Result<TokenValue, AliasError> {
    let mut chain = vec![origin];
    let mut target = first.to_string();

    for _ in 0..MAX_ALIAS_DEPTH {
        if chain.contains(&target) {
            chain.push(target);
            return Err(AliasError::Cycle { chain });
        }

        let value = match lookup(source, &target) {
            Ok(value) => value,
            Err(ResolveMiss::NotALeaf { .. }) => {
                return Err(AliasError::NotALeaf {
                    path: chain.pop().unwrap_or_default(),
                    target,
                })
            }
            Err(_) => {
                return Err(AliasError::Dangling {
                    path: chain.pop().unwrap_or_default(),
                    target,
                })
            }
        };

        match value.as_str().and_then(alias_target) {
            Some(next) => {
                chain.push(target);
                target = next.to_string();
            }
            None => return Ok(value.clone()),
        }
    }

    Err(AliasError::TooDeep {
        path: chain.swap_remove(0),
        max: MAX_ALIAS_DEPTH,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use pretty_assertions::assert_eq;

    fn palette() -> TokenTree {
        TokenTree::new().with(
            "palette",
            TokenTree::new()
                .with("sky", TokenTree::new().with("500", "#0ea5e9"))
                .with("size", TokenTree::new().with("base", 16)),
        )
    }

    #[test]
    fn recognises_references() {
        assert_eq!(alias_target("{palette.sky.500}"), Some("palette.sky.500"));
        assert_eq!(alias_target("#0ea5e9"), None);
        assert_eq!(alias_target("{}"), None);
        assert_eq!(alias_target("{a b}"), None);
        assert_eq!(alias_target("0 1px {palette.black}"), None);
    }

    #[test]
    fn expands_chains_and_keeps_value_kind() {
        let tree = palette()
            .with(
                "colors",
                TokenTree::new()
                    .with("brand", "{palette.sky.500}")
                    .with("primary", "{colors.brand}"),
            )
            .with("body", TokenTree::new().with("size", "{palette.size.base}"));

        let resolved = resolve_aliases(&tree).unwrap();
        assert_eq!(resolve(&resolved, "colors.primary", String::new()), "#0ea5e9");
        assert_eq!(resolve(&resolved, "body.size", 0.0_f64), 16.0);
    }

    #[test]
    fn dangling_reference_is_reported() {
        let tree = palette().with("colors", TokenTree::new().with("primary", "{palette.red.500}"));
        assert_eq!(
            resolve_aliases(&tree),
            Err(AliasError::Dangling {
                path: "colors.primary".to_string(),
                target: "palette.red.500".to_string(),
            })
        );
    }

    #[test]
    fn reference_to_a_tree_is_reported() {
        let tree = palette().with("colors", TokenTree::new().with("primary", "{palette.sky}"));
        assert!(matches!(
            resolve_aliases(&tree),
            Err(AliasError::NotALeaf { .. })
        ));
    }

    #[test]
    fn cycles_are_detected() {
        let tree = TokenTree::new()
            .with("a", "{b}")
            .with("b", "{c}")
            .with("c", "{a}");
        let Err(AliasError::Cycle { chain }) = resolve_aliases(&tree) else {
            panic!("expected a cycle");
        };
        assert_eq!(chain, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn overlong_chains_are_rejected() {
        let mut tree = TokenTree::new();
        for i in 0..40 {
            tree.insert(format!("t{i}"), format!("{{t{}}}", i + 1));
        }
        tree.insert("t40", "#000");
        assert_eq!(
            resolve_aliases(&tree),
            Err(AliasError::TooDeep {
                path: "t0".to_string(),
                max: MAX_ALIAS_DEPTH,
            })
        );
    }

    #[test]
    fn shared_targets_expand_identically() {
        let tree = palette().with(
            "colors",
            TokenTree::new()
                .with("primary", "{palette.sky.500}")
                .with("ring", "{palette.sky.500}"),
        );
        let resolved = resolve_aliases(&tree).unwrap();
        assert_eq!(resolve(&resolved, "colors.ring", String::new()), "#0ea5e9");
        assert_eq!(
            lookup(&resolved, "colors.primary"),
            lookup(&resolved, "colors.ring")
        );
    }
}
