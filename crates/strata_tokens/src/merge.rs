//! Deep merge of token layers
//!
//! Layers are applied lowest priority first. Trees merge key by key; a leaf
//! replaces a leaf wholesale. A leaf meeting a tree (in either direction) is
//! a structural mismatch and aborts the merge.

use crate::error::MergeError;
use crate::tree::{TokenNode, TokenTree};

/// Merge `layers`, ordered from lowest to highest priority
///
/// ```
/// use strata_tokens::{merge, TokenTree};
///
/// let base = TokenTree::new().with("colors", TokenTree::new().with("primary", "#0ea5e9"));
/// let brand = TokenTree::new().with("colors", TokenTree::new().with("primary", "#ff0000"));
/// let merged = merge([&base, &brand]).unwrap();
/// assert_eq!(strata_tokens::resolve(&merged, "colors.primary", String::new()), "#ff0000");
/// ```
pub fn merge<'a, I>(layers: I) -> Result<TokenTree, MergeError>
where
    I: IntoIterator<Item = &'a TokenTree>,
{
    let mut merged = TokenTree::new();
    let mut count = 0usize;
    for layer in layers {
        merge_branch(&mut merged, layer, &mut Vec::new())?;
        count += 1;
    }
    tracing::trace!("merged {} token layers ({} leaves)", count, merged.leaf_count());
    Ok(merged)
}

/// Merge a single `overlay` onto `base`
pub fn merge_pair(mut base: TokenTree, overlay: &TokenTree) -> Result<TokenTree, MergeError> {
    merge_branch(&mut base, overlay, &mut Vec::new())?;
    Ok(base)
}

fn merge_branch<'a>(
    target: &mut TokenTree,
    overlay: &'a TokenTree,
    path: &mut Vec<&'a str>,
) -> Result<(), MergeError> {
    for (key, incoming) in overlay.iter() {
        path.push(key);
        match (target.get_mut(key), incoming) {
            (None, node) => {
                target.insert(key, node.clone());
            }
            (Some(TokenNode::Branch(existing)), TokenNode::Branch(inner)) => {
                merge_branch(existing, inner, path)?;
            }
            (Some(TokenNode::Leaf(existing)), TokenNode::Leaf(value)) => {
                *existing = value.clone();
            }
            (Some(existing), incoming) => {
                return Err(MergeError::StructuralMismatch {
                    path: path.join("."),
                    existing: existing.kind(),
                    incoming: incoming.kind(),
                });
            }
        }
        path.pop();
    }
    Ok(())
}
