//! CSS custom property export
//!
//! Flattens a merged tree into `--prefix-colors-primary: #0ea5e9` pairs, in
//! tree order, so server and client emit byte-identical blocks.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::tree::TokenTree;

fn push_ident(out: &mut String, segment: &str) {
    for c in segment.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
        } else {
            out.push('-');
        }
    }
}

/// Custom property name for a token path (`colors.primary` -> `--ui-colors-primary`)
pub fn property_name(prefix: &str, segments: &[&str]) -> String {
    let mut name = String::from("--");
    if !prefix.is_empty() {
        push_ident(&mut name, prefix);
        name.push('-');
    }
    for (index, segment) in segments.iter().enumerate() {
        if index > 0 {
            name.push('-');
        }
        push_ident(&mut name, segment);
    }
    name
}

/// `var(--prefix-...)` reference for a dotted token path
pub fn var_reference(prefix: &str, path: &str) -> String {
    let segments: Vec<&str> = path.split('.').collect();
    format!("var({})", property_name(prefix, &segments))
}

/// Every leaf as a custom property, in tree order
///
/// Paths that flatten to the same name (`space."0.5"` and `space."0-5"`)
/// keep the first name's position and the last leaf's value.
pub fn to_custom_properties(tree: &TokenTree, prefix: &str) -> IndexMap<String, String> {
    let mut vars = IndexMap::with_capacity(tree.leaf_count());
    tree.for_each_leaf(|segments, value| {
        let name = property_name(prefix, segments);
        if let Some(previous) = vars.insert(name, value.to_string()) {
            tracing::warn!(
                "token `{}` maps to an already emitted custom property, replacing `{}`",
                segments.join("."),
                previous
            );
        }
    });
    vars
}

/// A CSS rule declaring every leaf under `selector`
pub fn to_css_block(selector: &str, tree: &TokenTree, prefix: &str) -> String {
    let mut css = String::new();
    let _ = writeln!(css, "{selector} {{");
    for (name, value) in to_custom_properties(tree, prefix) {
        let _ = writeln!(css, "  {name}: {value};");
    }
    css.push_str("}\n");
    css
}
