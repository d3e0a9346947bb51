//! Token tree wire format
//!
//! The blob is the tree as a JSON object in tree order, so the same tree
//! always serializes to the same bytes. JSON has no NaN or infinity, so such
//! leaves are rejected instead of silently turning into `null`.

use strata_tokens::{TokenTree, TokenValue};

use crate::error::SsrError;

/// Serialize a merged token tree
pub fn serialize(tree: &TokenTree) -> Result<String, SsrError> {
    check_finite(tree)?;
    Ok(serde_json::to_string(tree)?)
}

/// Parse a blob produced by [`serialize`]
pub fn deserialize(blob: &str) -> Result<TokenTree, SsrError> {
    Ok(serde_json::from_str(blob)?)
}

pub(crate) fn check_finite(tree: &TokenTree) -> Result<(), SsrError> {
    let mut bad = None;
    tree.for_each_leaf(|segments, value| {
        if bad.is_none() {
            if let TokenValue::Num(n) = value {
                if !n.is_finite() {
                    bad = Some(segments.join("."));
                }
            }
        }
    });
    match bad {
        Some(path) => Err(SsrError::NonFiniteNumber { path }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree() -> TokenTree {
        TokenTree::new()
            .with(
                "colors",
                TokenTree::new()
                    .with("primary", "#0ea5e9")
                    .with("states", TokenTree::new().with("hover", "#0284c7")),
            )
            .with("space", TokenTree::new().with("4", 16).with("half", 0.5).with("third", 1.0 / 3.0))
            .with("empty", TokenTree::new())
            .with("quote", "say \"hi\" </script>")
    }

    #[test]
    fn round_trips_structurally() {
        let original = tree();
        let blob = serialize(&original).unwrap();
        assert_eq!(deserialize(&blob).unwrap(), original);
    }

    #[test]
    fn output_is_stable() {
        assert_eq!(serialize(&tree()).unwrap(), serialize(&tree()).unwrap());
        assert_eq!(serialize(&TokenTree::new()).unwrap(), "{}");
    }

    #[test]
    fn reserializing_a_blob_gives_the_same_bytes() {
        let blob = serialize(&tree()).unwrap();
        assert_eq!(serialize(&deserialize(&blob).unwrap()).unwrap(), blob);

        let authored = r#"{"z":{"9":"x","1":"y"},"a":0.1,"m":{}}"#;
        assert_eq!(serialize(&deserialize(authored).unwrap()).unwrap(), authored);
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let tree = TokenTree::new().with("space", TokenTree::new().with("bad", f64::NAN));
        let err = serialize(&tree).unwrap_err();
        assert!(matches!(err, SsrError::NonFiniteNumber { ref path } if path == "space.bad"), "{err}");
    }

    #[test]
    fn malformed_blob_is_an_error() {
        assert!(matches!(deserialize("[1, 2]"), Err(SsrError::Json(_))));
        assert!(matches!(deserialize("{\"a\": true}"), Err(SsrError::Json(_))));
    }
}
