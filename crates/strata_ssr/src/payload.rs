//! Hydration payloads
//!
//! The server dehydrates its published snapshot into a versioned JSON
//! payload and embeds it in the page. The client rehydrates that payload
//! into a snapshot without merging or expanding aliases again.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use strata_tokens::{LayerInfo, ThemeMeta, TokenSnapshot, TokenTree};

use crate::codec::check_finite;
use crate::error::SsrError;

/// Payload format version written by this build
pub const PAYLOAD_VERSION: u32 = 1;

/// Default `id` of the embedded payload element
pub const DEFAULT_SCRIPT_ID: &str = "__strata_tokens";

/// Everything the client needs to render without recomputation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HydrationPayload {
    pub version: u32,
    pub theme: ThemeMeta,
    #[serde(default)]
    pub layers: Vec<LayerInfo>,
    /// Server-side revision, for diagnostics only
    pub revision: u64,
    pub tokens: TokenTree,
}

impl HydrationPayload {
    pub fn from_snapshot(snapshot: &TokenSnapshot) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            theme: snapshot.theme().clone(),
            layers: snapshot.layers().to_vec(),
            revision: snapshot.revision(),
            tokens: snapshot.tokens().clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, SsrError> {
        check_finite(&self.tokens)?;
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a payload, checking the version before the body
    pub fn from_json(blob: &str) -> Result<Self, SsrError> {
        #[derive(Deserialize)]
        struct Header {
            version: u32,
        }

        let header: Header = serde_json::from_str(blob)?;
        if header.version != PAYLOAD_VERSION {
            return Err(SsrError::UnsupportedVersion {
                found: header.version,
                expected: PAYLOAD_VERSION,
            });
        }
        Ok(serde_json::from_str(blob)?)
    }

    /// Rebuild the client-side snapshot
    ///
    /// The snapshot gets a fresh local revision; tokens are taken verbatim.
    pub fn into_snapshot(self) -> TokenSnapshot {
        TokenSnapshot::from_parts(self.theme, self.layers, self.tokens)
    }
}

/// Serialize a published snapshot for the client
pub fn dehydrate(snapshot: &TokenSnapshot) -> Result<String, SsrError> {
    let blob = HydrationPayload::from_snapshot(snapshot).to_json()?;
    tracing::debug!(
        "dehydrate - theme {} revision {} ({} bytes)",
        snapshot.theme().id,
        snapshot.revision(),
        blob.len()
    );
    Ok(blob)
}

/// Rebuild a snapshot from a [`dehydrate`] blob
pub fn rehydrate(blob: &str) -> Result<TokenSnapshot, SsrError> {
    let payload = HydrationPayload::from_json(blob)?;
    tracing::debug!(
        "rehydrate - theme {} from server revision {}",
        payload.theme.id,
        payload.revision
    );
    Ok(payload.into_snapshot())
}

/// Wrap a blob in a JSON `<script>` element
///
/// `<`, `>` and `&` are written as JSON unicode escapes, so the element
/// can't be closed early and the text content is still the same JSON.
pub fn embed_script(blob: &str, id: &str) -> String {
    let mut html = String::with_capacity(blob.len() + id.len() + 48);
    html.push_str("<script type=\"application/json\" id=\"");
    for c in id.chars() {
        match c {
            '"' => html.push_str("&quot;"),
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            c => html.push(c),
        }
    }
    html.push_str("\">");
    for c in blob.chars() {
        match c {
            '<' | '>' | '&' => {
                let _ = write!(html, "\\u{:04x}", c as u32);
            }
            c => html.push(c),
        }
    }
    html.push_str("</script>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strata_tokens::ColorScheme;

    fn snapshot() -> TokenSnapshot {
        TokenSnapshot::from_parts(
            ThemeMeta::new("brand-light", "Brand", ColorScheme::Light),
            Vec::new(),
            TokenTree::new().with("colors", TokenTree::new().with("primary", "#0ea5e9")),
        )
    }

    #[test]
    fn rehydrated_snapshot_has_identical_tokens() {
        let server = snapshot();
        let client = rehydrate(&dehydrate(&server).unwrap()).unwrap();
        assert_eq!(client.tokens(), server.tokens());
        assert_eq!(client.theme(), server.theme());
        assert_ne!(client.revision(), server.revision());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut payload = HydrationPayload::from_snapshot(&snapshot());
        payload.version = 99;
        let blob = serde_json::to_string(&payload).unwrap();
        assert!(matches!(
            rehydrate(&blob),
            Err(SsrError::UnsupportedVersion { found: 99, expected: 1 })
        ));

        // A future payload may change shape entirely; the version still wins
        assert!(matches!(
            HydrationPayload::from_json(r#"{"version": 2, "tree": []}"#),
            Err(SsrError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn script_cannot_be_closed_early() {
        let html = embed_script(r#"{"x":"</script><b>&"}"#, "a\"b");
        assert_eq!(
            html,
            r#"<script type="application/json" id="a&quot;b">{"x":"\u003c/script\u003e\u003cb\u003e\u0026"}</script>"#
        );
        assert_eq!(html.matches("</script>").count(), 1);
    }
}
