//! SSR adapter errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SsrError {
    #[error("malformed token payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported hydration payload version {found} (this build reads {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("token `{path}` is not a finite number and cannot cross the SSR boundary")]
    NonFiniteNumber { path: String },
}
