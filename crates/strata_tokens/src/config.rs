//! Persisted theme configuration
//!
//! White-label and tenant configuration (and complete theme documents) are
//! plain JSON or TOML documents whose `tokens` table has the token-tree
//! shape. Loading validates that shape; a boolean or array where a token is
//! expected is rejected with the offending path.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layer::{OverrideLayer, OverrideTier};
use crate::theme::Theme;
use crate::tree::TokenTree;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format `{0}` (expected .json or .toml)")]
    UnsupportedFormat(String),
}

/// A configuration document loadable from JSON or TOML
pub trait ConfigDocument: DeserializeOwned {
    fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(src)?)
    }

    fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    /// Load a document, picking the format from the file extension
    fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let read = || {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        let document = match extension.as_str() {
            "json" => Self::from_json_str(&read()?)?,
            "toml" => Self::from_toml_str(&read()?)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        tracing::debug!(
            "loaded {} from {}",
            std::any::type_name::<Self>(),
            path.display()
        );
        Ok(document)
    }
}

/// Brand identity carried by a white-label configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
}

/// White-label configuration: brand identity plus token overrides
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteLabelConfig {
    pub brand: BrandInfo,
    #[serde(default)]
    pub tokens: TokenTree,
}

impl WhiteLabelConfig {
    pub fn into_layer(self) -> OverrideLayer {
        OverrideLayer::new(
            OverrideTier::WhiteLabel,
            format!("white-label:{}", self.brand.name),
            self.tokens,
        )
    }
}

/// Per-tenant token overrides
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfig {
    pub tenant_id: String,
    #[serde(default)]
    pub tokens: TokenTree,
}

impl TenantConfig {
    pub fn into_layer(self) -> OverrideLayer {
        OverrideLayer::new(
            OverrideTier::Tenant,
            format!("tenant:{}", self.tenant_id),
            self.tokens,
        )
    }
}

impl ConfigDocument for WhiteLabelConfig {}
impl ConfigDocument for TenantConfig {}
impl ConfigDocument for Theme {}
