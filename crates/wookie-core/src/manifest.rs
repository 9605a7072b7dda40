//! Widget manifest input contract
//!
//! A parsed widget package description. Only the first localized name,
//! description and icon are used when registering a widget.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, WookieError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub lang: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceDecl {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub readonly: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureDecl {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

/// Everything registration needs to know about a widget package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetManifest {
    pub identifier: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub names: Vec<LocalizedText>,
    #[serde(default)]
    pub descriptions: Vec<LocalizedText>,
    #[serde(default)]
    pub icons: Vec<Icon>,
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub preferences: Vec<PreferenceDecl>,
    #[serde(default)]
    pub features: Vec<FeatureDecl>,
}

impl WidgetManifest {
    pub fn first_name(&self) -> Option<&str> {
        self.names.first().map(|n| n.text.as_str())
    }

    pub fn first_description(&self) -> Option<&str> {
        self.descriptions.first().map(|d| d.text.as_str())
    }

    pub fn first_icon_path(&self) -> Option<&str> {
        self.icons.first().map(|i| i.src.as_str())
    }

    /// Check the fields registration cannot do without
    ///
    /// # Errors
    ///
    /// Returns `InvalidManifest` if the identifier is blank or the manifest
    /// carries no name.
    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(WookieError::InvalidManifest {
                reason: "manifest identifier is empty".to_string(),
            }
            .into());
        }
        if self.first_name().map_or(true, |n| n.trim().is_empty()) {
            return Err(WookieError::InvalidManifest {
                reason: format!("manifest {} has no name", self.identifier),
            }
            .into());
        }
        Ok(())
    }
}
