use serde::{Deserialize, Serialize};

use super::{flag, impl_entity, EntityKind};

/// A capability a widget declares it needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: Option<i64>,
    pub widget_id: i64,
    pub feature_name: String,
    #[serde(deserialize_with = "flag::deserialize")]
    pub required: bool,
}

impl_entity!(Feature, EntityKind::Feature, ["widget_id", "feature_name", "required"]);

impl Feature {
    pub fn new(widget_id: i64, feature_name: impl Into<String>, required: bool) -> Self {
        Self {
            id: None,
            widget_id,
            feature_name: feature_name.into(),
            required,
        }
    }
}

/// A configuration parameter of a [`Feature`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub id: Option<i64>,
    pub feature_id: i64,
    pub parameter_name: String,
    pub parameter_value: String,
}

impl_entity!(Param, EntityKind::Param, ["feature_id", "parameter_name", "parameter_value"]);

impl Param {
    pub fn new(feature_id: i64, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: None,
            feature_id,
            parameter_name: name.into(),
            parameter_value: value.into(),
        }
    }
}

/// Initial value of a widget preference, copied into each new instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceDefault {
    pub id: Option<i64>,
    pub widget_id: i64,
    pub preference: String,
    pub value: Option<String>,
    #[serde(deserialize_with = "flag::deserialize")]
    pub read_only: bool,
}

impl_entity!(
    PreferenceDefault,
    EntityKind::PreferenceDefault,
    ["widget_id", "preference", "value", "read_only"]
);

impl PreferenceDefault {
    pub fn new(
        widget_id: i64,
        preference: impl Into<String>,
        value: impl Into<String>,
        read_only: bool,
    ) -> Self {
        Self {
            id: None,
            widget_id,
            preference: preference.into(),
            value: Some(value.into()),
            read_only,
        }
    }
}
