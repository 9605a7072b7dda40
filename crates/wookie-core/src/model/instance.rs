//! Instance-scoped runtime records
//!
//! Admin operations never create these; they only have to delete them when a
//! widget goes away.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{flag, impl_entity, EntityKind};

/// A running deployment of a widget for one user/context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetInstance {
    pub id: Option<i64>,
    pub widget_id: i64,
    pub user_id: String,
    pub api_key: String,
    pub shared_data_key: Option<String>,
    pub id_key: Option<String>,
    pub nonce: Option<String>,
    #[serde(deserialize_with = "flag::deserialize")]
    pub shown: bool,
    #[serde(deserialize_with = "flag::deserialize")]
    pub hidden: bool,
    #[serde(deserialize_with = "flag::deserialize")]
    pub locked: bool,
    pub updated: Option<DateTime<Utc>>,
}

impl_entity!(
    WidgetInstance,
    EntityKind::WidgetInstance,
    [
        "widget_id",
        "user_id",
        "api_key",
        "shared_data_key",
        "id_key",
        "nonce",
        "shown",
        "hidden",
        "locked",
        "updated",
    ]
);

impl WidgetInstance {
    pub fn new(widget_id: i64, user_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            id: None,
            widget_id,
            user_id: user_id.into(),
            api_key: api_key.into(),
            shared_data_key: None,
            id_key: None,
            nonce: None,
            shown: true,
            hidden: false,
            locked: false,
            updated: Some(Utc::now()),
        }
    }
}

/// A per-instance preference value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub id: Option<i64>,
    pub widget_instance_id: i64,
    pub dkey: String,
    pub dvalue: Option<String>,
    #[serde(deserialize_with = "flag::deserialize")]
    pub read_only: bool,
}

impl_entity!(
    Preference,
    EntityKind::Preference,
    ["widget_instance_id", "dkey", "dvalue", "read_only"]
);

impl Preference {
    pub fn new(widget_instance_id: i64, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: None,
            widget_instance_id,
            dkey: key.into(),
            dvalue: Some(value.into()),
            read_only: false,
        }
    }
}

/// A key/value pair shared between instances with the same shared-data key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedData {
    pub id: Option<i64>,
    pub widget_instance_id: i64,
    pub shared_data_key: String,
    pub dkey: String,
    pub dvalue: Option<String>,
}

impl_entity!(
    SharedData,
    EntityKind::SharedData,
    ["widget_instance_id", "shared_data_key", "dkey", "dvalue"]
);

impl SharedData {
    pub fn new(
        widget_instance_id: i64,
        shared_data_key: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            widget_instance_id,
            shared_data_key: shared_data_key.into(),
            dkey: key.into(),
            dvalue: Some(value.into()),
        }
    }
}

/// A user taking part in a shared widget session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Option<i64>,
    pub widget_instance_id: i64,
    pub participant_id: String,
    pub participant_display_name: Option<String>,
    pub participant_thumbnail_url: Option<String>,
    pub shared_data_key: Option<String>,
}

impl_entity!(
    Participant,
    EntityKind::Participant,
    [
        "widget_instance_id",
        "participant_id",
        "participant_display_name",
        "participant_thumbnail_url",
        "shared_data_key",
    ]
);

impl Participant {
    pub fn new(
        widget_instance_id: i64,
        participant_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            widget_instance_id,
            participant_id: participant_id.into(),
            participant_display_name: Some(display_name.into()),
            participant_thumbnail_url: None,
            shared_data_key: None,
        }
    }
}
