use serde::{Deserialize, Serialize};

use super::{flag, impl_entity, EntityKind};

/// A registered, packaged mini-application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: Option<i64>,

    /// Manifest identifier, unique under normal operation
    pub guid: String,

    pub widget_title: String,
    pub widget_description: Option<String>,
    pub widget_author: Option<String>,
    pub widget_icon_location: Option<String>,

    /// Start file / content source URL
    pub url: String,

    pub width: i32,
    pub height: i32,
    pub version: Option<String>,

    #[serde(deserialize_with = "flag::deserialize")]
    pub maximize: bool,
}

impl_entity!(
    Widget,
    EntityKind::Widget,
    [
        "guid",
        "widget_title",
        "widget_description",
        "widget_author",
        "widget_icon_location",
        "url",
        "width",
        "height",
        "version",
        "maximize",
    ]
);

impl Widget {
    pub fn new(guid: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            guid: guid.into(),
            widget_title: title.into(),
            widget_description: None,
            widget_author: None,
            widget_icon_location: None,
            url: url.into(),
            width: 0,
            height: 0,
            version: None,
            maximize: false,
        }
    }
}

/// Tag linking a widget to a service context it supports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetType {
    pub id: Option<i64>,
    pub widget_id: i64,
    pub widget_context: String,
}

impl_entity!(WidgetType, EntityKind::WidgetType, ["widget_id", "widget_context"]);

impl WidgetType {
    pub fn new(widget_id: i64, widget_context: impl Into<String>) -> Self {
        Self {
            id: None,
            widget_id,
            widget_context: widget_context.into(),
        }
    }

    /// Service contexts compare case-insensitively
    pub fn matches(&self, context: &str) -> bool {
        self.widget_context.eq_ignore_ascii_case(context)
    }
}
