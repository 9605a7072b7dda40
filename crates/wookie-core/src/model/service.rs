use serde::{Deserialize, Serialize};

use super::{impl_entity, EntityKind};

/// A category of hosting service (e.g. "chat")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetService {
    pub id: Option<i64>,
    pub service_name: String,
}

impl_entity!(WidgetService, EntityKind::WidgetService, ["service_name"]);

impl WidgetService {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            id: None,
            service_name: service_name.into(),
        }
    }
}

/// The designated default widget for a service context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDefault {
    pub id: Option<i64>,
    pub widget_context: String,
    pub widget_id: i64,
}

impl_entity!(WidgetDefault, EntityKind::WidgetDefault, ["widget_context", "widget_id"]);

impl WidgetDefault {
    pub fn new(widget_context: impl Into<String>, widget_id: i64) -> Self {
        Self {
            id: None,
            widget_context: widget_context.into(),
            widget_id,
        }
    }

    pub fn matches(&self, context: &str) -> bool {
        self.widget_context.eq_ignore_ascii_case(context)
    }
}

/// An allow-listed source URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whitelist {
    pub id: Option<i64>,
    pub f_url: String,
}

impl_entity!(Whitelist, EntityKind::Whitelist, ["f_url"]);

impl Whitelist {
    pub fn new(f_url: impl Into<String>) -> Self {
        Self {
            id: None,
            f_url: f_url.into(),
        }
    }
}
