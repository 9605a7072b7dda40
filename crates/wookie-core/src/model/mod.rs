//! Persisted entity model
//!
//! Every record is identified by an integer key assigned by the gateway on
//! first save. Relationships are foreign-key ids; no entity owns another in
//! memory.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod feature;
pub mod instance;
pub mod service;
pub mod widget;

pub use feature::{Feature, Param, PreferenceDefault};
pub use instance::{Participant, Preference, SharedData, WidgetInstance};
pub use service::{Whitelist, WidgetDefault, WidgetService};
pub use widget::{Widget, WidgetType};

/// The kinds of record the gateway stores, one table each
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Widget,
    WidgetType,
    WidgetService,
    WidgetDefault,
    Whitelist,
    Feature,
    Param,
    PreferenceDefault,
    WidgetInstance,
    Preference,
    SharedData,
    Participant,
}

impl EntityKind {
    /// Table name used by SQL-backed gateways
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Widget => "widget",
            EntityKind::WidgetType => "widget_type",
            EntityKind::WidgetService => "widget_service",
            EntityKind::WidgetDefault => "widget_default",
            EntityKind::Whitelist => "whitelist",
            EntityKind::Feature => "feature",
            EntityKind::Param => "param",
            EntityKind::PreferenceDefault => "preference_default",
            EntityKind::WidgetInstance => "widget_instance",
            EntityKind::Preference => "preference",
            EntityKind::SharedData => "shared_data",
            EntityKind::Participant => "participant",
        }
    }

    /// Human-readable name for messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Widget => "Widget",
            EntityKind::WidgetType => "Widget type",
            EntityKind::WidgetService => "Widget service",
            EntityKind::WidgetDefault => "Widget default",
            EntityKind::Whitelist => "Whitelist entry",
            EntityKind::Feature => "Feature",
            EntityKind::Param => "Param",
            EntityKind::PreferenceDefault => "Preference default",
            EntityKind::WidgetInstance => "Widget instance",
            EntityKind::Preference => "Preference",
            EntityKind::SharedData => "Shared data",
            EntityKind::Participant => "Participant",
        }
    }
}

/// A record the gateway can persist
///
/// Implementors serialize to a flat JSON object whose keys are `id` plus
/// exactly the names in [`Entity::FIELDS`]; gateways rely on that shape to
/// map records onto rows.
pub trait Entity: Serialize + DeserializeOwned + Clone + std::fmt::Debug {
    const KIND: EntityKind;

    /// Persisted field names, excluding `id`
    const FIELDS: &'static [&'static str];

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// True if `name` is `id` or one of [`Entity::FIELDS`]
    fn has_field(name: &str) -> bool {
        name == "id" || Self::FIELDS.contains(&name)
    }
}

/// Boolean columns arrive as JSON booleans from the memory gateway and as
/// 0/1 integers from SQLite; accept both.
pub mod flag {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        })
    }
}

/// Implements [`Entity`] for a struct with an `id: Option<i64>` field
macro_rules! impl_entity {
    ($ty:ty, $kind:expr, [$($field:literal),* $(,)?]) => {
        impl $crate::model::Entity for $ty {
            const KIND: $crate::model::EntityKind = $kind;
            const FIELDS: &'static [&'static str] = &[$($field),*];

            fn id(&self) -> Option<i64> {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = Some(id);
            }
        }
    };
}

pub(crate) use impl_entity;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Flagged {
        #[serde(deserialize_with = "flag::deserialize")]
        on: bool,
    }

    #[test]
    fn test_flag_accepts_bool_and_int() {
        let a: Flagged = serde_json::from_str(r#"{"on": true}"#).unwrap();
        let b: Flagged = serde_json::from_str(r#"{"on": 1}"#).unwrap();
        let c: Flagged = serde_json::from_str(r#"{"on": 0}"#).unwrap();
        assert!(a.on);
        assert!(b.on);
        assert!(!c.on);
    }

    #[test]
    fn test_tables_are_unique() {
        let kinds = [
            EntityKind::Widget,
            EntityKind::WidgetType,
            EntityKind::WidgetService,
            EntityKind::WidgetDefault,
            EntityKind::Whitelist,
            EntityKind::Feature,
            EntityKind::Param,
            EntityKind::PreferenceDefault,
            EntityKind::WidgetInstance,
            EntityKind::Preference,
            EntityKind::SharedData,
            EntityKind::Participant,
        ];
        let tables: std::collections::BTreeSet<_> = kinds.iter().map(|k| k.table()).collect();
        assert_eq!(tables.len(), kinds.len());
    }

    #[test]
    fn test_serialized_keys_match_fields() {
        fn keys<E: Entity>(e: &E) -> Vec<String> {
            let v = serde_json::to_value(e).unwrap();
            let mut keys: Vec<String> = v.as_object().unwrap().keys().cloned().collect();
            keys.sort();
            keys
        }
        fn expected<E: Entity>() -> Vec<String> {
            let mut names: Vec<String> = E::FIELDS.iter().map(|s| s.to_string()).collect();
            names.push("id".to_string());
            names.sort();
            names
        }

        assert_eq!(keys(&Widget::new("g", "t", "u")), expected::<Widget>());
        assert_eq!(keys(&WidgetType::new(1, "chat")), expected::<WidgetType>());
        assert_eq!(keys(&WidgetService::new("chat")), expected::<WidgetService>());
        assert_eq!(keys(&WidgetDefault::new("chat", 1)), expected::<WidgetDefault>());
        assert_eq!(keys(&Whitelist::new("http://x")), expected::<Whitelist>());
        assert_eq!(keys(&Feature::new(1, "f", true)), expected::<Feature>());
        assert_eq!(keys(&Param::new(1, "n", "v")), expected::<Param>());
        assert_eq!(
            keys(&PreferenceDefault::new(1, "p", "v", false)),
            expected::<PreferenceDefault>()
        );
        assert_eq!(keys(&WidgetInstance::new(1, "u", "k")), expected::<WidgetInstance>());
        assert_eq!(keys(&Preference::new(1, "k", "v")), expected::<Preference>());
        assert_eq!(keys(&SharedData::new(1, "s", "k", "v")), expected::<SharedData>());
        assert_eq!(keys(&Participant::new(1, "p", "name")), expected::<Participant>());
    }
}
