//! Widget removal cascade
//!
//! ## Scenarios Covered
//!
//! 1. Removing a widget deletes every dependent record and nothing else
//! 2. Removing an unknown widget answers false
//! 3. A store failure mid-cascade rolls everything back
//! 4. A failed rollback surfaces as a partial cascade

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use serde_json::Value;
use wookie_core::errors::{ExError, ExErrorKind, Result};
use wookie_core::gateway::{Filter, Gateway, MemoryGateway};
use wookie_core::model::{
    Entity, Feature, Param, Participant, Preference, PreferenceDefault, SharedData, Widget,
    WidgetDefault, WidgetInstance, WidgetType,
};
use wookie_core::WidgetAdmin;

fn seed_two_widgets(gw: &mut MemoryGateway) -> (i64, i64) {
    let types = vec!["chat".to_string(), "games".to_string()];
    let mut admin = WidgetAdmin::new(gw);
    let doomed = admin
        .register_widget(&common::full_manifest("doomed"), Some(types.as_slice()))
        .unwrap();
    let kept = admin
        .register_widget(&common::full_manifest("kept"), Some(types.as_slice()))
        .unwrap();
    admin.set_default_widget(doomed, "chat").unwrap();
    admin.set_default_widget(kept, "games").unwrap();

    common::seed_instance(gw, doomed, "alice");
    common::seed_instance(gw, doomed, "bob");
    common::seed_instance(gw, kept, "carol");
    (doomed, kept)
}

#[test]
fn test_remove_widget_deletes_all_references() {
    // GIVEN two fully populated widgets
    let mut gw = MemoryGateway::new();
    let (doomed, kept) = seed_two_widgets(&mut gw);

    // WHEN removing one of them
    let removed = WidgetAdmin::new(&mut gw)
        .remove_widget_and_references(doomed)
        .expect("Should remove widget");

    // THEN it reports success
    assert!(removed);

    // AND the widget and every dependent are gone
    assert!(gw.find_by_id::<Widget>(doomed).unwrap().is_none());
    let by_widget = |field: &str| Filter::new().eq(field, doomed);
    assert!(gw
        .find_by_values::<WidgetType>(&by_widget("widget_id"))
        .unwrap()
        .is_empty());
    assert!(gw
        .find_by_values::<WidgetDefault>(&by_widget("widget_id"))
        .unwrap()
        .is_empty());
    assert!(gw
        .find_by_values::<WidgetInstance>(&by_widget("widget_id"))
        .unwrap()
        .is_empty());
    assert!(gw
        .find_by_values::<PreferenceDefault>(&by_widget("widget_id"))
        .unwrap()
        .is_empty());
    assert!(gw
        .find_by_values::<Feature>(&by_widget("widget_id"))
        .unwrap()
        .is_empty());

    // AND only the other widget's instance data and params remain
    assert_eq!(gw.count::<WidgetInstance>().unwrap(), 1);
    assert_eq!(gw.count::<Preference>().unwrap(), 1);
    assert_eq!(gw.count::<SharedData>().unwrap(), 1);
    assert_eq!(gw.count::<Participant>().unwrap(), 1);
    assert_eq!(gw.count::<Param>().unwrap(), 3);

    // AND the other widget is untouched
    let mut admin = WidgetAdmin::new(&mut gw);
    assert_eq!(admin.widget_types(kept).unwrap().len(), 2);
    assert_eq!(admin.list_widget_defaults().unwrap().len(), 1);
}

#[test]
fn test_remove_unknown_widget_returns_false() {
    let mut gw = MemoryGateway::new();
    let removed = WidgetAdmin::new(&mut gw)
        .remove_widget_and_references(404)
        .unwrap();
    assert!(!removed);
}

#[test]
fn test_remove_widget_twice_second_is_false() {
    let mut gw = MemoryGateway::new();
    let (doomed, _) = seed_two_widgets(&mut gw);
    let mut admin = WidgetAdmin::new(&mut gw);

    assert!(admin.remove_widget_and_references(doomed).unwrap());
    assert!(!admin.remove_widget_and_references(doomed).unwrap());
}

#[test]
fn test_remove_widget_store_failure_rolls_back() {
    // GIVEN a populated widget and a store that fails after a few deletes
    let mut gw = MemoryGateway::new();
    let (doomed, _) = seed_two_widgets(&mut gw);
    let widgets_before = gw.count::<Widget>().unwrap();
    let instances_before = gw.count::<WidgetInstance>().unwrap();
    gw.fail_writes_after(4);

    // WHEN the cascade runs
    let err = WidgetAdmin::new(&mut gw)
        .remove_widget_and_references(doomed)
        .unwrap_err();

    // THEN the error is a plain persistence failure
    assert_eq!(err.kind(), ExErrorKind::Persistence);

    // AND nothing was deleted
    gw.clear_write_failures();
    assert_eq!(gw.count::<Widget>().unwrap(), widgets_before);
    assert_eq!(gw.count::<WidgetInstance>().unwrap(), instances_before);
    assert_eq!(gw.count::<WidgetDefault>().unwrap(), 2);
}

/// Gateway whose rollback always fails
struct BrokenRollback {
    inner: MemoryGateway,
}

impl Gateway for BrokenRollback {
    fn find_by_id<E: Entity>(&self, id: i64) -> Result<Option<E>> {
        self.inner.find_by_id(id)
    }

    fn find_by_values<E: Entity>(&self, filter: &Filter) -> Result<Vec<E>> {
        self.inner.find_by_values(filter)
    }

    fn find_all<E: Entity>(&self) -> Result<Vec<E>> {
        self.inner.find_all()
    }

    fn save<E: Entity>(&mut self, entity: &mut E) -> Result<i64> {
        self.inner.save(entity)
    }

    fn delete<E: Entity>(&mut self, entity: &E) -> Result<()> {
        self.inner.delete(entity)
    }

    fn begin(&mut self) -> Result<()> {
        self.inner.begin()
    }

    fn commit(&mut self) -> Result<()> {
        self.inner.commit()
    }

    fn rollback(&mut self) -> Result<()> {
        Err(ExError::new(ExErrorKind::Persistence).with_message("connection lost"))
    }
}

#[test]
fn test_failed_rollback_reports_partial_cascade() {
    // GIVEN a widget with dependents behind a gateway that cannot roll back
    let mut inner = MemoryGateway::new();
    let (doomed, _) = seed_two_widgets(&mut inner);
    inner.fail_writes_after(2);
    let mut gw = BrokenRollback { inner };

    // WHEN the cascade fails partway
    let err = WidgetAdmin::new(&mut gw)
        .remove_widget_and_references(doomed)
        .unwrap_err();

    // THEN the caller learns the cascade is incomplete
    assert_eq!(err.kind(), ExErrorKind::PartialCascade);
    assert_eq!(err.op(), Some("remove_widget_and_references"));

    // AND the store failure is kept as the cause
    let cause = err.source_error().expect("Should carry the underlying failure");
    assert_eq!(cause.kind(), ExErrorKind::Persistence);
    assert!(err.to_string().contains("connection lost"));
}

#[test]
fn test_find_by_values_ignores_other_widgets() {
    let mut gw = MemoryGateway::new();
    let (doomed, kept) = seed_two_widgets(&mut gw);

    let filter = Filter::new()
        .eq("widget_id", kept)
        .eq("widget_context", Value::from("chat"));
    let types: Vec<WidgetType> = gw.find_by_values(&filter).unwrap();

    assert_eq!(types.len(), 1);
    assert_ne!(types[0].widget_id, doomed);
}
