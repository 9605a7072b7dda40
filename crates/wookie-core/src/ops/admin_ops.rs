//! Widget, service and whitelist administration
//!
//! [`WidgetAdmin`] is a stateless facade over a [`Gateway`]. It adds the
//! referential-integrity rules the gateway does not enforce:
//!
//! - removing a widget deletes its dependents child-first (defaults,
//!   instance data, instances, types, preference defaults, params, features)
//!   before the widget row itself;
//! - removing a service or a single widget type also removes the widget
//!   types and defaults that name it;
//! - at most one default widget per service type.
//!
//! Multi-step operations run inside [`Gateway::transaction`], so a failure
//! partway through rolls the completed steps back instead of leaving
//! orphaned rows. The facade does no locking of its own; on a gateway whose
//! transactions do not serialise writers, concurrent `set_default_widget`
//! calls for the same service type can still both insert.
//!
//! ## Logging Ownership
//!
//! Every public operation emits `log_op_start!` on entry and `log_op_end!`
//! or `log_op_error!` on exit. The free `*_tx` functions below only use
//! `tracing::debug!`.

use std::time::Instant;

use serde::Serialize;

use crate::errors::{ExError, ExErrorKind, Result, WookieError};
use crate::gateway::{Filter, Gateway};
use crate::manifest::WidgetManifest;
use crate::model::{
    Feature, Param, Participant, Preference, PreferenceDefault, SharedData, Whitelist, Widget,
    WidgetDefault, WidgetInstance, WidgetService, WidgetType,
};
use crate::{log_op_end, log_op_error, log_op_start};

/// A widget together with the service contexts it is tagged with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSummary {
    pub widget: Widget,
    pub types: Vec<String>,
}

/// Administrative operations over a persistence gateway
pub struct WidgetAdmin<'g, G: Gateway> {
    gateway: &'g mut G,
}

impl<'g, G: Gateway> WidgetAdmin<'g, G> {
    pub fn new(gateway: &'g mut G) -> Self {
        Self { gateway }
    }

    /// Register a new widget service
    ///
    /// Duplicate names are accepted; nothing downstream relies on service
    /// names being unique.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - blank name
    /// * `Persistence` - the store rejected the write
    pub fn register_service(&mut self, service_name: &str) -> Result<i64> {
        log_op_start!("register_service", service_name = service_name);
        let start = Instant::now();
        let result = service_context(service_name)
            .and_then(|name| self.gateway.save(&mut WidgetService::new(name)));
        finish("register_service", start, result)
    }

    /// Register a widget from its manifest
    ///
    /// Creates the widget row first, then one [`WidgetType`] per entry in
    /// `service_types`, one [`PreferenceDefault`] per declared preference,
    /// and one [`Feature`] (plus its [`Param`]s) per declared feature. All of
    /// it happens in one transaction.
    ///
    /// # Returns
    /// The new widget's id
    ///
    /// # Errors
    ///
    /// * `InvalidManifest` - the manifest has no identifier or no name
    /// * `Persistence` - any write failed (nothing is left behind)
    pub fn register_widget(
        &mut self,
        manifest: &WidgetManifest,
        service_types: Option<&[String]>,
    ) -> Result<i64> {
        log_op_start!("register_widget", guid = manifest.identifier.as_str());
        let start = Instant::now();
        let result = manifest
            .validate()
            .and_then(|_| service_contexts(service_types.unwrap_or_default()))
            .and_then(|contexts| {
                self.gateway.transaction("register_widget", |gw| {
                    register_widget_tx(gw, manifest, &contexts)
                })
            });
        finish("register_widget", start, result)
    }

    /// Add a URI to the whitelist
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - blank URI
    /// * `Persistence` - the store rejected the write
    pub fn register_whitelist_entry(&mut self, uri: &str) -> Result<i64> {
        log_op_start!("register_whitelist_entry", uri = uri);
        let start = Instant::now();
        let result = require_text("whitelist URI", uri)
            .and_then(|_| self.gateway.save(&mut Whitelist::new(uri.trim())));
        finish("register_whitelist_entry", start, result)
    }

    /// Remove a service and every default and widget type that names it
    ///
    /// Widgets tagged with the service are kept; only their tag goes.
    ///
    /// # Errors
    ///
    /// * `NotFound` - no service with this id
    /// * `Persistence` - a delete failed (the whole removal is rolled back)
    pub fn remove_service(&mut self, service_id: i64) -> Result<()> {
        log_op_start!("remove_service", service_id = service_id);
        let start = Instant::now();
        let result = self
            .gateway
            .find_by_id::<WidgetService>(service_id)
            .and_then(|found| {
                found.ok_or_else(|| WookieError::ServiceNotFound { service_id }.into())
            })
            .and_then(|service| {
                self.gateway
                    .transaction("remove_service", |gw| remove_service_tx(gw, &service))
            });
        finish("remove_service", start, result)
    }

    /// Untag a widget from one service type
    ///
    /// Matches the widget's types case-insensitively and deletes every match,
    /// along with any default naming this widget for that type.
    ///
    /// # Returns
    /// Whether any type matched
    ///
    /// # Errors
    ///
    /// * `NotFound` - no widget with this id
    /// * `Persistence` - a delete failed
    pub fn remove_widget_type(&mut self, widget_id: i64, type_name: &str) -> Result<bool> {
        log_op_start!(
            "remove_widget_type",
            widget_id = widget_id,
            service_type = type_name
        );
        let start = Instant::now();
        let result = service_context(type_name).and_then(|context| {
            require_widget(&*self.gateway, widget_id)?;
            self.gateway.transaction("remove_widget_type", |gw| {
                remove_widget_type_tx(gw, widget_id, context)
            })
        });
        finish("remove_widget_type", start, result)
    }

    /// Remove a whitelist entry
    ///
    /// # Errors
    ///
    /// * `NotFound` - no entry with this id
    /// * `Persistence` - the delete failed
    pub fn remove_whitelist_entry(&mut self, entry_id: i64) -> Result<()> {
        log_op_start!("remove_whitelist_entry", entry_id = entry_id);
        let start = Instant::now();
        let result = self
            .gateway
            .find_by_id::<Whitelist>(entry_id)
            .and_then(|found| {
                found.ok_or_else(|| WookieError::WhitelistEntryNotFound { entry_id }.into())
            })
            .and_then(|entry| self.gateway.delete(&entry));
        finish("remove_whitelist_entry", start, result)
    }

    /// Delete a widget and everything that references it
    ///
    /// # Returns
    /// `false` if there is no such widget, `true` once it and all its
    /// dependents are gone
    ///
    /// # Errors
    ///
    /// * `Persistence` - a delete failed (the whole cascade is rolled back)
    /// * `PartialCascade` - a delete failed and the rollback failed too
    pub fn remove_widget_and_references(&mut self, widget_id: i64) -> Result<bool> {
        log_op_start!("remove_widget_and_references", widget_id = widget_id);
        let start = Instant::now();
        let result = self
            .gateway
            .find_by_id::<Widget>(widget_id)
            .and_then(|found| match found {
                None => Ok(false),
                Some(widget) => self
                    .gateway
                    .transaction("remove_widget_and_references", |gw| {
                        remove_widget_tx(gw, &widget)
                    })
                    .map(|_| true),
            });
        finish("remove_widget_and_references", start, result)
    }

    /// Make `widget_id` the default widget for `service_type`
    ///
    /// Every existing default whose context matches case-insensitively is
    /// pointed at the new widget; if there is none, one is inserted.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - blank service type
    /// * `NotFound` - no widget with this id
    /// * `Persistence` - the store rejected the write
    pub fn set_default_widget(&mut self, widget_id: i64, service_type: &str) -> Result<()> {
        log_op_start!(
            "set_default_widget",
            widget_id = widget_id,
            service_type = service_type
        );
        let start = Instant::now();
        let result = service_context(service_type).and_then(|context| {
            require_widget(&*self.gateway, widget_id)?;
            self.gateway.transaction("set_default_widget", |gw| {
                set_default_widget_tx(gw, widget_id, context)
            })
        });
        finish("set_default_widget", start, result)
    }

    /// Tag a widget with service types it does not already carry
    ///
    /// When `maximize` is true the widget's maximize flag is set; false
    /// leaves the flag as it is.
    ///
    /// # Errors
    ///
    /// * `NotFound` - no widget with this id
    /// * `Persistence` - the store rejected a write
    pub fn set_widget_types_for_widget(
        &mut self,
        widget_id: i64,
        type_names: &[String],
        maximize: bool,
    ) -> Result<()> {
        log_op_start!(
            "set_widget_types_for_widget",
            widget_id = widget_id,
            type_count = type_names.len(),
            maximize = maximize
        );
        let start = Instant::now();
        let result = service_contexts(type_names).and_then(|contexts| {
            let widget = require_widget(&*self.gateway, widget_id)?;
            self.gateway.transaction("set_widget_types_for_widget", |gw| {
                set_widget_types_tx(gw, widget, &contexts, maximize)
            })
        });
        finish("set_widget_types_for_widget", start, result)
    }

    /// True iff exactly one widget type row matches both the widget and the
    /// context (exact comparison). Zero or several matches answer `false`.
    ///
    /// # Errors
    ///
    /// * `Persistence` - the store could not be read
    pub fn service_exists_for_widget(&mut self, widget_id: i64, type_name: &str) -> Result<bool> {
        log_op_start!(
            "service_exists_for_widget",
            widget_id = widget_id,
            service_type = type_name
        );
        let start = Instant::now();
        let result = service_context(type_name)
            .and_then(|context| matching_types(&*self.gateway, widget_id, context))
            .map(|n| n == 1);
        finish("service_exists_for_widget", start, result)
    }

    /// True iff exactly one widget carries this guid
    ///
    /// # Errors
    ///
    /// * `Persistence` - the store could not be read
    pub fn widget_exists(&mut self, guid: &str) -> Result<bool> {
        log_op_start!("widget_exists", guid = guid);
        let start = Instant::now();
        let result = self
            .gateway
            .find_by_value::<Widget>("guid", guid)
            .map(|found| found.len() == 1);
        finish("widget_exists", start, result)
    }

    /// Whether a widget wants to be shown maximized; `false` if it does not exist
    ///
    /// # Errors
    ///
    /// * `Persistence` - the store could not be read
    pub fn is_widget_maximized(&mut self, widget_id: i64) -> Result<bool> {
        log_op_start!("is_widget_maximized", widget_id = widget_id);
        let start = Instant::now();
        let result = self
            .gateway
            .find_by_id::<Widget>(widget_id)
            .map(|found| found.is_some_and(|w| w.maximize));
        finish("is_widget_maximized", start, result)
    }

    /// The manifest identifier of a widget
    ///
    /// # Errors
    ///
    /// * `NotFound` - no widget with this id
    pub fn widget_guid(&mut self, widget_id: i64) -> Result<String> {
        log_op_start!("widget_guid", widget_id = widget_id);
        let start = Instant::now();
        let result = require_widget(&*self.gateway, widget_id).map(|w| w.guid);
        finish("widget_guid", start, result)
    }

    /// The service types a widget is tagged with, as stored
    ///
    /// # Errors
    ///
    /// * `NotFound` - no widget with this id
    pub fn widget_types(&mut self, widget_id: i64) -> Result<Vec<WidgetType>> {
        log_op_start!("widget_types", widget_id = widget_id);
        let start = Instant::now();
        let result = require_widget(&*self.gateway, widget_id)
            .and_then(|_| self.gateway.find_by_value("widget_id", widget_id));
        finish("widget_types", start, result)
    }

    /// Every widget with its types; each one is also logged at debug level
    ///
    /// # Errors
    ///
    /// * `Persistence` - the store could not be read
    pub fn list_widgets(&mut self) -> Result<Vec<WidgetSummary>> {
        log_op_start!("list_widgets");
        let start = Instant::now();
        let result = list_widgets_query(&*self.gateway);
        finish("list_widgets", start, result)
    }

    /// # Errors
    ///
    /// * `Persistence` - the store could not be read
    pub fn list_services(&mut self) -> Result<Vec<WidgetService>> {
        log_op_start!("list_services");
        let start = Instant::now();
        let result = self.gateway.find_all();
        finish("list_services", start, result)
    }

    /// # Errors
    ///
    /// * `Persistence` - the store could not be read
    pub fn list_whitelist(&mut self) -> Result<Vec<Whitelist>> {
        log_op_start!("list_whitelist");
        let start = Instant::now();
        let result = self.gateway.find_all();
        finish("list_whitelist", start, result)
    }

    /// # Errors
    ///
    /// * `Persistence` - the store could not be read
    pub fn list_widget_defaults(&mut self) -> Result<Vec<WidgetDefault>> {
        log_op_start!("list_widget_defaults");
        let start = Instant::now();
        let result = self.gateway.find_all();
        finish("list_widget_defaults", start, result)
    }

    /// Delete every default that points at a widget
    ///
    /// # Returns
    /// The number of defaults deleted
    ///
    /// # Errors
    ///
    /// * `Persistence` - a delete failed
    pub fn delete_widget_default_by_widget(&mut self, widget_id: i64) -> Result<usize> {
        log_op_start!("delete_widget_default_by_widget", widget_id = widget_id);
        let start = Instant::now();
        let result = self
            .gateway
            .transaction("delete_widget_default_by_widget", |gw| {
                delete_defaults_for_widget(gw, widget_id, None)
            });
        finish("delete_widget_default_by_widget", start, result)
    }

    /// Delete the defaults pointing at a widget for one service type
    ///
    /// # Returns
    /// The number of defaults deleted
    ///
    /// # Errors
    ///
    /// * `Persistence` - a delete failed
    pub fn delete_widget_default_by_widget_and_service(
        &mut self,
        widget_id: i64,
        service_type: &str,
    ) -> Result<usize> {
        log_op_start!(
            "delete_widget_default_by_widget_and_service",
            widget_id = widget_id,
            service_type = service_type
        );
        let start = Instant::now();
        let result = service_context(service_type).and_then(|context| {
            self.gateway
                .transaction("delete_widget_default_by_widget_and_service", |gw| {
                    delete_defaults_for_widget(gw, widget_id, Some(context))
                })
        });
        finish("delete_widget_default_by_widget_and_service", start, result)
    }

    /// Delete every default for a service type, whichever widget it names
    ///
    /// # Returns
    /// The number of defaults deleted
    ///
    /// # Errors
    ///
    /// * `Persistence` - a delete failed
    pub fn delete_widget_default_by_service_name(&mut self, service_name: &str) -> Result<usize> {
        log_op_start!(
            "delete_widget_default_by_service_name",
            service_type = service_name
        );
        let start = Instant::now();
        let result = service_context(service_name).and_then(|context| {
            self.gateway
                .transaction("delete_widget_default_by_service_name", |gw| {
                    delete_defaults_for_context(gw, context)
                })
        });
        finish("delete_widget_default_by_service_name", start, result)
    }
}

/// Emit the end/end_error event and tag the error with the operation
fn finish<T>(op: &'static str, start: Instant, result: Result<T>) -> Result<T> {
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(value) => {
            log_op_end!(op, duration_ms = duration_ms);
            Ok(value)
        }
        Err(err) => {
            let err = if err.op().is_none() { err.with_op(op) } else { err };
            log_op_error!(op, &err, duration_ms = duration_ms);
            Err(err)
        }
    }
}

fn require_text(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WookieError::InvalidInput {
            reason: format!("{} cannot be empty", what),
        }
        .into());
    }
    Ok(())
}

/// Service names and widget contexts are stored and matched without
/// surrounding whitespace; blank ones are rejected.
fn service_context(value: &str) -> Result<&str> {
    require_text("service type", value)?;
    Ok(value.trim())
}

fn service_contexts(values: &[String]) -> Result<Vec<String>> {
    values
        .iter()
        .map(|v| service_context(v).map(str::to_string))
        .collect()
}

fn require_widget<G: Gateway>(gw: &G, widget_id: i64) -> Result<Widget> {
    gw.find_by_id::<Widget>(widget_id)?
        .ok_or_else(|| WookieError::WidgetNotFound { widget_id }.into())
}

fn saved_id<E: crate::model::Entity>(entity: &E) -> Result<i64> {
    entity.id().ok_or_else(|| {
        ExError::new(ExErrorKind::Internal)
            .with_entity_kind(E::KIND)
            .with_message("record has no id after save")
    })
}

fn matching_types<G: Gateway>(gw: &G, widget_id: i64, context: &str) -> Result<usize> {
    let filter = Filter::new()
        .eq("widget_id", widget_id)
        .eq("widget_context", context);
    Ok(gw.find_by_values::<WidgetType>(&filter)?.len())
}

fn register_widget_tx<G: Gateway>(
    gw: &mut G,
    manifest: &WidgetManifest,
    service_types: &[String],
) -> Result<i64> {
    let mut widget = Widget::new(
        manifest.identifier.clone(),
        manifest.first_name().unwrap_or_default(),
        manifest.content.src.clone(),
    );
    widget.widget_description = manifest.first_description().map(str::to_string);
    widget.widget_author = manifest.author.clone();
    widget.widget_icon_location = manifest.first_icon_path().map(str::to_string);
    widget.width = manifest.width;
    widget.height = manifest.height;
    widget.version = manifest.version.clone();
    let widget_id = gw.save(&mut widget)?;

    for context in service_types {
        gw.save(&mut WidgetType::new(widget_id, context.as_str()))?;
    }

    for pref in &manifest.preferences {
        let mut default = PreferenceDefault {
            id: None,
            widget_id,
            preference: pref.name.clone(),
            value: pref.value.clone(),
            read_only: pref.readonly,
        };
        gw.save(&mut default)?;
    }

    for decl in &manifest.features {
        let mut feature = Feature::new(widget_id, decl.name.as_str(), decl.required);
        gw.save(&mut feature)?;
        let feature_id = saved_id(&feature)?;
        for param in &decl.params {
            gw.save(&mut Param::new(feature_id, param.name.as_str(), param.value.as_str()))?;
        }
    }

    tracing::debug!(
        widget_id,
        types = service_types.len(),
        preferences = manifest.preferences.len(),
        features = manifest.features.len(),
        "registered widget"
    );
    Ok(widget_id)
}

fn remove_service_tx<G: Gateway>(gw: &mut G, service: &WidgetService) -> Result<()> {
    let name = service.service_name.as_str();

    let defaults = delete_defaults_for_context(gw, name)?;
    gw.delete(service)?;

    let stale: Vec<WidgetType> = gw
        .find_all::<WidgetType>()?
        .into_iter()
        .filter(|t| t.matches(name))
        .collect();
    gw.delete_all(&stale)?;

    tracing::debug!(
        service = name,
        defaults,
        types = stale.len(),
        "removed service references"
    );
    Ok(())
}

fn remove_widget_type_tx<G: Gateway>(gw: &mut G, widget_id: i64, type_name: &str) -> Result<bool> {
    let matching: Vec<WidgetType> = gw
        .find_by_value::<WidgetType>("widget_id", widget_id)?
        .into_iter()
        .filter(|t| t.matches(type_name))
        .collect();
    gw.delete_all(&matching)?;

    delete_defaults_for_widget(gw, widget_id, Some(type_name))?;
    Ok(!matching.is_empty())
}

/// Child-first delete of a widget and all its dependents
fn remove_widget_tx<G: Gateway>(gw: &mut G, widget: &Widget) -> Result<()> {
    let widget_id = saved_id(widget)?;

    delete_defaults_for_widget(gw, widget_id, None)?;

    let instances: Vec<WidgetInstance> = gw.find_by_value("widget_id", widget_id)?;
    for instance in &instances {
        let instance_id = saved_id(instance)?;
        let shared: Vec<SharedData> = gw.find_by_value("widget_instance_id", instance_id)?;
        gw.delete_all(&shared)?;
        let prefs: Vec<Preference> = gw.find_by_value("widget_instance_id", instance_id)?;
        gw.delete_all(&prefs)?;
        let participants: Vec<Participant> =
            gw.find_by_value("widget_instance_id", instance_id)?;
        gw.delete_all(&participants)?;
        gw.delete(instance)?;
    }

    let types: Vec<WidgetType> = gw.find_by_value("widget_id", widget_id)?;
    gw.delete_all(&types)?;

    let pref_defaults: Vec<PreferenceDefault> = gw.find_by_value("widget_id", widget_id)?;
    gw.delete_all(&pref_defaults)?;

    let features: Vec<Feature> = gw.find_by_value("widget_id", widget_id)?;
    for feature in &features {
        let params: Vec<Param> = gw.find_by_value("feature_id", saved_id(feature)?)?;
        gw.delete_all(&params)?;
        gw.delete(feature)?;
    }

    gw.delete(widget)?;

    tracing::debug!(
        widget_id,
        instances = instances.len(),
        types = types.len(),
        features = features.len(),
        "removed widget and references"
    );
    Ok(())
}

fn set_default_widget_tx<G: Gateway>(gw: &mut G, widget_id: i64, service_type: &str) -> Result<()> {
    let mut found = false;
    for mut default in gw.find_all::<WidgetDefault>()? {
        if default.matches(service_type) {
            default.widget_id = widget_id;
            gw.save(&mut default)?;
            found = true;
        }
    }

    if !found {
        gw.save(&mut WidgetDefault::new(service_type, widget_id))?;
    }
    Ok(())
}

fn set_widget_types_tx<G: Gateway>(
    gw: &mut G,
    mut widget: Widget,
    type_names: &[String],
    maximize: bool,
) -> Result<()> {
    if maximize {
        widget.maximize = true;
        gw.save(&mut widget)?;
    }

    let widget_id = saved_id(&widget)?;
    for context in type_names {
        if matching_types(gw, widget_id, context)? == 0 {
            gw.save(&mut WidgetType::new(widget_id, context.as_str()))?;
        }
    }
    Ok(())
}

fn delete_defaults_for_widget<G: Gateway>(
    gw: &mut G,
    widget_id: i64,
    service_type: Option<&str>,
) -> Result<usize> {
    let doomed: Vec<WidgetDefault> = gw
        .find_by_value::<WidgetDefault>("widget_id", widget_id)?
        .into_iter()
        .filter(|d| service_type.map_or(true, |t| d.matches(t)))
        .collect();
    gw.delete_all(&doomed)?;
    Ok(doomed.len())
}

fn delete_defaults_for_context<G: Gateway>(gw: &mut G, context: &str) -> Result<usize> {
    let doomed: Vec<WidgetDefault> = gw
        .find_all::<WidgetDefault>()?
        .into_iter()
        .filter(|d| d.matches(context))
        .collect();
    gw.delete_all(&doomed)?;
    Ok(doomed.len())
}

fn list_widgets_query<G: Gateway>(gw: &G) -> Result<Vec<WidgetSummary>> {
    let widgets: Vec<Widget> = gw.find_all()?;
    let mut summaries = Vec::with_capacity(widgets.len());
    for widget in widgets {
        let types: Vec<String> = match widget.id {
            Some(id) => gw
                .find_by_value::<WidgetType>("widget_id", id)?
                .into_iter()
                .map(|t| t.widget_context)
                .collect(),
            None => Vec::new(),
        };
        tracing::debug!(
            name = widget.widget_title.as_str(),
            url = widget.url.as_str(),
            height = widget.height,
            width = widget.width,
            types = ?types,
            "widget"
        );
        summaries.push(WidgetSummary { widget, types });
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryGateway;

    fn seed_widget(gw: &mut MemoryGateway, guid: &str) -> i64 {
        gw.save(&mut Widget::new(guid, "Test", "index.html")).unwrap()
    }

    #[test]
    fn test_register_service_rejects_blank_name() {
        let mut gw = MemoryGateway::new();
        let err = WidgetAdmin::new(&mut gw).register_service("  ").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.op(), Some("register_service"));
    }

    #[test]
    fn test_duplicate_service_names_are_tolerated() {
        let mut gw = MemoryGateway::new();
        let mut admin = WidgetAdmin::new(&mut gw);
        let a = admin.register_service("chat").unwrap();
        let b = admin.register_service("chat").unwrap();
        assert_ne!(a, b);
        assert_eq!(admin.list_services().unwrap().len(), 2);
    }

    #[test]
    fn test_set_widget_types_skips_existing_and_repeated_names() {
        let mut gw = MemoryGateway::new();
        let id = seed_widget(&mut gw, "w1");
        let mut admin = WidgetAdmin::new(&mut gw);

        let names = vec!["chat".to_string(), "games".to_string(), "chat".to_string()];
        admin.set_widget_types_for_widget(id, &names, false).unwrap();
        admin.set_widget_types_for_widget(id, &names, false).unwrap();

        let types = admin.widget_types(id).unwrap();
        assert_eq!(types.len(), 2);
        assert!(!admin.is_widget_maximized(id).unwrap());
    }

    #[test]
    fn test_set_widget_types_maximize_false_keeps_flag() {
        let mut gw = MemoryGateway::new();
        let id = seed_widget(&mut gw, "w1");
        let mut admin = WidgetAdmin::new(&mut gw);

        admin.set_widget_types_for_widget(id, &[], true).unwrap();
        assert!(admin.is_widget_maximized(id).unwrap());

        admin.set_widget_types_for_widget(id, &[], false).unwrap();
        assert!(admin.is_widget_maximized(id).unwrap());
    }

    #[test]
    fn test_widget_guid_not_found() {
        let mut gw = MemoryGateway::new();
        let err = WidgetAdmin::new(&mut gw).widget_guid(42).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.entity_id(), Some("42"));
    }

    #[test]
    fn test_is_widget_maximized_missing_is_false() {
        let mut gw = MemoryGateway::new();
        assert!(!WidgetAdmin::new(&mut gw).is_widget_maximized(5).unwrap());
    }

    #[test]
    fn test_widget_exists_requires_exactly_one() {
        let mut gw = MemoryGateway::new();
        seed_widget(&mut gw, "dup");
        seed_widget(&mut gw, "dup");
        seed_widget(&mut gw, "single");
        let mut admin = WidgetAdmin::new(&mut gw);

        assert!(admin.widget_exists("single").unwrap());
        assert!(!admin.widget_exists("dup").unwrap());
        assert!(!admin.widget_exists("missing").unwrap());
    }

    #[test]
    fn test_remove_whitelist_entry_not_found() {
        let mut gw = MemoryGateway::new();
        let mut admin = WidgetAdmin::new(&mut gw);
        let id = admin.register_whitelist_entry("http://localhost").unwrap();

        admin.remove_whitelist_entry(id).unwrap();
        let err = admin.remove_whitelist_entry(id).unwrap_err();
        assert!(err.is_not_found());
    }
}
