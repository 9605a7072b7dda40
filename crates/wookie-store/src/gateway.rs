//! SQLite implementation of the persistence gateway
//!
//! Records cross the boundary as flat JSON objects: `Entity::FIELDS` gives
//! the column list, `serde_json` does the field mapping. Booleans are stored
//! as 0/1 integers, timestamps as RFC 3339 text.

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use serde_json::{Map, Value};
use std::path::Path;

use crate::db;
use crate::errors::{from_rusqlite, persistence, Result};
use crate::migrations::apply_migrations;
use wookie_core::errors::{ExError, ExErrorKind};
use wookie_core::gateway::{Filter, Gateway};
use wookie_core::model::Entity;

/// Gateway over a single SQLite connection
///
/// Transactions use `BEGIN IMMEDIATE`, so a second writer on the same file
/// waits for (or fails against) the first instead of interleaving.
pub struct SqliteGateway {
    conn: Connection,
}

impl SqliteGateway {
    /// Wrap an already configured and migrated connection
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open (or create) a database file, configure it and apply migrations
    ///
    /// # Errors
    ///
    /// * `Io` - the parent directory cannot be created
    /// * `Persistence` - the database cannot be opened or migrated
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self::new(conn))
    }

    /// Fresh migrated in-memory database
    ///
    /// # Errors
    ///
    /// * `Persistence` - migrations failed
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self::new(conn))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_inner(self) -> Connection {
        self.conn
    }

    fn select_sql<E: Entity>() -> String {
        format!(
            "SELECT id, {} FROM {}",
            E::FIELDS.join(", "),
            E::KIND.table()
        )
    }

    fn query<E: Entity>(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<E>> {
        let mut stmt = self.conn.prepare(sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), row_to_json::<E>)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<Value>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter()
            .map(|v| serde_json::from_value(v).map_err(ExError::from))
            .collect()
    }

    fn transaction_control(&self, op: &str, sql: &str, expect_open: bool) -> Result<()> {
        let open = !self.conn.is_autocommit();
        if open != expect_open {
            let message = if open {
                "transaction already active"
            } else {
                "no active transaction"
            };
            return Err(persistence(op, message));
        }
        self.conn
            .execute_batch(sql)
            .map_err(|e| from_rusqlite(e).with_op(op))
    }
}

/// Column values of an entity, in `E::FIELDS` order
fn entity_params<E: Entity>(entity: &E) -> Result<Vec<SqlValue>> {
    let json = serde_json::to_value(entity)?;
    let object = json.as_object().ok_or_else(|| {
        ExError::new(ExErrorKind::Serialization)
            .with_entity_kind(E::KIND)
            .with_message("entity did not serialize to an object")
    })?;

    Ok(E::FIELDS
        .iter()
        .map(|field| to_sql(object.get(*field).unwrap_or(&Value::Null)))
        .collect())
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

/// Map a `SELECT id, FIELDS..` row onto a JSON object keyed by column name
fn row_to_json<E: Entity>(row: &Row<'_>) -> rusqlite::Result<Value> {
    let mut object = Map::with_capacity(E::FIELDS.len() + 1);
    let columns = std::iter::once("id").chain(E::FIELDS.iter().copied());
    for (idx, name) in columns.enumerate() {
        let value = match row.get_ref(idx)? {
            ValueRef::Null | ValueRef::Blob(_) => Value::Null,
            ValueRef::Integer(i) => Value::from(i),
            ValueRef::Real(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        };
        object.insert(name.to_string(), value);
    }
    Ok(Value::Object(object))
}

impl Gateway for SqliteGateway {
    fn find_by_id<E: Entity>(&self, id: i64) -> Result<Option<E>> {
        let sql = format!("{} WHERE id = ?1", Self::select_sql::<E>());
        let row = self
            .conn
            .query_row(&sql, [id], row_to_json::<E>)
            .optional()
            .map_err(from_rusqlite)?;

        row.map(|v| serde_json::from_value(v).map_err(ExError::from))
            .transpose()
    }

    fn find_by_values<E: Entity>(&self, filter: &Filter) -> Result<Vec<E>> {
        filter.validate::<E>()?;

        let mut sql = Self::select_sql::<E>();
        let mut params = Vec::with_capacity(filter.clauses().len());
        for (idx, (field, value)) in filter.clauses().iter().enumerate() {
            sql.push_str(if idx == 0 { " WHERE " } else { " AND " });
            // Field names were checked against E::FIELDS above
            sql.push_str(&format!("{} = ?{}", field, idx + 1));
            params.push(to_sql(value));
        }
        sql.push_str(" ORDER BY id");

        self.query(&sql, params)
    }

    fn find_all<E: Entity>(&self) -> Result<Vec<E>> {
        let sql = format!("{} ORDER BY id", Self::select_sql::<E>());
        self.query(&sql, Vec::new())
    }

    fn save<E: Entity>(&mut self, entity: &mut E) -> Result<i64> {
        let mut params = entity_params(entity)?;
        let table = E::KIND.table();

        let id = match entity.id() {
            Some(id) => {
                let assignments: Vec<String> = E::FIELDS
                    .iter()
                    .enumerate()
                    .map(|(idx, field)| format!("{} = ?{}", field, idx + 1))
                    .collect();
                let sql = format!(
                    "UPDATE {} SET {} WHERE id = ?{}",
                    table,
                    assignments.join(", "),
                    E::FIELDS.len() + 1
                );
                params.push(SqlValue::Integer(id));
                let changed = self
                    .conn
                    .execute(&sql, params_from_iter(params.iter()))
                    .map_err(|e| from_rusqlite(e).with_op("save").with_entity_kind(E::KIND))?;
                if changed == 0 {
                    return Err(ExError::not_found(E::KIND, id).with_op("save"));
                }
                id
            }
            None => {
                let placeholders: Vec<String> =
                    (1..=E::FIELDS.len()).map(|i| format!("?{}", i)).collect();
                let sql = format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    table,
                    E::FIELDS.join(", "),
                    placeholders.join(", ")
                );
                self.conn
                    .execute(&sql, params_from_iter(params.iter()))
                    .map_err(|e| from_rusqlite(e).with_op("save").with_entity_kind(E::KIND))?;
                self.conn.last_insert_rowid()
            }
        };

        entity.set_id(id);
        tracing::debug!(table, id, "sqlite gateway saved record");
        Ok(id)
    }

    fn delete<E: Entity>(&mut self, entity: &E) -> Result<()> {
        let id = entity.id().ok_or_else(|| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("delete")
                .with_entity_kind(E::KIND)
                .with_message("cannot delete a record that was never saved")
        })?;

        let sql = format!("DELETE FROM {} WHERE id = ?1", E::KIND.table());
        let changed = self
            .conn
            .execute(&sql, [id])
            .map_err(|e| from_rusqlite(e).with_op("delete").with_entity_kind(E::KIND))?;
        if changed == 0 {
            return Err(ExError::not_found(E::KIND, id).with_op("delete"));
        }

        tracing::debug!(table = E::KIND.table(), id, "sqlite gateway deleted record");
        Ok(())
    }

    fn begin(&mut self) -> Result<()> {
        self.transaction_control("begin", "BEGIN IMMEDIATE", false)
    }

    fn commit(&mut self) -> Result<()> {
        self.transaction_control("commit", "COMMIT", true)
    }

    fn rollback(&mut self) -> Result<()> {
        self.transaction_control("rollback", "ROLLBACK", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wookie_core::model::{Whitelist, Widget, WidgetService, WidgetType};

    #[test]
    fn test_seeded_services_are_readable() {
        let gw = SqliteGateway::open_in_memory().unwrap();
        let services: Vec<WidgetService> = gw.find_all().unwrap();
        let names: Vec<&str> = services.iter().map(|s| s.service_name.as_str()).collect();
        assert_eq!(names, vec!["unsorted", "chat", "games", "voting", "weather"]);

        let whitelist: Vec<Whitelist> = gw.find_all().unwrap();
        assert_eq!(whitelist.len(), 2);
    }

    #[test]
    fn test_flags_round_trip_through_integers() {
        let mut gw = SqliteGateway::open_in_memory().unwrap();
        let mut widget = Widget::new("g1", "Title", "index.html");
        widget.maximize = true;
        let id = gw.save(&mut widget).unwrap();

        let raw: i64 = gw
            .connection()
            .query_row("SELECT maximize FROM widget WHERE id = ?1", [id], |r| r.get(0))
            .unwrap();
        assert_eq!(raw, 1);

        let loaded: Widget = gw.find_by_id(id).unwrap().unwrap();
        assert_eq!(loaded, widget);
    }

    #[test]
    fn test_filter_on_unknown_column_is_rejected() {
        let gw = SqliteGateway::open_in_memory().unwrap();
        let err = gw
            .find_by_value::<WidgetType>("widget_id; DROP TABLE widget", 1)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_transaction_state_is_checked() {
        let mut gw = SqliteGateway::open_in_memory().unwrap();
        assert!(gw.commit().is_err());
        gw.begin().unwrap();
        assert!(gw.begin().is_err());
        gw.rollback().unwrap();
    }
}
