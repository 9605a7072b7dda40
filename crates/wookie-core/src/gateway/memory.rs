use std::collections::BTreeMap;

use serde_json::Value;

use super::{Filter, Gateway};
use crate::errors::{ExError, ExErrorKind, Result, WookieError};
use crate::model::{Entity, EntityKind};

#[derive(Debug, Clone, Default)]
struct Tables {
    rows: BTreeMap<EntityKind, BTreeMap<i64, Value>>,
    next_ids: BTreeMap<EntityKind, i64>,
}

/// In-memory gateway
///
/// Records are kept in their serialized form, one ordered map per kind, so
/// every lookup goes through the same serde mapping a SQL store would use.
/// Single owner (`&mut`) and not thread-safe. Transactions snapshot the
/// tables and restore them on rollback.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    tables: Tables,
    snapshot: Option<Tables>,
    /// Writes remaining before the gateway starts rejecting them (test hook)
    writes_left: Option<usize>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every write after the next `n` succeed
    ///
    /// Lets tests simulate a store failing halfway through a multi-step
    /// operation.
    pub fn fail_writes_after(&mut self, n: usize) {
        self.writes_left = Some(n);
    }

    /// Stop rejecting writes
    pub fn clear_write_failures(&mut self) {
        self.writes_left = None;
    }

    pub fn in_transaction(&self) -> bool {
        self.snapshot.is_some()
    }

    fn check_write(&mut self, kind: EntityKind, op: &str) -> Result<()> {
        match self.writes_left {
            Some(0) => Err(ExError::from(persistence(op, "write rejected by store"))
                .with_entity_kind(kind)),
            Some(ref mut n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn decode<E: Entity>(value: &Value) -> Result<E> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

fn persistence(op: &str, message: &str) -> WookieError {
    WookieError::Persistence {
        op: op.to_string(),
        message: message.to_string(),
    }
}

impl Gateway for MemoryGateway {
    fn find_by_id<E: Entity>(&self, id: i64) -> Result<Option<E>> {
        self.tables
            .rows
            .get(&E::KIND)
            .and_then(|t| t.get(&id))
            .map(Self::decode)
            .transpose()
    }

    fn find_by_values<E: Entity>(&self, filter: &Filter) -> Result<Vec<E>> {
        filter.validate::<E>()?;
        match self.tables.rows.get(&E::KIND) {
            Some(table) => table
                .values()
                .filter(|row| filter.matches(row))
                .map(Self::decode)
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    fn find_all<E: Entity>(&self) -> Result<Vec<E>> {
        self.find_by_values(&Filter::new())
    }

    fn save<E: Entity>(&mut self, entity: &mut E) -> Result<i64> {
        self.check_write(E::KIND, "save")?;

        let id = match entity.id() {
            Some(id) => {
                let exists = self
                    .tables
                    .rows
                    .get(&E::KIND)
                    .is_some_and(|t| t.contains_key(&id));
                if !exists {
                    return Err(ExError::not_found(E::KIND, id).with_op("save"));
                }
                id
            }
            None => {
                let next = self.tables.next_ids.entry(E::KIND).or_insert(0);
                *next += 1;
                *next
            }
        };

        entity.set_id(id);
        let value = serde_json::to_value(&*entity)?;
        self.tables
            .rows
            .entry(E::KIND)
            .or_default()
            .insert(id, value);

        tracing::debug!(kind = ?E::KIND, id, "memory gateway saved record");
        Ok(id)
    }

    fn delete<E: Entity>(&mut self, entity: &E) -> Result<()> {
        let id = entity.id().ok_or_else(|| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("delete")
                .with_entity_kind(E::KIND)
                .with_message("cannot delete a record that was never saved")
        })?;
        self.check_write(E::KIND, "delete")?;

        let removed = self
            .tables
            .rows
            .get_mut(&E::KIND)
            .and_then(|t| t.remove(&id));
        if removed.is_none() {
            return Err(ExError::not_found(E::KIND, id).with_op("delete"));
        }

        tracing::debug!(kind = ?E::KIND, id, "memory gateway deleted record");
        Ok(())
    }

    fn begin(&mut self) -> Result<()> {
        if self.snapshot.is_some() {
            return Err(persistence("begin", "transaction already active").into());
        }
        self.snapshot = Some(self.tables.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        match self.snapshot.take() {
            Some(_) => Ok(()),
            None => Err(persistence("commit", "no active transaction").into()),
        }
    }

    fn rollback(&mut self) -> Result<()> {
        match self.snapshot.take() {
            Some(saved) => {
                self.tables = saved;
                Ok(())
            }
            None => Err(persistence("rollback", "no active transaction").into()),
        }
    }
}
