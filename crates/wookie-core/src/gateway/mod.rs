//! Persistence gateway contract
//!
//! Admin operations only ever talk to storage through [`Gateway`]. Lookups
//! return zero or more matches with no uniqueness guarantee; each `save` and
//! `delete` is atomic on its own, and larger units of work have to be wrapped
//! in [`Gateway::transaction`].

use serde_json::Value;

use crate::errors::{ExError, ExErrorKind, Result, WookieError};
use crate::model::Entity;

pub mod memory;

pub use memory::MemoryGateway;

/// Conjunction of exact field matches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `field == value` clause
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    pub fn clauses(&self) -> &[(String, Value)] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Reject field names the entity does not have
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first unknown field.
    pub fn validate<E: Entity>(&self) -> Result<()> {
        match self.clauses.iter().find(|(f, _)| !E::has_field(f)) {
            Some((field, _)) => Err(ExError::new(ExErrorKind::InvalidInput)
                .with_entity_kind(E::KIND)
                .with_op("filter")
                .with_message(format!("unknown field '{}'", field))),
            None => Ok(()),
        }
    }

    /// Evaluate against a serialized record
    pub fn matches(&self, record: &Value) -> bool {
        self.clauses
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }
}

/// Generic store for every entity kind
pub trait Gateway {
    /// Look a record up by its key
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the store cannot be read.
    fn find_by_id<E: Entity>(&self, id: i64) -> Result<Option<E>>;

    /// All records matching every clause of `filter`, in ascending id order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for unknown fields, `Persistence` on read failure.
    fn find_by_values<E: Entity>(&self, filter: &Filter) -> Result<Vec<E>>;

    /// All records of a kind, in ascending id order
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the store cannot be read.
    fn find_all<E: Entity>(&self) -> Result<Vec<E>>;

    /// Insert (id is `None`) or update (id is set) a record; returns its id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when updating a missing row, `Persistence` when the
    /// store rejects the write.
    fn save<E: Entity>(&mut self, entity: &mut E) -> Result<i64>;

    /// Delete a previously saved record
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unsaved record, `NotFound` if the row is
    /// already gone, `Persistence` when the store rejects the delete.
    fn delete<E: Entity>(&mut self, entity: &E) -> Result<()>;

    /// Start a unit of work
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if a transaction is already open.
    fn begin(&mut self) -> Result<()>;

    /// # Errors
    ///
    /// Returns `Persistence` if there is no open transaction or the commit fails.
    fn commit(&mut self) -> Result<()>;

    /// # Errors
    ///
    /// Returns `Persistence` if there is no open transaction or the rollback fails.
    fn rollback(&mut self) -> Result<()>;

    /// Shorthand for a single-clause [`Gateway::find_by_values`]
    ///
    /// # Errors
    ///
    /// Same as [`Gateway::find_by_values`].
    fn find_by_value<E: Entity>(&self, field: &str, value: impl Into<Value>) -> Result<Vec<E>> {
        self.find_by_values(&Filter::new().eq(field, value))
    }

    /// Delete each record in turn; stops at the first failure
    ///
    /// # Errors
    ///
    /// Same as [`Gateway::delete`].
    fn delete_all<E: Entity>(&mut self, entities: &[E]) -> Result<()> {
        for entity in entities {
            self.delete(entity)?;
        }
        Ok(())
    }

    /// Number of stored records of a kind
    ///
    /// # Errors
    ///
    /// Same as [`Gateway::find_all`].
    fn count<E: Entity>(&self) -> Result<usize> {
        Ok(self.find_all::<E>()?.len())
    }

    /// Run `f` inside a transaction: commit on `Ok`, roll back on `Err`
    ///
    /// # Errors
    ///
    /// Returns the error from `f`. If the rollback itself fails, returns
    /// `PartialCascade` with the error from `f` as its source, since the
    /// steps `f` completed may then be left in place.
    fn transaction<T, F>(&mut self, op: &str, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.begin()?;
        match f(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(err) => match self.rollback() {
                Ok(()) => Err(err),
                Err(rollback_err) => Err(ExError::from(WookieError::PartialCascade {
                    op: op.to_string(),
                    message: format!("rollback failed: {}", rollback_err.message()),
                })
                .with_source(err)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WidgetType;
    use serde_json::json;

    #[test]
    fn test_filter_matches_all_clauses() {
        let filter = Filter::new().eq("widget_id", 3).eq("widget_context", "chat");
        assert!(filter.matches(&json!({"id": 1, "widget_id": 3, "widget_context": "chat"})));
        assert!(!filter.matches(&json!({"id": 1, "widget_id": 3, "widget_context": "Chat"})));
        assert!(!filter.matches(&json!({"id": 1, "widget_id": 4, "widget_context": "chat"})));
    }

    #[test]
    fn test_filter_rejects_unknown_field() {
        let filter = Filter::new().eq("widget", 3);
        let err = filter.validate::<WidgetType>().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(Filter::new().eq("id", 1).validate::<WidgetType>().is_ok());
    }
}
