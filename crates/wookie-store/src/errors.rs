//! Error handling for wookie-store
//!
//! Wraps wookie-core ExError with store-specific helpers

use wookie_core::errors::{ExError, ExErrorKind, WookieError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    persistence(
        "migration",
        format!("Migration {} failed: {}", migration_id, reason),
    )
}

/// An applied migration no longer matches the embedded SQL
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    persistence(
        "migration_checksum",
        format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ),
    )
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    persistence("sqlite", err.to_string())
}

/// Rejected write, failed query or transaction misuse on the database
pub fn persistence(op: &str, message: impl Into<String>) -> ExError {
    WookieError::Persistence {
        op: op.to_string(),
        message: message.into(),
    }
    .into()
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// A manifest file could not be parsed
pub fn manifest_error(path: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidManifest)
        .with_op("load_manifest")
        .with_message(format!("{}: {}", path, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_failures_are_persistence_errors() {
        let err = from_rusqlite(rusqlite::Error::QueryReturnedNoRows);

        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert_eq!(err.op(), Some("sqlite"));
        assert!(!err.message().is_empty());
    }

    #[test]
    fn test_checksum_mismatch_names_the_migration() {
        let err = checksum_mismatch("002_widget_default_unique", "aa", "bb");

        assert_eq!(err.code(), "ERR_PERSISTENCE");
        assert_eq!(err.op(), Some("migration_checksum"));
        assert!(err.message().contains("002_widget_default_unique"));
    }
}
