// Integration tests for the migration framework

use rusqlite::Connection;
use wookie_store::migrations::{applied_migrations, apply_migrations, get_migrations};

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    // Given: An empty SQLite database
    let mut conn = setup_test_db();

    // When: Migrations are applied
    let result = apply_migrations(&mut conn);

    // Then: All migrations succeed
    assert!(
        result.is_ok(),
        "Migrations should succeed: {:?}",
        result.err()
    );

    // And: Every entity table exists
    let tables = get_table_names(&conn);
    for expected in [
        "schema_version",
        "widget",
        "widget_type",
        "widget_service",
        "widget_default",
        "whitelist",
        "feature",
        "param",
        "preference_default",
        "widget_instance",
        "preference",
        "shared_data",
        "participant",
        "sqlite_sequence",
    ] {
        assert!(
            tables.contains(&expected.to_string()),
            "Missing table: {}",
            expected
        );
    }
}

#[test]
fn test_migration_idempotency() {
    // Given: A database with migrations already applied
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();

    // When: Migrations are applied again
    let applied = apply_migrations(&mut conn).unwrap();

    // Then: Nothing runs and the seed data is not duplicated
    assert_eq!(applied, 0);
    let services: i64 = conn
        .query_row("SELECT COUNT(*) FROM widget_service", [], |row| row.get(0))
        .unwrap();
    assert_eq!(services, 5);
}

#[test]
fn test_schema_version_records_every_migration() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();

    let expected: Vec<String> = get_migrations().iter().map(|m| m.id.to_string()).collect();
    assert_eq!(applied_migrations(&conn).unwrap(), expected);

    let with_checksum: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM schema_version WHERE length(checksum) = 64",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(with_checksum, expected.len() as i64);
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wookie.db");

    {
        let mut conn = wookie_store::db::open(&path).unwrap();
        wookie_store::db::configure(&conn).unwrap();
        assert_eq!(apply_migrations(&mut conn).unwrap(), 3);
    }

    let mut conn = wookie_store::db::open(&path).unwrap();
    assert_eq!(apply_migrations(&mut conn).unwrap(), 0);
}
