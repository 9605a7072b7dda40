//! Embedded SQL migrations
//!
//! Migrations are embedded at compile time using include_str!

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations in application order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_initial_schema",
            sql: include_str!("../../migrations/001_initial_schema.sql"),
        },
        Migration {
            id: "002_widget_default_unique",
            sql: include_str!("../../migrations/002_widget_default_unique.sql"),
        },
        Migration {
            id: "003_default_services",
            sql: include_str!("../../migrations/003_default_services.sql"),
        },
    ]
}
