//! Wookie Store - SQLite persistence for the widget admin core
//!
//! Provides:
//! - Connection helpers (`db`)
//! - Embedded SQL migrations with checksums
//! - [`SqliteGateway`], the SQLite implementation of `wookie_core::Gateway`
//! - Manifest file loading (JSON or YAML)

pub mod db;
pub mod errors;
pub mod gateway;
pub mod manifest;
pub mod migrations;

pub use errors::Result;
pub use gateway::SqliteGateway;
pub use manifest::load_manifest;
