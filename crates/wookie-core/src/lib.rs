//! Wookie Core - widget platform administration kernel
//!
//! This crate provides:
//! - The persisted entity model (widgets, services, defaults, whitelist,
//!   features, preferences and widget instance data)
//! - The [`Gateway`] persistence contract and an in-memory implementation
//! - Admin operations that keep references consistent when widgets,
//!   services or types are removed
//! - The error facility and structured logging facility shared by the
//!   store, CLI and server crates

pub mod errors;
pub mod gateway;
pub mod logging_facility;
pub mod manifest;
pub mod model;
pub mod ops;

pub use errors::{ExError, ExErrorKind, Result, WookieError};
pub use gateway::{Filter, Gateway, MemoryGateway};
pub use manifest::WidgetManifest;
pub use model::{Entity, EntityKind, Widget, WidgetDefault, WidgetService, WidgetType, Whitelist};
pub use ops::{WidgetAdmin, WidgetSummary};

#[doc(hidden)]
pub use tracing as __tracing;
#[doc(hidden)]
pub use wookie_core_types as __core_types;
