//! Core types shared across the Wookie admin crates
//!
//! - **Correlation types**: RequestId, RequestContext
//! - **Schema constants**: Canonical field keys and event names for logging

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId};
