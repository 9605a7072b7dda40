//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Boundary logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use wookie_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! The admin facade owns `start`/`end`/`end_error` events for every
//! operation. Gateways and migrations only emit `tracing::debug!`.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
