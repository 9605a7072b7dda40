//! Canonical schema constants for structured logging
//!
//! These constants keep field names consistent between the logging macros,
//! the error facility and anything that asserts on captured events.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_WIDGET_ID: &str = "widget_id";
pub const FIELD_SERVICE_ID: &str = "service_id";
pub const FIELD_SERVICE_TYPE: &str = "service_type";
pub const FIELD_ENTRY_ID: &str = "entry_id";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
