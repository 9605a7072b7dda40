//! Correlation ids for the HTTP surface
//!
//! The server tags every request with a [`RequestId`], echoes it in the
//! `x-request-id` response header and stamps it on any error it returns, so
//! a client report can be matched to the admin operation logs.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque request identifier; freshly minted ids are UUIDv7 strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new() -> Self {
        RequestId(Uuid::now_v7().to_string())
    }

    /// Wrap an id supplied by a caller
    pub fn from_string(value: String) -> Self {
        RequestId(value)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        RequestId::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-request data the server middleware attaches to each request
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: RequestId,
}

impl RequestContext {
    /// Reuse a non-blank `x-request-id` header value, or mint a fresh id
    pub fn from_header(value: Option<&str>) -> Self {
        let request_id = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| RequestId::from_string(v.to_owned()))
            .unwrap_or_default();
        RequestContext { request_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_ids_are_unique_uuids() {
        let a = RequestId::new();
        let b = RequestId::new();

        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
        assert_eq!(a.to_string(), a.as_str());
    }

    #[test]
    fn test_header_value_is_kept_trimmed() {
        let ctx = RequestContext::from_header(Some(" req-42 "));
        assert_eq!(ctx.request_id.as_str(), "req-42");
    }

    #[test]
    fn test_blank_or_missing_header_mints_id() {
        for header in [None, Some(""), Some("   ")] {
            let ctx = RequestContext::from_header(header);
            assert!(Uuid::parse_str(ctx.request_id.as_str()).is_ok());
        }
    }

    #[test]
    fn test_serializes_as_bare_string() {
        let id = RequestId::from_string("req-7".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"req-7\"");
    }
}
