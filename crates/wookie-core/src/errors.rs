use thiserror::Error;
use wookie_core_types::RequestId;

use crate::model::EntityKind;

/// Result type alias using the canonical [`ExError`]
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// test assertions and HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Lookup
    NotFound,

    // Validation
    InvalidInput,
    InvalidManifest,

    // Persistence
    Persistence,
    /// A multi-step cascade or registration stopped partway and could not be rolled back
    PartialCascade,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidManifest => "ERR_INVALID_MANIFEST",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::PartialCascade => "ERR_PARTIAL_CASCADE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus free-form context for
/// debugging. Built with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_kind: Option<EntityKind>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_kind: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Shorthand for a NotFound error on a specific entity
    pub fn not_found(entity_kind: EntityKind, id: impl ToString) -> Self {
        Self::new(ExErrorKind::NotFound)
            .with_entity_kind(entity_kind)
            .with_entity_id(id.to_string())
            .with_message(format!("{} not found", entity_kind.label()))
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_entity_kind(mut self, kind: EntityKind) -> Self {
        self.entity_kind = Some(kind);
        self
    }

    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Stable error code (same as `kind().code()`)
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_kind(&self) -> Option<EntityKind> {
        self.entity_kind
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(kind) = &self.entity_kind {
            write!(f, " (entity: {})", kind.label())?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for admin operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WookieError {
    /// No widget with this database key
    #[error("Widget not found: {widget_id}")]
    WidgetNotFound { widget_id: i64 },

    /// No widget service with this database key
    #[error("Widget service not found: {service_id}")]
    ServiceNotFound { service_id: i64 },

    /// No whitelist entry with this database key
    #[error("Whitelist entry not found: {entry_id}")]
    WhitelistEntryNotFound { entry_id: i64 },

    /// A caller-supplied value failed validation
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The widget manifest is missing required data
    #[error("Invalid manifest: {reason}")]
    InvalidManifest { reason: String },

    /// The persistence gateway rejected a read or write
    #[error("Persistence failure during {op}: {message}")]
    Persistence { op: String, message: String },

    /// A cascade stopped partway and the gateway could not undo the completed steps
    #[error("Cascade {op} stopped partway: {message}")]
    PartialCascade { op: String, message: String },

    /// Serialization failure while mapping records
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<WookieError> for ExError {
    fn from(err: WookieError) -> Self {
        match err {
            WookieError::WidgetNotFound { widget_id } => {
                ExError::not_found(EntityKind::Widget, widget_id)
            }

            WookieError::ServiceNotFound { service_id } => {
                ExError::not_found(EntityKind::WidgetService, service_id)
            }

            WookieError::WhitelistEntryNotFound { entry_id } => {
                ExError::not_found(EntityKind::Whitelist, entry_id)
            }

            WookieError::InvalidInput { reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid input: {}", reason)),

            WookieError::InvalidManifest { reason } => ExError::new(ExErrorKind::InvalidManifest)
                .with_op("manifest")
                .with_message(reason),

            WookieError::Persistence { op, message } => ExError::new(ExErrorKind::Persistence)
                .with_op(op)
                .with_message(message),

            WookieError::PartialCascade { op, message } => {
                ExError::new(ExErrorKind::PartialCascade)
                    .with_op(op)
                    .with_message(message)
            }

            WookieError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for WookieError {
    fn from(err: serde_json::Error) -> Self {
        WookieError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        WookieError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
            (ExErrorKind::PartialCascade, "ERR_PARTIAL_CASCADE"),
            (ExErrorKind::InvalidManifest, "ERR_INVALID_MANIFEST"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_op_and_entity() {
        let err = ExError::not_found(EntityKind::Widget, 7).with_op("widget_guid");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_NOT_FOUND]"));
        assert!(text.contains("widget_guid"));
        assert!(text.contains("entity_id: 7"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = ExError::new(ExErrorKind::Persistence).with_message("disk full");
        let outer = ExError::new(ExErrorKind::PartialCascade).with_source(inner);

        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Persistence)
        );
        assert!(std::error::Error::source(&outer).is_some());
        assert!(outer.to_string().contains("disk full"));
    }
}
