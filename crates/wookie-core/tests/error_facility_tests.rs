#![allow(clippy::unwrap_used, clippy::expect_used)]

use wookie_core::errors::{ExError, ExErrorKind, WookieError};
use wookie_core::gateway::{Gateway, MemoryGateway};
use wookie_core::model::{EntityKind, WidgetService};
use wookie_core_types::RequestId;

#[test]
fn test_domain_errors_map_to_stable_codes() {
    let cases: Vec<(WookieError, &str)> = vec![
        (WookieError::WidgetNotFound { widget_id: 1 }, "ERR_NOT_FOUND"),
        (WookieError::ServiceNotFound { service_id: 2 }, "ERR_NOT_FOUND"),
        (
            WookieError::WhitelistEntryNotFound { entry_id: 3 },
            "ERR_NOT_FOUND",
        ),
        (
            WookieError::InvalidInput {
                reason: "blank".to_string(),
            },
            "ERR_INVALID_INPUT",
        ),
        (
            WookieError::InvalidManifest {
                reason: "no name".to_string(),
            },
            "ERR_INVALID_MANIFEST",
        ),
        (
            WookieError::Persistence {
                op: "save".to_string(),
                message: "disk full".to_string(),
            },
            "ERR_PERSISTENCE",
        ),
        (
            WookieError::PartialCascade {
                op: "remove_widget_and_references".to_string(),
                message: "rollback failed".to_string(),
            },
            "ERR_PARTIAL_CASCADE",
        ),
    ];

    for (domain, code) in cases {
        let label = domain.to_string();
        let ex: ExError = domain.into();
        assert_eq!(ex.code(), code, "Wrong code for {}", label);
    }
}

#[test]
fn test_not_found_carries_entity_identity() {
    let ex: ExError = WookieError::ServiceNotFound { service_id: 12 }.into();

    assert!(ex.is_not_found());
    assert_eq!(ex.entity_kind(), Some(EntityKind::WidgetService));
    assert_eq!(ex.entity_id(), Some("12"));
    assert!(ex.message().contains("Widget service"));
}

#[test]
fn test_request_id_is_attached() {
    let request_id = RequestId::from_string("req-1".to_string());
    let ex = ExError::new(ExErrorKind::Internal).with_request_id(request_id);

    assert_eq!(ex.request_id().map(|r| r.as_str()), Some("req-1"));
}

#[test]
fn test_serde_errors_become_serialization() {
    let parse = serde_json::from_str::<serde_json::Value>("{not json");
    let ex: ExError = parse.unwrap_err().into();
    assert_eq!(ex.kind(), ExErrorKind::Serialization);
}

#[test]
fn test_gateway_write_failure_is_persistence_with_op() {
    // GIVEN a gateway that rejects the next write
    let mut gw = MemoryGateway::new();
    gw.fail_writes_after(0);

    // WHEN a record is saved
    let err = gw.save(&mut WidgetService::new("chat")).unwrap_err();

    // THEN the error names the gateway op and the entity kind
    assert_eq!(err.code(), "ERR_PERSISTENCE");
    assert_eq!(err.op(), Some("save"));
    assert_eq!(err.entity_kind(), Some(EntityKind::WidgetService));
    assert_eq!(err.message(), "write rejected by store");
}

#[test]
fn test_transaction_misuse_is_persistence() {
    let mut gw = MemoryGateway::new();

    let err = gw.commit().unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(err.op(), Some("commit"));
}
