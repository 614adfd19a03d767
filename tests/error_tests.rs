//! Tests for the error system.

use postcraft::error::*;

#[test]
fn request_error_display() {
    let err = ClientError::request(404, "Not found");
    assert!(matches!(&err, ClientError::Request { status: 404, .. }));
    assert_eq!(err.to_string(), "Request failed (status 404): Not found");
}

#[test]
fn error_helper_mappings_are_stable_for_major_variants() {
    struct Case {
        error: ClientError,
        expected_category: ErrorCategory,
        expected_retryable: bool,
        expected_recovery: RecoverySuggestion,
    }

    let read_error = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
    let serde_error = serde_json::from_str::<serde_json::Value>("{not-json}").unwrap_err();

    let cases = vec![
        Case {
            error: ClientError::request(401, "bad token"),
            expected_category: ErrorCategory::Authentication,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckCredentials,
        },
        Case {
            error: ClientError::request(429, "slow down"),
            expected_category: ErrorCategory::RateLimit,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::RetryLater,
        },
        Case {
            error: ClientError::request(422, "invalid"),
            expected_category: ErrorCategory::Api,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
        Case {
            error: ClientError::StreamRead(Box::new(read_error)),
            expected_category: ErrorCategory::Network,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::RetryLater,
        },
        Case {
            error: ClientError::task_failed("t", Some("quota exceeded".to_string())),
            expected_category: ErrorCategory::Task,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ResubmitTask,
        },
        Case {
            error: ClientError::Canceled,
            expected_category: ErrorCategory::Canceled,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::NoAction,
        },
        Case {
            error: ClientError::Timeout(5000),
            expected_category: ErrorCategory::Timeout,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::IncreaseTimeout,
        },
        Case {
            error: ClientError::Serialization(serde_error),
            expected_category: ErrorCategory::Serialization,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
        Case {
            error: ClientError::Configuration("bad url".to_string()),
            expected_category: ErrorCategory::Configuration,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckConfiguration,
        },
    ];

    for case in cases {
        assert_eq!(case.error.category(), case.expected_category, "{}", case.error);
        assert_eq!(case.error.is_retryable(), case.expected_retryable, "{}", case.error);
        assert_eq!(
            case.error.recovery_suggestion(),
            case.expected_recovery,
            "{}",
            case.error
        );
    }
}

#[test]
fn poll_transport_keeps_source_chain() {
    let err = ClientError::poll_transport("t-1", ClientError::request(500, "boom"));
    let source = std::error::Error::source(&err).expect("source");
    assert_eq!(source.to_string(), "Request failed (status 500): boom");
}
