use vcloud_core::error::CoreError;
use vcloud_core::error::config::ConfigError;
use vcloud_core::error::decode::DecodeError;
use vcloud_core::error::vcloud_client::VCloudClientError;

use common::ErrorLocation;

use std::error::Error;
use std::io::Error as IoError;
use std::io::ErrorKind;
use std::panic::Location;
use std::path::PathBuf;

/// **VALUE**: Verifies that `VCloudClientError::Http` includes file/line/column location tracking.
///
/// **WHY THIS MATTERS**: When a vCloud call fails before any response arrives, developers
/// need to know which call site produced the error.
///
/// **BUG THIS CATCHES**: Would catch if someone:
/// - Removes the `location` field from VCloudClientError
/// - Breaks the Display implementation to not include location
#[test]
fn given_http_client_error_when_formatted_then_includes_location() {
    // GIVEN: An Http error with location
    let err = VCloudClientError::Http {
        message: "connection refused".to_string(),
        is_timeout: false,
        is_connection: true,
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Formatting the error as string
    let error_string = format!("{}", err);

    // THEN: Should include error type, message, and file location
    assert!(error_string.contains("HTTP Error"));
    assert!(error_string.contains("connection refused"));
    assert!(error_string.contains("errors.rs"));
    assert!(err.is_retryable(), "Connection failures are retryable");
}

/// **VALUE**: Verifies URL parse errors convert with location tracking and are not retryable.
///
/// **BUG THIS CATCHES**: Would catch a missing `From<url::ParseError>` impl or a
/// retryable flag on a permanent failure.
#[test]
fn given_url_parse_error_when_converted_then_not_retryable() {
    // GIVEN: An invalid URL
    let parse_error = url::Url::parse("not a url").unwrap_err();

    // WHEN: Converting into VCloudClientError
    let err = VCloudClientError::from(parse_error);

    // THEN: UrlParse variant, not retryable
    assert!(matches!(err, VCloudClientError::UrlParse { .. }));
    assert!(!err.is_retryable());
    assert!(err.to_string().starts_with("URL Parse Error: "));
}

/// **VALUE**: Verifies that config errors preserve their IO source chain.
///
/// **WHY THIS MATTERS**: A read error alone does not say whether the file was
/// missing permissions or on a broken mount.
///
/// **BUG THIS CATCHES**: Would catch removal of the `#[source]` attribute.
#[test]
fn given_config_read_error_with_source_when_inspected_then_preserves_chain() {
    // GIVEN: A ReadError wrapping an IO error
    let err = ConfigError::ReadError {
        location: ErrorLocation::from(Location::caller()),
        path: PathBuf::from("/etc/vcloud/vcloud.toml"),
        source: IoError::new(ErrorKind::PermissionDenied, "access denied"),
    };

    // WHEN: Accessing the error source
    let source = err.source();

    // THEN: Should preserve the source chain
    assert!(source.is_some(), "Should have error source");
    assert!(source.unwrap().to_string().contains("access denied"));
    assert!(err.to_string().contains("/etc/vcloud/vcloud.toml"));
}

/// **VALUE**: Verifies XML decode errors keep the quick-xml error as source.
#[test]
fn given_xml_decode_error_when_inspected_then_source_is_xml_error() {
    // GIVEN: A decode failure from malformed XML
    let xml_error = quick_xml::de::from_str::<models::VCloudError>("<Error message=\"x").unwrap_err();

    // WHEN: Converting into DecodeError
    let err = DecodeError::from(xml_error);

    // THEN: Display prefix and source chain
    assert!(err.to_string().starts_with("XML Decode Error: "));
    assert!(err.source().is_some());
}

/// **VALUE**: Verifies CoreError is transparent over module errors.
///
/// **BUG THIS CATCHES**: Would catch CoreError adding its own prefix and hiding the
/// module error's message and location.
#[test]
fn given_module_error_when_wrapped_in_core_error_then_display_is_transparent() {
    let inner = ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: "bad timeout".to_string(),
    };
    let expected = inner.to_string();

    let err = CoreError::from(inner);

    assert_eq!(err.to_string(), expected);
}
