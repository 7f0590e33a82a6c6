// Unit tests for VCloudErrorHandler classification
// Covers payload message resolution, status dispatch and payload release

use crate::command::HttpCommand;
use crate::decoder::{ErrorDecoder, XmlErrorDecoder};
use crate::error::classified::{ClassifiedError, ErrorKind};
use crate::handlers::{HttpErrorHandler, VCloudErrorHandler};

use models::media_type::ERROR_XML;
use models::{
    ContentMetadata, HttpMethod, HttpRequest, HttpResponse, MinorCode, Payload, PayloadBody,
    VCloudError,
};

use std::io::{Error as IoError, Result as IoResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;

const VAPP_URL: &str = "https://vcloud.example.com/v1.5/vapp/12345";
const BUSY_XML: &str = r#"<Error xmlns="http://www.vmware.com/vcloud/v1" minorErrorCode="BUSY_ENTITY" message="The entity vApp is busy completing an operation." majorErrorCode="400"/>"#;
const BAD_REQUEST_XML: &str = r#"<Error xmlns="http://www.vmware.com/vcloud/v1" minorErrorCode="BAD_REQUEST" message="Name is required" majorErrorCode="400"/>"#;

// ============================================
// HELPERS
// ============================================

struct CountingBody {
    bytes: Option<Bytes>,
    releases: Arc<AtomicUsize>,
}

impl PayloadBody for CountingBody {
    fn read_all(&mut self) -> IoResult<Bytes> {
        self.bytes
            .clone()
            .ok_or_else(|| IoError::other("connection reset"))
    }

    fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Payload whose body reads `body`, or fails to read when `body` is None.
fn counted_payload(content_type: &str, body: Option<&'static str>) -> (Payload, Arc<AtomicUsize>) {
    let releases = Arc::new(AtomicUsize::new(0));
    let payload = Payload::new(
        ContentMetadata {
            content_type: Some(content_type.to_string()),
            content_length: body.map(|b| b.len() as u64),
        },
        CountingBody {
            bytes: body.map(|b| Bytes::from_static(b.as_bytes())),
            releases: Arc::clone(&releases),
        },
    );
    (payload, releases)
}

fn request(method: HttpMethod, url: &str) -> HttpRequest {
    HttpRequest::builder()
        .with_method(method)
        .with_endpoint(url)
        .build()
        .expect("valid test request")
}

fn default_message(request: &HttpRequest, response: &HttpResponse) -> String {
    format!("{} -> {}", request.request_line(), response.status_line())
}

struct StubDecoder(Option<VCloudError>);

impl ErrorDecoder for StubDecoder {
    fn decode(&self, _request: &HttpRequest, _body: &[u8]) -> Option<VCloudError> {
        self.0.clone()
    }
}

// ============================================
// MESSAGE RESOLUTION
// ============================================

/// **VALUE**: Verifies the default outcome when the response has no payload.
///
/// **WHY THIS MATTERS**: Many vCloud failures (gateway errors, empty 500s) carry no body.
/// The message must still say what was requested and what came back.
///
/// **BUG THIS CATCHES**: Would catch a missing request or status line, or a separator
/// other than ` -> `.
#[test]
fn given_no_payload_when_classified_then_generic_error_with_request_and_status_lines() {
    // GIVEN: A 500 without payload
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Get, VAPP_URL);
    let mut response = HttpResponse::new(500);

    // WHEN: Classifying
    let outcome = handler.classify(&request, &mut response);

    // THEN: Generic HTTP outcome with "<request line> -> <status line>"
    assert_eq!(outcome.kind(), ErrorKind::Http);
    assert_eq!(
        outcome.message(),
        "GET https://vcloud.example.com/v1.5/vapp/12345 HTTP/1.1 -> HTTP/1.1 500 Internal Server Error"
    );
    assert!(matches!(outcome, ClassifiedError::HttpResponse { .. }));
}

/// **VALUE**: Verifies a plain-text body becomes the message for unmapped codes.
///
/// **BUG THIS CATCHES**: Would catch the text body being ignored, or the outcome being
/// changed for a status with no special handling.
#[test]
fn given_text_payload_when_status_unmapped_then_text_is_message() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Post, VAPP_URL);
    let (payload, _) = counted_payload("text/plain", Some("quota exceeded for org"));
    let mut response = HttpResponse::new(500).with_payload(payload);

    let outcome = handler.classify(&request, &mut response);

    assert_eq!(outcome.kind(), ErrorKind::Http);
    assert_eq!(outcome.message(), "quota exceeded for org");
}

/// **VALUE**: Verifies a structured error body supplies the message.
///
/// **WHY THIS MATTERS**: The vCloud message ("The entity vApp is busy...") is far more
/// useful than the status line.
///
/// **BUG THIS CATCHES**: Would catch the media type check failing or the decoded error
/// not being attached to the outcome.
#[test]
fn given_vcloud_error_payload_when_status_unmapped_then_structured_outcome() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Post, VAPP_URL);
    let (payload, _) = counted_payload(ERROR_XML, Some(BUSY_XML));
    let mut response = HttpResponse::new(500).with_payload(payload);

    let outcome = handler.classify(&request, &mut response);

    assert!(matches!(outcome, ClassifiedError::VCloudResponse { .. }));
    assert_eq!(
        outcome.message(),
        "The entity vApp is busy completing an operation."
    );
    let error = outcome.vcloud_error().expect("decoded error attached");
    assert_eq!(error.minor_error_code, Some(MinorCode::BusyEntity));
    assert_eq!(error.major_error_code, Some(400));
}

/// **VALUE**: Verifies undecodable structured bodies fall back to the default message.
///
/// **WHY THIS MATTERS**: A truncated XML document must not abort classification, and
/// must not be echoed as if it were plain text.
///
/// **BUG THIS CATCHES**: Would catch a panic in the decoder path or a text fallback for
/// structured bodies.
#[test]
fn given_malformed_vcloud_error_payload_when_classified_then_default_message() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Get, VAPP_URL);
    let (payload, _) = counted_payload(ERROR_XML, Some("<Error message=\"unterminated"));
    let mut response = HttpResponse::new(500).with_payload(payload);
    let expected = default_message(&request, &response);

    let outcome = handler.classify(&request, &mut response);

    assert!(matches!(outcome, ClassifiedError::HttpResponse { .. }));
    assert_eq!(outcome.message(), expected);
}

/// **VALUE**: Verifies read failures and empty bodies keep the default message.
///
/// **BUG THIS CATCHES**: Would catch an empty message replacing the status line, or an
/// error escaping from a failed read.
#[test]
fn given_unreadable_or_empty_text_payload_when_classified_then_default_message() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Get, VAPP_URL);

    for body in [None, Some("")] {
        let (payload, _) = counted_payload("text/plain", body);
        let mut response = HttpResponse::new(502).with_payload(payload);
        let expected = default_message(&request, &response);

        let outcome = handler.classify(&request, &mut response);

        assert_eq!(outcome.message(), expected, "body {body:?}");
        assert!(outcome.is_retryable(), "502 should stay retryable");
    }
}

/// **VALUE**: Verifies whitespace-only text is still read text and becomes the message.
///
/// **BUG THIS CATCHES**: Would catch bodies being trimmed before the emptiness check,
/// which silently swaps the server's text for the status line.
#[test]
fn given_whitespace_text_payload_when_classified_then_whitespace_is_message() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Get, VAPP_URL);
    let (payload, _) = counted_payload("text/plain", Some("   "));
    let mut response = HttpResponse::new(500).with_payload(payload);

    let outcome = handler.classify(&request, &mut response);

    assert!(matches!(outcome, ClassifiedError::HttpResponse { .. }));
    assert_eq!(outcome.message(), "   ");
}

/// **VALUE**: Verifies a structured document whose message is only whitespace still
/// supplies the message and the structured outcome.
#[test]
fn given_vcloud_error_with_whitespace_message_when_classified_then_structured_outcome() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Get, VAPP_URL);
    let (payload, _) = counted_payload(
        ERROR_XML,
        Some(r#"<Error minorErrorCode="BAD_REQUEST" message=" " majorErrorCode="500"/>"#),
    );
    let mut response = HttpResponse::new(500).with_payload(payload);

    let outcome = handler.classify(&request, &mut response);

    assert!(matches!(outcome, ClassifiedError::VCloudResponse { .. }));
    assert_eq!(outcome.message(), " ");
}

/// **VALUE**: Verifies a busy-entity document with an unparseable major code is still a
/// Conflict.
///
/// **WHY THIS MATTERS**: `majorErrorCode` is informational; the minor code drives the
/// 400 dispatch.
///
/// **BUG THIS CATCHES**: Would catch a strict numeric field rejecting the whole document
/// and downgrading a retryable busy entity to InvalidArgument.
#[test]
fn given_busy_entity_with_blank_major_code_when_classified_then_conflict() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Post, VAPP_URL);
    let (payload, _) = counted_payload(
        ERROR_XML,
        Some(r#"<Error minorErrorCode="BUSY_ENTITY" message="busy" majorErrorCode=""/>"#),
    );
    let mut response = HttpResponse::new(400).with_payload(payload);

    let outcome = handler.classify(&request, &mut response);

    assert_eq!(outcome.kind(), ErrorKind::Conflict);
    assert_eq!(outcome.message(), "busy");
    let error = outcome.vcloud_error().expect("decoded error attached");
    assert_eq!(error.major_error_code, None);
}

/// **VALUE**: Verifies declared parameters on the content type do not hide the document.
#[test]
fn given_parameterized_error_media_type_when_classified_then_structured_outcome() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Get, VAPP_URL);
    let (payload, _) = counted_payload(
        "application/vnd.vmware.vcloud.error+xml;version=1.5",
        Some(BAD_REQUEST_XML),
    );
    let mut response = HttpResponse::new(500).with_payload(payload);

    let outcome = handler.classify(&request, &mut response);

    assert_eq!(outcome.message(), "Name is required");
}

/// **VALUE**: Verifies a configured media type replaces the default one.
///
/// **BUG THIS CATCHES**: Would catch the handler ignoring `with_error_media_type`.
#[test]
fn given_custom_error_media_type_when_classified_then_uses_it() {
    let handler = VCloudErrorHandler::default().with_error_media_type("application/xml");
    let request = request(HttpMethod::Get, VAPP_URL);
    let (payload, _) = counted_payload("application/xml", Some(BAD_REQUEST_XML));
    let mut response = HttpResponse::new(500).with_payload(payload);

    let outcome = handler.classify(&request, &mut response);

    assert_eq!(handler.error_media_type(), "application/xml");
    assert!(matches!(outcome, ClassifiedError::VCloudResponse { .. }));
}

// ============================================
// STATUS DISPATCH
// ============================================

/// **VALUE**: Verifies 400 with a BUSY_ENTITY document becomes a Conflict.
///
/// **WHY THIS MATTERS**: A busy entity is transient: callers wait for the running task and
/// try again. Reporting it as a bad argument makes them give up.
///
/// **BUG THIS CATCHES**: Would catch the minor-code check being dropped or inverted.
#[test]
fn given_bad_request_with_busy_entity_when_classified_then_conflict() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Post, VAPP_URL);
    let (payload, _) = counted_payload(ERROR_XML, Some(BUSY_XML));
    let mut response = HttpResponse::new(400).with_payload(payload);

    let outcome = handler.classify(&request, &mut response);

    assert_eq!(outcome.kind(), ErrorKind::Conflict);
    assert_eq!(
        outcome.message(),
        "The entity vApp is busy completing an operation."
    );
    assert!(outcome.is_retryable());
    let cause = outcome.cause().expect("conflict keeps its cause");
    assert!(matches!(cause, ClassifiedError::VCloudResponse { .. }));
    assert_eq!(outcome.status_code().map(|s| s.as_u16()), Some(400));
}

/// **VALUE**: Verifies other 400s become InvalidArgument wrapping the earlier outcome.
///
/// **BUG THIS CATCHES**: Would catch every structured 400 being treated as busy, or the
/// cause chain being dropped.
#[test]
fn given_bad_request_without_busy_entity_when_classified_then_invalid_argument() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Post, VAPP_URL);

    // Structured, different minor code
    let (payload, _) = counted_payload(ERROR_XML, Some(BAD_REQUEST_XML));
    let mut response = HttpResponse::new(400).with_payload(payload);
    let outcome = handler.classify(&request, &mut response);
    assert_eq!(outcome.kind(), ErrorKind::InvalidArgument);
    assert_eq!(outcome.message(), "Name is required");
    assert!(!outcome.is_retryable());

    // Plain text
    let (payload, _) = counted_payload("text/html", Some("<h1>bad</h1>"));
    let mut response = HttpResponse::new(400).with_payload(payload);
    let outcome = handler.classify(&request, &mut response);
    assert_eq!(outcome.kind(), ErrorKind::InvalidArgument);
    assert_eq!(outcome.message(), "<h1>bad</h1>");
    assert!(matches!(
        outcome.cause(),
        Some(ClassifiedError::HttpResponse { .. })
    ));

    // No payload
    let mut response = HttpResponse::new(400);
    let expected = default_message(&request, &response);
    let outcome = handler.classify(&request, &mut response);
    assert_eq!(outcome.kind(), ErrorKind::InvalidArgument);
    assert_eq!(outcome.message(), expected);
}

/// **VALUE**: Verifies a BUSY_ENTITY document with an empty message still yields Conflict.
///
/// **WHY THIS MATTERS**: The minor code, not the message, identifies a busy entity.
///
/// **BUG THIS CATCHES**: Would catch the decoded error being discarded along with its
/// empty message.
#[test]
fn given_busy_entity_with_empty_message_when_classified_then_conflict_with_default_message() {
    let decoded = VCloudError {
        minor_error_code: Some(MinorCode::BusyEntity),
        ..VCloudError::default()
    };
    let handler = VCloudErrorHandler::new(StubDecoder(Some(decoded)));
    let request = request(HttpMethod::Put, VAPP_URL);
    let (payload, _) = counted_payload(ERROR_XML, Some("<Error/>"));
    let mut response = HttpResponse::new(400).with_payload(payload);
    let expected = default_message(&request, &response);

    let outcome = handler.classify(&request, &mut response);

    assert_eq!(outcome.kind(), ErrorKind::Conflict);
    assert_eq!(outcome.message(), expected);
}

/// **VALUE**: Verifies 401 and 403 become Authorization carrying the prior message only.
///
/// **WHY THIS MATTERS**: Callers surface authorization failures to the user with the
/// server's wording.
///
/// **BUG THIS CATCHES**: Would catch the message being rebuilt from the status line when
/// a body was present, or a cause chain being kept.
#[test]
fn given_unauthorized_or_forbidden_when_classified_then_authorization_with_prior_message() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Get, VAPP_URL);

    let mut response = HttpResponse::new(401);
    let expected = default_message(&request, &response);
    let outcome = handler.classify(&request, &mut response);
    assert_eq!(outcome.kind(), ErrorKind::Authorization);
    assert_eq!(outcome.message(), expected);
    assert!(outcome.cause().is_none());
    assert_eq!(outcome.status_code().map(|s| s.as_u16()), Some(401));

    let (payload, _) = counted_payload("text/plain", Some("session expired"));
    let mut response = HttpResponse::new(403).with_payload(payload);
    let outcome = handler.classify(&request, &mut response);
    assert_eq!(outcome.kind(), ErrorKind::Authorization);
    assert_eq!(outcome.message(), "session expired");
    assert!(outcome.vcloud_error().is_none());
}

/// **VALUE**: Verifies 404 on a versioned resource path names the resource.
#[test]
fn given_not_found_for_get_when_classified_then_resource_not_found_with_resource_id() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Get, VAPP_URL);
    let (payload, _) = counted_payload("text/plain", Some("nope"));
    let mut response = HttpResponse::new(404).with_payload(payload);

    let outcome = handler.classify(&request, &mut response);

    assert_eq!(outcome.kind(), ErrorKind::NotFound);
    assert_eq!(outcome.message(), "vapp 12345 not found");
    assert!(!outcome.is_retryable());
}

/// **VALUE**: Verifies 404 on an unrecognized path reports the raw path.
#[test]
fn given_not_found_for_unmatched_path_when_classified_then_message_is_path() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Get, "https://vcloud.example.com/v1.5/weird");
    let mut response = HttpResponse::new(404);

    let outcome = handler.classify(&request, &mut response);

    assert_eq!(outcome.kind(), ErrorKind::NotFound);
    assert_eq!(outcome.message(), "/v1.5/weird");
}

/// **VALUE**: Verifies the raw-path message is percent-decoded.
///
/// **BUG THIS CATCHES**: Would catch `%20` escapes leaking into user-facing messages.
#[test]
fn given_not_found_for_encoded_path_when_classified_then_message_is_decoded_path() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Get, "https://h/v1.5/weird path");
    let mut response = HttpResponse::new(404);

    let outcome = handler.classify(&request, &mut response);

    assert_eq!(outcome.message(), "/v1.5/weird path");
}

/// **VALUE**: Verifies 404 on DELETE keeps the payload-derived outcome.
///
/// **WHY THIS MATTERS**: Deleting something that is already gone is not reported as a
/// missing resource.
///
/// **BUG THIS CATCHES**: Would catch the DELETE exemption being removed.
#[test]
fn given_not_found_for_delete_when_classified_then_outcome_unchanged() {
    let handler = VCloudErrorHandler::default();
    let request = request(HttpMethod::Delete, VAPP_URL);

    let mut response = HttpResponse::new(404);
    let expected = default_message(&request, &response);
    let outcome = handler.classify(&request, &mut response);
    assert_eq!(outcome.kind(), ErrorKind::Http);
    assert_eq!(outcome.message(), expected);

    let (payload, _) = counted_payload("text/plain", Some("already deleted"));
    let mut response = HttpResponse::new(404).with_payload(payload);
    let outcome = handler.classify(&request, &mut response);
    assert_eq!(outcome.kind(), ErrorKind::Http);
    assert_eq!(outcome.message(), "already deleted");
}

// ============================================
// RESOURCE RELEASE & REPORTING
// ============================================

/// **VALUE**: Verifies the payload is released exactly once on every branch.
///
/// **WHY THIS MATTERS**: The payload may hold a pooled connection. A double release
/// corrupts the pool and a missed release leaks it.
///
/// **BUG THIS CATCHES**: Would catch an early return that skips release, or a release in
/// both the handler and the payload's Drop.
#[test]
fn given_every_branch_when_classified_then_payload_released_exactly_once() {
    let handler = VCloudErrorHandler::default();
    let bodies: [(&str, Option<&'static str>); 5] = [
        (ERROR_XML, Some(BUSY_XML)),
        (ERROR_XML, Some("not xml at all")),
        (ERROR_XML, None),
        ("text/plain", Some("boom")),
        ("text/plain", None),
    ];

    for method in [HttpMethod::Get, HttpMethod::Delete] {
        let request = request(method, VAPP_URL);
        for status in [400u16, 401, 403, 404, 409, 500] {
            for (content_type, body) in bodies {
                let (payload, releases) = counted_payload(content_type, body);
                let mut response = HttpResponse::new(status).with_payload(payload);

                let _outcome = handler.classify(&request, &mut response);
                assert_eq!(
                    releases.load(Ordering::SeqCst),
                    1,
                    "{method} {status} {content_type} {body:?}: released after classify"
                );
                assert!(response.payload().is_some_and(Payload::is_released));

                drop(response);
                assert_eq!(
                    releases.load(Ordering::SeqCst),
                    1,
                    "{method} {status} {content_type} {body:?}: no second release on drop"
                );
            }
        }
    }
}

/// **VALUE**: Verifies `handle_error` attaches the outcome to the command.
///
/// **BUG THIS CATCHES**: Would catch the handler classifying but never reporting.
#[test]
fn given_command_when_handle_error_called_then_outcome_attached() {
    let handler = VCloudErrorHandler::new(XmlErrorDecoder::new());
    let mut command = HttpCommand::new(request(HttpMethod::Get, VAPP_URL));
    let (payload, releases) = counted_payload(ERROR_XML, Some(BUSY_XML));
    let mut response = HttpResponse::new(400).with_payload(payload);

    assert!(!command.is_failed());
    handler.handle_error(&mut command, &mut response);

    assert!(command.is_failed());
    assert_eq!(command.error().map(ClassifiedError::kind), Some(ErrorKind::Conflict));
    assert_eq!(releases.load(Ordering::SeqCst), 1);

    let taken = command.take_error().expect("outcome attached");
    assert_eq!(taken.error_category(), "busy_entity");
    assert!(command.error().is_none());
}

/// **VALUE**: Verifies the handler can be shared across threads behind a trait object.
#[test]
fn given_handler_when_boxed_as_trait_object_then_usable_across_threads() {
    let handler: Arc<dyn HttpErrorHandler> = Arc::new(VCloudErrorHandler::default());

    let worker = std::thread::spawn(move || {
        let mut command = HttpCommand::new(request(HttpMethod::Get, VAPP_URL));
        let mut response = HttpResponse::new(404);
        handler.handle_error(&mut command, &mut response);
        command.take_error().map(|e| e.kind())
    });

    assert_eq!(worker.join().unwrap(), Some(ErrorKind::NotFound));
}
