use vcloud_core::config::ClientConfig;
use vcloud_core::error::CoreError;
use vcloud_core::error::vcloud_client::VCloudClientError;
use vcloud_core::{ClassifiedError, ErrorKind, HttpCommand, HttpErrorHandler, VCloudClient};

use models::media_type::ERROR_XML;
use models::{HttpMethod, HttpResponse};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUSY_XML: &str = r#"<Error xmlns="http://www.vmware.com/vcloud/v1" minorErrorCode="BUSY_ENTITY" message="The entity vApp is busy completing an operation." majorErrorCode="400"/>"#;

async fn client_for(server: &MockServer) -> VCloudClient {
    let config = ClientConfig {
        endpoint: Some(format!("{}/api/v1.0/", server.uri())),
        ..ClientConfig::default()
    };
    VCloudClient::new(&config).expect("client builds")
}

fn classified(err: CoreError) -> ClassifiedError {
    match err {
        CoreError::Classified(outcome) => outcome,
        other => panic!("Expected classified outcome, got {other}"),
    }
}

/// **VALUE**: Verifies a 2xx response returns its body untouched.
///
/// **BUG THIS CATCHES**: Would catch successful responses being routed to the handler.
#[tokio::test]
async fn given_success_response_when_execute_called_then_returns_body() {
    // GIVEN: A server returning a vApp document
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.0/vApp/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<VApp name=\"web\"/>"))
        .mount(&server)
        .await;
    let client = client_for(&server).await;

    // WHEN: Executing a GET
    let request = client.request(HttpMethod::Get, "vApp/42").unwrap();
    let body = client.execute(request).await.unwrap();

    // THEN: The body comes back
    assert_eq!(&body[..], b"<VApp name=\"web\"/>");
}

/// **VALUE**: Verifies a busy-entity 400 from a live server classifies as Conflict.
///
/// **WHY THIS MATTERS**: This is the end-to-end path: header-declared content type,
/// buffered body, XML decode, status dispatch.
///
/// **BUG THIS CATCHES**: Would catch the Content-Type header not being carried into the
/// payload metadata.
#[tokio::test]
async fn given_busy_entity_response_when_execute_called_then_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/vApp/42/action/deploy"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(BUSY_XML, ERROR_XML))
        .mount(&server)
        .await;
    let client = client_for(&server).await;

    let request = client
        .request(HttpMethod::Post, "vApp/42/action/deploy")
        .unwrap();
    let outcome = classified(client.execute(request).await.unwrap_err());

    assert_eq!(outcome.kind(), ErrorKind::Conflict);
    assert_eq!(
        outcome.message(),
        "The entity vApp is busy completing an operation."
    );
    assert!(outcome.is_retryable());
}

/// **VALUE**: Verifies 404 on GET names the resource and 404 on DELETE does not.
#[tokio::test]
async fn given_not_found_response_when_execute_called_then_depends_on_method() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v1.0/vApp/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = client_for(&server).await;

    let get = client.request(HttpMethod::Get, "vApp/42").unwrap();
    let outcome = classified(client.execute(get).await.unwrap_err());
    assert_eq!(outcome.kind(), ErrorKind::NotFound);
    assert_eq!(outcome.message(), "vApp 42 not found");

    let delete = client.request(HttpMethod::Delete, "vApp/42").unwrap();
    let outcome = classified(client.execute(delete).await.unwrap_err());
    assert_eq!(outcome.kind(), ErrorKind::Http);
    assert_eq!(
        outcome.message(),
        format!(
            "DELETE {}/api/v1.0/vApp/42 HTTP/1.1 -> HTTP/1.1 404 Not Found",
            server.uri()
        )
    );
}

/// **VALUE**: Verifies a plain-text 403 becomes Authorization with the server's text.
#[tokio::test]
async fn given_forbidden_text_response_when_execute_called_then_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.0/org/7"))
        .respond_with(ResponseTemplate::new(403).set_body_string("not a member of org 7"))
        .mount(&server)
        .await;
    let client = client_for(&server).await;

    let request = client.request(HttpMethod::Get, "org/7").unwrap();
    let outcome = classified(client.execute(request).await.unwrap_err());

    assert_eq!(outcome.kind(), ErrorKind::Authorization);
    assert_eq!(outcome.message(), "not a member of org 7");
}

/// **VALUE**: Verifies an empty 503 keeps the default message and stays retryable.
#[tokio::test]
async fn given_empty_unavailable_response_when_execute_called_then_retryable_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let client = client_for(&server).await;

    let request = client.request(HttpMethod::Get, "vdc/3").unwrap();
    let outcome = classified(client.execute(request).await.unwrap_err());

    assert_eq!(outcome.kind(), ErrorKind::Http);
    assert!(outcome.message().ends_with("-> HTTP/1.1 503 Service Unavailable"));
    assert!(outcome.is_retryable());
}

/// **VALUE**: Verifies live responses and recorded responses build the same status line.
///
/// **BUG THIS CATCHES**: Would catch the transport taking reason phrases from a different
/// registry than `HttpResponse`, so the same exchange gets two default messages.
#[tokio::test]
async fn given_unprocessable_response_when_execute_called_then_status_line_matches_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;
    let client = client_for(&server).await;

    let request = client.request(HttpMethod::Put, "vApp/5").unwrap();
    let outcome = classified(client.execute(request).await.unwrap_err());

    let recorded = HttpResponse::new(422).status_line();
    assert_eq!(recorded, "HTTP/1.1 422 Unprocessable Entity");
    assert!(outcome.message().ends_with(&format!("-> {recorded}")));
}

struct CountingHandler {
    calls: Arc<AtomicUsize>,
}

impl HttpErrorHandler for CountingHandler {
    fn handle_error(&self, command: &mut HttpCommand, response: &mut HttpResponse) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        response.release_payload();
        command.set_error(ClassifiedError::resource_not_found("counted"));
    }
}

/// **VALUE**: Verifies a replacement handler is used for failed responses.
///
/// **BUG THIS CATCHES**: Would catch `with_handler` being ignored.
#[tokio::test]
async fn given_custom_handler_when_execute_fails_then_handler_invoked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let calls = Arc::new(AtomicUsize::new(0));
    let client = client_for(&server).await.with_handler(CountingHandler {
        calls: Arc::clone(&calls),
    });

    let request = client.request(HttpMethod::Get, "vApp/1").unwrap();
    let outcome = classified(client.execute(request).await.unwrap_err());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.message(), "counted");
}

/// **VALUE**: Verifies transport failures surface as client errors, not classifications.
///
/// **BUG THIS CATCHES**: Would catch connection failures being dressed up as HTTP
/// outcomes with a fake status.
#[tokio::test]
async fn given_unreachable_server_when_execute_called_then_client_error() {
    let config = ClientConfig {
        endpoint: Some(String::from("http://127.0.0.1:1/api/v1.0/")),
        timeout_secs: 5,
        ..ClientConfig::default()
    };
    let client = VCloudClient::new(&config).unwrap();

    let request = client.request(HttpMethod::Get, "vApp/1").unwrap();
    let err = client.execute(request).await.unwrap_err();

    assert!(matches!(
        err,
        CoreError::Client(VCloudClientError::Http { .. })
    ));
}

/// **VALUE**: Verifies invalid endpoints are rejected when the client is built.
#[test]
fn given_invalid_endpoint_when_client_built_then_url_parse_error() {
    let config = ClientConfig {
        endpoint: Some(String::from("https://")),
        ..ClientConfig::default()
    };

    let result = VCloudClient::new(&config);

    assert!(matches!(result, Err(VCloudClientError::UrlParse { .. })));
}
