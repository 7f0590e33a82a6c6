// End-to-end runs of the classifier pipeline through parsed arguments

use vcloud_classify::cli::Cli;
use vcloud_classify::exchange::run;

use clap::Parser;
use serde_json::Value;

fn run_json(args: &[&str]) -> Value {
    let mut argv = vec!["vcloud-classify"];
    argv.extend_from_slice(args);
    let cli = Cli::parse_from(argv);
    let report = run(&cli).expect("classification succeeds");
    serde_json::from_str(&report.to_json(cli.pretty).unwrap()).unwrap()
}

/// **VALUE**: Verifies a 404 on GET names the resource from the URL path.
#[test]
fn given_get_not_found_when_classified_then_names_resource() {
    let config_dir = tempfile::tempdir().unwrap();

    let json = run_json(&[
        "--url",
        "https://vcloud.example.com/api/v1.0/vApp/42",
        "--status",
        "404",
        "--config-dir",
        config_dir.path().to_str().unwrap(),
    ]);

    assert_eq!(json["kind"], "not_found");
    assert_eq!(json["message"], "vApp 42 not found");
}

/// **VALUE**: Verifies a plain-text 401 becomes an authorization outcome.
///
/// **WHY THIS MATTERS**: Credential failures must never be reported as retryable.
#[test]
fn given_unauthorized_text_when_classified_then_authorization_not_retryable() {
    let dir = tempfile::tempdir().unwrap();
    let body = dir.path().join("body.txt");
    std::fs::write(&body, "session expired").unwrap();

    let json = run_json(&[
        "--url",
        "https://vcloud.example.com/api/v1.0/org/7",
        "--status",
        "401",
        "--content-type",
        "text/plain",
        "--body-file",
        body.to_str().unwrap(),
        "--config-dir",
        dir.path().to_str().unwrap(),
        "--pretty",
    ]);

    assert_eq!(json["kind"], "authorization");
    assert_eq!(json["message"], "session expired");
    assert_eq!(json["retryable"], false);
    assert_eq!(json["status"], 401);
}

/// **VALUE**: Verifies an unlisted status passes through with the default message.
#[test]
fn given_bad_gateway_without_body_when_classified_then_retryable_http() {
    let config_dir = tempfile::tempdir().unwrap();

    let json = run_json(&[
        "-X",
        "PUT",
        "--url",
        "https://vcloud.example.com/api/v1.0/vApp/42",
        "--status",
        "502",
        "--config-dir",
        config_dir.path().to_str().unwrap(),
    ]);

    assert_eq!(json["kind"], "http");
    assert_eq!(
        json["message"],
        "PUT https://vcloud.example.com/api/v1.0/vApp/42 HTTP/1.1 -> HTTP/1.1 502 Bad Gateway"
    );
    assert_eq!(json["retryable"], true);
    assert_eq!(json["category"], "server_error");
}
