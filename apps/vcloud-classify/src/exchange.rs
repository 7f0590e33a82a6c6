//! Rebuild a failed exchange from command-line arguments and classify it.

use crate::cli::Cli;
use crate::error::ClassifyError;
use crate::report::ClassificationReport;

use common::ErrorLocation;
use models::{HttpMethod, HttpRequest, HttpResponse, Payload};
use vcloud_core::config::{ClientConfig, default_config_dir};
use vcloud_core::{ClassifiedError, HttpCommand, HttpErrorHandler, VCloudErrorHandler};

use std::panic::Location;
use std::path::Path;

use log::{debug, info};

/// Build the request described by `--method` and `--url`.
pub fn build_request(cli: &Cli) -> Result<HttpRequest, ClassifyError> {
    let method: HttpMethod = cli.method.parse()?;
    let request = HttpRequest::builder()
        .with_method(method)
        .with_endpoint(cli.url.as_str())
        .build()?;
    Ok(request)
}

/// Build the response described by `--status`, `--reason`, `--content-type`
/// and `--body-file`.
pub fn build_response(cli: &Cli) -> Result<HttpResponse, ClassifyError> {
    let mut response = HttpResponse::new(cli.status);
    if let Some(reason) = &cli.reason {
        response = response.with_reason(reason.as_str());
    }

    if let Some(path) = &cli.body_file {
        let body = read_body_file(path)?;
        if !body.is_empty() {
            debug!("Read {} body bytes from {}", body.len(), path.display());
            response = response.with_payload(Payload::from_bytes(cli.content_type.as_deref(), body));
        }
    }

    Ok(response)
}

#[track_caller]
fn read_body_file(path: &Path) -> Result<Vec<u8>, ClassifyError> {
    std::fs::read(path).map_err(|e| ClassifyError::BodyFile {
        path: path.to_path_buf(),
        location: ErrorLocation::from(Location::caller()),
        source: e,
    })
}

/// Config from `--config-dir`, else the user config directory, else defaults.
pub fn load_config(cli: &Cli) -> Result<ClientConfig, ClassifyError> {
    let dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => match default_config_dir() {
            Ok(dir) => dir,
            Err(e) => {
                info!("No config directory available ({e}), using defaults");
                return Ok(ClientConfig::default());
            }
        },
    };

    ClientConfig::load(&dir).map_err(|e| ClassifyError::Core(e.into()))
}

/// Run the classifier over the exchange and return its outcome.
pub fn classify(
    config: &ClientConfig,
    request: HttpRequest,
    mut response: HttpResponse,
) -> Result<ClassifiedError, ClassifyError> {
    let handler =
        VCloudErrorHandler::default().with_error_media_type(config.error_media_type.as_str());
    let mut command = HttpCommand::new(request);

    handler.handle_error(&mut command, &mut response);

    command.take_error().ok_or_else(|| ClassifyError::Classify {
        message: String::from("Handler did not record an outcome"),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Full pipeline: arguments in, report out.
pub fn run(cli: &Cli) -> Result<ClassificationReport, ClassifyError> {
    let config = load_config(cli)?;
    let request = build_request(cli)?;
    let response = build_response(cli)?;

    let outcome = classify(&config, request, response)?;
    info!("Classified as {}: {}", outcome.kind(), outcome.message());

    Ok(ClassificationReport::from(&outcome))
}
