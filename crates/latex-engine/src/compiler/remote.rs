//! Remote compilation service strategies
//!
//! Two independent HTTP services are supported: latexonline.cc (multipart
//! upload, PDF body on success) and latex.ytotech.com (JSON build request).
//! Each attempt has its own timeout; a failure carries the HTTP status and a
//! truncated response body for diagnostics.

use std::time::Duration;

use serde_json::json;

use super::errors::{tail, AttemptFailure};

pub(crate) const LATEXONLINE: &str = "latexonline.cc";
pub(crate) const YTOTECH: &str = "latex.ytotech.com";

/// How much of an error response body to keep.
const BODY_TAIL: usize = 200;

/// Compile through latexonline.cc: multipart POST of the `.tex` file, PDF
/// bytes back on success.
pub(crate) async fn latexonline(
    client: &reqwest::Client,
    base_url: &str,
    source: &str,
    tex_filename: &str,
    timeout: Duration,
) -> Result<Vec<u8>, AttemptFailure> {
    let part = reqwest::multipart::Part::text(source.to_string())
        .file_name(tex_filename.to_string())
        .mime_str("application/x-tex")
        .map_err(|e| AttemptFailure::new(LATEXONLINE, format!("invalid mime: {e}")))?;
    let form = reqwest::multipart::Form::new()
        .part("file", part)
        .text("command", "pdflatex");

    let response = client
        .post(format!("{base_url}/compile"))
        .multipart(form)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| transport_failure(LATEXONLINE, e))?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if status.is_success() && content_type.starts_with("application/pdf") {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_failure(LATEXONLINE, e))?;
        return Ok(bytes.to_vec());
    }

    let body = response.text().await.unwrap_or_default();
    Err(AttemptFailure::new(
        LATEXONLINE,
        format!("HTTP {} - {}", status.as_u16(), tail(&body, BODY_TAIL)),
    ))
}

/// Compile through latex.ytotech.com: synchronous JSON build, PDF bytes back
/// on success.
pub(crate) async fn ytotech(
    client: &reqwest::Client,
    base_url: &str,
    source: &str,
    timeout: Duration,
) -> Result<Vec<u8>, AttemptFailure> {
    let response = client
        .post(format!("{base_url}/builds/sync"))
        .json(&json!({
            "compiler": "pdflatex",
            "resources": [{ "main": true, "content": source }],
        }))
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| transport_failure(YTOTECH, e))?;

    let status = response.status();
    if status.is_success() {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_failure(YTOTECH, e))?;
        return Ok(bytes.to_vec());
    }

    let body = response.text().await.unwrap_or_default();
    Err(AttemptFailure::new(
        YTOTECH,
        format!("HTTP {} - {}", status.as_u16(), tail(&body, BODY_TAIL)),
    ))
}

fn transport_failure(strategy: &'static str, err: reqwest::Error) -> AttemptFailure {
    if err.is_timeout() {
        AttemptFailure::new(strategy, "request timed out")
    } else {
        AttemptFailure::new(strategy, format!("transport error: {err}"))
    }
}
