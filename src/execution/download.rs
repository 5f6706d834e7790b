//! Binary download path.
//!
//! A specialization of the dispatcher for responses that are expected to be
//! file bytes: the request goes out as a form-urlencoded POST, a progress
//! indicator is shown for the duration, and the response's declared content
//! type decides whether the body is the real payload or an embedded JSON
//! error that must be surfaced instead of saved. Closing the indicator on
//! every exit path is this module's only resource-lifecycle obligation.

use crate::classify::classify;
use crate::defaults;
use crate::encoding::encode_params;
use crate::error::{ApiError, TransportFailure};
use crate::execution::dispatcher::{ERROR_TITLE, ExecutionConfig, build_headers, join_url};
use crate::execution::http::interceptor::RequestContext;
use crate::ports::{FileSaver, ProgressIndicator, Severity};
use crate::types::{RequestEnvelope, Verb};
use serde_json::Value;

const DOWNLOAD_IN_PROGRESS: &str = "Downloading data, please wait";
const DOWNLOAD_FAILED: &str =
    "There was an error downloading the file, please contact the administrator";

/// Closes the progress indicator when dropped, so success, classified error
/// and transport exception all release it.
struct ProgressGuard<'a> {
    indicator: &'a dyn ProgressIndicator,
}

impl<'a> ProgressGuard<'a> {
    fn begin(indicator: &'a dyn ProgressIndicator, text: &str) -> Self {
        indicator.begin(text);
        Self { indicator }
    }
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.indicator.finish();
    }
}

/// POST a form-urlencoded request and persist the binary response under
/// `filename`, unless the body turns out to be a JSON error.
pub async fn execute_download(
    config: &ExecutionConfig,
    saver: &dyn FileSaver,
    progress: &dyn ProgressIndicator,
    path: &str,
    params: &Value,
    filename: &str,
) -> Result<(), ApiError> {
    let _guard = ProgressGuard::begin(progress, DOWNLOAD_IN_PROGRESS);

    let url = join_url(&config.base_url, path);
    let envelope = RequestEnvelope::new(Verb::Post, path);
    let mut headers = build_headers(config, &envelope)?;
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/x-www-form-urlencoded"),
    );

    let mut rb = config
        .http_client
        .post(&url)
        .headers(headers.clone())
        .body(encode_params(params));

    let ctx = RequestContext::new(Verb::Post, url.clone());
    let empty_json = serde_json::json!({});
    for interceptor in &config.interceptors {
        rb = interceptor.on_before_send(&ctx, rb, &empty_json, &headers)?;
    }

    let resp = match rb.send().await {
        Ok(resp) => resp,
        Err(e) => {
            return Err(download_error(
                config,
                &ctx,
                ApiError::Transport(TransportFailure::from_reqwest(&e)),
            ));
        }
    };

    if !resp.status().is_success() {
        let failure = TransportFailure::HttpStatus(resp.status().as_u16());
        return Err(download_error(config, &ctx, ApiError::Transport(failure)));
    }

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let bytes = match resp.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Err(download_error(
                config,
                &ctx,
                ApiError::Transport(TransportFailure::from_reqwest(&e)),
            ));
        }
    };

    // The server returned a structured error instead of file bytes, despite
    // the binary request: decode it and surface the resolved message.
    if content_type.contains("application/json") {
        let text = String::from_utf8_lossy(&bytes);
        let error = match serde_json::from_str::<Value>(&text) {
            Ok(body) => {
                let classification = classify(&body);
                config.notifier.show(
                    Severity::Error,
                    ERROR_TITLE,
                    &classification.message,
                    defaults::notify::TOAST_DURATION,
                );
                ApiError::Api {
                    code: classification.code,
                    message: classification.message,
                }
            }
            Err(e) => {
                return Err(download_error(config, &ctx, ApiError::Decode(e.to_string())));
            }
        };
        for interceptor in &config.interceptors {
            interceptor.on_error(&ctx, &error);
        }
        return Err(error);
    }

    if let Err(e) = saver.save(&bytes, filename).await {
        return Err(download_error(config, &ctx, ApiError::Io(e.to_string())));
    }
    tracing::debug!(target: "outpost::download", url = %url, filename, bytes = bytes.len(), "download complete");
    Ok(())
}

/// Surface the generic download failure message and notify interceptors.
fn download_error(config: &ExecutionConfig, ctx: &RequestContext, error: ApiError) -> ApiError {
    config.notifier.show(
        Severity::Error,
        ERROR_TITLE,
        DOWNLOAD_FAILED,
        defaults::notify::TOAST_DURATION,
    );
    for interceptor in &config.interceptors {
        interceptor.on_error(ctx, &error);
    }
    error
}
