//! Transport dispatcher.
//!
//! `execute_request` is the single chokepoint every outbound call passes
//! through. Sequencing, in order: attach the bearer credential (unless
//! `skip_auth`), rewrite GET URLs with the encoded parameters, consult the
//! duplicate-submission guard for mutating verbs (unless `skip_dedupe`),
//! issue the transport call, map transport-level failures to the typed
//! taxonomy, and classify received JSON bodies. No retries happen at this
//! layer; a failed call is always surfaced to the caller as an `Err`.

use crate::classify::{Outcome, classify};
use crate::dedupe::DedupeGuard;
use crate::defaults;
use crate::encoding::append_query;
use crate::error::{ApiError, TransportFailure};
use crate::execution::http::headers::HttpHeaderBuilder;
use crate::execution::http::interceptor::{HttpInterceptor, RequestContext};
use crate::ports::{
    ConfirmPrompt, CredentialStore, LogoutHandler, NotificationSink, Severity,
};
use crate::reauth::ReauthGate;
use crate::types::{RequestEnvelope, Verb};
use reqwest::header::HeaderMap;
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::Arc;

pub(crate) const ERROR_TITLE: &str = "Error";
pub(crate) const WARNING_TITLE: &str = "Warning";
const SESSION_EXPIRED_TITLE: &str = "System Notice";
const SESSION_EXPIRED_PROMPT: &str =
    "Your login session has expired. You can stay on this page, or log in again.";

/// Everything a dispatch needs: the transport, the injected ports, and the
/// two pieces of shared client-side state.
pub struct ExecutionConfig {
    pub http_client: reqwest::Client,
    pub base_url: String,
    pub credentials: Arc<dyn CredentialStore>,
    pub notifier: Arc<dyn NotificationSink>,
    pub confirm: Arc<dyn ConfirmPrompt>,
    pub logout: Arc<dyn LogoutHandler>,
    pub interceptors: Vec<Arc<dyn HttpInterceptor>>,
    pub dedupe: DedupeGuard,
    pub reauth: ReauthGate,
}

/// A raw binary response passed through without classification.
#[derive(Debug)]
pub struct BinaryResponse {
    pub bytes: Vec<u8>,
    pub status: u16,
    pub headers: HeaderMap,
}

impl BinaryResponse {
    /// The declared content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Resolve an envelope path against the configured base URL.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Build the outbound header bag: content type, per-request headers, and the
/// bearer credential unless the envelope opts out.
pub(crate) fn build_headers(
    config: &ExecutionConfig,
    envelope: &RequestEnvelope,
) -> Result<HeaderMap, ApiError> {
    let mut builder = HttpHeaderBuilder::new()
        .with_json_content_type()
        .with_custom_headers(&envelope.headers)?;

    if !envelope.skip_auth
        && let Some(token) = config.credentials.get()
    {
        builder = builder.with_bearer_auth(token.expose_secret())?;
    }
    Ok(builder.build())
}

/// Surface a transport failure: one notification, interceptor hooks, `Err`.
fn transport_error(
    config: &ExecutionConfig,
    ctx: &RequestContext,
    failure: TransportFailure,
) -> ApiError {
    config.notifier.show(
        Severity::Error,
        ERROR_TITLE,
        &failure.user_message(),
        defaults::notify::TOAST_DURATION,
    );
    let error = ApiError::Transport(failure);
    for interceptor in &config.interceptors {
        interceptor.on_error(ctx, &error);
    }
    error
}

/// Dispatch one envelope and classify its JSON response.
pub async fn execute_request(
    config: &ExecutionConfig,
    envelope: &RequestEnvelope,
) -> Result<Value, ApiError> {
    // 1. Resolve URL; GET parameters are encoded into the URL here and the
    //    structured params are not handed to the transport, so they cannot be
    //    serialized twice.
    let mut url = join_url(&config.base_url, &envelope.path);
    if envelope.verb == Verb::Get
        && let Some(params) = &envelope.params
    {
        url = append_query(&url, params);
    }

    // 2. Headers (credential attachment lives here)
    let headers = build_headers(config, envelope)?;

    // 3. Duplicate-submission suppression for mutating verbs
    if envelope.verb.is_mutating() && !envelope.skip_dedupe {
        config
            .dedupe
            .check_and_record(&url, &envelope.serialized_body())?;
    }

    // 4. Build request and apply interceptors
    let mut rb = match envelope.verb {
        Verb::Get => config.http_client.get(&url),
        Verb::Post => config.http_client.post(&url),
        Verb::Put => config.http_client.put(&url),
        Verb::Delete => config.http_client.delete(&url),
    }
    .headers(headers.clone());

    let body_json = envelope.body.clone().unwrap_or(Value::Null);
    if envelope.verb != Verb::Get
        && let Some(body) = &envelope.body
    {
        rb = rb.json(body);
    }

    let ctx = RequestContext::new(envelope.verb, url.clone());
    for interceptor in &config.interceptors {
        rb = interceptor.on_before_send(&ctx, rb, &body_json, &headers)?;
    }

    // 5. Send; a transport-level failure means no response at all
    let resp = match rb.send().await {
        Ok(resp) => resp,
        Err(e) => return Err(transport_error(config, &ctx, TransportFailure::from_reqwest(&e))),
    };

    // 6. A non-success HTTP status never carries a classifiable envelope
    if !resp.status().is_success() {
        let failure = TransportFailure::HttpStatus(resp.status().as_u16());
        return Err(transport_error(config, &ctx, failure));
    }

    for interceptor in &config.interceptors {
        interceptor.on_response(&ctx, &resp)?;
    }

    // 7. Decode the body; empty bodies classify as an empty success envelope
    let text = match resp.text().await {
        Ok(text) => text,
        Err(e) => return Err(transport_error(config, &ctx, TransportFailure::from_reqwest(&e))),
    };
    let body: Value = if text.trim().is_empty() {
        serde_json::json!({})
    } else {
        match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) => {
                config.notifier.show(
                    Severity::Error,
                    ERROR_TITLE,
                    crate::classify::DEFAULT_ERROR_MESSAGE,
                    defaults::notify::TOAST_DURATION,
                );
                let error = ApiError::Decode(e.to_string());
                for interceptor in &config.interceptors {
                    interceptor.on_error(&ctx, &error);
                }
                return Err(error);
            }
        }
    };

    // 8. Classify and perform the outcome's side effects
    let classification = classify(&body);
    match classification.outcome {
        Outcome::Success => Ok(classification.data),
        Outcome::Unauthorized => {
            let error = ApiError::Unauthorized;
            for interceptor in &config.interceptors {
                interceptor.on_error(&ctx, &error);
            }
            handle_unauthorized(config).await;
            Err(error)
        }
        Outcome::ServerError => {
            config.notifier.show(
                Severity::Error,
                ERROR_TITLE,
                &classification.message,
                defaults::notify::TOAST_DURATION,
            );
            let error = ApiError::Server {
                message: classification.message,
            };
            for interceptor in &config.interceptors {
                interceptor.on_error(&ctx, &error);
            }
            Err(error)
        }
        Outcome::Warning => {
            config.notifier.show(
                Severity::Warning,
                WARNING_TITLE,
                &classification.message,
                defaults::notify::TOAST_DURATION,
            );
            let error = ApiError::Warning {
                message: classification.message,
            };
            for interceptor in &config.interceptors {
                interceptor.on_error(&ctx, &error);
            }
            Err(error)
        }
        Outcome::GenericFailure => {
            config.notifier.show(
                Severity::Error,
                ERROR_TITLE,
                &classification.message,
                defaults::notify::TOAST_DURATION,
            );
            let error = ApiError::Api {
                code: classification.code,
                message: classification.message,
            };
            for interceptor in &config.interceptors {
                interceptor.on_error(&ctx, &error);
            }
            Err(error)
        }
    }
}

/// Single-flight re-authentication: the first unauthorized response opens the
/// prompt; every other one arriving while it is showing rejects immediately.
/// The permit is released on every exit path of the prompt flow.
async fn handle_unauthorized(config: &ExecutionConfig) {
    let Some(permit) = config.reauth.try_enter() else {
        tracing::debug!(target: "outpost::reauth", "re-auth prompt already showing, rejecting without a second one");
        return;
    };
    let confirmed = config
        .confirm
        .ask(SESSION_EXPIRED_PROMPT, SESSION_EXPIRED_TITLE)
        .await;
    if confirmed {
        config.logout.logout().await;
    }
    drop(permit);
}

/// Dispatch a GET whose response is a raw binary payload.
///
/// Binary responses bypass classification entirely; the bytes are handed to
/// the caller untouched.
pub async fn execute_binary_request(
    config: &ExecutionConfig,
    envelope: &RequestEnvelope,
) -> Result<BinaryResponse, ApiError> {
    let mut url = join_url(&config.base_url, &envelope.path);
    if envelope.verb == Verb::Get
        && let Some(params) = &envelope.params
    {
        url = append_query(&url, params);
    }

    let headers = build_headers(config, envelope)?;
    let mut rb = config.http_client.get(&url).headers(headers.clone());

    let ctx = RequestContext::new(envelope.verb, url.clone());
    let empty_json = serde_json::json!({});
    for interceptor in &config.interceptors {
        rb = interceptor.on_before_send(&ctx, rb, &empty_json, &headers)?;
    }

    let resp = match rb.send().await {
        Ok(resp) => resp,
        Err(e) => return Err(transport_error(config, &ctx, TransportFailure::from_reqwest(&e))),
    };

    if !resp.status().is_success() {
        let failure = TransportFailure::HttpStatus(resp.status().as_u16());
        return Err(transport_error(config, &ctx, failure));
    }

    for interceptor in &config.interceptors {
        interceptor.on_response(&ctx, &resp)?;
    }

    let status = resp.status().as_u16();
    let response_headers = resp.headers().clone();
    let bytes = match resp.bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => return Err(transport_error(config, &ctx, TransportFailure::from_reqwest(&e))),
    };

    Ok(BinaryResponse {
        bytes,
        status,
        headers: response_headers,
    })
}
