//! HTTP Interceptor interfaces
//!
//! A small, ergonomic interceptor API in the middleware style of HTTP
//! clients. Interceptors can observe and tweak request builders before send,
//! observe responses, and be notified of errors. The hooks are best-effort
//! and should avoid expensive work by default.

use crate::error::ApiError;
use crate::types::Verb;
use reqwest::header::HeaderMap;

/// Context passed to interceptors describing the request.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
    pub verb: Verb,
    pub url: String,
}

impl RequestContext {
    pub fn new(verb: Verb, url: impl Into<String>) -> Self {
        Self {
            request_id: generate_request_id(),
            verb,
            url: url.into(),
        }
    }
}

/// Generate a unique id correlating a request's hook invocations.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before sending a request. Interceptors may add headers or
    /// modify attributes on the request builder. Return the (possibly
    /// modified) builder or an error to short-circuit the request.
    fn on_before_send(
        &self,
        _ctx: &RequestContext,
        builder: reqwest::RequestBuilder,
        _body: &serde_json::Value,
        _headers: &HeaderMap,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        Ok(builder)
    }

    /// Called after a response is received (only for successful responses).
    fn on_response(
        &self,
        _ctx: &RequestContext,
        _response: &reqwest::Response,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    /// Called when an error occurs during sending or classification.
    fn on_error(&self, _ctx: &RequestContext, _error: &ApiError) {}
}

/// A simple logging interceptor backed by `tracing` (no sensitive data).
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &RequestContext,
        builder: reqwest::RequestBuilder,
        _body: &serde_json::Value,
        _headers: &HeaderMap,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        tracing::debug!(target: "outpost::http", request_id=%ctx.request_id, verb=%ctx.verb, url=%ctx.url, "sending request");
        Ok(builder)
    }

    fn on_response(
        &self,
        ctx: &RequestContext,
        response: &reqwest::Response,
    ) -> Result<(), ApiError> {
        tracing::debug!(target: "outpost::http", request_id=%ctx.request_id, url=%ctx.url, status=%response.status().as_u16(), "response received");
        Ok(())
    }

    fn on_error(&self, ctx: &RequestContext, error: &ApiError) {
        tracing::debug!(target: "outpost::http", request_id=%ctx.request_id, verb=%ctx.verb, url=%ctx.url, err=%error, "request error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct FlagInterceptor(Arc<Mutex<bool>>);
    impl HttpInterceptor for FlagInterceptor {
        fn on_error(&self, _ctx: &RequestContext, _error: &ApiError) {
            *self.0.lock().unwrap() = true;
        }
    }

    #[test]
    fn on_error_hook_fires() {
        let flag = Arc::new(Mutex::new(false));
        let interceptor = FlagInterceptor(flag.clone());
        let ctx = RequestContext::new(Verb::Get, "http://test");
        interceptor.on_error(&ctx, &ApiError::Unauthorized);
        assert!(*flag.lock().unwrap());
    }

    #[tokio::test]
    async fn on_response_observes_a_live_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/ok")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let url = format!("{}/ok", server.url());
        let client = reqwest::Client::new();
        let resp = client.get(&url).send().await.expect("send resp");

        let ctx = RequestContext::new(Verb::Get, url);
        assert!(LoggingInterceptor.on_response(&ctx, &resp).is_ok());
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(generate_request_id(), generate_request_id());
    }
}
