//! Client facade.
//!
//! `ApiClient` owns the transport, the injected ports, and the two pieces of
//! shared client-side state (the duplicate-submission guard and the re-auth
//! gate), and exposes the verb helpers page code calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use outpost::{ApiClient, HttpConfig};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), outpost::ApiError> {
//! let client = ApiClient::builder(HttpConfig::new("https://console.example.com/api")).build()?;
//! let _users = client
//!     .get("/system/user/list", Some(json!({"pageNum": 1, "pageSize": 10})))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::dedupe::DedupeGuard;
use crate::error::ApiError;
use crate::execution::dispatcher::{
    BinaryResponse, ExecutionConfig, execute_binary_request, execute_request,
};
use crate::execution::download::execute_download;
use crate::execution::http::client::build_http_client_from_config;
use crate::execution::http::interceptor::HttpInterceptor;
use crate::ports::{
    ConfirmPrompt, CredentialStore, DenyPrompt, FileSaver, LogoutHandler, MemoryCredentialStore,
    NotificationSink, NullLogout, NullNotifier, NullProgress, ProgressIndicator,
};
use crate::reauth::ReauthGate;
use crate::types::{HttpConfig, PagedResult, RequestEnvelope, Verb};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// The outbound request orchestration client.
pub struct ApiClient {
    exec: ExecutionConfig,
    saver: Option<Arc<dyn FileSaver>>,
    progress: Arc<dyn ProgressIndicator>,
}

impl ApiClient {
    /// Start building a client for the given configuration.
    pub fn builder(config: HttpConfig) -> ApiClientBuilder {
        ApiClientBuilder::new(config)
    }

    /// Dispatch one envelope and return the classified payload.
    pub async fn send(&self, envelope: RequestEnvelope) -> Result<Value, ApiError> {
        execute_request(&self.exec, &envelope).await
    }

    /// Dispatch an envelope and deserialize the payload.
    pub async fn send_typed<T: DeserializeOwned>(
        &self,
        envelope: RequestEnvelope,
    ) -> Result<T, ApiError> {
        let value = self.send(envelope).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET with optional query parameters.
    pub async fn get(&self, path: &str, params: Option<Value>) -> Result<Value, ApiError> {
        let mut envelope = RequestEnvelope::get(path);
        if let Some(params) = params {
            envelope = envelope.with_params(params);
        }
        self.send(envelope).await
    }

    /// GET with a typed payload.
    pub async fn get_typed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<Value>,
    ) -> Result<T, ApiError> {
        let value = self.get(path, params).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET a paged listing, normalizing the envelope shape.
    pub async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<Value>,
    ) -> Result<PagedResult<T>, ApiError> {
        let value = self.get(path, params).await?;
        PagedResult::from_value(value)
    }

    /// GET a raw binary payload, bypassing classification.
    pub async fn get_binary(
        &self,
        path: &str,
        params: Option<Value>,
    ) -> Result<BinaryResponse, ApiError> {
        let mut envelope = RequestEnvelope::get(path);
        if let Some(params) = params {
            envelope = envelope.with_params(params);
        }
        execute_binary_request(&self.exec, &envelope).await
    }

    /// POST with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.send_with_body(Verb::Post, path, body).await
    }

    /// PUT with an optional JSON body.
    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.send_with_body(Verb::Put, path, body).await
    }

    /// DELETE with an optional JSON body.
    pub async fn delete(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.send_with_body(Verb::Delete, path, body).await
    }

    async fn send_with_body(
        &self,
        verb: Verb,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let mut envelope = RequestEnvelope::new(verb, path);
        if let Some(body) = body {
            envelope = envelope.with_body(body);
        }
        self.send(envelope).await
    }

    /// POST a form-urlencoded request and save the binary response under
    /// `filename` through the configured file saver.
    pub async fn download(
        &self,
        path: &str,
        params: &Value,
        filename: &str,
    ) -> Result<(), ApiError> {
        let saver = self.saver.as_ref().ok_or_else(|| {
            ApiError::Configuration("no file saver configured for downloads".to_string())
        })?;
        execute_download(
            &self.exec,
            saver.as_ref(),
            self.progress.as_ref(),
            path,
            params,
            filename,
        )
        .await
    }

    /// The credential store this client reads tokens from.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.exec.credentials
    }

    /// Forget the stored submission fingerprint (session teardown).
    pub fn clear_submission_cache(&self) {
        self.exec.dedupe.clear();
    }
}

/// Builder for [`ApiClient`]. Ports not supplied fall back to inert defaults
/// (in-memory credentials, silent notifications, deny-all confirmation).
pub struct ApiClientBuilder {
    config: HttpConfig,
    credentials: Option<Arc<dyn CredentialStore>>,
    notifier: Option<Arc<dyn NotificationSink>>,
    confirm: Option<Arc<dyn ConfirmPrompt>>,
    logout: Option<Arc<dyn LogoutHandler>>,
    saver: Option<Arc<dyn FileSaver>>,
    progress: Option<Arc<dyn ProgressIndicator>>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    dedupe_window: Option<Duration>,
}

impl ApiClientBuilder {
    pub fn new(config: HttpConfig) -> Self {
        Self {
            config,
            credentials: None,
            notifier: None,
            confirm: None,
            logout: None,
            saver: None,
            progress: None,
            interceptors: Vec::new(),
            dedupe_window: None,
        }
    }

    pub fn credentials(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    pub fn notifier(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notifier = Some(sink);
        self
    }

    pub fn confirm_prompt(mut self, prompt: Arc<dyn ConfirmPrompt>) -> Self {
        self.confirm = Some(prompt);
        self
    }

    pub fn logout_handler(mut self, handler: Arc<dyn LogoutHandler>) -> Self {
        self.logout = Some(handler);
        self
    }

    pub fn file_saver(mut self, saver: Arc<dyn FileSaver>) -> Self {
        self.saver = Some(saver);
        self
    }

    pub fn progress(mut self, indicator: Arc<dyn ProgressIndicator>) -> Self {
        self.progress = Some(indicator);
        self
    }

    /// Append an interceptor; interceptors run in registration order.
    pub fn interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Override the duplicate-submission suppression window.
    pub fn dedupe_window(mut self, window: Duration) -> Self {
        self.dedupe_window = Some(window);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let http_client = build_http_client_from_config(&self.config)?;
        let dedupe = match self.dedupe_window {
            Some(window) => DedupeGuard::with_window(window),
            None => DedupeGuard::new(),
        };
        let exec = ExecutionConfig {
            http_client,
            base_url: self.config.base_url.clone(),
            credentials: self
                .credentials
                .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new())),
            notifier: self.notifier.unwrap_or_else(|| Arc::new(NullNotifier)),
            confirm: self.confirm.unwrap_or_else(|| Arc::new(DenyPrompt)),
            logout: self.logout.unwrap_or_else(|| Arc::new(NullLogout)),
            interceptors: self.interceptors,
            dedupe,
            reauth: ReauthGate::new(),
        };
        Ok(ApiClient {
            exec,
            saver: self.saver,
            progress: self.progress.unwrap_or_else(|| Arc::new(NullProgress)),
        })
    }
}
