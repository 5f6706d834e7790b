//! HTTP client builder utilities
//!
//! Unified construction of the underlying `reqwest::Client` from
//! [`HttpConfig`], so the dispatcher and the download path share timeout,
//! proxy and default-header behavior.

use crate::error::ApiError;
use crate::types::HttpConfig;

/// Build an HTTP client from HttpConfig
///
/// # Returns
/// * `Ok(reqwest::Client)` - Configured HTTP client
/// * `Err(ApiError)` - Configuration or build error
pub fn build_http_client_from_config(config: &HttpConfig) -> Result<reqwest::Client, ApiError> {
    let mut builder = reqwest::Client::builder();

    // Apply timeout settings
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    // Apply proxy settings
    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| ApiError::Configuration(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    // Apply user agent
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    // Apply default headers
    if !config.headers.is_empty() {
        let mut headers = reqwest::header::HeaderMap::new();
        for (k, v) in &config.headers {
            let name = reqwest::header::HeaderName::from_bytes(k.as_bytes()).map_err(|e| {
                ApiError::Configuration(format!("Invalid header name '{k}': {e}"))
            })?;
            let value = reqwest::header::HeaderValue::from_str(v).map_err(|e| {
                ApiError::Configuration(format!("Invalid header value for '{k}': {e}"))
            })?;
            headers.insert(name, value);
        }
        builder = builder.default_headers(headers);
    }

    // Build the client
    builder
        .build()
        .map_err(|e| ApiError::Configuration(format!("Failed to create HTTP client: {e}")))
}
