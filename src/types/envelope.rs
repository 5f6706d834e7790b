//! Outbound request envelope.
//!
//! A [`RequestEnvelope`] is the crate's internal representation of one
//! outbound call: verb, path, optional query parameters, optional JSON body,
//! per-request headers, and the two client-only flags (`skip_auth`,
//! `skip_dedupe`). Envelopes are built once by the caller and are not
//! modified after dispatch, except for interceptor-added headers.

use serde_json::Value;
use std::collections::HashMap;

/// HTTP verb supported by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Verb name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// True for verbs subject to duplicate-submission suppression.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound call through the orchestration layer.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    pub verb: Verb,
    /// Path relative to the configured base URL, starting with `/`.
    pub path: String,
    /// Query parameters; a mapping whose values may themselves be mappings
    /// (one level), encoded as `parent[child]=value`.
    pub params: Option<Value>,
    /// JSON body for mutating verbs.
    pub body: Option<Value>,
    /// Per-request headers merged over the client defaults.
    pub headers: HashMap<String, String>,
    /// Do not attach the bearer credential.
    pub skip_auth: bool,
    /// Do not apply duplicate-submission suppression.
    pub skip_dedupe: bool,
}

impl RequestEnvelope {
    /// Create an envelope with the given verb and path.
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            params: None,
            body: None,
            headers: HashMap::new(),
            skip_auth: false,
            skip_dedupe: false,
        }
    }

    /// Shorthand for a GET envelope.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Verb::Get, path)
    }

    /// Shorthand for a POST envelope.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Verb::Post, path)
    }

    /// Shorthand for a PUT envelope.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Verb::Put, path)
    }

    /// Shorthand for a DELETE envelope.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Verb::Delete, path)
    }

    /// Attach query parameters.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a per-request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Do not attach the bearer credential to this request.
    pub fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    /// Exempt this request from duplicate-submission suppression.
    pub fn skip_dedupe(mut self) -> Self {
        self.skip_dedupe = true;
        self
    }

    /// Serialized body used for duplicate fingerprinting; empty when absent.
    pub fn serialized_body(&self) -> String {
        self.body.as_ref().map(Value::to_string).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mutating_verbs() {
        assert!(Verb::Post.is_mutating());
        assert!(Verb::Put.is_mutating());
        assert!(!Verb::Get.is_mutating());
        assert!(!Verb::Delete.is_mutating());
    }

    #[test]
    fn builder_sets_flags() {
        let env = RequestEnvelope::post("/system/user")
            .with_body(json!({"name": "admin"}))
            .with_header("x-trace", "1")
            .skip_dedupe();
        assert_eq!(env.verb, Verb::Post);
        assert!(env.skip_dedupe);
        assert!(!env.skip_auth);
        assert_eq!(env.headers.get("x-trace").map(String::as_str), Some("1"));
    }

    #[test]
    fn serialized_body_is_deterministic() {
        let a = RequestEnvelope::post("/x").with_body(json!({"b": 2, "a": 1}));
        let b = RequestEnvelope::post("/x").with_body(json!({"a": 1, "b": 2}));
        assert_eq!(a.serialized_body(), b.serialized_body());
    }
}
