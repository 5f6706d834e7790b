//! Response classification.
//!
//! Maps the application-level status code embedded in a JSON response body
//! (not the transport-level HTTP status) to one of five fixed outcomes, and
//! resolves a human-readable message through the static code table, falling
//! back to the body's own `msg` field, falling back to a generic default.
//!
//! Classification is a pure function: binary responses never reach it (the
//! dispatcher passes them through raw), and the outcome's side effects
//! (notifications, the re-auth gate) are performed by the dispatcher.

use serde_json::Value;

/// Default message for codes outside the table when the body carries none.
pub const DEFAULT_ERROR_MESSAGE: &str = "Unknown system error, please contact the administrator";

/// One of the five fixed classification outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Code 200; the payload is passed through to the caller.
    Success,
    /// Code 401; routed through the re-auth gate.
    Unauthorized,
    /// Code 500; message surfaced, call rejected.
    ServerError,
    /// Code 601; message surfaced as non-fatal, call still rejected.
    Warning,
    /// Any other non-200 code.
    GenericFailure,
}

/// Result of classifying a JSON response body.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub outcome: Outcome,
    pub code: i64,
    pub message: String,
    /// The payload handed to the caller on success: the body's `data` field
    /// when present, otherwise the whole body.
    pub data: Value,
}

/// Static message table for well-known codes.
pub fn message_for_code(code: i64) -> Option<&'static str> {
    match code {
        401 => Some("Authentication failed, unable to access system resources"),
        403 => Some("The current operation does not have permission"),
        404 => Some("The requested resource does not exist"),
        _ => None,
    }
}

/// Classify a JSON response body.
///
/// A missing `code` field defaults to 200, so bodies without an envelope
/// (plain payloads) pass through as success.
pub fn classify(body: &Value) -> Classification {
    let code = body.get("code").and_then(Value::as_i64).unwrap_or(200);
    let message = message_for_code(code)
        .map(str::to_string)
        .or_else(|| {
            body.get("msg")
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());

    let outcome = match code {
        200 => Outcome::Success,
        401 => Outcome::Unauthorized,
        500 => Outcome::ServerError,
        601 => Outcome::Warning,
        _ => Outcome::GenericFailure,
    };

    let data = body.get("data").cloned().unwrap_or_else(|| body.clone());

    Classification {
        outcome,
        code,
        message,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_passes_data_through() {
        let c = classify(&json!({"code": 200, "data": {"x": 1}}));
        assert_eq!(c.outcome, Outcome::Success);
        assert_eq!(c.data, json!({"x": 1}));
    }

    #[test]
    fn missing_code_defaults_to_success() {
        let c = classify(&json!({"rows": [], "total": 0}));
        assert_eq!(c.outcome, Outcome::Success);
        assert_eq!(c.data, json!({"rows": [], "total": 0}));
    }

    #[test]
    fn server_error_uses_body_message() {
        let c = classify(&json!({"code": 500, "msg": "boom"}));
        assert_eq!(c.outcome, Outcome::ServerError);
        assert_eq!(c.message, "boom");
    }

    #[test]
    fn table_wins_over_body_message() {
        let c = classify(&json!({"code": 401, "msg": "token invalid"}));
        assert_eq!(c.outcome, Outcome::Unauthorized);
        assert_eq!(
            c.message,
            "Authentication failed, unable to access system resources"
        );
    }

    #[test]
    fn warning_code() {
        let c = classify(&json!({"code": 601, "msg": "about to expire"}));
        assert_eq!(c.outcome, Outcome::Warning);
        assert_eq!(c.message, "about to expire");
    }

    #[test]
    fn unknown_code_falls_back_to_default() {
        let c = classify(&json!({"code": 999}));
        assert_eq!(c.outcome, Outcome::GenericFailure);
        assert_eq!(c.message, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn classify_is_idempotent() {
        let body = json!({"code": 500, "msg": "boom", "data": [1, 2]});
        assert_eq!(classify(&body), classify(&body));
    }
}
