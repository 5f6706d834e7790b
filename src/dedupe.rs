//! Duplicate-submission suppression.
//!
//! `DedupeGuard` holds the fingerprint of the most recent accepted mutating
//! request: `{url, serialized body, instant}`. A new mutating request whose
//! url and body match the stored fingerprint within the suppression window is
//! rejected before any network traffic; in every other case the fingerprint
//! is overwritten and the call proceeds. This is a single-slot cache, not a
//! sliding window: a second, distinct mutating call is never suppressed, only
//! an exact repeat within the window is.
//!
//! Payloads whose serialized size (url + body) exceeds the limit bypass the
//! check entirely; the comparison cost is judged unsafe, not the skip.

use crate::defaults;
use crate::error::ApiError;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Fingerprint {
    url: String,
    body: String,
    recorded_at: Instant,
}

/// Single-slot, TTL-aware store of the most recent mutating request.
///
/// One instance is owned per client; the guard's lifetime is the session's.
/// Interior mutability keeps `check_and_record` callable from concurrent
/// dispatches on a multi-threaded runtime.
#[derive(Debug)]
pub struct DedupeGuard {
    slot: Mutex<Option<Fingerprint>>,
    window: Duration,
    size_limit: usize,
}

impl Default for DedupeGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl DedupeGuard {
    /// Guard with the default window and size limit.
    pub fn new() -> Self {
        Self::with_window(defaults::dedupe::WINDOW)
    }

    /// Guard with a custom suppression window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            window,
            size_limit: defaults::dedupe::SIZE_LIMIT,
        }
    }

    /// Check a mutating request against the stored fingerprint, recording it
    /// when allowed. Returns `Err(ApiError::DuplicateSubmission)` when
    /// suppressed; no notification accompanies the rejection.
    pub fn check_and_record(&self, url: &str, body: &str) -> Result<(), ApiError> {
        if url.len() + body.len() > self.size_limit {
            tracing::warn!(
                target: "outpost::dedupe",
                url,
                size = url.len() + body.len(),
                limit = self.size_limit,
                "payload exceeds dedupe size limit, suppression check skipped"
            );
            return Ok(());
        }

        let now = Instant::now();
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(prev) = slot.as_ref()
            && prev.url == url
            && prev.body == body
            && now.duration_since(prev.recorded_at) < self.window
        {
            tracing::debug!(target: "outpost::dedupe", url, "duplicate submission suppressed");
            return Err(ApiError::DuplicateSubmission);
        }

        *slot = Some(Fingerprint {
            url: url.to_string(),
            body: body.to_string(),
            recorded_at: now,
        });
        Ok(())
    }

    /// Forget the stored fingerprint (session teardown).
    pub fn clear(&self) {
        *self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_repeat_within_window_is_suppressed() {
        let guard = DedupeGuard::new();
        assert!(guard.check_and_record("/api/user", "{\"a\":1}").is_ok());
        assert!(matches!(
            guard.check_and_record("/api/user", "{\"a\":1}"),
            Err(ApiError::DuplicateSubmission)
        ));
    }

    #[test]
    fn distinct_body_is_never_suppressed() {
        let guard = DedupeGuard::new();
        guard.check_and_record("/api/user", "{\"a\":1}").unwrap();
        assert!(guard.check_and_record("/api/user", "{\"a\":2}").is_ok());
        // The slot now holds the second fingerprint, so the first is allowed again
        assert!(guard.check_and_record("/api/user", "{\"a\":1}").is_ok());
    }

    #[test]
    fn distinct_url_is_never_suppressed() {
        let guard = DedupeGuard::new();
        guard.check_and_record("/api/user", "{}").unwrap();
        assert!(guard.check_and_record("/api/role", "{}").is_ok());
    }

    #[test]
    fn repeat_after_window_is_allowed() {
        let guard = DedupeGuard::with_window(Duration::from_millis(20));
        guard.check_and_record("/api/user", "{}").unwrap();
        std::thread::sleep(Duration::from_millis(30));
        assert!(guard.check_and_record("/api/user", "{}").is_ok());
    }

    #[test]
    fn oversized_payload_bypasses_check() {
        let guard = DedupeGuard::new();
        let body = "x".repeat(defaults::dedupe::SIZE_LIMIT + 1);
        assert!(guard.check_and_record("/api/upload", &body).is_ok());
        assert!(guard.check_and_record("/api/upload", &body).is_ok());
    }

    #[test]
    fn clear_forgets_fingerprint() {
        let guard = DedupeGuard::new();
        guard.check_and_record("/api/user", "{}").unwrap();
        guard.clear();
        assert!(guard.check_and_record("/api/user", "{}").is_ok());
    }
}
