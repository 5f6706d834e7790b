//! No-op port implementations used as builder defaults.

use super::{ConfirmPrompt, LogoutHandler, NotificationSink, ProgressIndicator, Severity};
use async_trait::async_trait;
use std::time::Duration;

/// Discards notifications.
#[derive(Clone, Copy, Default)]
pub struct NullNotifier;

impl NotificationSink for NullNotifier {
    fn show(&self, _severity: Severity, _title: &str, _message: &str, _duration: Duration) {}
}

/// Answers every confirmation with `false`.
#[derive(Clone, Copy, Default)]
pub struct DenyPrompt;

#[async_trait]
impl ConfirmPrompt for DenyPrompt {
    async fn ask(&self, _message: &str, _title: &str) -> bool {
        false
    }
}

/// Logout side effect that does nothing.
#[derive(Clone, Copy, Default)]
pub struct NullLogout;

#[async_trait]
impl LogoutHandler for NullLogout {
    async fn logout(&self) {}
}

/// Progress indicator that does nothing.
#[derive(Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressIndicator for NullProgress {
    fn begin(&self, _text: &str) {}
    fn finish(&self) {}
}
