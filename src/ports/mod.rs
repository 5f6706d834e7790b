//! Port traits for all external collaborators.
//!
//! The orchestration layer never renders UI, stores credentials, or writes
//! files itself; it talks to the host through these seams. Hosts inject
//! implementations at client construction time, and tests swap in counters
//! and stubs. Async seams use `async-trait` so implementations can await
//! dialogs, navigation or I/O.

mod fs;
mod memory;
mod noop;

pub use fs::DiskSaver;
pub use memory::MemoryCredentialStore;
pub use noop::{DenyPrompt, NullLogout, NullNotifier, NullProgress};

use async_trait::async_trait;
use secrecy::SecretString;
use std::time::Duration;

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// Access to the opaque bearer credential, persisted outside process memory.
///
/// The core only reads and writes through this interface and never assumes a
/// storage mechanism.
pub trait CredentialStore: Send + Sync {
    /// The current token, if one is present and unexpired.
    fn get(&self) -> Option<SecretString>;

    /// Store a token, optionally with a time-to-live.
    fn set(&self, token: SecretString, ttl: Option<Duration>);

    /// Remove the stored token.
    fn remove(&self);
}

/// Sink for transient user notifications (toasts).
pub trait NotificationSink: Send + Sync {
    fn show(&self, severity: Severity, title: &str, message: &str, duration: Duration);
}

/// Blocking user confirmation, resolved asynchronously by the host.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    /// Ask the user to confirm; `true` means confirmed.
    async fn ask(&self, message: &str, title: &str) -> bool;
}

/// Side effect invoked when the user confirms re-authentication.
///
/// Expected to clear the session and navigate to the login surface; the core
/// does not define what that means for the host.
#[async_trait]
pub trait LogoutHandler: Send + Sync {
    async fn logout(&self);
}

/// Persistence for downloaded binary payloads.
#[async_trait]
pub trait FileSaver: Send + Sync {
    async fn save(&self, bytes: &[u8], filename: &str) -> std::io::Result<()>;
}

/// Long-running operation indicator shown for the duration of a download.
pub trait ProgressIndicator: Send + Sync {
    fn begin(&self, text: &str);
    fn finish(&self);
}
