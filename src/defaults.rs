//! Default values used across the crate.
//!
//! These constants centralize timeouts, windows and limits so that builders
//! and guards stay consistent. All of them can be overridden through
//! `HttpConfig` or the corresponding builder methods.

/// HTTP defaults
pub mod http {
    use std::time::Duration;

    /// Default request timeout (total, including body read)
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

    /// Default connection timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default user agent
    pub const USER_AGENT: &str = concat!("outpost/", env!("CARGO_PKG_VERSION"));
}

/// Duplicate-submission suppression defaults
pub mod dedupe {
    use std::time::Duration;

    /// Window during which an identical mutating request is suppressed
    pub const WINDOW: Duration = Duration::from_millis(2000);

    /// Serialized size (url + body) above which the check is bypassed
    pub const SIZE_LIMIT: usize = 5 * 1024 * 1024;
}

/// Notification defaults
pub mod notify {
    use std::time::Duration;

    /// Default toast display duration
    pub const TOAST_DURATION: Duration = Duration::from_millis(5000);
}
