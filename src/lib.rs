//! outpost
//!
//! Outbound API request orchestration: the single chokepoint through which a
//! console client's API calls pass before reaching the network and before
//! their responses reach caller code.
//!
//! The layer is deliberately thin. What it owns:
//!
//! - credential attachment (bearer token through an injected store)
//! - GET parameter encoding (`parent[child]=value`, empties omitted)
//! - duplicate-submission suppression (single-slot fingerprint cache)
//! - response classification into a fixed outcome taxonomy
//! - a single-flight "session expired" re-authentication gate
//! - a binary download path with content-type sniffing
//!
//! Everything user-visible (toasts, dialogs, file pickers, navigation) stays
//! behind the port traits in [`ports`]; tests and multi-tenant hosts hold
//! independent client instances with fresh gate/guard state.
#![deny(unsafe_code)]

pub mod classify;
pub mod client;
pub mod dedupe;
pub mod defaults;
pub mod encoding;
pub mod error;
pub mod execution;
pub mod ports;
pub mod reauth;
pub mod types;

pub use classify::{Classification, Outcome, classify};
pub use client::{ApiClient, ApiClientBuilder};
pub use dedupe::DedupeGuard;
pub use error::{ApiError, TransportFailure};
pub use execution::{BinaryResponse, ExecutionConfig};
pub use execution::http::{HttpInterceptor, LoggingInterceptor, RequestContext};
pub use reauth::{ReauthGate, ReauthPermit};
pub use types::{HttpConfig, HttpConfigBuilder, PagedResult, RequestEnvelope, Verb};
