//! HTTP execution primitives: client construction, header building, and
//! interceptor hooks.

pub mod client;
pub mod headers;
pub mod interceptor;

pub use client::build_http_client_from_config;
pub use headers::HttpHeaderBuilder;
pub use interceptor::{HttpInterceptor, LoggingInterceptor, RequestContext, generate_request_id};
