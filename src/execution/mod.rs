//! Request execution: the dispatcher chokepoint, the binary download path,
//! and the HTTP primitives they share.

pub mod dispatcher;
pub mod download;
pub mod http;

pub use dispatcher::{BinaryResponse, ExecutionConfig, execute_binary_request, execute_request};
pub use download::execute_download;
