//! Wire encoding helpers.

pub mod params;

pub use params::{append_query, encode_params};
