//! Provider Utilities
//!
//! Shared utilities used by provider implementations.

mod http_response;
pub mod lines;

pub use http_response::HttpResponseUtils;
pub use lines::{decode_lines, encode_lines, extract_json_object};
