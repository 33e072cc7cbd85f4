//! HTTP Client Configuration
//!
//! Every API-based adapter owns a `reqwest::Client` built from
//! [`HttpClientConfig`]. Response classification lives in
//! [`crate::utils::HttpResponseUtils`].

pub mod client;

pub use crate::utils::HttpResponseUtils;
pub use client::HttpClientConfig;
