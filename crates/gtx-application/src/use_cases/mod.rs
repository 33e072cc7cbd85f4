//! Use cases
//!
//! - [`TranslationDispatcher`] sends one request through the provider
//!   registry with bounded failover.
//! - [`BatchTranslator`] splits a list of strings into requests and runs
//!   them through the dispatcher concurrently.
//! - [`check_connections`] runs every provider's connection test.

mod batch_translator;
mod connection_check;
mod dispatcher;

pub use batch_translator::{BatchFailure, BatchFailurePolicy, BatchReport, BatchTranslator};
pub use connection_check::{ConnectionCheck, check_connections};
pub use dispatcher::TranslationDispatcher;
