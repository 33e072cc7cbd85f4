//! # gtx Application Layer
//!
//! Use cases built on the domain ports.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`use_cases`] | [`TranslationDispatcher`], [`BatchTranslator`] and [`check_connections`] |
//! | [`ports`] | Provider factory registry (linkme distributed slice) |

pub mod ports;
pub mod use_cases;

pub use use_cases::{
    BatchFailure, BatchFailurePolicy, BatchReport, BatchTranslator, ConnectionCheck,
    TranslationDispatcher, check_connections,
};
