//! # gtx Domain Layer
//!
//! Core types shared by every other crate in the workspace: the translation
//! value objects, the provider and registry ports, and the error type.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Routing defaults (failure threshold, backoff floor) |
//! | [`error`] | [`Error`](error::Error) and the [`Result`](error::Result) alias |
//! | [`ports`] | `TranslationProvider`, `ProviderRegistry` and `Clock` traits |
//! | [`value_objects`] | Requests, outcomes, provider configuration and health |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::*;
