//! Provider ports

mod translation;

pub use translation::TranslationProvider;
