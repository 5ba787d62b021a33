//! Errors surfaced by the translation resolver.

use crate::i18n::LanguageCode;
use thiserror::Error;

/// Failure to turn a raw translation source into a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// The assembly step has no implementation.
    #[error("todo")]
    NotImplemented,

    /// A translation entry holds a value the assembler cannot render as text.
    #[error("translation entry '{key}' has unsupported value type {kind}")]
    UnsupportedValue { key: String, kind: &'static str },
}

/// Failure of a translation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The resolved language has no entry in the module index.
    #[error("no translation data for language '{language}'")]
    LanguageDataMissing { language: LanguageCode },

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("translation module index has not been initialized")]
    IndexNotInitialized,

    #[error("translation module index is already initialized")]
    IndexAlreadyInitialized,
}
