//! Language codes and language detection from request paths.
//!
//! A `LanguageCode` is the short locale token (e.g. "en", "fr") used as the
//! key of the module index. Detection turns a request pathname into a code,
//! and the resolver falls back to [`DEFAULT_LANGUAGE`] when nothing is found.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::OnceLock;

/// The language used when a request path does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A short token identifying a locale (e.g. "en", "fr", "pt-BR").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Create a language code from any string-like value.
    ///
    /// No validation happens here: codes come from a fixed path-segment
    /// position and are taken as-is.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The fallback language code ("en").
    pub fn default_language() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Determines the language a request path is written for.
///
/// Returning `None` means "no language in this path"; the resolver then
/// uses its default language.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, pathname: &str) -> Option<LanguageCode>;
}

impl<F> LanguageDetector for F
where
    F: Fn(&str) -> Option<LanguageCode> + Send + Sync,
{
    fn detect(&self, pathname: &str) -> Option<LanguageCode> {
        self(pathname)
    }
}

static LANGUAGE_SEGMENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn language_segment_regex() -> &'static Regex {
    LANGUAGE_SEGMENT_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z]{2}(?:-[A-Za-z]{2})?$").expect("language segment regex is valid")
    })
}

/// Detects the language from the first segment of the path.
///
/// `/fr/about` yields `fr`, `/pt-BR/` yields `pt-BR`, while `/`, `/about`
/// and `/api/v1` yield nothing. The detector does not know which languages
/// have translations; that check belongs to the resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathPrefixDetector;

impl LanguageDetector for PathPrefixDetector {
    fn detect(&self, pathname: &str) -> Option<LanguageCode> {
        language_from_path(pathname)
    }
}

/// Extract a language code from the first non-empty segment of `pathname`.
pub fn language_from_path(pathname: &str) -> Option<LanguageCode> {
    let segment = pathname.split('/').find(|segment| !segment.is_empty())?;

    if language_segment_regex().is_match(segment) {
        Some(LanguageCode::new(segment))
    } else {
        None
    }
}
