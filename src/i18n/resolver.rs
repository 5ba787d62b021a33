//! Translation resolver: request path in, translation dictionary out.
//!
//! A lookup runs in three steps:
//!
//! 1. Detect the language from the request pathname, falling back to the
//!    default language when none is found.
//! 2. Look the language up in the module index, applying the
//!    [`MissingLanguagePolicy`] when it has no entry.
//! 3. Hand the raw source to the [`Assembler`] and await the dictionary.
//!
//! The resolver never mutates the index and keeps no per-request state, so a
//! single instance is shared by all requests.

use crate::error::TranslationError;
use crate::i18n::{
    Assembler, LanguageCode, LanguageDetector, ModuleIndex, PathPrefixDetector,
    RawTranslationSource, ResolverMetrics, TranslationDictionary,
};
use axum::http::Uri;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Anything that exposes the pathname of the page being rendered.
pub trait PageRequest {
    fn pathname(&self) -> &str;
}

impl PageRequest for str {
    fn pathname(&self) -> &str {
        self
    }
}

impl PageRequest for String {
    fn pathname(&self) -> &str {
        self.as_str()
    }
}

impl PageRequest for Uri {
    fn pathname(&self) -> &str {
        self.path()
    }
}

/// What to do when the resolved language has no translation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingLanguagePolicy {
    /// Fail with `TranslationError::LanguageDataMissing`.
    #[default]
    Reject,
    /// Use the default language's data instead.
    FallbackToDefault,
}

impl FromStr for MissingLanguagePolicy {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "fallback" | "fallback-to-default" => Ok(Self::FallbackToDefault),
            other => anyhow::bail!("Unknown missing language policy: '{}'", other),
        }
    }
}

/// Resolves the translation dictionary for a page request.
pub struct TranslationResolver {
    index: Arc<ModuleIndex>,
    assembler: Arc<dyn Assembler>,
    detector: Box<dyn LanguageDetector>,
    default_language: LanguageCode,
    missing_language_policy: MissingLanguagePolicy,
    metrics: ResolverMetrics,
}

impl TranslationResolver {
    /// Create a resolver over `index` using `assembler` for the final step.
    ///
    /// Defaults: [`PathPrefixDetector`], "en" as the default language and
    /// [`MissingLanguagePolicy::Reject`].
    pub fn new(index: Arc<ModuleIndex>, assembler: Arc<dyn Assembler>) -> Self {
        Self {
            index,
            assembler,
            detector: Box::new(PathPrefixDetector),
            default_language: LanguageCode::default_language(),
            missing_language_policy: MissingLanguagePolicy::default(),
            metrics: ResolverMetrics::new(),
        }
    }

    /// Replace the language detector
    pub fn with_detector(mut self, detector: impl LanguageDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Set the language used when none is detected
    pub fn with_default_language(mut self, language: LanguageCode) -> Self {
        self.default_language = language;
        self
    }

    /// Set the missing language policy
    pub fn with_missing_language_policy(mut self, policy: MissingLanguagePolicy) -> Self {
        self.missing_language_policy = policy;
        self
    }

    pub fn index(&self) -> &ModuleIndex {
        &self.index
    }

    pub fn default_language(&self) -> &LanguageCode {
        &self.default_language
    }

    pub fn missing_language_policy(&self) -> MissingLanguagePolicy {
        self.missing_language_policy
    }

    pub fn metrics(&self) -> &ResolverMetrics {
        &self.metrics
    }

    /// Run the detector, treating an empty code as no detection.
    fn detect_language(&self, pathname: &str) -> Option<LanguageCode> {
        self.detector
            .detect(pathname)
            .filter(|language| !language.as_str().is_empty())
    }

    /// Determine the effective language for a pathname.
    pub fn resolve_language(&self, pathname: &str) -> LanguageCode {
        self.detect_language(pathname)
            .unwrap_or_else(|| self.default_language.clone())
    }

    /// Find the raw translation source for `language`, applying the policy.
    ///
    /// Returns the language whose data was found alongside the data.
    fn lookup(
        &self,
        language: LanguageCode,
    ) -> Result<(LanguageCode, &RawTranslationSource), TranslationError> {
        if let Some(raw) = self.index.get(language.as_str()) {
            return Ok((language, raw));
        }

        match self.missing_language_policy {
            MissingLanguagePolicy::Reject => {
                self.metrics.record_missing_language();
                warn!(language = %language, "No translation data for language");
                Err(TranslationError::LanguageDataMissing { language })
            }
            MissingLanguagePolicy::FallbackToDefault => {
                match self.index.get(self.default_language.as_str()) {
                    Some(raw) => {
                        self.metrics.record_policy_fallback();
                        warn!(
                            language = %language,
                            fallback = %self.default_language,
                            "No translation data for language, using default language"
                        );
                        Ok((self.default_language.clone(), raw))
                    }
                    None => {
                        self.metrics.record_missing_language();
                        warn!(
                            language = %language,
                            fallback = %self.default_language,
                            "No translation data for language or default language"
                        );
                        Err(TranslationError::LanguageDataMissing {
                            language: self.default_language.clone(),
                        })
                    }
                }
            }
        }
    }

    /// Get the translation dictionary for a page request.
    ///
    /// # Errors
    /// * `TranslationError::LanguageDataMissing` when the language has no data
    ///   (and the policy does not allow a fallback)
    /// * `TranslationError::Assembly` when the assembly step fails
    pub async fn get_translations<R>(
        &self,
        request: &R,
    ) -> Result<TranslationDictionary, TranslationError>
    where
        R: PageRequest + ?Sized,
    {
        self.metrics.record_request();

        let pathname = request.pathname();
        let requested = match self.detect_language(pathname) {
            Some(language) => language,
            None => {
                self.metrics.record_default_language();
                self.default_language.clone()
            }
        };
        debug!(pathname = %pathname, language = %requested, "Resolved request language");

        let (language, raw) = self.lookup(requested)?;

        match self.assembler.assemble(&language, raw).await {
            Ok(dictionary) => {
                if dictionary.is_empty() {
                    warn!(language = %language, "Assembled an empty translation dictionary");
                }
                self.metrics.record_success();
                Ok(dictionary)
            }
            Err(e) => {
                self.metrics.record_assembly_failure();
                warn!(language = %language, error = %e, "Failed to assemble translations");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssemblyError;
    use crate::i18n::{build_module_index, DiscoveredModule, FlatteningAssembler, UnimplementedAssembler};
    use serde_json::json;

    fn raw(title: &str) -> RawTranslationSource {
        serde_json::from_value(json!({ "title": title })).expect("Should be an object")
    }

    fn index(languages: &[(&str, &str)]) -> Arc<ModuleIndex> {
        Arc::new(build_module_index(languages.iter().map(|(code, title)| {
            (format!("./{}/translations.json", code), DiscoveredModule::new(raw(title)))
        })))
    }

    fn resolver(languages: &[(&str, &str)]) -> TranslationResolver {
        TranslationResolver::new(index(languages), Arc::new(FlatteningAssembler))
    }

    // ==================== Language Resolution Tests ====================

    #[tokio::test]
    async fn test_detected_language_is_used() {
        let resolver = resolver(&[("en", "Hello"), ("fr", "Bonjour")]);

        let dictionary = resolver.get_translations("/fr/about").await.expect("Should resolve");

        assert_eq!(dictionary.language().as_str(), "fr");
        assert_eq!(dictionary.get("title"), Some("Bonjour"));
        assert_eq!(resolver.metrics().default_language_used(), 0);
    }

    #[tokio::test]
    async fn test_undetected_language_uses_english() {
        let resolver = resolver(&[("en", "Hello")]);

        let dictionary = resolver.get_translations("/").await.expect("Should resolve");

        assert_eq!(dictionary.language().as_str(), "en");
        assert_eq!(dictionary.get("title"), Some("Hello"));
        assert_eq!(resolver.metrics().default_language_used(), 1);
    }

    #[tokio::test]
    async fn test_injected_detector_returning_none_uses_default() {
        let resolver = resolver(&[("en", "Hello"), ("fr", "Bonjour")])
            .with_detector(|_: &str| None::<LanguageCode>);

        let dictionary = resolver.get_translations("/fr/about").await.expect("Should resolve");
        assert_eq!(dictionary.language().as_str(), "en");
    }

    #[tokio::test]
    async fn test_configured_default_language() {
        let resolver = resolver(&[("en", "Hello"), ("es", "Hola")])
            .with_default_language(LanguageCode::new("es"));

        assert_eq!(resolver.resolve_language("/about"), LanguageCode::new("es"));
        let dictionary = resolver.get_translations("/about").await.expect("Should resolve");
        assert_eq!(dictionary.get("title"), Some("Hola"));
    }

    #[tokio::test]
    async fn test_injected_detector_returning_empty_code_uses_default() {
        let resolver = resolver(&[("en", "Hello")])
            .with_detector(|_: &str| Some(LanguageCode::new("")));

        assert_eq!(resolver.resolve_language("/"), LanguageCode::new("en"));

        let dictionary = resolver.get_translations("/").await.expect("Should resolve");
        assert_eq!(dictionary.language().as_str(), "en");
        assert_eq!(dictionary.get("title"), Some("Hello"));
        assert_eq!(resolver.metrics().default_language_used(), 1);
        assert_eq!(resolver.metrics().missing_language(), 0);
    }

    #[tokio::test]
    async fn test_resolve_language_does_not_count_as_request() {
        let resolver = resolver(&[("en", "Hello")]);

        assert_eq!(resolver.resolve_language("/about"), LanguageCode::new("en"));
        assert_eq!(resolver.metrics().default_language_used(), 0);
        assert_eq!(resolver.metrics().requests(), 0);

        resolver.get_translations("/about").await.expect("Should resolve");
        assert_eq!(resolver.metrics().default_language_used(), 1);
        assert_eq!(resolver.metrics().requests(), 1);
    }

    #[tokio::test]
    async fn test_uri_request() {
        let resolver = resolver(&[("en", "Hello"), ("fr", "Bonjour")]);
        let uri: Uri = "https://example.com/fr/blog?page=2".parse().expect("Valid URI");

        let dictionary = resolver.get_translations(&uri).await.expect("Should resolve");
        assert_eq!(dictionary.language().as_str(), "fr");
    }

    // ==================== Missing Language Tests ====================

    #[tokio::test]
    async fn test_missing_language_rejected() {
        let resolver = resolver(&[("en", "Hello")])
            .with_detector(|_: &str| Some(LanguageCode::new("de")));

        for _ in 0..2 {
            let error = resolver.get_translations("/de/start").await.unwrap_err();
            assert_eq!(
                error,
                TranslationError::LanguageDataMissing {
                    language: LanguageCode::new("de")
                }
            );
        }
        assert_eq!(resolver.metrics().missing_language(), 2);
    }

    #[tokio::test]
    async fn test_missing_language_falls_back_when_configured() {
        let resolver = resolver(&[("en", "Hello")])
            .with_detector(|_: &str| Some(LanguageCode::new("de")))
            .with_missing_language_policy(MissingLanguagePolicy::FallbackToDefault);

        let first = resolver.get_translations("/de/start").await.expect("Should fall back");
        let second = resolver.get_translations("/de/start").await.expect("Should fall back");

        assert_eq!(first.language().as_str(), "en");
        assert_eq!(first, second);
        assert_eq!(resolver.metrics().policy_fallbacks(), 2);
    }

    #[tokio::test]
    async fn test_fallback_without_default_data_fails() {
        let resolver = resolver(&[("fr", "Bonjour")])
            .with_missing_language_policy(MissingLanguagePolicy::FallbackToDefault);

        let error = resolver.get_translations("/de/start").await.unwrap_err();
        assert_eq!(
            error,
            TranslationError::LanguageDataMissing {
                language: LanguageCode::new("en")
            }
        );
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "reject".parse::<MissingLanguagePolicy>().unwrap(),
            MissingLanguagePolicy::Reject
        );
        assert_eq!(
            "Fallback".parse::<MissingLanguagePolicy>().unwrap(),
            MissingLanguagePolicy::FallbackToDefault
        );
        assert!("ignore".parse::<MissingLanguagePolicy>().is_err());
    }

    // ==================== Assembly Tests ====================

    #[tokio::test]
    async fn test_unimplemented_assembly_propagates_todo() {
        let resolver = TranslationResolver::new(
            index(&[("en", "Hello")]),
            Arc::new(UnimplementedAssembler),
        );

        let error = resolver.get_translations("/").await.unwrap_err();
        assert_eq!(error, TranslationError::Assembly(AssemblyError::NotImplemented));
        assert_eq!(error.to_string(), "todo");
        assert_eq!(resolver.metrics().assembly_failures(), 1);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_equivalent_and_leave_index_untouched() {
        let resolver = resolver(&[("en", "Hello"), ("fr", "Bonjour")]);
        let before = resolver.index().clone();

        let first = resolver.get_translations("/fr/").await.expect("Should resolve");
        let second = resolver.get_translations("/fr/").await.expect("Should resolve");

        assert_eq!(first, second);
        assert_eq!(resolver.index(), &before);
        assert_eq!(resolver.metrics().successes(), 2);
    }
}
