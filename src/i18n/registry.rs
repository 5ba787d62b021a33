//! Module index: the process-wide mapping from language code to raw translations.
//!
//! The index is built once from the discovered translation modules and then
//! installed in a `OnceLock`. After installation it is never mutated, so any
//! number of concurrent requests can read it without coordination.

use crate::error::TranslationError;
use crate::i18n::{LanguageCode, RawTranslationSource};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// A discovered translation module, wrapping its default export.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredModule<T> {
    pub default: T,
}

impl<T> DiscoveredModule<T> {
    pub fn new(default: T) -> Self {
        Self { default }
    }
}

/// Immutable mapping from language code to that language's translation source.
///
/// Holds at most one entry per language code.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleIndex<T = RawTranslationSource> {
    modules: BTreeMap<LanguageCode, T>,
}

/// Global index instance (installed once at startup)
static MODULE_INDEX: OnceLock<Arc<ModuleIndex>> = OnceLock::new();

impl<T> ModuleIndex<T> {
    /// Get the translation source for a language code.
    pub fn get(&self, code: &str) -> Option<&T> {
        self.modules.get(code)
    }

    /// Check whether a language code has an entry.
    pub fn contains(&self, code: &str) -> bool {
        self.modules.contains_key(code)
    }

    /// All language codes in the index, in sorted order.
    pub fn languages(&self) -> Vec<&LanguageCode> {
        self.modules.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<T> Default for ModuleIndex<T> {
    fn default() -> Self {
        Self {
            modules: BTreeMap::new(),
        }
    }
}

impl ModuleIndex {
    /// Install the process-wide index.
    ///
    /// Must be called exactly once, before the resolver is reachable.
    ///
    /// # Returns
    /// * `Ok(Arc<ModuleIndex>)` - the installed index
    /// * `Err(TranslationError::IndexAlreadyInitialized)` on a second call
    pub fn install(index: ModuleIndex) -> Result<Arc<ModuleIndex>, TranslationError> {
        let index = Arc::new(index);
        MODULE_INDEX
            .set(Arc::clone(&index))
            .map_err(|_| TranslationError::IndexAlreadyInitialized)?;
        Ok(index)
    }

    /// Get the process-wide index installed by [`ModuleIndex::install`].
    pub fn global() -> Result<Arc<ModuleIndex>, TranslationError> {
        MODULE_INDEX
            .get()
            .cloned()
            .ok_or(TranslationError::IndexNotInitialized)
    }
}

/// Extract the language code from a discovered module path.
///
/// The code is the second `/`-separated component: `./en/translations.json`
/// yields `en`.
fn language_from_module_path(path: &str) -> Option<&str> {
    path.split('/').nth(1).filter(|segment| !segment.is_empty())
}

/// Build a module index from discovered `(path, module)` pairs.
///
/// Paths that carry no language segment are skipped. When two paths map to
/// the same language code, the later one wins and a warning is logged.
pub fn build_module_index<T, I, P>(discovered: I) -> ModuleIndex<T>
where
    I: IntoIterator<Item = (P, DiscoveredModule<T>)>,
    P: AsRef<str>,
{
    let mut modules = BTreeMap::new();
    let mut origins: BTreeMap<LanguageCode, String> = BTreeMap::new();

    for (path, module) in discovered {
        let path = path.as_ref();
        let Some(code) = language_from_module_path(path) else {
            warn!(path = %path, "Skipping translation module without a language segment");
            continue;
        };

        let code = LanguageCode::new(code);
        if let Some(previous) = origins.insert(code.clone(), path.to_string()) {
            warn!(
                language = %code,
                previous = %previous,
                replacement = %path,
                "Duplicate translation module, keeping the later one"
            );
        }

        debug!(language = %code, path = %path, "Registered translation module");
        modules.insert(code, module.default);
    }

    ModuleIndex { modules }
}
