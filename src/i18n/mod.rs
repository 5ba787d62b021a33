//! Internationalization (i18n) module: per-request translation lookup.
//!
//! Translation modules are discovered once at startup, indexed by language
//! code and installed as immutable process-wide state. Each page request is
//! then resolved to a language and its translations are assembled.
//!
//! # Architecture
//!
//! - `language`: `LanguageCode` and detection of the language from a request path
//! - `dictionary`: raw translation sources and assembled dictionaries
//! - `discovery`: finds `<lang>/translations.*` modules on disk
//! - `registry`: builds and holds the module index
//! - `assembly`: pluggable raw source -> dictionary transformation
//! - `resolver`: the per-request entry point
//! - `metrics`: lookup counters and reports
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use translation_resolver::i18n::{
//!     build_module_index, discover_translation_modules, FlatteningAssembler, ModuleIndex,
//!     TranslationResolver,
//! };
//!
//! let modules = discover_translation_modules("translations".as_ref())?;
//! let index = ModuleIndex::install(build_module_index(modules))?;
//! let resolver = TranslationResolver::new(index, Arc::new(FlatteningAssembler));
//!
//! let dictionary = resolver.get_translations("/fr/about").await?;
//! ```

mod assembly;
mod dictionary;
mod discovery;
mod language;
mod metrics;
mod registry;
mod resolver;

pub use assembly::{Assembler, AssemblyStrategy, FlatteningAssembler, UnimplementedAssembler};
pub use dictionary::{RawTranslationSource, TranslationDictionary};
pub use discovery::discover_translation_modules;
pub use language::{
    language_from_path, LanguageCode, LanguageDetector, PathPrefixDetector, DEFAULT_LANGUAGE,
};
pub use metrics::{MetricsReport, ResolverMetrics};
pub use registry::{build_module_index, DiscoveredModule, ModuleIndex};
pub use resolver::{MissingLanguagePolicy, PageRequest, TranslationResolver};
