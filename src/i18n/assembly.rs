//! Assembly: turning a raw translation source into a translation dictionary.
//!
//! Assembly is a pluggable strategy. The resolver only knows the
//! [`Assembler`] trait; which implementation runs is chosen at startup.

use crate::error::AssemblyError;
use crate::i18n::{LanguageCode, RawTranslationSource, TranslationDictionary};
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

/// Transforms one language's raw translation source into its dictionary.
pub trait Assembler: Send + Sync {
    fn assemble<'a>(
        &'a self,
        language: &'a LanguageCode,
        raw: &'a RawTranslationSource,
    ) -> BoxFuture<'a, Result<TranslationDictionary, AssemblyError>>;
}

/// Assembler without an implementation: every call fails with "todo".
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedAssembler;

impl Assembler for UnimplementedAssembler {
    fn assemble<'a>(
        &'a self,
        _language: &'a LanguageCode,
        _raw: &'a RawTranslationSource,
    ) -> BoxFuture<'a, Result<TranslationDictionary, AssemblyError>> {
        Box::pin(async { Err(AssemblyError::NotImplemented) })
    }
}

/// Flattens nested translation objects into dotted keys.
///
/// `{"nav": {"home": "Home"}}` becomes `nav.home = "Home"`. Numbers and
/// booleans are rendered as text, `null` entries are dropped and arrays are
/// rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatteningAssembler;

impl FlatteningAssembler {
    fn flatten_into(
        prefix: &str,
        object: &Map<String, Value>,
        entries: &mut BTreeMap<String, String>,
    ) -> Result<(), AssemblyError> {
        for (name, value) in object {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };

            match value {
                Value::String(text) => {
                    entries.insert(key, text.clone());
                }
                Value::Number(number) => {
                    entries.insert(key, number.to_string());
                }
                Value::Bool(flag) => {
                    entries.insert(key, flag.to_string());
                }
                Value::Null => {}
                Value::Object(nested) => Self::flatten_into(&key, nested, entries)?,
                Value::Array(_) => {
                    return Err(AssemblyError::UnsupportedValue { key, kind: "array" });
                }
            }
        }

        Ok(())
    }
}

impl Assembler for FlatteningAssembler {
    fn assemble<'a>(
        &'a self,
        language: &'a LanguageCode,
        raw: &'a RawTranslationSource,
    ) -> BoxFuture<'a, Result<TranslationDictionary, AssemblyError>> {
        Box::pin(async move {
            let mut entries = BTreeMap::new();
            Self::flatten_into("", raw.entries(), &mut entries)?;
            Ok(TranslationDictionary::new(language.clone(), entries))
        })
    }
}

/// Which assembler the service runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssemblyStrategy {
    #[default]
    Flatten,
    Unimplemented,
}

impl AssemblyStrategy {
    pub fn build(self) -> Arc<dyn Assembler> {
        match self {
            Self::Flatten => Arc::new(FlatteningAssembler),
            Self::Unimplemented => Arc::new(UnimplementedAssembler),
        }
    }
}

impl FromStr for AssemblyStrategy {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "flatten" => Ok(Self::Flatten),
            "unimplemented" | "todo" => Ok(Self::Unimplemented),
            other => anyhow::bail!("Unknown assembly strategy: '{}'", other),
        }
    }
}
