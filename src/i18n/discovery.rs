//! Discovery of per-language translation modules on disk.
//!
//! Translations live in a directory laid out as:
//!
//! ```text
//! translations/
//!   en/translations.json
//!   fr/translations.yaml
//! ```
//!
//! Every `<root>/<lang>/translations.*` file is read once at startup and
//! handed to [`build_module_index`](crate::i18n::build_module_index) keyed by
//! its relative path (`./<lang>/translations.<ext>`).

use crate::i18n::{DiscoveredModule, RawTranslationSource};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// File stem every translation module must have.
const MODULE_STEM: &str = "translations";

/// Parse translation file content according to its extension.
///
/// Returns `Ok(None)` when the extension is not a supported format.
fn parse_module(extension: &str, content: &str) -> Result<Option<RawTranslationSource>> {
    let source: RawTranslationSource = match extension {
        "json" => serde_json::from_str(content).context("Invalid JSON translation module")?,
        "yaml" | "yml" => {
            serde_yaml::from_str(content).context("Invalid YAML translation module")?
        }
        _ => return Ok(None),
    };

    Ok(Some(source))
}

/// Discover and load every `<root>/<lang>/translations.*` module.
///
/// # Returns
/// `(path, module)` pairs sorted by path, where `path` has the shape
/// `./<lang>/translations.<ext>`.
///
/// # Errors
/// Fails when `root` cannot be read, or when a supported translation file
/// cannot be read or parsed.
pub fn discover_translation_modules(
    root: &Path,
) -> Result<Vec<(String, DiscoveredModule<RawTranslationSource>)>> {
    let mut modules = Vec::new();

    let entries = fs::read_dir(root)
        .with_context(|| format!("Failed to read translations directory {}", root.display()))?;

    for entry in entries {
        let language_dir = entry
            .with_context(|| format!("Failed to list translations directory {}", root.display()))?
            .path();
        if !language_dir.is_dir() {
            continue;
        }

        let Some(language) = language_dir.file_name().and_then(|name| name.to_str()) else {
            warn!(dir = %language_dir.display(), "Skipping directory with non UTF-8 name");
            continue;
        };

        let files = fs::read_dir(&language_dir)
            .with_context(|| format!("Failed to read {}", language_dir.display()))?;

        for file in files {
            let file = file
                .with_context(|| format!("Failed to list {}", language_dir.display()))?
                .path();

            if !file.is_file() || file.file_stem().and_then(|stem| stem.to_str()) != Some(MODULE_STEM) {
                continue;
            }

            let Some(extension) = file.extension().and_then(|ext| ext.to_str()) else {
                warn!(file = %file.display(), "Skipping translation module with unsupported format");
                continue;
            };

            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            match parse_module(extension, &content)
                .with_context(|| format!("Failed to parse {}", file.display()))?
            {
                Some(source) => {
                    let path = format!("./{}/{}.{}", language, MODULE_STEM, extension);
                    modules.push((path, DiscoveredModule::new(source)));
                }
                None => {
                    warn!(file = %file.display(), "Skipping translation module with unsupported format");
                }
            }
        }
    }

    modules.sort_by(|(a, _), (b, _)| a.cmp(b));

    info!(
        root = %root.display(),
        count = modules.len(),
        "Discovered translation modules"
    );

    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, relative: &str, content: &str) {
        let path = dir.path().join(relative);
        fs::create_dir_all(path.parent().expect("Path has a parent")).expect("Failed to create dir");
        fs::write(path, content).expect("Failed to write file");
    }

    #[test]
    fn test_parse_json_module() {
        let source = parse_module("json", r#"{"title": "Hello"}"#)
            .expect("Should parse")
            .expect("Should be supported");
        assert_eq!(source.entries().get("title"), Some(&json!("Hello")));
    }

    #[test]
    fn test_parse_yaml_module() {
        let source = parse_module("yaml", "nav:\n  home: Inicio\n")
            .expect("Should parse")
            .expect("Should be supported");
        assert_eq!(source.entries().get("nav"), Some(&json!({"home": "Inicio"})));
    }

    #[test]
    fn test_parse_unsupported_extension() {
        let source = parse_module("ts", "export default {}").expect("Should not fail");
        assert!(source.is_none());
    }

    #[test]
    fn test_parse_invalid_json_fails() {
        assert!(parse_module("json", "{not json").is_err());
    }

    #[test]
    fn test_discover_modules_sorted_with_glob_paths() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(&dir, "fr/translations.json", r#"{"title": "Bonjour"}"#);
        write(&dir, "en/translations.json", r#"{"title": "Hello"}"#);
        write(&dir, "es/translations.yml", "title: Hola\n");

        let modules = discover_translation_modules(dir.path()).expect("Should discover");
        let paths: Vec<&str> = modules.iter().map(|(path, _)| path.as_str()).collect();

        assert_eq!(
            paths,
            vec!["./en/translations.json", "./es/translations.yml", "./fr/translations.json"]
        );
    }

    #[test]
    fn test_discover_ignores_unrelated_files() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(&dir, "en/translations.json", r#"{"title": "Hello"}"#);
        write(&dir, "en/README.md", "notes");
        write(&dir, "en/translations.ts", "export default {}");
        write(&dir, "en/translations", "title: Hello");
        write(&dir, "stray.json", "{}");

        let modules = discover_translation_modules(dir.path()).expect("Should discover");
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].0, "./en/translations.json");
    }

    #[test]
    fn test_discover_missing_root_fails() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let result = discover_translation_modules(&dir.path().join("missing"));
        assert!(result.is_err());
    }

    #[test]
    fn test_discover_reports_broken_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(&dir, "en/translations.json", "{broken");

        let error = discover_translation_modules(dir.path()).unwrap_err();
        assert!(format!("{:#}", error).contains("translations.json"));
    }
}
