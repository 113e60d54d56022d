//! # Localization
//!
//! The app ships translation catalogs for ten locales as nested JSON files,
//! one per locale code. A [`Catalog`] resolves dot-separated keys with
//! key-as-fallback semantics and `{{placeholder}}` substitution; a
//! [`CatalogDir`] loads catalogs from disk, falling back to English and then
//! to the empty catalog rather than failing.

use crate::parser::render_message;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, warn};
use walkdir::WalkDir;

/// A supported interface locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    De,
    Fr,
    Es,
    Ar,
    Zh,
    Vi,
    Fil,
    Ja,
    Hi,
}

impl Locale {
    pub const ALL: [Locale; 10] = [
        Locale::En,
        Locale::De,
        Locale::Fr,
        Locale::Es,
        Locale::Ar,
        Locale::Zh,
        Locale::Vi,
        Locale::Fil,
        Locale::Ja,
        Locale::Hi,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
            Locale::Fr => "fr",
            Locale::Es => "es",
            Locale::Ar => "ar",
            Locale::Zh => "zh",
            Locale::Vi => "vi",
            Locale::Fil => "fil",
            Locale::Ja => "ja",
            Locale::Hi => "hi",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        Locale::ALL.into_iter().find(|l| l.code() == code)
    }

    /// The language's own name for itself, as shown in the language picker.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::De => "Deutsch",
            Locale::Fr => "Français",
            Locale::Es => "Español",
            Locale::Ar => "العربية",
            Locale::Zh => "中文",
            Locale::Vi => "Tiếng Việt",
            Locale::Fil => "Filipino",
            Locale::Ja => "日本語",
            Locale::Hi => "हिन्दी",
        }
    }

    /// The English name of the language, used when instructing the analysis
    /// model which language to translate into.
    pub fn english_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::De => "German",
            Locale::Fr => "French",
            Locale::Es => "Spanish",
            Locale::Ar => "Arabic",
            Locale::Zh => "Chinese",
            Locale::Vi => "Vietnamese",
            Locale::Fil => "Filipino",
            Locale::Ja => "Japanese",
            Locale::Hi => "Hindi",
        }
    }

    /// Whether the interface renders right-to-left for this locale.
    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Ar | Locale::Hi)
    }
}

impl Default for Locale {
    fn default() -> Locale {
        Locale::En
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A nested key-to-string translation mapping for one locale.
pub struct Catalog {
    root: Value,
}

impl Catalog {
    pub fn new(root: Value) -> Catalog {
        Catalog { root }
    }

    /// A catalog with no entries; every lookup falls back to the key.
    pub fn empty() -> Catalog {
        Catalog { root: Value::Null }
    }

    /// Resolves a dot-separated key to its message, if present.
    ///
    /// Array nodes are addressed with numeric segments, as in
    /// `learn.modules.task.content.0.text`.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut node = &self.root;
        for part in key.split('.') {
            node = match node.get(part) {
                Some(next) => next,
                None => node.get(part.parse::<usize>().ok()?)?,
            };
        }
        node.as_str()
    }

    /// Translates a key, returning the key itself verbatim on a miss.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }

    /// Translates a key and substitutes `{{placeholder}}` tokens.
    pub fn translate(&self, key: &str, replacements: &HashMap<String, String>) -> String {
        let message = self.lookup(key).unwrap_or(key);
        if replacements.is_empty() {
            return message.to_string();
        }
        render_message(message, replacements)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] io::Error),
    #[error("catalog file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A directory of `{code}.json` translation catalogs.
pub struct CatalogDir {
    pub base_path: PathBuf,
}

impl CatalogDir {
    pub fn new(base_path: impl Into<PathBuf>) -> CatalogDir {
        CatalogDir {
            base_path: base_path.into(),
        }
    }

    fn catalog_path(&self, locale: Locale) -> PathBuf {
        self.base_path.join(format!("{}.json", locale.code()))
    }

    pub fn load(&self, locale: Locale) -> Result<Catalog, CatalogError> {
        let raw = fs::read_to_string(self.catalog_path(locale))?;
        Ok(Catalog::new(serde_json::from_str(&raw)?))
    }

    /// Loads a catalog, falling back to English and then to the empty
    /// catalog. Failures are logged; this never returns an error.
    pub fn load_or_fallback(&self, locale: Locale) -> Catalog {
        match self.load(locale) {
            Ok(catalog) => catalog,
            Err(err) => {
                error!(locale = %locale, error = %err, "failed to load translation catalog");
                if locale == Locale::En {
                    return Catalog::empty();
                }
                warn!("falling back to English translations");
                match self.load(Locale::En) {
                    Ok(catalog) => catalog,
                    Err(err) => {
                        error!(error = %err, "failed to load fallback English catalog");
                        Catalog::empty()
                    }
                }
            }
        }
    }

    /// The locales for which a catalog file exists, in canonical order.
    pub fn available_locales(&self) -> Vec<Locale> {
        let found: Vec<Locale> = WalkDir::new(&self.base_path)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().is_file()
                    && e.path().extension().is_some_and(|ext| ext == "json")
            })
            .filter_map(|e| {
                e.path()
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(Locale::from_code)
            })
            .collect();

        Locale::ALL
            .into_iter()
            .filter(|l| found.contains(l))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_catalog() -> Catalog {
        Catalog::new(json!({
            "builder": {
                "title": "Prompt Builder",
                "delete_modal": {
                    "message": "Delete \"{{name}}\"?"
                }
            }
        }))
    }

    #[test]
    fn test_lookup_nested_key() {
        let catalog = sample_catalog();
        assert_eq!(catalog.lookup("builder.title"), Some("Prompt Builder"));
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let catalog = sample_catalog();
        assert_eq!(catalog.t("builder.unknown"), "builder.unknown");
        assert_eq!(Catalog::empty().t("anything.at.all"), "anything.at.all");
    }

    #[test]
    fn test_lookup_indexes_arrays_with_numeric_segments() {
        let catalog = Catalog::new(json!({
            "learn": {
                "modules": {
                    "task": {
                        "content": [
                            { "title": "One action verb", "text": "Start with a verb." },
                            { "text": "Give the model a role." }
                        ]
                    }
                }
            }
        }));
        assert_eq!(
            catalog.lookup("learn.modules.task.content.0.text"),
            Some("Start with a verb.")
        );
        assert_eq!(
            catalog.lookup("learn.modules.task.content.1.text"),
            Some("Give the model a role.")
        );
        assert_eq!(catalog.lookup("learn.modules.task.content.2.text"), None);
        assert_eq!(catalog.lookup("learn.modules.task.content.one.text"), None);
    }

    #[test]
    fn test_translate_with_replacements() {
        let catalog = sample_catalog();
        let mut replacements = HashMap::new();
        replacements.insert("name".to_string(), "Greeting".to_string());
        assert_eq!(
            catalog.translate("builder.delete_modal.message", &replacements),
            "Delete \"Greeting\"?"
        );
    }

    #[test]
    fn test_locale_codes_round_trip() {
        for locale in Locale::ALL {
            assert_eq!(Locale::from_code(locale.code()), Some(locale));
        }
        assert_eq!(Locale::from_code("xx"), None);
    }

    #[test]
    fn test_locale_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Locale::Fil).unwrap(), "\"fil\"");
        let back: Locale = serde_json::from_str("\"ja\"").unwrap();
        assert_eq!(back, Locale::Ja);
    }

    #[test]
    fn test_rtl_locales() {
        assert!(Locale::Ar.is_rtl());
        assert!(Locale::Hi.is_rtl());
        assert!(!Locale::En.is_rtl());
    }

    #[test]
    fn test_load_catalog_from_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("de.json"),
            r#"{"builder": {"title": "Prompt-Baukasten"}}"#,
        )
        .unwrap();

        let dir = CatalogDir::new(temp_dir.path());
        let catalog = dir.load(Locale::De).unwrap();
        assert_eq!(catalog.t("builder.title"), "Prompt-Baukasten");
    }

    #[test]
    fn test_load_or_fallback_uses_english() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("en.json"),
            r#"{"builder": {"title": "Prompt Builder"}}"#,
        )
        .unwrap();

        let dir = CatalogDir::new(temp_dir.path());
        // No fr.json, so this falls back to English.
        let catalog = dir.load_or_fallback(Locale::Fr);
        assert_eq!(catalog.t("builder.title"), "Prompt Builder");
    }

    #[test]
    fn test_load_or_fallback_empty_when_nothing_loads() {
        let temp_dir = TempDir::new().unwrap();
        let dir = CatalogDir::new(temp_dir.path());
        let catalog = dir.load_or_fallback(Locale::Ja);
        assert_eq!(catalog.t("some.key"), "some.key");
    }

    #[test]
    fn test_invalid_catalog_json_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.json"), "not json [[[").unwrap();

        let dir = CatalogDir::new(temp_dir.path());
        assert!(matches!(dir.load(Locale::En), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_available_locales() {
        let temp_dir = TempDir::new().unwrap();
        for code in ["hi", "en", "fil", "notalocale"] {
            fs::write(temp_dir.path().join(format!("{code}.json")), "{}").unwrap();
        }

        let dir = CatalogDir::new(temp_dir.path());
        assert_eq!(
            dir.available_locales(),
            vec![Locale::En, Locale::Fil, Locale::Hi]
        );
    }
}
