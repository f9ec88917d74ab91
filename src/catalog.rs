//! Typed model of an Xcode String Catalog (`.xcstrings`).
//!
//! The file is a JSON object with a source language, a format version and a
//! `strings` mapping from key to entry. Entries carry per-language
//! localizations, each holding a single string unit (state + value).

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Canonical file extension for string catalogs (without the dot).
pub const CATALOG_EXTENSION: &str = "xcstrings";

/// Format version assumed when the file doesn't declare one.
pub const DEFAULT_VERSION: &str = "1.0";

lazy_static! {
    /// Language identifiers such as `en`, `es-MX`, `zh-Hans` or `pt_BR`.
    static ref LOCALE_IDENTIFIER: Regex =
        Regex::new(r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*$").unwrap();
}

/// Returns whether `s` looks like a locale identifier.
pub fn is_locale_identifier(s: &str) -> bool {
    LOCALE_IDENTIFIER.is_match(s)
}

/// Translation state for a specific language.
///
/// States Xcode may add in the future map to `Unknown` rather than being
/// rejected; the analyzer counts them as missing. The text written in the
/// catalog stays available through [`StringUnit::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalizationState {
    New,
    Translated,
    NeedsReview,
    Stale,
    #[serde(other)]
    Unknown,
}

impl LocalizationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocalizationState::New => "new",
            LocalizationState::Translated => "translated",
            LocalizationState::NeedsReview => "needs_review",
            LocalizationState::Stale => "stale",
            LocalizationState::Unknown => "unknown",
        }
    }

    /// Interpret a state as written in a catalog.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "new" => LocalizationState::New,
            "translated" => LocalizationState::Translated,
            "needs_review" => LocalizationState::NeedsReview,
            "stale" => LocalizationState::Stale,
            _ => LocalizationState::Unknown,
        }
    }
}

impl std::fmt::Display for LocalizationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the string was added to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractionState {
    #[serde(rename = "extracted_with_value")]
    Automatic,
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "migrated")]
    Migrated,
    #[serde(rename = "stale")]
    Stale,
}

impl ExtractionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionState::Automatic => "extracted_with_value",
            ExtractionState::Manual => "manual",
            ExtractionState::Migrated => "migrated",
            ExtractionState::Stale => "stale",
        }
    }
}

impl std::fmt::Display for ExtractionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringUnit {
    /// State exactly as written in the catalog
    pub state: String,
    pub value: String,
}

impl StringUnit {
    pub fn state(&self) -> LocalizationState {
        LocalizationState::from_raw(&self.state)
    }
}

/// Translation data for a specific language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localization {
    #[serde(rename = "stringUnit")]
    pub string_unit: StringUnit,
}

impl Localization {
    pub fn new(state: LocalizationState, value: impl Into<String>) -> Self {
        Self {
            string_unit: StringUnit {
                state: state.as_str().to_string(),
                value: value.into(),
            },
        }
    }

    pub fn state(&self) -> LocalizationState {
        self.string_unit.state()
    }

    /// State text as written in the catalog, including unrecognized ones.
    pub fn raw_state(&self) -> &str {
        &self.string_unit.state
    }

    pub fn value(&self) -> &str {
        &self.string_unit.value
    }
}

/// On-disk shape of one entry; the key lives in the parent mapping.
#[derive(Debug, Deserialize)]
struct EntryData {
    #[serde(default, rename = "extractionState")]
    extraction_state: Option<ExtractionState>,
    #[serde(default)]
    localizations: IndexMap<String, Localization>,
    #[serde(default)]
    comment: Option<String>,
}

/// A single string in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringEntry {
    pub key: String,
    pub extraction_state: Option<ExtractionState>,
    pub localizations: IndexMap<String, Localization>,
    pub comment: Option<String>,
}

impl StringEntry {
    /// Create an entry with no localizations.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            extraction_state: None,
            localizations: IndexMap::new(),
            comment: None,
        }
    }

    /// Add a localization (builder style).
    pub fn with_localization(
        mut self,
        language: impl Into<String>,
        state: LocalizationState,
        value: impl Into<String>,
    ) -> Self {
        self.localizations
            .insert(language.into(), Localization::new(state, value));
        self
    }

    /// Build a typed entry from its raw JSON value.
    pub fn from_value(key: &str, value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        let data = EntryData::deserialize(value)?;
        Ok(Self {
            key: key.to_string(),
            extraction_state: data.extraction_state,
            localizations: data.localizations,
            comment: data.comment,
        })
    }

    /// Get the localization for a language, if any.
    pub fn localization(&self, language: &str) -> Option<&Localization> {
        self.localizations.get(language)
    }

    /// Get the translation state for a language, if a localization exists.
    pub fn state_for(&self, language: &str) -> Option<LocalizationState> {
        self.localization(language).map(Localization::state)
    }

    /// Get the translated value for a language, if a localization exists.
    pub fn value_for(&self, language: &str) -> Option<&str> {
        self.localization(language).map(Localization::value)
    }
}

/// Root catalog structure.
///
/// `strings` keeps the raw per-key JSON in file order; the parser turns it
/// into [`StringEntry`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringCatalog {
    #[serde(rename = "sourceLanguage")]
    pub source_language: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub strings: IndexMap<String, serde_json::Value>,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

impl StringCatalog {
    /// Create an empty catalog.
    pub fn new(source_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            version: default_version(),
            strings: IndexMap::new(),
        }
    }

    /// Number of string keys in the catalog.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// All languages that have at least one localization, sorted.
pub fn languages(entries: &[StringEntry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|e| e.localizations.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
