//! Catalog loading and schema validation.
//!
//! The whole document is checked before anything is handed out: JSON syntax,
//! root structure, the source language, and every entry under `strings`.
//! Errors name the offending key so a broken catalog can be fixed by hand.

use serde_json::error::Category;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::catalog::{
    is_locale_identifier, LocalizationState, StringCatalog, StringEntry, CATALOG_EXTENSION,
};
use crate::error::ParseError;

/// Parse a catalog file into its root and the list of entries in file order.
pub fn parse_file<P: AsRef<Path>>(
    path: P,
) -> Result<(StringCatalog, Vec<StringEntry>), ParseError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ParseError::FileNotFound(path.to_path_buf()));
    }

    if path.extension().and_then(|e| e.to_str()) != Some(CATALOG_EXTENSION) {
        return Err(ParseError::InvalidExtension(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read catalog");

    parse_str(&content)
}

/// Parse catalog JSON that is already in memory.
pub fn parse_str(content: &str) -> Result<(StringCatalog, Vec<StringEntry>), ParseError> {
    let catalog: StringCatalog = serde_json::from_str(content).map_err(|e| match e.classify() {
        Category::Data => ParseError::InvalidFormat(format!("schema mismatch: {}", e)),
        _ => ParseError::InvalidFormat(format!("invalid JSON: {}", e)),
    })?;

    validate_source_language(&catalog.source_language)?;

    let mut entries = Vec::with_capacity(catalog.strings.len());
    for (key, raw) in &catalog.strings {
        let entry = StringEntry::from_value(key, raw)
            .map_err(|e| ParseError::InvalidFormat(format!("strings.{:?}: {}", key, e)))?;

        for (language, localization) in &entry.localizations {
            if localization.state() == LocalizationState::Unknown {
                warn!(
                    key = %entry.key,
                    language = %language,
                    state = %localization.raw_state(),
                    "unrecognized localization state, counting as missing"
                );
            }
        }

        entries.push(entry);
    }

    debug!(
        source_language = %catalog.source_language,
        version = %catalog.version,
        entries = entries.len(),
        "parsed catalog"
    );

    Ok((catalog, entries))
}

/// Check a catalog without raising: `(true, "")` when valid, otherwise
/// `(false, message)` describing the first problem found.
pub fn validate<P: AsRef<Path>>(path: P) -> (bool, String) {
    match parse_file(path) {
        Ok(_) => (true, String::new()),
        Err(e) => (false, e.to_string()),
    }
}

fn validate_source_language(language: &str) -> Result<(), ParseError> {
    if language.trim().is_empty() {
        return Err(ParseError::InvalidFormat(
            "sourceLanguage must not be empty".to_string(),
        ));
    }
    if !is_locale_identifier(language) {
        return Err(ParseError::InvalidFormat(format!(
            "sourceLanguage {:?} is not a valid language identifier",
            language
        )));
    }
    Ok(())
}
