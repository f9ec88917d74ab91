//! Translation coverage analysis for a single target language.

use serde::Serialize;

use crate::catalog::{languages, LocalizationState, StringCatalog, StringEntry};

/// How an entry counts for the target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Translated,
    MissingTranslation,
    NeedsReview,
    Stale,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Translated => "translated",
            Classification::MissingTranslation => "missing_translation",
            Classification::NeedsReview => "needs_review",
            Classification::Stale => "stale",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of analyzing a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub total_strings: usize,
    pub source_language: String,
    pub target_language: String,

    // Counts
    pub translated: usize,
    pub missing_translation: usize,
    pub needs_review: usize,
    pub stale: usize,

    /// Share of translated entries, rounded to one decimal.
    pub completion_percentage: f64,

    // Details, in catalog order
    pub missing_entries: Vec<StringEntry>,
    pub needs_review_entries: Vec<StringEntry>,
    pub stale_entries: Vec<StringEntry>,
}

impl AnalysisResult {
    fn empty(source_language: &str, target_language: &str) -> Self {
        Self {
            total_strings: 0,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            translated: 0,
            missing_translation: 0,
            needs_review: 0,
            stale: 0,
            completion_percentage: 0.0,
            missing_entries: Vec::new(),
            needs_review_entries: Vec::new(),
            stale_entries: Vec::new(),
        }
    }

    /// Entries that need work, tagged with their classification: missing,
    /// then needs review, then stale.
    pub fn flagged_entries(&self) -> impl Iterator<Item = (Classification, &StringEntry)> {
        self.missing_entries
            .iter()
            .map(|e| (Classification::MissingTranslation, e))
            .chain(
                self.needs_review_entries
                    .iter()
                    .map(|e| (Classification::NeedsReview, e)),
            )
            .chain(self.stale_entries.iter().map(|e| (Classification::Stale, e)))
    }

    /// Whether every entry is translated (vacuously false for an empty catalog).
    pub fn is_complete(&self) -> bool {
        self.total_strings > 0 && self.translated == self.total_strings
    }
}

/// Classify one entry for the target language.
///
/// A missing localization wins over anything other languages say. New and
/// unrecognized states both count as missing.
pub fn classify(entry: &StringEntry, target_language: &str) -> Classification {
    match entry.state_for(target_language) {
        None => Classification::MissingTranslation,
        Some(LocalizationState::Translated) => Classification::Translated,
        Some(LocalizationState::NeedsReview) => Classification::NeedsReview,
        Some(LocalizationState::Stale) => Classification::Stale,
        Some(LocalizationState::New) | Some(LocalizationState::Unknown) => {
            Classification::MissingTranslation
        }
    }
}

/// Analyze translation coverage of `entries` for `target_language`.
pub fn analyze(
    catalog: &StringCatalog,
    entries: &[StringEntry],
    target_language: &str,
) -> AnalysisResult {
    let mut result = AnalysisResult::empty(&catalog.source_language, target_language);
    result.total_strings = entries.len();

    for entry in entries {
        match classify(entry, target_language) {
            Classification::Translated => result.translated += 1,
            Classification::MissingTranslation => {
                result.missing_translation += 1;
                result.missing_entries.push(entry.clone());
            }
            Classification::NeedsReview => {
                result.needs_review += 1;
                result.needs_review_entries.push(entry.clone());
            }
            Classification::Stale => {
                result.stale += 1;
                result.stale_entries.push(entry.clone());
            }
        }
    }

    result.completion_percentage = completion_percentage(result.translated, result.total_strings);
    result
}

/// Analyze every language that has at least one localization, sorted by
/// language identifier.
pub fn analyze_all(catalog: &StringCatalog, entries: &[StringEntry]) -> Vec<AnalysisResult> {
    languages(entries)
        .iter()
        .map(|language| analyze(catalog, entries, language))
        .collect()
}

/// `100 * translated / total` rounded to one decimal, or 0.0 when empty.
///
/// Rounding works on the exact decimal expansion of the quotient with ties
/// to even, so 28.75 becomes 28.8 and 0.05 (stored just above) becomes 0.1.
pub fn completion_percentage(translated: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percentage = 100.0 * translated as f64 / total as f64;
    format!("{:.1}", percentage).parse().unwrap_or(percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LocalizationState::*;

    fn entry(key: &str, state: Option<LocalizationState>) -> StringEntry {
        let e = StringEntry::new(key).with_localization("fr", Translated, "x");
        match state {
            Some(s) => e.with_localization("es-MX", s, "valor"),
            None => e,
        }
    }

    #[test]
    fn test_classify_precedence() {
        assert_eq!(
            classify(&entry("a", None), "es-MX"),
            Classification::MissingTranslation
        );
        assert_eq!(
            classify(&entry("a", Some(Translated)), "es-MX"),
            Classification::Translated
        );
        assert_eq!(
            classify(&entry("a", Some(NeedsReview)), "es-MX"),
            Classification::NeedsReview
        );
        assert_eq!(classify(&entry("a", Some(Stale)), "es-MX"), Classification::Stale);
        assert_eq!(
            classify(&entry("a", Some(New)), "es-MX"),
            Classification::MissingTranslation
        );
        assert_eq!(
            classify(&entry("a", Some(Unknown)), "es-MX"),
            Classification::MissingTranslation
        );
        // other languages never count
        assert_eq!(
            classify(&entry("a", None), "fr"),
            Classification::Translated
        );
    }

    #[test]
    fn test_analyze_mixed() {
        let catalog = StringCatalog::new("en");
        let entries = vec![
            entry("one", Some(Translated)),
            entry("two", None),
            entry("three", Some(NeedsReview)),
            entry("four", Some(Stale)),
            entry("five", Some(New)),
            entry("six", Some(Translated)),
            entry("seven", Some(Unknown)),
        ];

        let result = analyze(&catalog, &entries, "es-MX");

        assert_eq!(result.total_strings, 7);
        assert_eq!(result.source_language, "en");
        assert_eq!(result.target_language, "es-MX");
        assert_eq!(result.translated, 2);
        assert_eq!(result.missing_translation, 3);
        assert_eq!(result.needs_review, 1);
        assert_eq!(result.stale, 1);
        assert_eq!(result.completion_percentage, 28.6);

        let missing: Vec<&str> = result.missing_entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(missing, vec!["two", "five", "seven"]);
        assert_eq!(result.needs_review_entries[0].key, "three");
        assert_eq!(result.stale_entries[0].key, "four");

        assert_eq!(
            result.translated + result.missing_translation + result.needs_review + result.stale,
            result.total_strings
        );
        assert_eq!(result.flagged_entries().count(), 5);
    }

    #[test]
    fn test_analyze_empty() {
        let catalog = StringCatalog::new("en");
        let result = analyze(&catalog, &[], "es-MX");
        assert_eq!(result.total_strings, 0);
        assert_eq!(result.completion_percentage, 0.0);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_analyze_does_not_mutate_input() {
        let catalog = StringCatalog::new("en");
        let entries = vec![entry("a", Some(Stale)), entry("b", None)];
        let before = entries.clone();
        let _ = analyze(&catalog, &entries, "es-MX");
        assert_eq!(entries, before);
    }

    #[test]
    fn test_analyze_all_languages() {
        let catalog = StringCatalog::new("en");
        let entries = vec![entry("a", Some(Translated)), entry("b", None)];

        let results = analyze_all(&catalog, &entries);
        let languages: Vec<&str> = results.iter().map(|r| r.target_language.as_str()).collect();
        assert_eq!(languages, vec!["es-MX", "fr"]);
        assert_eq!(results[0].completion_percentage, 50.0);
        assert_eq!(results[1].completion_percentage, 100.0);
    }

    #[test]
    fn test_completion_rounding() {
        assert_eq!(completion_percentage(0, 0), 0.0);
        assert_eq!(completion_percentage(1, 3), 33.3);
        assert_eq!(completion_percentage(2, 3), 66.7);
        assert_eq!(completion_percentage(2, 2), 100.0);
        assert_eq!(completion_percentage(0, 5), 0.0);
        assert_eq!(completion_percentage(1, 8), 12.5);
        assert_eq!(completion_percentage(1, 16), 6.2);
        assert_eq!(completion_percentage(3, 16), 18.8);
        assert_eq!(completion_percentage(23, 80), 28.8);
        assert_eq!(completion_percentage(49, 80), 61.2);
        assert_eq!(completion_percentage(109, 400), 27.2);
        assert_eq!(completion_percentage(1, 2000), 0.1);
        assert_eq!(completion_percentage(1, 3000), 0.0);
    }
}
