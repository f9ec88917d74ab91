//! Output formatting for analysis results.
//!
//! Supports four output formats:
//! - Console: colored terminal summary for human readability
//! - JSON: structured output for programmatic consumption
//! - CSV: one row per entry that needs work, for spreadsheets and translators
//! - Markdown: summary table plus detail sections, for PR comments and wikis
//!
//! File formats are written as `localization_report.<ext>` into an output
//! directory. The single-language export is a separate CSV aimed at
//! translators.

use anyhow::Context;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::{AnalysisResult, Classification};
use crate::catalog::{StringCatalog, StringEntry};
use crate::gate::GateOutcome;

/// Base file name for report files.
pub const REPORT_BASENAME: &str = "localization_report";

/// Report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Console => "console",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Markdown => "markdown",
        }
    }

    /// File extension for file-based formats; `None` for console.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Console => None,
            OutputFormat::Json => Some("json"),
            OutputFormat::Csv => Some("csv"),
            OutputFormat::Markdown => Some("md"),
        }
    }

    /// Path of the report file for this format inside `dir`.
    pub fn report_path(&self, dir: &Path) -> Option<PathBuf> {
        self.extension()
            .map(|ext| dir.join(format!("{}.{}", REPORT_BASENAME, ext)))
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "invalid format {:?}, must be 'console', 'json', 'csv', or 'markdown'",
                s
            )),
        }
    }
}

/// Write every file-based report in `formats` into `dir`, creating it if
/// needed. Returns the paths written, in the order given.
pub fn write_reports(
    formats: &[OutputFormat],
    dir: &Path,
    catalog_path: &str,
    result: &AnalysisResult,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for format in formats {
        let path = match format.report_path(dir) {
            Some(p) if !written.contains(&p) => p,
            _ => continue,
        };

        let content = match format {
            OutputFormat::Json => render_json(catalog_path, result)?,
            OutputFormat::Csv => render_csv(result)?,
            OutputFormat::Markdown => render_markdown(catalog_path, result),
            OutputFormat::Console => continue,
        };

        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;

        fs::write(&path, content)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        tracing::info!(format = %format, path = %path.display(), "wrote report");
        written.push(path);
    }

    Ok(written)
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub catalog: String,
    pub source_language: String,
    pub target_language: String,
    pub total_strings: usize,
    pub translated: usize,
    pub missing_translation: usize,
    pub needs_review: usize,
    pub stale: usize,
    pub completion_percentage: f64,
    pub missing_entries: Vec<JsonEntry>,
    pub needs_review_entries: Vec<JsonEntry>,
    pub stale_entries: Vec<JsonEntry>,
}

/// One entry as seen from the target language.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEntry {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_state: Option<String>,
    /// Target-language state, absent when there is no localization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl JsonEntry {
    fn from_entry(entry: &StringEntry, target_language: &str) -> Self {
        let localization = entry.localization(target_language);
        JsonEntry {
            key: entry.key.clone(),
            comment: entry.comment.clone(),
            extraction_state: entry.extraction_state.map(|s| s.as_str().to_string()),
            state: localization.map(|l| l.raw_state().to_string()),
            value: localization.map(|l| l.value().to_string()),
        }
    }
}

/// Build the JSON report structure for a result.
pub fn build_json_report(catalog_path: &str, result: &AnalysisResult) -> JsonReport {
    let convert = |entries: &[StringEntry]| -> Vec<JsonEntry> {
        entries
            .iter()
            .map(|e| JsonEntry::from_entry(e, &result.target_language))
            .collect()
    };

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog: catalog_path.to_string(),
        source_language: result.source_language.clone(),
        target_language: result.target_language.clone(),
        total_strings: result.total_strings,
        translated: result.translated,
        missing_translation: result.missing_translation,
        needs_review: result.needs_review,
        stale: result.stale,
        completion_percentage: result.completion_percentage,
        missing_entries: convert(&result.missing_entries),
        needs_review_entries: convert(&result.needs_review_entries),
        stale_entries: convert(&result.stale_entries),
    }
}

/// Render the JSON report as pretty-printed text.
pub fn render_json(catalog_path: &str, result: &AnalysisResult) -> anyhow::Result<String> {
    let report = build_json_report(catalog_path, result);
    Ok(serde_json::to_string_pretty(&report)?)
}

// =============================================================================
// CSV Format
// =============================================================================

const CSV_HEADER: [&str; 5] = ["key", "status", "state", "value", "comment"];

/// Render one row per entry that needs work: missing, then needs review,
/// then stale.
pub fn render_csv(result: &AnalysisResult) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for (classification, entry) in result.flagged_entries() {
        let localization = entry.localization(&result.target_language);
        writer.write_record([
            entry.key.as_str(),
            classification.as_str(),
            localization.map(|l| l.raw_state()).unwrap_or(""),
            localization.map(|l| l.value()).unwrap_or(""),
            entry.comment.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(String::from_utf8(bytes)?)
}

// =============================================================================
// Markdown Format
// =============================================================================

/// Render a Markdown report.
pub fn render_markdown(catalog_path: &str, result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Localization Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "- **Catalog:** `{}`", catalog_path);
    let _ = writeln!(out, "- **Source language:** {}", result.source_language);
    let _ = writeln!(out, "- **Target language:** {}", result.target_language);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Summary Statistics");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Metric | Count |");
    let _ = writeln!(out, "|--------|------:|");
    let _ = writeln!(out, "| Total strings | {} |", result.total_strings);
    let _ = writeln!(out, "| Translated | {} |", result.translated);
    let _ = writeln!(out, "| Missing translation | {} |", result.missing_translation);
    let _ = writeln!(out, "| Needs review | {} |", result.needs_review);
    let _ = writeln!(out, "| Stale | {} |", result.stale);
    let _ = writeln!(
        out,
        "| **Completion** | **{:.1}%** |",
        result.completion_percentage
    );

    let sections = [
        ("Missing Translations", &result.missing_entries),
        ("Needs Review", &result.needs_review_entries),
        ("Stale", &result.stale_entries),
    ];

    for (title, entries) in sections {
        if entries.is_empty() {
            continue;
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "## {} ({})", title, entries.len());
        let _ = writeln!(out);
        let _ = writeln!(out, "| Key | Current value | Comment |");
        let _ = writeln!(out, "|-----|---------------|---------|");
        for entry in entries.iter() {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                markdown_code_cell(&entry.key),
                escape_markdown_cell(entry.value_for(&result.target_language).unwrap_or("")),
                escape_markdown_cell(entry.comment.as_deref().unwrap_or("")),
            );
        }
    }

    out
}

fn escape_markdown_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Wrap `text` in a code span whose fence is longer than any backtick run
/// inside it.
fn markdown_code_cell(text: &str) -> String {
    let text = escape_markdown_cell(text);
    let longest_run = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{0} {1} {0}", fence, text)
    } else {
        format!("{0}{1}{0}", fence, text)
    }
}

// =============================================================================
// Single-language export
// =============================================================================

const EXPORT_HEADER: [&str; 4] = ["key", "status", "source_comment", "current_value"];

/// Write the entries a translator has to look at (missing and needs review)
/// to a CSV file. Returns the number of rows written.
pub fn export_entries(result: &AnalysisResult, path: &Path) -> anyhow::Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(EXPORT_HEADER)?;

    let mut rows = 0;
    for (classification, entry) in result.flagged_entries() {
        if classification == Classification::Stale {
            continue;
        }
        writer.write_record([
            entry.key.as_str(),
            classification.as_str(),
            entry.comment.as_deref().unwrap_or(""),
            entry.value_for(&result.target_language).unwrap_or(""),
        ])?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}

// =============================================================================
// Console Format
// =============================================================================

/// Write results in console (human-readable) format.
pub fn write_pretty(catalog_path: &str, result: &AnalysisResult, limit: usize) {
    write_header();

    print!("  {}", "Catalog:  ".dimmed());
    println!("{}", catalog_path);
    print!("  {}", "Languages: ".dimmed());
    println!("{} → {}", result.source_language, result.target_language);
    println!();

    println!("  {}", "Summary Statistics".bold());
    println!();
    println!("    {:<22} {:>6}", "Total strings", result.total_strings);
    println!(
        "    {:<22} {:>6}",
        "Translated",
        result.translated.to_string().green()
    );
    println!(
        "    {:<22} {:>6}",
        "Missing translation",
        colored_count(result.missing_translation, Color::Red)
    );
    println!(
        "    {:<22} {:>6}",
        "Needs review",
        colored_count(result.needs_review, Color::Yellow)
    );
    println!(
        "    {:<22} {:>6}",
        "Stale",
        colored_count(result.stale, Color::Yellow)
    );
    print!("    {:<22} ", "Completion");
    write_colored_percentage(result.completion_percentage);
    println!();
    println!();

    write_entry_list("Missing translations", &result.missing_entries, limit);
    write_entry_list("Needs review", &result.needs_review_entries, limit);
    write_entry_list("Stale", &result.stale_entries, limit);
}

/// Write the threshold verdict line.
pub fn write_gate(outcome: &GateOutcome) {
    if outcome.passed {
        println!("  {} {}", "✓".green(), outcome.message().green());
    } else {
        println!("  {} {}", "✗".red(), outcome.message().red());
    }
    println!();
}

/// Write the catalog overview used by the `stats` command.
pub fn write_stats(catalog_path: &str, catalog: &StringCatalog, per_language: &[AnalysisResult]) {
    write_header();

    println!("  {}", "String Catalog Statistics".bold());
    println!();
    println!("    {:<18} {}", "File", catalog_path);
    println!("    {:<18} {}", "Source Language", catalog.source_language);
    println!("    {:<18} {}", "Version", catalog.version);
    println!("    {:<18} {}", "Total Strings", catalog.len());
    println!("    {:<18} {}", "Languages", per_language.len());
    println!();

    if per_language.is_empty() {
        println!("    {}", "(no localizations)".dimmed());
        println!();
        return;
    }

    println!(
        "    {:<12} {:>10} {:>8} {:>8} {:>6} {:>10}",
        "Language", "Translated", "Missing", "Review", "Stale", "Complete"
    );
    for result in per_language {
        let marker = if result.target_language == catalog.source_language {
            " (source)"
        } else {
            ""
        };
        print!(
            "    {:<12} {:>10} {:>8} {:>8} {:>6}     ",
            format!("{}{}", result.target_language, marker),
            result.translated,
            result.missing_translation,
            result.needs_review,
            result.stale
        );
        write_colored_percentage(result.completion_percentage);
        println!();
    }
    println!();
}

fn write_header() {
    println!();
    print!("  ");
    print!("{}", "xcstrings-tool".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
}

fn colored_count(count: usize, color: Color) -> ColoredString {
    if count == 0 {
        count.to_string().normal()
    } else {
        count.to_string().color(color)
    }
}

fn write_colored_percentage(p: f64) {
    let text = format!("{:.1}%", p);
    match p {
        p if p >= 100.0 => print!("{}", text.green().bold()),
        p if p >= 90.0 => print!("{}", text.green()),
        p if p >= 50.0 => print!("{}", text.yellow()),
        _ => print!("{}", text.red()),
    }
}

fn write_entry_list(title: &str, entries: &[StringEntry], limit: usize) {
    if entries.is_empty() {
        return;
    }

    println!("  {} ({}):", title.bold(), entries.len());
    for entry in entries.iter().take(limit) {
        print!("    {}", entry.key.blue());
        if let Some(comment) = &entry.comment {
            print!("  {}", comment.dimmed());
        }
        println!();
    }
    if entries.len() > limit {
        println!(
            "    {}",
            format!("... and {} more", entries.len() - limit).dimmed()
        );
    }
    println!();
}
