//! xcstrings-tool - localization coverage auditor for Xcode String Catalogs.
//!
//! A String Catalog (`.xcstrings`) maps every source string of an app to its
//! per-language translations, each carrying a review state. This crate loads
//! a catalog, checks it against the schema, and reports how much of it is
//! translated for a given language.
//!
//! # Architecture
//!
//! - `catalog`: typed model of the catalog file
//! - `parser`: file loading and schema validation
//! - `analyzer`: per-entry classification and coverage statistics
//! - `gate`: completion threshold check used for exit codes
//! - `report`: output formatting (console, JSON, CSV, Markdown, export)
//! - `config`: optional YAML defaults for the CLI
//!
//! # Example
//!
//! ```no_run
//! let (catalog, entries) = xcstrings_tool::parse_file("Localizable.xcstrings")?;
//! let result = xcstrings_tool::analyze(&catalog, &entries, "de");
//! println!("{:.1}% translated", result.completion_percentage);
//! # Ok::<(), xcstrings_tool::ParseError>(())
//! ```

pub mod analyzer;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod gate;
pub mod parser;
pub mod report;

pub use analyzer::{analyze, classify, AnalysisResult, Classification};
pub use catalog::{
    ExtractionState, Localization, LocalizationState, StringCatalog, StringEntry, StringUnit,
};
pub use config::Config;
pub use error::ParseError;
pub use gate::GateOutcome;
pub use parser::{parse_file, parse_str, validate};
pub use report::OutputFormat;
