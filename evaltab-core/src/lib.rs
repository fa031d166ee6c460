//! # evaltab core
//!
//! Turns a JSON array of model-evaluation results into material for a paper:
//! color and symbol definitions for every distinct set of query texts, method
//! legends, and one formatted table row per result, sorted by ROC-AUC.
//! The report renders either as a structured JSON document or as LaTeX.

pub mod config;
pub mod digest;
pub mod enumeration;
pub mod error;
pub mod format;
pub mod latex;
pub mod palette;
pub mod record;
pub mod report;
pub mod structured;
pub mod symbols;

use std::path::Path;

// Re-export commonly used types at the crate root.
pub use config::{ClaimOrder, EvaltabConfig, OutputFormat, config_exists, load_config};
pub use error::{EvaltabError, Result};
pub use record::{Method, ResultRecord, load_records, parse_records};
pub use report::{Report, ReportFormatter, ReportRow};
pub use symbols::{Polarity, SYMBOL_KINDS, Symbol, SymbolPool, SymbolRegistry};

/// Build and render a report for `records` in the configured output format.
///
/// The returned string is complete; nothing is rendered if any step fails.
pub fn render(records: &[ResultRecord], config: &EvaltabConfig) -> Result<String> {
    let report = ReportFormatter::from_config(config)?.build(records)?;
    match config.output.format {
        OutputFormat::Json => structured::render_json(&report, config.output.indent),
        OutputFormat::Latex => Ok(latex::render_latex(&report, &config.latex)),
    }
}

/// Load a results file and render it.
pub fn render_file(path: &Path, config: &EvaltabConfig) -> Result<String> {
    let records = load_records(path)?;
    render(&records, config)
}
