//! Structured JSON rendering of a [`Report`].
//!
//! The document is meant to be fed to a LaTeX templating step, so every
//! table cell is already a formatted string.

use serde::{Deserialize, Serialize};

use crate::enumeration::MethodLegend;
use crate::error::Result;
use crate::format::{join_texts, number_string, sorted_texts, to_fixed};
use crate::report::{Report, ReportRow};
use crate::symbols::GroupLegend;

/// Legend text for a negative grouping with no members.
pub const EMPTY_SET: &str = "$\\emptyset$";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorDefinition {
    pub color_def: String,
    pub color_hex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolCommand {
    pub command: String,
    pub index: usize,
    pub properties: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRow {
    pub true_texts: String,
    pub false_texts: String,
    pub model_name: String,
    pub simi_method: usize,
    pub score_method: usize,
    pub method_weight: String,
    pub positive_symbol: String,
    pub negative_symbol: String,
    pub roc_auc_score: String,
    pub pr_auc_score: String,
    #[serde(rename = "TP")]
    pub tp: String,
    #[serde(rename = "FN")]
    pub fn_: String,
    #[serde(rename = "FP")]
    pub fp: String,
    #[serde(rename = "TN")]
    pub tn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextsSymbol {
    pub command: String,
    pub texts: String,
}

/// The full structured document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredReport {
    pub colors_definitions: Vec<ColorDefinition>,
    pub symbols_commands: Vec<SymbolCommand>,
    pub rows: Vec<StructuredRow>,
    pub positive_texts_symbols: Vec<TextsSymbol>,
    pub negative_texts_symbols: Vec<TextsSymbol>,
    pub simi_methods: Vec<MethodLegend>,
    pub score_methods: Vec<MethodLegend>,
}

impl From<&ReportRow> for StructuredRow {
    fn from(row: &ReportRow) -> Self {
        Self {
            true_texts: join_texts(&row.text_true),
            false_texts: join_texts(&row.text_false),
            model_name: row.model_name.clone(),
            simi_method: row.similarity_method,
            score_method: row.score_method,
            method_weight: row
                .minus_similarity_weight
                .map(|w| to_fixed(w, 4))
                .unwrap_or_default(),
            positive_symbol: row.positive_symbol.command().to_string(),
            negative_symbol: row.negative_symbol.command().to_string(),
            roc_auc_score: to_fixed(row.roc_auc, 3),
            pr_auc_score: to_fixed(row.pr_auc, 3),
            tp: number_string(row.tp),
            fn_: number_string(row.fn_),
            fp: number_string(row.fp),
            tn: number_string(row.tn),
        }
    }
}

fn texts_symbol(group: &GroupLegend, empty_marker: Option<&str>) -> TextsSymbol {
    let texts = match empty_marker {
        Some(marker) if group.texts.is_empty() => marker.to_string(),
        _ => sorted_texts(&group.texts),
    };
    TextsSymbol {
        command: group.symbol.command().to_string(),
        texts,
    }
}

impl From<&Report> for StructuredReport {
    fn from(report: &Report) -> Self {
        Self {
            colors_definitions: report
                .symbols
                .iter()
                .map(|s| ColorDefinition {
                    color_def: s.kind.color_def.to_string(),
                    color_hex: s.color_hex.clone(),
                })
                .collect(),
            symbols_commands: report
                .symbols
                .iter()
                .map(|s| SymbolCommand {
                    command: s.command().to_string(),
                    index: s.index,
                    properties: s.kind.properties.to_string(),
                })
                .collect(),
            rows: report.rows.iter().map(StructuredRow::from).collect(),
            positive_texts_symbols: report
                .positive_groups
                .iter()
                .map(|g| texts_symbol(g, None))
                .collect(),
            negative_texts_symbols: report
                .negative_groups
                .iter()
                .map(|g| texts_symbol(g, Some(EMPTY_SET)))
                .collect(),
            simi_methods: report.similarity_methods.clone(),
            score_methods: report.score_methods.clone(),
        }
    }
}

/// Serialize `report` as pretty JSON indented by `indent` spaces.
pub fn render_json(report: &Report, indent: usize) -> Result<String> {
    let document = StructuredReport::from(report);
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
