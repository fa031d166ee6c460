//! Input records: one evaluated model/method/text-set combination each.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{InputError, Result};

/// Scoring method used to produce a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Name of the similarity function (e.g. `dot_product`).
    pub similarity: String,
    /// Name of the score reduction applied to similarities.
    pub y_score: String,
    /// Weight subtracted for negative-text similarity, when the method uses one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minus_similarity_weight: Option<f64>,
}

/// A single evaluation result as written by the experiment runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub text_true: Vec<String>,
    pub text_false: Vec<String>,
    pub model_name: String,
    pub method: Method,
    pub roc_auc: f64,
    pub pr_auc: f64,
    #[serde(rename = "TP")]
    pub tp: f64,
    #[serde(rename = "FN")]
    pub fn_: f64,
    #[serde(rename = "FP")]
    pub fp: f64,
    #[serde(rename = "TN")]
    pub tn: f64,
}

/// Parse a JSON array of result records from a string.
pub fn parse_records(json: &str) -> serde_json::Result<Vec<ResultRecord>> {
    serde_json::from_str(json)
}

/// Read and parse a results file.
pub fn load_records(path: &Path) -> Result<Vec<ResultRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            InputError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            InputError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let records = parse_records(&content).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), count = records.len(), "Loaded result records");
    Ok(records)
}
