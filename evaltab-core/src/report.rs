//! The report pipeline: symbol assignment, row building and sorting.
//!
//! [`ReportFormatter::build`] turns parsed records into a [`Report`], the
//! rendering-independent model both output variants are produced from. All
//! fallible work (palette, pool, assignment) happens here, so renderers never
//! fail halfway through their output.

use crate::config::{ClaimOrder, EvaltabConfig};
use crate::enumeration::{MethodLegend, StableEnumeration};
use crate::error::Result;
use crate::record::ResultRecord;
use crate::symbols::{GroupLegend, Polarity, Symbol, SymbolPool, SymbolRegistry};

/// One table row, built from one record.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub text_true: Vec<String>,
    pub text_false: Vec<String>,
    pub model_name: String,
    /// Number of the similarity method in the similarity legend.
    pub similarity_method: usize,
    /// Number of the score method in the score legend.
    pub score_method: usize,
    pub minus_similarity_weight: Option<f64>,
    pub positive_symbol: Symbol,
    pub negative_symbol: Symbol,
    pub roc_auc: f64,
    pub pr_auc: f64,
    pub tp: f64,
    pub fn_: f64,
    pub fp: f64,
    pub tn: f64,
}

/// Everything a renderer needs, in final order.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Claimed symbols, in claim order.
    pub symbols: Vec<Symbol>,
    /// Rows sorted by ascending ROC-AUC.
    pub rows: Vec<ReportRow>,
    pub positive_groups: Vec<GroupLegend>,
    pub negative_groups: Vec<GroupLegend>,
    pub similarity_methods: Vec<MethodLegend>,
    pub score_methods: Vec<MethodLegend>,
}

/// Builds [`Report`]s from result records.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    palette: Vec<String>,
    claim_order: ClaimOrder,
}

impl ReportFormatter {
    /// A formatter handing out one symbol per palette color.
    pub fn new(palette: Vec<String>) -> Self {
        Self {
            palette,
            claim_order: ClaimOrder::default(),
        }
    }

    pub fn with_claim_order(mut self, claim_order: ClaimOrder) -> Self {
        self.claim_order = claim_order;
        self
    }

    /// A formatter using the configured palette and claim order.
    pub fn from_config(config: &EvaltabConfig) -> Result<Self> {
        let palette = config.palette.colors()?;
        Ok(Self::new(palette).with_claim_order(config.symbols.claim_order))
    }

    /// Assign symbols and method numbers, format and sort rows.
    pub fn build(&self, records: &[ResultRecord]) -> Result<Report> {
        let mut registry = SymbolRegistry::new(SymbolPool::new(&self.palette)?);
        let mut similarity = StableEnumeration::<String>::new();
        let mut score = StableEnumeration::<String>::new();

        if self.claim_order == ClaimOrder::PrePass {
            for record in records {
                registry.claim(&record.text_true, Polarity::Positive)?;
            }
            for record in records {
                registry.claim(&record.text_false, Polarity::Negative)?;
            }
        }

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let similarity_method =
                number_method(&mut similarity, "similarity", &record.method.similarity);
            let score_method = number_method(&mut score, "score", &record.method.y_score);
            let positive_symbol = registry
                .claim(&record.text_true, Polarity::Positive)?
                .clone();
            let negative_symbol = registry
                .claim(&record.text_false, Polarity::Negative)?
                .clone();

            rows.push(ReportRow {
                text_true: record.text_true.clone(),
                text_false: record.text_false.clone(),
                model_name: record.model_name.clone(),
                similarity_method,
                score_method,
                minus_similarity_weight: record.method.minus_similarity_weight,
                positive_symbol,
                negative_symbol,
                roc_auc: record.roc_auc,
                pr_auc: record.pr_auc,
                tp: record.tp,
                fn_: record.fn_,
                fp: record.fp,
                tn: record.tn,
            });
        }

        // Stable, so equal scores keep record order.
        rows.sort_by(|a, b| a.roc_auc.total_cmp(&b.roc_auc));

        tracing::info!(
            rows = rows.len(),
            symbols = registry.len(),
            similarity_methods = similarity.len(),
            score_methods = score.len(),
            claim_order = %self.claim_order,
            "Built report"
        );

        Ok(Report {
            symbols: registry.symbols().cloned().collect(),
            rows,
            positive_groups: registry.legend(Polarity::Positive).cloned().collect(),
            negative_groups: registry.legend(Polarity::Negative).cloned().collect(),
            similarity_methods: similarity.legend(),
            score_methods: score.legend(),
        })
    }
}

fn number_method(methods: &mut StableEnumeration<String>, kind: &str, name: &str) -> usize {
    let known = methods.len();
    let num = methods.number(name);
    if methods.len() > known {
        tracing::debug!(kind, method = name, num, "Numbered method");
    }
    num
}
