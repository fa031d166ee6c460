//! LaTeX rendering of a [`Report`]: symbol macros followed by table rows.

use std::fmt::Write;

use crate::config::LatexConfig;
use crate::format::{join_texts, number_string, to_fixed};
use crate::report::{Report, ReportRow};
use crate::symbols::Symbol;

const ROW_END: &str = " \\\\";

/// Escape characters with special meaning in LaTeX text.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// `\newcommand` drawing `symbol` as a filled TikZ node.
pub fn symbol_macro(symbol: &Symbol, fill: &str) -> String {
    format!(
        "\\newcommand{{\\{}}}{{\\tikz[baseline=-0.6ex]\\node[{}, draw, fill={}, inner sep=0pt, minimum size=0.8em] {{}};}}",
        symbol.command(),
        symbol.kind.shape,
        fill
    )
}

fn method_label(prefix: &str, num: usize) -> String {
    format!("${prefix}_{{{num}}}$")
}

// Comments end at the line break, so texts must stay on one line.
fn comment_line(label: &str, texts: &[String]) -> String {
    let texts = join_texts(texts).replace(['\n', '\r'], " ");
    format!("% {label}: {texts}").trim_end().to_string()
}

fn row_block(row: &ReportRow, config: &LatexConfig) -> String {
    let weight = row
        .minus_similarity_weight
        .map(|w| to_fixed(w, 4))
        .unwrap_or_default();
    let cells = [
        format!("\\{}", row.positive_symbol.command()),
        format!("\\{}", row.negative_symbol.command()),
        escape_latex(&row.model_name),
        method_label(&config.similarity_prefix, row.similarity_method),
        method_label(&config.score_prefix, row.score_method),
        weight,
        number_string(row.roc_auc),
        number_string(row.pr_auc),
        number_string(row.tp),
        number_string(row.fn_),
        number_string(row.fp),
        number_string(row.tn),
    ];

    let mut block = String::new();
    let _ = writeln!(block, "{}", comment_line("true", &row.text_true));
    let _ = writeln!(block, "{}", comment_line("false", &row.text_false));
    block.push_str(&cells.join(" & "));
    block
}

/// Render macro definitions and table rows.
pub fn render_latex(report: &Report, config: &LatexConfig) -> String {
    let mut out = String::new();
    for symbol in &report.symbols {
        out.push_str(&symbol_macro(symbol, &config.symbol_fill));
        out.push('\n');
    }

    if !report.rows.is_empty() {
        out.push('\n');
        let blocks: Vec<_> = report
            .rows
            .iter()
            .map(|row| row_block(row, config))
            .collect();
        out.push_str(&blocks.join(&format!("{ROW_END}\n")));
        out.push_str(ROW_END);
        out.push('\n');
    }
    out
}
