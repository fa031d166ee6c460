//! Property-based tests for report building using proptest.

use std::collections::HashMap;

use proptest::prelude::*;

use evaltab_core::digest::grouping_hash;
use evaltab_core::enumeration::StableEnumeration;
use evaltab_core::format::to_fixed;
use evaltab_core::{EvaltabConfig, Method, ReportFormatter, ResultRecord};

fn record(positive: usize, negative: usize, roc_auc: f64) -> ResultRecord {
    ResultRecord {
        text_true: vec![format!("p{positive}")],
        // group 0 is the empty negative set
        text_false: (0..negative).map(|i| format!("n{i}")).collect(),
        model_name: "M".to_string(),
        method: Method {
            similarity: "cos".to_string(),
            y_score: "s1".to_string(),
            minus_similarity_weight: None,
        },
        roc_auc,
        pr_auc: 0.5,
        tp: 1.0,
        fn_: 0.0,
        fp: 0.0,
        tn: 1.0,
    }
}

// At most 5 positive and 5 negative groupings, so the pool never runs dry.
fn records() -> impl Strategy<Value = Vec<ResultRecord>> {
    prop::collection::vec((0usize..5, 0usize..5, 0.0f64..1.0), 0..30)
        .prop_map(|specs| specs.into_iter().map(|(p, n, roc)| record(p, n, roc)).collect())
}

fn formatter() -> ReportFormatter {
    ReportFormatter::from_config(&EvaltabConfig::default()).unwrap()
}

// --- Report properties ---

proptest! {
    #[test]
    fn rows_are_sorted_by_roc_auc(records in records()) {
        let report = formatter().build(&records).unwrap();
        prop_assert_eq!(report.rows.len(), records.len());
        prop_assert!(report.rows.windows(2).all(|w| w[0].roc_auc <= w[1].roc_auc));
    }

    #[test]
    fn equal_groupings_share_a_symbol(records in records()) {
        let report = formatter().build(&records).unwrap();
        let mut seen: HashMap<Vec<String>, usize> = HashMap::new();
        for row in &report.rows {
            for (texts, symbol) in [
                (&row.text_true, &row.positive_symbol),
                (&row.text_false, &row.negative_symbol),
            ] {
                let index = *seen.entry(texts.clone()).or_insert(symbol.index);
                prop_assert_eq!(index, symbol.index);
            }
        }
        // one symbol per distinct grouping, none wasted
        prop_assert_eq!(seen.len(), report.symbols.len());
    }

    #[test]
    fn positives_claim_the_first_symbols(records in records()) {
        let report = formatter().build(&records).unwrap();
        let mut first_seen: Vec<&Vec<String>> = Vec::new();
        for record in &records {
            if !first_seen.contains(&&record.text_true) {
                first_seen.push(&record.text_true);
            }
        }
        let legend: Vec<_> = report.positive_groups.iter().map(|g| &g.texts).collect();
        prop_assert_eq!(legend, first_seen);
        for (i, group) in report.positive_groups.iter().enumerate() {
            prop_assert_eq!(group.symbol.index, i + 1);
        }
    }

    #[test]
    fn symbol_indices_are_contiguous(records in records()) {
        let report = formatter().build(&records).unwrap();
        let indices: Vec<_> = report.symbols.iter().map(|s| s.index).collect();
        let expected: Vec<_> = (1..=report.symbols.len()).collect();
        prop_assert_eq!(indices, expected);
    }
}

// --- Formatting properties ---

proptest! {
    #[test]
    fn to_fixed_has_requested_digits(value in -1000.0f64..1000.0, digits in 0usize..7) {
        let text = to_fixed(value, digits);
        match text.split_once('.') {
            Some((_, fraction)) => prop_assert_eq!(fraction.len(), digits),
            None => prop_assert_eq!(digits, 0),
        }
    }

    #[test]
    fn to_fixed_is_within_half_a_unit(value in -1000.0f64..1000.0, digits in 0usize..7) {
        let parsed: f64 = to_fixed(value, digits).parse().unwrap();
        let half_unit = 0.5 * 10f64.powi(-(digits as i32));
        prop_assert!((parsed - value).abs() <= half_unit + 1e-9);
    }

    #[test]
    fn to_fixed_keeps_sign_when_rounding_to_zero(value in -0.0004f64..-1e-12) {
        prop_assert_eq!(to_fixed(value, 3), "-0.000");
    }
}

// --- Identity properties ---

proptest! {
    #[test]
    fn grouping_hash_is_stable_hex(texts in prop::collection::vec("[a-zA-Z ]{0,12}", 0..6)) {
        let hash = grouping_hash(&texts);
        prop_assert_eq!(hash.len(), 64);
        prop_assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        prop_assert_eq!(hash, grouping_hash(&texts.clone()));
    }

    #[test]
    fn enumeration_numbers_first_seen_from_one(names in prop::collection::vec("[a-d]", 0..20)) {
        let mut enumeration = StableEnumeration::<String>::new();
        let numbers: Vec<_> = names.iter().map(|n| enumeration.number(n.as_str())).collect();

        let mut distinct: Vec<&String> = Vec::new();
        for (name, number) in names.iter().zip(&numbers) {
            match distinct.iter().position(|d| *d == name) {
                Some(pos) => prop_assert_eq!(*number, pos + 1),
                None => {
                    distinct.push(name);
                    prop_assert_eq!(*number, distinct.len());
                }
            }
        }
        prop_assert_eq!(enumeration.len(), distinct.len());
    }
}
