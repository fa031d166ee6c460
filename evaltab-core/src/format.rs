//! Number and text formatting for table cells.

use feruca::{Collator, Locale, Tailoring};
use std::cmp::Ordering;

/// Enough fractional digits to print any finite `f64` exactly.
const EXACT_DIGITS: usize = 1074;

/// Fixed-point rendering with `digits` decimals.
///
/// Exact ties round away from zero (`0.0625` -> `"0.063"`). A negative value
/// keeps its sign even when it rounds to zero (`-0.0001` -> `"-0.000"`);
/// negative zero itself prints unsigned.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let magnitude = value.abs();
    let mut out = format!("{:.*}", digits, magnitude);
    if is_tie(magnitude, digits) {
        out = round_up_tie(magnitude, digits);
    }
    if value < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// Whether `magnitude` lies exactly halfway between two `digits`-decimal
/// values.
fn is_tie(magnitude: f64, digits: usize) -> bool {
    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let exact = exact.trim_end_matches('0');
    match exact.split_once('.') {
        Some((_, frac)) => frac.len() == digits + 1 && frac.ends_with('5'),
        None => false,
    }
}

/// Truncate a tie to `digits` decimals and add one unit in the last place.
fn round_up_tie(magnitude: f64, digits: usize) -> String {
    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let keep = match exact.find('.') {
        Some(point) if digits > 0 => point + 1 + digits,
        Some(point) => point,
        None => exact.len(),
    };
    let mut bytes = exact.as_bytes()[..keep].to_vec();

    let mut i = bytes.len();
    loop {
        if i == 0 {
            bytes.insert(0, b'1');
            break;
        }
        i -= 1;
        match bytes[i] {
            b'.' => continue,
            b'9' => bytes[i] = b'0',
            d => {
                bytes[i] = d + 1;
                break;
            }
        }
    }
    String::from_utf8(bytes).unwrap_or_default()
}

/// Shortest decimal that reads back as `value` (`1`, `0.5`, `0.123`).
///
/// Always positional: large magnitudes are written out digit by digit and
/// never switch to exponent notation.
pub fn number_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Join a text list into one table cell.
pub fn join_texts(texts: &[String]) -> String {
    texts.join(", ")
}

/// Collator for legend entries: CLDR root order, tertiary strength,
/// non-ignorable punctuation.
///
/// Accents and case are secondary and tertiary differences, so `Éclair`
/// sorts among the `e`s and `a` comes before `A`.
pub fn legend_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// Alphabetical order for legend entries.
pub fn compare_texts(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b)
}

/// Sort a copy of `texts` alphabetically and join it.
pub fn sorted_texts(texts: &[String]) -> String {
    let mut collator = legend_collator();
    let mut sorted = texts.to_vec();
    sorted.sort_by(|a, b| compare_texts(&mut collator, a, b));
    join_texts(&sorted)
}
