//! Parsing of string-encoded element contents.
//!
//! Catalog data writes percentages several ways: plain numbers (`"0.5"`),
//! ranges (`"18.0-20.0"`, `"16–18"`), bounds (`"≤0.08"`, `">=10.5"`) and
//! placeholders (`"-"`, `"—"`). Everything funnels through
//! [`parse_element_value`].

/// Markers that mean "not specified".
const PLACEHOLDERS: &[&str] = &["", "-", "—", "–", "－", "/", "n/a", "na"];

/// Characters that separate the two ends of a range.
const RANGE_SEPARATORS: &[char] = &['-', '–', '—', '~', '～', '－'];

/// Characters that prefix a one-sided bound.
const BOUND_PREFIXES: &[char] = &['≤', '≥', '<', '>', '＜', '＞', '='];

/// Parse one element value. Returns `None` for placeholders and for text with
/// no number in it.
///
/// - numeric literal -> itself
/// - range `a-b` -> (a + b) / 2
/// - bound `≤x`, `≥x`, `<x`, `>x` -> x
/// - anything else -> first numeric token
pub fn parse_element_value(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if is_placeholder(text) {
        return None;
    }

    if let Ok(value) = text.parse::<f64>() {
        return value.is_finite().then_some(value.max(0.0));
    }

    if text.starts_with(BOUND_PREFIXES) {
        return first_number(text.trim_start_matches(BOUND_PREFIXES));
    }

    if let Some((low, high)) = split_range(text) {
        return Some((low + high) / 2.0);
    }

    first_number(text)
}

fn is_placeholder(text: &str) -> bool {
    PLACEHOLDERS.iter().any(|p| text.eq_ignore_ascii_case(p))
}

/// Split `a-b` into its two numeric ends. The separator must sit between two
/// numbers, so `"-5"` or `"10-"` are not ranges.
fn split_range(text: &str) -> Option<(f64, f64)> {
    let (start, sep) = text
        .char_indices()
        .skip(1)
        .find(|(_, c)| RANGE_SEPARATORS.contains(c))?;
    let (left, right) = (&text[..start], &text[start + sep.len_utf8()..]);
    Some((first_number(left)?, first_number(right)?))
}

/// First unsigned decimal token in `text`, e.g. `"Cr 18.5 %"` -> 18.5.
/// A token may open with a dot when a digit follows it (`".045"`).
fn first_number(text: &str) -> Option<f64> {
    let (begin, _) = text.char_indices().find(|&(i, c)| {
        c.is_ascii_digit() || (c == '.' && text[i + 1..].starts_with(|d: char| d.is_ascii_digit()))
    })?;
    let tail = &text[begin..];
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in tail.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }
    tail[..end].parse::<f64>().ok()
}
