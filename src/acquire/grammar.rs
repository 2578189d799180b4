//! Line grammar for oracle replies.
//!
//! A reply is a sequence of lines; a record is a line of `:`-separated fields. Whitespace padding
//! around lines and fields is not content. Nothing in this module panics on arbitrary input.

/// Lines shorter than this (after trimming) are noise and skipped.
pub const MIN_LINE_LEN: usize = 2;

/// Field separator within a record line.
pub const FIELD_SEP: char = ':';

/// A grammar violation, tagged with the 1-based line it occurred on.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GrammarError {
    /// A record had the wrong number of fields.
    #[error("line {line}: expected {expected} fields, found {found} in '{text}'")]
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// Required field count.
        expected: usize,
        /// Actual field count.
        found: usize,
        /// Offending line.
        text: String,
    },

    /// A field that must be a number was not one.
    #[error("line {line}: '{token}' is not a finite number")]
    NotNumeric {
        /// 1-based line number.
        line: usize,
        /// Offending field.
        token: String,
    },
}

/// Iterate the record lines of `text` as `(line_number, trimmed_line)`.
pub fn record_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| l.chars().count() >= MIN_LINE_LEN)
}

/// Iterate every line of `text` as `(line_number, trimmed_line)`, blank ones included.
pub fn all_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()))
}

/// Split a record into exactly `expected` trimmed fields.
pub fn split_fields(line_no: usize, line: &str, expected: usize) -> Result<Vec<&str>, GrammarError> {
    let fields: Vec<&str> = line.split(FIELD_SEP).map(str::trim).collect();
    if fields.len() != expected {
        return Err(GrammarError::FieldCount {
            line: line_no,
            expected,
            found: fields.len(),
            text: line.to_string(),
        });
    }
    Ok(fields)
}

/// Parse a decimal number, ignoring `,` thousands separators and surrounding whitespace.
///
/// `NaN` and infinities are rejected even though `f64::from_str` accepts their spellings.
pub fn parse_number(line_no: usize, token: &str) -> Result<f64, GrammarError> {
    let cleaned: String = token.chars().filter(|c| *c != ',').collect();
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(GrammarError::NotNumeric {
            line: line_no,
            token: token.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/acquire/grammar.rs"]
mod tests;
