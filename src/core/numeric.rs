//! Lenient parsing of locale-formatted amounts
//!
//! `"12,345"` reads as 12345, `"(2,119,020)"` as -2119020, and `""` / `"-"`
//! as no value. Anything else that fails to parse also becomes no value.

use std::fmt;

use crate::types::{CellValue, NumericValue};

/// A non-blank token that did not survive normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparseableToken(pub String);

impl fmt::Display for UnparseableToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unparseable numeric token '{}'", self.0)
    }
}

/// Parse amount text
///
/// `Ok(None)` is a deliberate blank ("" or "-"), `Err` is text that is not
/// a number at all.
pub fn parse_messy_number(text: &str) -> Result<Option<f64>, UnparseableToken> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(None);
    }

    let negative = trimmed.starts_with('(') && trimmed.ends_with(')');
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | ','))
        .collect();

    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(if negative { -v } else { v })),
        _ => Err(UnparseableToken(trimmed.to_string())),
    }
}

/// Normalize a cell; never fails
pub fn normalize_numeric(cell: &CellValue) -> NumericValue {
    match cell {
        CellValue::Empty => NumericValue::Absent,
        CellValue::Number(n) => NumericValue::from(Some(*n)),
        CellValue::Text(s) => parse_messy_number(s).unwrap_or(None).into(),
    }
}

/// True when the cell holds text that is neither blank nor a number
pub fn is_unparseable(cell: &CellValue) -> bool {
    matches!(cell, CellValue::Text(s) if parse_messy_number(s).is_err())
}
