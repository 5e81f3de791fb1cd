//! Fixed vocabularies shared by the extraction stages
//!
//! Everything here is built once on first use and never changes afterwards.

use once_cell::sync::Lazy;
use regex::Regex;

/// Three-letter month abbreviations in calendar order
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Keywords that mark an aggregate line anywhere in its text
pub const SUBTOTAL_KEYWORDS: [&str; 3] = ["Gross Profit", "EBITDA", "Net Income"];

/// Prefix that marks an aggregate line
pub const SUBTOTAL_PREFIX: &str = "Total";

/// Normalized aliases of the account-code column
pub const ACCOUNT_ALIASES: [&str; 1] = ["account"];

/// Normalized aliases of the line-item column
pub const LINE_ITEM_ALIASES: [&str; 2] = ["lineitem", "lineitems"];

pub(crate) static SHEET_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(actual|budget)\s+P&L\s+(\d{4})$").expect("valid sheet pattern")
});

pub(crate) static ACCOUNT_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3,6}$").expect("valid account pattern"));

pub(crate) static SUBTOTAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let keywords: Vec<String> = SUBTOTAL_KEYWORDS.iter().map(|k| regex::escape(k)).collect();
    Regex::new(&format!(
        "(?i)^{}|{}",
        regex::escape(SUBTOTAL_PREFIX),
        keywords.join("|")
    ))
    .expect("valid subtotal pattern")
});

/// Calendar month number (1-12) of a three-letter abbreviation, any case
pub fn month_number(label: &str) -> Option<u32> {
    let label = label.trim();
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(label))
        .map(|i| i as u32 + 1)
}

/// Lower-cased label with every space removed, for alias matching
pub fn alias_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
