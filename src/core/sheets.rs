//! Picks the P&L sheets out of a workbook by name

use serde::Serialize;

use super::lexicon::SHEET_NAME_PATTERN;
use crate::types::Scenario;

/// A sheet whose name follows `<Scenario> P&L <Year>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedSheet {
    /// Name exactly as it appears in the workbook
    pub sheet_name: String,
    pub scenario: Scenario,
    pub year: i32,
}

/// Parse one sheet name, `None` when it is not a P&L sheet
pub fn parse_sheet_name(name: &str) -> Option<SelectedSheet> {
    let caps = SHEET_NAME_PATTERN.captures(name.trim())?;
    let scenario = Scenario::from_label(&caps[1])?;
    let year = caps[2].parse().ok()?;
    Some(SelectedSheet {
        sheet_name: name.to_string(),
        scenario,
        year,
    })
}

/// Keep the names that match, in workbook order
pub fn select_pnl_sheets<S: AsRef<str>>(sheet_names: &[S]) -> Vec<SelectedSheet> {
    sheet_names
        .iter()
        .filter_map(|name| parse_sheet_name(name.as_ref()))
        .collect()
}

/// Like [`select_pnl_sheets`], minus any name on the skip list (compared after trimming)
pub fn select_pnl_sheets_except<S: AsRef<str>>(
    sheet_names: &[S],
    skip: &[String],
) -> Vec<SelectedSheet> {
    select_pnl_sheets(sheet_names)
        .into_iter()
        .filter(|s| !skip.iter().any(|k| k.trim() == s.sheet_name.trim()))
        .collect()
}
