//! Row typing for extracted P&L tables
//!
//! Rules are checked in a fixed order and the first hit wins:
//! account code, then upper-case section title, then subtotal wording.

use serde::Serialize;

use super::lexicon::{
    alias_key, ACCOUNT_ALIASES, ACCOUNT_CODE_PATTERN, LINE_ITEM_ALIASES, SUBTOTAL_PATTERN,
};
use crate::error::{LedgerError, LedgerResult};
use crate::types::ExtractedTable;

/// Semantic type of one table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RowTag {
    Account,
    SectionHeader,
    Subtotal,
    Other,
}

/// Positions of the account-code and line-item columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticColumns {
    pub account: usize,
    pub line_item: usize,
}

impl SemanticColumns {
    /// Find both columns by alias, ignoring case and spaces
    ///
    /// With duplicate labels the leftmost column is used.
    pub fn resolve(table: &ExtractedTable) -> LedgerResult<Self> {
        let find = |aliases: &[&str]| {
            table
                .columns
                .iter()
                .position(|label| aliases.contains(&alias_key(label).as_str()))
        };

        match (find(&ACCOUNT_ALIASES), find(&LINE_ITEM_ALIASES)) {
            (Some(account), Some(line_item)) => Ok(Self { account, line_item }),
            (account, line_item) => {
                let mut missing = Vec::new();
                if account.is_none() {
                    missing.push("Account".to_string());
                }
                if line_item.is_none() {
                    missing.push("Line Item".to_string());
                }
                Err(LedgerError::MissingSemanticColumns { missing })
            }
        }
    }
}

/// Tag and identifying texts of one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedRow {
    /// Position in the extracted table
    pub row_index: usize,
    /// Position in the source grid
    pub source_row: usize,
    pub tag: RowTag,
    pub account_code: String,
    pub line_item: String,
}

/// Per-tag row counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RowTypeCounts {
    pub total: usize,
    pub account: usize,
    pub section: usize,
    pub subtotal: usize,
    pub other: usize,
}

/// Every row of a table with exactly one tag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub rows: Vec<ClassifiedRow>,
    pub counts: RowTypeCounts,
}

impl Classification {
    pub fn accounts(&self) -> impl Iterator<Item = &ClassifiedRow> {
        self.rows.iter().filter(|r| r.tag == RowTag::Account)
    }
}

pub fn is_account_code(text: &str) -> bool {
    ACCOUNT_CODE_PATTERN.is_match(text.trim())
}

/// Non-empty, has at least one cased letter, and no lower-case letters
pub fn is_upper_case_title(text: &str) -> bool {
    let text = text.trim();
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

pub fn is_subtotal_label(text: &str) -> bool {
    SUBTOTAL_PATTERN.is_match(text.trim())
}

/// Apply the rules in priority order
pub fn classify_row(account_code: &str, line_item: &str) -> RowTag {
    if is_account_code(account_code) {
        RowTag::Account
    } else if is_upper_case_title(line_item) {
        RowTag::SectionHeader
    } else if is_subtotal_label(line_item) {
        RowTag::Subtotal
    } else {
        RowTag::Other
    }
}

pub fn classify_rows(table: &ExtractedTable, columns: &SemanticColumns) -> Classification {
    let mut counts = RowTypeCounts::default();
    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let account_code = table.cell(row_index, columns.account).to_text();
            let line_item = table.cell(row_index, columns.line_item).to_text();
            let tag = classify_row(&account_code, &line_item);

            counts.total += 1;
            match tag {
                RowTag::Account => counts.account += 1,
                RowTag::SectionHeader => counts.section += 1,
                RowTag::Subtotal => counts.subtotal += 1,
                RowTag::Other => counts.other += 1,
            }

            ClassifiedRow {
                row_index,
                source_row: row.source_row,
                tag,
                account_code,
                line_item,
            }
        })
        .collect();

    Classification { rows, counts }
}
