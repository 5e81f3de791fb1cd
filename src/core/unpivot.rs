//! Wide month-per-column account rows → long per-month fact rows

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

use super::classify::{Classification, RowTag};
use super::lexicon::{alias_key, month_number};
use super::numeric::{is_unparseable, normalize_numeric};
use crate::error::{LedgerError, LedgerResult};
use crate::types::{ExtractedTable, LongFactRow, NumericValue, Scenario};

/// A month column found in the table header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthColumn {
    /// Position in the extracted table
    pub column: usize,
    pub label: String,
    pub month: u32,
}

/// Month columns in sheet order; a repeated month keeps its first column
pub fn find_month_columns(columns: &[String]) -> Vec<MonthColumn> {
    let mut seen = HashSet::new();
    columns
        .iter()
        .enumerate()
        .filter_map(|(column, label)| {
            let month = month_number(label)?;
            seen.insert(month).then(|| MonthColumn {
                column,
                label: label.trim().to_string(),
                month,
            })
        })
        .collect()
}

/// One account row with its month cells normalized
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub source_row: usize,
    pub account_code: String,
    pub line_item: String,
    /// Aligned with [`WideTable::month_columns`]
    pub amounts: Vec<NumericValue>,
}

/// Account rows only, ready to be melted
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    pub month_columns: Vec<MonthColumn>,
    pub rows: Vec<WideRow>,
    pub has_total: bool,
    /// Account codes seen more than once; only the first row is kept
    pub duplicate_accounts: Vec<String>,
    /// Non-blank month/total cells, across all rows, that were not numbers
    pub unparseable_cells: usize,
}

impl WideTable {
    /// Keep Account rows and normalize their month cells
    ///
    /// Section, subtotal and other rows are left out so their amounts are
    /// not counted twice.
    pub fn build(table: &ExtractedTable, classification: &Classification) -> Self {
        let month_columns = find_month_columns(&table.columns);
        let total_column = table.columns.iter().position(|c| alias_key(c) == "total");

        let mut numeric_columns: Vec<usize> = month_columns.iter().map(|m| m.column).collect();
        numeric_columns.extend(total_column);
        let unparseable_cells = (0..table.row_count())
            .flat_map(|row| numeric_columns.iter().map(move |&col| (row, col)))
            .filter(|&(row, col)| is_unparseable(table.cell(row, col)))
            .count();

        let mut seen = HashSet::new();
        let mut duplicate_accounts = Vec::new();
        let mut rows = Vec::new();
        for classified in classification.rows.iter().filter(|r| r.tag == RowTag::Account) {
            if !seen.insert(classified.account_code.clone()) {
                duplicate_accounts.push(classified.account_code.clone());
                continue;
            }
            let row = classified.row_index;
            rows.push(WideRow {
                source_row: classified.source_row,
                account_code: classified.account_code.clone(),
                line_item: classified.line_item.clone(),
                amounts: month_columns
                    .iter()
                    .map(|m| normalize_numeric(table.cell(row, m.column)))
                    .collect(),
            });
        }

        Self {
            month_columns,
            rows,
            has_total: total_column.is_some(),
            duplicate_accounts,
            unparseable_cells,
        }
    }
}

/// First and last calendar day of a month
pub fn month_bounds(year: i32, month: u32) -> LedgerResult<(NaiveDate, NaiveDate)> {
    let invalid = || LedgerError::StructuralMismatch(format!("invalid period {year}-{month:02}"));
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;
    Ok((start, end))
}

/// `Q1` .. `Q4` for the quarter a date falls in
pub fn quarter_label(date: NaiveDate) -> String {
    format!("Q{}", date.month0() / 3 + 1)
}

/// One fact row per (account row, present month)
pub fn unpivot(wide: &WideTable, scenario: Scenario, year: i32) -> LedgerResult<Vec<LongFactRow>> {
    let periods = wide
        .month_columns
        .iter()
        .map(|m| month_bounds(year, m.month))
        .collect::<LedgerResult<Vec<_>>>()?;

    let mut facts = Vec::with_capacity(wide.rows.len() * wide.month_columns.len());
    for row in &wide.rows {
        for ((month, (start, end)), amount) in
            wide.month_columns.iter().zip(&periods).zip(&row.amounts)
        {
            facts.push(LongFactRow {
                scenario,
                year,
                account_code: row.account_code.clone(),
                line_item: row.line_item.clone(),
                month_label: month.label.clone(),
                month: month.month,
                month_start: *start,
                month_end: *end,
                quarter: quarter_label(*start),
                amount: *amount,
            });
        }
    }
    Ok(facts)
}
