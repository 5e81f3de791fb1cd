//! Column profiling for the audit report

use serde::Serialize;
use std::collections::HashSet;

use crate::types::ExtractedTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub label: String,
    /// Share of rows whose cell is blank (0.0 for an empty table)
    pub blank_ratio: f64,
    pub distinct: usize,
    /// First distinct non-blank values, trimmed
    pub examples: Vec<String>,
}

pub fn profile_table(table: &ExtractedTable, max_examples: usize) -> Vec<ColumnProfile> {
    let rows = table.row_count();
    table
        .columns
        .iter()
        .enumerate()
        .map(|(col, label)| {
            let mut seen = HashSet::new();
            let mut examples = Vec::new();
            let mut blanks = 0usize;
            for row in 0..rows {
                let cell = table.cell(row, col);
                if cell.is_blank() {
                    blanks += 1;
                    continue;
                }
                let text = cell.to_text();
                if seen.insert(text.clone()) && examples.len() < max_examples {
                    examples.push(text);
                }
            }
            ColumnProfile {
                label: label.clone(),
                blank_ratio: if rows == 0 {
                    0.0
                } else {
                    blanks as f64 / rows as f64
                },
                distinct: seen.len(),
                examples,
            }
        })
        .collect()
}
