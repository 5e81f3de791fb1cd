//! Slices the data region out of a grid once its header row is known

use crate::error::{LedgerError, LedgerResult};
use crate::types::{DroppedColumn, ExtractedRow, ExtractedTable, RawGrid};

/// Use `header_row` as column labels and everything below it as data
///
/// Fully blank rows and columns are removed afterwards. A header index
/// outside the grid is a caller bug and is reported, not papered over.
pub fn extract_table(grid: &RawGrid, header_row: usize) -> LedgerResult<ExtractedTable> {
    if header_row >= grid.row_count() {
        return Err(LedgerError::StructuralMismatch(format!(
            "header row {} is outside sheet '{}' ({} rows)",
            header_row,
            grid.name(),
            grid.row_count()
        )));
    }

    let width = grid.column_count();
    let rows = (header_row + 1..grid.row_count())
        .map(|r| ExtractedRow {
            source_row: r,
            cells: (0..width).map(|c| grid.cell(r, c).clone()).collect(),
        })
        .collect();

    let table = ExtractedTable {
        header_row,
        columns: grid.row_text(header_row),
        column_sources: (0..width).collect(),
        rows,
        dropped_columns: Vec::new(),
        dropped_rows: 0,
    };

    Ok(table.without_blank_lines())
}

impl ExtractedTable {
    /// Remove rows, then columns, whose every cell is empty or whitespace
    ///
    /// Running this on its own output changes nothing.
    pub fn without_blank_lines(&self) -> ExtractedTable {
        let rows: Vec<&ExtractedRow> = self
            .rows
            .iter()
            .filter(|row| !row.cells.iter().all(|c| c.is_blank()))
            .collect();
        let dropped_rows = self.dropped_rows + (self.rows.len() - rows.len());

        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&col| {
                rows.iter()
                    .any(|row| row.cells.get(col).is_some_and(|c| !c.is_blank()))
            })
            .collect();

        let mut dropped_columns = self.dropped_columns.clone();
        dropped_columns.extend(
            (0..self.columns.len())
                .filter(|col| !keep.contains(col))
                .map(|col| DroppedColumn {
                    index: self.column_sources[col],
                    label: self.columns[col].clone(),
                }),
        );

        ExtractedTable {
            header_row: self.header_row,
            columns: keep.iter().map(|&c| self.columns[c].clone()).collect(),
            column_sources: keep.iter().map(|&c| self.column_sources[c]).collect(),
            rows: rows
                .into_iter()
                .map(|row| ExtractedRow {
                    source_row: row.source_row,
                    cells: keep
                        .iter()
                        .map(|&c| row.cells.get(c).cloned().unwrap_or_default())
                        .collect(),
                })
                .collect(),
            dropped_columns,
            dropped_rows,
        }
    }
}
