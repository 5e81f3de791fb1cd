//! Excel importer implementation - Excel (.xlsx) → raw grids

use crate::error::{LedgerError, LedgerResult};
use crate::excel::WorkbookSource;
use crate::types::{CellValue, RawGrid};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Excel importer that exposes each worksheet as an untyped grid
pub struct ExcelImporter {
    path: PathBuf,
    workbook: Xlsx<BufReader<File>>,
}

impl ExcelImporter {
    /// Open an Excel workbook
    pub fn open<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref().to_path_buf();
        let workbook: Xlsx<_> = open_workbook(&path).map_err(|e| {
            LedgerError::Workbook(format!(
                "Failed to open Excel file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self { path, workbook })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkbookSource for ExcelImporter {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn read_grid(&mut self, sheet_name: &str) -> LedgerResult<RawGrid> {
        let range = self.workbook.worksheet_range(sheet_name).map_err(|e| {
            LedgerError::Workbook(format!("Failed to read sheet '{}': {}", sheet_name, e))
        })?;
        let grid = range_to_grid(sheet_name, &range);
        debug!(
            "Read sheet '{}' ({} rows x {} cols)",
            sheet_name,
            grid.row_count(),
            grid.column_count()
        );
        Ok(grid)
    }
}

/// Convert a calamine range into a grid anchored at A1
///
/// calamine trims the range to the used area, so leading empty rows and
/// columns are put back to keep row indices equal to sheet rows.
pub fn range_to_grid(sheet_name: &str, range: &Range<Data>) -> RawGrid {
    let (first_row, first_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); first_row];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; first_col];
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }

    RawGrid::new(sheet_name, rows)
}

/// Map a calamine cell onto the three cell kinds
pub fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Serial date number, as Excel stores it
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}
