//! Workbook reading
//!
//! The pipeline only sees [`WorkbookSource`]: a list of sheet names and a way
//! to pull one sheet's raw grid. [`ExcelImporter`] backs it with a real
//! `.xlsx` file, [`MemoryWorkbook`] with grids built in code.

mod importer;

pub use importer::{convert_cell, range_to_grid, ExcelImporter};

use crate::error::{LedgerError, LedgerResult};
use crate::types::RawGrid;

/// Anything that can hand out raw sheet grids by name
pub trait WorkbookSource {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Read one sheet's cells
    fn read_grid(&mut self, sheet_name: &str) -> LedgerResult<RawGrid>;
}

/// In-memory workbook
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<RawGrid>,
}

impl MemoryWorkbook {
    pub fn new(sheets: Vec<RawGrid>) -> Self {
        Self { sheets }
    }
}

impl WorkbookSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name().to_string()).collect()
    }

    fn read_grid(&mut self, sheet_name: &str) -> LedgerResult<RawGrid> {
        self.sheets
            .iter()
            .find(|s| s.name() == sheet_name)
            .cloned()
            .ok_or_else(|| LedgerError::Workbook(format!("Sheet '{}' not found", sheet_name)))
    }
}
