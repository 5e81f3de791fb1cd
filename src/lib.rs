//! tidyledger - messy P&L workbooks to tidy fact rows
//!
//! Report sheets named like `Actual P&L 2024` or `Budget P&L 2021` rarely
//! start at A1: titles, notes and blank rows push the real header down, and
//! section titles and subtotals sit between the account lines. This crate
//! finds the header, tags every row, cleans the amounts and melts the
//! month columns into one row per (account, month).
//!
//! # Example
//!
//! ```no_run
//! use tidyledger::core::Pipeline;
//! use tidyledger::excel::ExcelImporter;
//!
//! let mut workbook = ExcelImporter::open("Financial_Raw_Data.xlsx")?;
//! let batch = Pipeline::default().run(&mut workbook);
//!
//! println!("Fact rows: {}", batch.facts.len());
//! for report in batch.not_processed() {
//!     println!("{}: {:?}", report.sheet_name, report.status);
//! }
//! # Ok::<(), tidyledger::error::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use config::ExtractionConfig;
pub use error::{LedgerError, LedgerResult};
pub use types::{CellValue, ExtractedTable, LongFactRow, NumericValue, RawGrid, Scenario};
