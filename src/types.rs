use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

//==============================================================================
// Raw Sheet Data
//==============================================================================

/// A single spreadsheet cell as decoded by the workbook reader
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No content at all
    #[default]
    Empty,
    /// Any numeric cell (integers are widened to f64)
    Number(f64),
    /// Any textual cell, untrimmed
    Text(String),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// Trimmed text form of the cell ("" for empty cells)
    ///
    /// Numbers use Rust's shortest display form, so `4001.0` reads as `4001`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) if n.is_nan() => String::new(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.trim().to_string(),
        }
    }

    /// Empty, NaN, or whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

/// The untyped cell grid of exactly one worksheet
///
/// Rows may be ragged; any position past the end of a row reads as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGrid {
    name: String,
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl RawGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            name: name.into(),
            rows,
            width,
        }
    }

    /// Worksheet name this grid was read from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn column_count(&self) -> usize {
        self.width
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Trimmed text of every cell in a row, padded to the grid width
    pub fn row_text(&self, row: usize) -> Vec<String> {
        (0..self.width).map(|col| self.cell(row, col).to_text()).collect()
    }
}

//==============================================================================
// Extracted Tables
//==============================================================================

/// A data row below the header, keeping its position in the source grid
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRow {
    pub source_row: usize,
    pub cells: Vec<CellValue>,
}

/// A column removed during extraction because it held no content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedColumn {
    /// Position in the source grid
    pub index: usize,
    pub label: String,
}

/// Data region of a grid, labelled by the detected header row
///
/// Column labels may repeat; cells are stored positionally so duplicates
/// never shadow each other.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    pub header_row: usize,
    pub columns: Vec<String>,
    /// Source grid position of each kept column
    pub column_sources: Vec<usize>,
    pub rows: Vec<ExtractedRow>,
    pub dropped_columns: Vec<DroppedColumn>,
    pub dropped_rows: usize,
}

impl ExtractedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

//==============================================================================
// Scenario and Numeric Values
//==============================================================================

/// Planning variant a sheet represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scenario {
    Actual,
    Budget,
}

impl Scenario {
    /// Case-insensitive match on "actual" / "budget"
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "actual" => Some(Scenario::Actual),
            "budget" => Some(Scenario::Budget),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Actual => "Actual",
            Scenario::Budget => "Budget",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized amount: a finite number, or explicitly nothing
///
/// Absence is never folded into zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Value(f64),
    Absent,
}

impl NumericValue {
    pub fn value(self) -> Option<f64> {
        match self {
            NumericValue::Value(v) => Some(v),
            NumericValue::Absent => None,
        }
    }

    pub fn is_absent(self) -> bool {
        matches!(self, NumericValue::Absent)
    }
}

impl From<Option<f64>> for NumericValue {
    fn from(v: Option<f64>) -> Self {
        match v {
            Some(v) if v.is_finite() => NumericValue::Value(v),
            _ => NumericValue::Absent,
        }
    }
}

impl Serialize for NumericValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

//==============================================================================
// Long Fact Rows
//==============================================================================

/// One (account, month) amount of one scenario/year sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongFactRow {
    pub scenario: Scenario,
    pub year: i32,
    pub account_code: String,
    pub line_item: String,
    /// Month column label as it appeared in the sheet
    pub month_label: String,
    pub month: u32,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub quarter: String,
    pub amount: NumericValue,
}
