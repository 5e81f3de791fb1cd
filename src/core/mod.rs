//! Messy-table extraction and normalization pipeline

pub mod classify;
pub mod extract;
pub mod header;
pub mod lexicon;
pub mod numeric;
pub mod pipeline;
pub mod profile;
pub mod sheets;
pub mod unpivot;

pub use classify::{
    classify_rows, Classification, ClassifiedRow, RowTag, RowTypeCounts, SemanticColumns,
};
pub use extract::extract_table;
pub use header::{locate_header, HeaderCandidate, HeaderSearch};
pub use numeric::normalize_numeric;
pub use pipeline::{BatchResult, Pipeline, SheetAudit, SheetReport, SheetStatus};
pub use sheets::{select_pnl_sheets, SelectedSheet};
pub use unpivot::{unpivot, WideTable};
