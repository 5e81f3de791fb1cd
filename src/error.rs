use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parsing error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("No header row found in '{sheet}' within the first {searched_rows} rows")]
    HeaderNotFound { sheet: String, searched_rows: usize },

    #[error("Missing semantic columns: {}", missing.join(", "))]
    MissingSemanticColumns { missing: Vec<String> },

    #[error("Structural mismatch: {0}")]
    StructuralMismatch(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl LedgerError {
    /// True for the "expected messiness" class: the sheet is skipped and
    /// reported, the batch carries on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LedgerError::HeaderNotFound { .. } | LedgerError::MissingSemanticColumns { .. }
        )
    }
}
