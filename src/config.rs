//! Extraction settings, loadable from YAML
//!
//! ```yaml
//! header_search_depth: 60
//! candidate_limit: 10
//! sample_limit: 5
//! skip_sheets:
//!   - "Actual P&L 2021"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::header::{DEFAULT_CANDIDATE_LIMIT, DEFAULT_SEARCH_DEPTH};
use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    /// Leading rows scanned for a header
    pub header_search_depth: usize,
    /// Header candidates kept in the diagnostics
    pub candidate_limit: usize,
    /// Sample accounts/line items kept per sheet report
    pub sample_limit: usize,
    /// P&L sheets to leave out even when their name matches
    pub skip_sheets: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            header_search_depth: DEFAULT_SEARCH_DEPTH,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            sample_limit: 5,
            skip_sheets: Vec::new(),
        }
    }
}

impl ExtractionConfig {
    pub fn from_yaml(content: &str) -> LedgerResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> LedgerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.header_search_depth == 0 {
            return Err(LedgerError::Validation(
                "header_search_depth must be at least 1".to_string(),
            ));
        }
        if self.candidate_limit == 0 {
            return Err(LedgerError::Validation(
                "candidate_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
