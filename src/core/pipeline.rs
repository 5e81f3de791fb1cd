//! Sheet-by-sheet orchestration with per-sheet diagnostics
//!
//! One bad sheet never stops the batch: whatever goes wrong while reading or
//! processing it ends up as a skip reason in that sheet's report.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::classify::{classify_rows, Classification, RowTypeCounts, SemanticColumns};
use super::extract::extract_table;
use super::header::{locate_header_with_limit, HeaderCandidate, HeaderSearch};
use super::profile::{profile_table, ColumnProfile};
use super::sheets::{parse_sheet_name, select_pnl_sheets_except, SelectedSheet};
use super::unpivot::{find_month_columns, unpivot, WideTable};
use crate::config::ExtractionConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::excel::WorkbookSource;
use crate::types::{DroppedColumn, ExtractedTable, LongFactRow, RawGrid, Scenario};

/// How far a sheet got
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetStatus {
    Processed,
    /// Table extracted, but the account/line-item columns were not found
    Unclassified { reason: String },
    Skipped { reason: String },
}

/// Diagnostics for one P&L sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetReport {
    pub sheet_name: String,
    pub scenario: Scenario,
    pub year: i32,
    #[serde(flatten)]
    pub status: SheetStatus,
    pub raw_rows: usize,
    pub raw_columns: usize,
    pub header_row: Option<usize>,
    pub header_score: Option<u32>,
    pub header_candidates: Vec<HeaderCandidate>,
    pub extracted_rows: usize,
    pub extracted_columns: usize,
    pub columns: Vec<String>,
    pub month_columns: Vec<String>,
    pub has_total: bool,
    pub dropped_columns: Vec<DroppedColumn>,
    pub dropped_rows: usize,
    pub row_counts: Option<RowTypeCounts>,
    pub unparseable_cells: usize,
    pub duplicate_accounts: Vec<String>,
    pub fact_rows: usize,
    pub sample_accounts: Vec<String>,
    pub sample_lines: Vec<String>,
}

impl SheetReport {
    fn new(sheet: &SelectedSheet) -> Self {
        Self {
            sheet_name: sheet.sheet_name.clone(),
            scenario: sheet.scenario,
            year: sheet.year,
            status: SheetStatus::Processed,
            raw_rows: 0,
            raw_columns: 0,
            header_row: None,
            header_score: None,
            header_candidates: Vec::new(),
            extracted_rows: 0,
            extracted_columns: 0,
            columns: Vec::new(),
            month_columns: Vec::new(),
            has_total: false,
            dropped_columns: Vec::new(),
            dropped_rows: 0,
            row_counts: None,
            unparseable_cells: 0,
            duplicate_accounts: Vec::new(),
            fact_rows: 0,
            sample_accounts: Vec::new(),
            sample_lines: Vec::new(),
        }
    }

    fn skipped(sheet: &SelectedSheet, reason: String) -> Self {
        let mut report = Self::new(sheet);
        report.status = SheetStatus::Skipped { reason };
        report
    }

    fn record_table(&mut self, table: &ExtractedTable) {
        self.extracted_rows = table.row_count();
        self.extracted_columns = table.column_count();
        self.columns = table.columns.clone();
        self.month_columns = find_month_columns(&table.columns)
            .into_iter()
            .map(|m| m.label)
            .collect();
        self.dropped_columns = table.dropped_columns.clone();
        self.dropped_rows = table.dropped_rows;
    }

    pub fn is_processed(&self) -> bool {
        self.status == SheetStatus::Processed
    }
}

/// Facts of every processed sheet plus one report per selected sheet
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    pub facts: Vec<LongFactRow>,
    pub reports: Vec<SheetReport>,
}

impl BatchResult {
    pub fn processed(&self) -> impl Iterator<Item = &SheetReport> {
        self.reports.iter().filter(|r| r.is_processed())
    }

    pub fn not_processed(&self) -> impl Iterator<Item = &SheetReport> {
        self.reports.iter().filter(|r| !r.is_processed())
    }
}

/// Facts and report of a single sheet
#[derive(Debug, Clone)]
pub struct SheetOutcome {
    pub report: SheetReport,
    pub facts: Vec<LongFactRow>,
}

/// Structure of any sheet, P&L or not
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetAudit {
    pub sheet_name: String,
    /// Set when the name follows the P&L convention
    pub pnl: Option<SelectedSheet>,
    pub raw_rows: usize,
    pub raw_columns: usize,
    pub header_row: Option<usize>,
    pub header_score: Option<u32>,
    pub header_candidates: Vec<HeaderCandidate>,
    pub extracted_rows: usize,
    pub extracted_columns: usize,
    pub columns: Vec<String>,
    pub month_columns: Vec<String>,
    pub dropped_columns: Vec<DroppedColumn>,
    pub row_counts: Option<RowTypeCounts>,
    pub profile: Vec<ColumnProfile>,
    pub error: Option<String>,
}

/// Intermediate results shared by processing and auditing
struct Inspection {
    search: HeaderSearch,
    table: Option<ExtractedTable>,
    classification: Option<Classification>,
    unclassified_reason: Option<String>,
}

pub struct Pipeline {
    config: ExtractionConfig,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// The P&L sheets of a workbook this pipeline would process
    pub fn select_sheets<W: WorkbookSource>(&self, source: &W) -> Vec<SelectedSheet> {
        select_pnl_sheets_except(&source.sheet_names(), &self.config.skip_sheets)
    }

    /// Process every selected P&L sheet, isolating per-sheet failures
    pub fn run<W: WorkbookSource>(&self, source: &mut W) -> BatchResult {
        let mut batch = BatchResult::default();
        let selected = self.select_sheets(source);
        info!("Processing {} P&L sheet(s)", selected.len());

        for sheet in &selected {
            let outcome = source
                .read_grid(&sheet.sheet_name)
                .and_then(|grid| self.process_sheet(sheet, &grid));

            match outcome {
                Ok(outcome) => {
                    batch.facts.extend(outcome.facts);
                    batch.reports.push(outcome.report);
                }
                Err(e) => {
                    error!("Skipping sheet '{}': {}", sheet.sheet_name, e);
                    batch.reports.push(SheetReport::skipped(sheet, e.to_string()));
                }
            }
        }

        batch
    }

    /// Header → table → row tags → long facts for one sheet
    ///
    /// A missing header or missing semantic columns is reported in the
    /// outcome; only structural violations come back as `Err`.
    pub fn process_sheet(
        &self,
        sheet: &SelectedSheet,
        grid: &RawGrid,
    ) -> LedgerResult<SheetOutcome> {
        let mut report = SheetReport::new(sheet);
        report.raw_rows = grid.row_count();
        report.raw_columns = grid.column_count();

        let inspection = self.inspect(grid)?;
        report.header_row = inspection.search.best_row;
        report.header_score = inspection.search.best_score;
        report.header_candidates = inspection.search.candidates.clone();

        let Some(table) = inspection.table else {
            let reason = LedgerError::HeaderNotFound {
                sheet: sheet.sheet_name.clone(),
                searched_rows: inspection.search.searched_rows,
            };
            warn!("{}", reason);
            report.status = SheetStatus::Skipped {
                reason: reason.to_string(),
            };
            return Ok(SheetOutcome {
                report,
                facts: Vec::new(),
            });
        };
        report.record_table(&table);

        let Some(classification) = inspection.classification else {
            let reason = inspection.unclassified_reason.unwrap_or_default();
            warn!("Sheet '{}' left unclassified: {}", sheet.sheet_name, reason);
            report.status = SheetStatus::Unclassified { reason };
            return Ok(SheetOutcome {
                report,
                facts: Vec::new(),
            });
        };
        report.row_counts = Some(classification.counts);

        let wide = WideTable::build(&table, &classification);
        if !wide.duplicate_accounts.is_empty() {
            warn!(
                "Sheet '{}' repeats account code(s) {:?}; keeping the first row of each",
                sheet.sheet_name, wide.duplicate_accounts
            );
        }
        report.has_total = wide.has_total;
        report.unparseable_cells = wide.unparseable_cells;
        report.duplicate_accounts = wide.duplicate_accounts.clone();
        let samples = wide.rows.iter().take(self.config.sample_limit);
        report.sample_accounts = samples.clone().map(|r| r.account_code.clone()).collect();
        report.sample_lines = samples.map(|r| r.line_item.clone()).collect();

        let facts = unpivot(&wide, sheet.scenario, sheet.year)?;
        report.fact_rows = facts.len();
        info!(
            "Sheet '{}': header at row {}, {} account rows, {} fact rows",
            sheet.sheet_name,
            table.header_row,
            wide.rows.len(),
            facts.len()
        );

        Ok(SheetOutcome { report, facts })
    }

    /// Describe every sheet of the workbook, whatever its name
    pub fn audit<W: WorkbookSource>(&self, source: &mut W) -> Vec<SheetAudit> {
        source
            .sheet_names()
            .into_iter()
            .map(|name| {
                let pnl = parse_sheet_name(&name);
                match source.read_grid(&name) {
                    Ok(grid) => self.audit_grid(&grid, pnl),
                    Err(e) => {
                        warn!("Cannot audit sheet '{}': {}", name, e);
                        SheetAudit {
                            sheet_name: name,
                            pnl,
                            raw_rows: 0,
                            raw_columns: 0,
                            header_row: None,
                            header_score: None,
                            header_candidates: Vec::new(),
                            extracted_rows: 0,
                            extracted_columns: 0,
                            columns: Vec::new(),
                            month_columns: Vec::new(),
                            dropped_columns: Vec::new(),
                            row_counts: None,
                            profile: Vec::new(),
                            error: Some(e.to_string()),
                        }
                    }
                }
            })
            .collect()
    }

    fn audit_grid(&self, grid: &RawGrid, pnl: Option<SelectedSheet>) -> SheetAudit {
        let mut audit = SheetAudit {
            sheet_name: grid.name().to_string(),
            pnl,
            raw_rows: grid.row_count(),
            raw_columns: grid.column_count(),
            header_row: None,
            header_score: None,
            header_candidates: Vec::new(),
            extracted_rows: 0,
            extracted_columns: 0,
            columns: Vec::new(),
            month_columns: Vec::new(),
            dropped_columns: Vec::new(),
            row_counts: None,
            profile: Vec::new(),
            error: None,
        };

        let inspection = match self.inspect(grid) {
            Ok(inspection) => inspection,
            Err(e) => {
                audit.error = Some(e.to_string());
                return audit;
            }
        };

        audit.header_row = inspection.search.best_row;
        audit.header_score = inspection.search.best_score;
        audit.header_candidates = inspection.search.candidates;
        if let Some(table) = &inspection.table {
            audit.extracted_rows = table.row_count();
            audit.extracted_columns = table.column_count();
            audit.columns = table.columns.clone();
            audit.month_columns = find_month_columns(&table.columns)
                .into_iter()
                .map(|m| m.label)
                .collect();
            audit.dropped_columns = table.dropped_columns.clone();
            audit.profile = profile_table(table, 3);
        } else {
            audit.error = Some(
                LedgerError::HeaderNotFound {
                    sheet: grid.name().to_string(),
                    searched_rows: inspection.search.searched_rows,
                }
                .to_string(),
            );
        }
        audit.row_counts = inspection.classification.map(|c| c.counts);
        audit
    }

    fn inspect(&self, grid: &RawGrid) -> LedgerResult<Inspection> {
        let search = locate_header_with_limit(
            grid,
            self.config.header_search_depth,
            self.config.candidate_limit,
        );
        debug!(
            "Sheet '{}': best header row {:?} (score {:?})",
            grid.name(),
            search.best_row,
            search.best_score
        );

        let Some(header_row) = search.best_row else {
            return Ok(Inspection {
                search,
                table: None,
                classification: None,
                unclassified_reason: None,
            });
        };

        let table = extract_table(grid, header_row)?;
        debug!(
            "Sheet '{}': extracted {} rows x {} cols, dropped {} blank column(s)",
            grid.name(),
            table.row_count(),
            table.column_count(),
            table.dropped_columns.len()
        );

        let (classification, unclassified_reason) = match SemanticColumns::resolve(&table) {
            Ok(columns) => (Some(classify_rows(&table, &columns)), None),
            Err(e) if e.is_recoverable() => (None, Some(e.to_string())),
            Err(e) => return Err(e),
        };

        Ok(Inspection {
            search,
            table: Some(table),
            classification,
            unclassified_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::MemoryWorkbook;
    use crate::types::CellValue;

    fn text_row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    fn pnl_grid(name: &str) -> RawGrid {
        RawGrid::new(
            name,
            vec![
                text_row(&["Acme Corp"]),
                text_row(&["Profit & Loss"]),
                vec![],
                text_row(&["Account", "Line Item", "Jan", "Feb", "Total"]),
                vec![CellValue::Empty, "REVENUE".into()],
                vec!["4001".into(), "Core".into(), 10.into(), 20.into(), 30.into()],
                vec!["4002".into(), "Services".into(), "(1,000)".into(), "-".into(), 1.into()],
                vec![CellValue::Empty, "Total Revenue".into(), 9.into(), 20.into(), 31.into()],
            ],
        )
    }

    #[test]
    fn test_run_processes_matching_sheets_only() {
        let mut workbook = MemoryWorkbook::new(vec![
            pnl_grid("Actual P&L 2024"),
            pnl_grid("Summary"),
            pnl_grid("Budget P&L 2024"),
        ]);
        let batch = Pipeline::default().run(&mut workbook);

        assert_eq!(batch.reports.len(), 2);
        assert_eq!(batch.processed().count(), 2);
        assert_eq!(batch.facts.len(), 2 * 2 * 2);

        let report = &batch.reports[0];
        assert_eq!(report.header_row, Some(3));
        assert_eq!(report.month_columns, vec!["Jan", "Feb"]);
        assert!(report.has_total);
        assert_eq!(report.sample_accounts, vec!["4001", "4002"]);
        let counts = report.row_counts.unwrap();
        assert_eq!((counts.account, counts.section, counts.subtotal), (2, 1, 1));
    }

    #[test]
    fn test_header_not_found_is_skipped_not_fatal() {
        let mut workbook = MemoryWorkbook::new(vec![
            RawGrid::new("Actual P&L 2023", vec![text_row(&["nothing here"])]),
            pnl_grid("Actual P&L 2024"),
        ]);
        let batch = Pipeline::default().run(&mut workbook);

        assert_eq!(batch.reports.len(), 2);
        assert!(matches!(
            batch.reports[0].status,
            SheetStatus::Skipped { .. }
        ));
        assert!(batch.reports[0].header_candidates.is_empty());
        assert!(batch.reports[1].is_processed());
        assert_eq!(batch.facts.len(), 4);
    }

    /// Serves one good sheet; every other listed sheet fails to read
    struct DamagedWorkbook {
        names: Vec<String>,
        good: RawGrid,
    }

    impl WorkbookSource for DamagedWorkbook {
        fn sheet_names(&self) -> Vec<String> {
            self.names.clone()
        }

        fn read_grid(&mut self, sheet_name: &str) -> LedgerResult<RawGrid> {
            if sheet_name == self.good.name() {
                Ok(self.good.clone())
            } else {
                Err(LedgerError::Workbook("corrupt sheet xml".to_string()))
            }
        }
    }

    fn damaged_workbook() -> DamagedWorkbook {
        DamagedWorkbook {
            names: vec!["Actual P&L 2023".to_string(), "Actual P&L 2024".to_string()],
            good: pnl_grid("Actual P&L 2024"),
        }
    }

    #[test]
    fn test_unreadable_sheet_is_skipped_and_batch_continues() {
        let mut workbook = damaged_workbook();
        let batch = Pipeline::default().run(&mut workbook);

        assert_eq!(batch.reports.len(), 2);
        assert_eq!(batch.reports[0].sheet_name, "Actual P&L 2023");
        assert_eq!(
            batch.reports[0].status,
            SheetStatus::Skipped {
                reason: "Workbook error: corrupt sheet xml".to_string()
            }
        );
        assert_eq!(batch.reports[0].fact_rows, 0);
        assert!(batch.reports[1].is_processed());
        assert_eq!(batch.facts.len(), 4);
        assert!(batch.facts.iter().all(|f| f.year == 2024));
    }

    #[test]
    fn test_unreadable_sheet_in_audit() {
        let mut workbook = damaged_workbook();
        let audits = Pipeline::default().audit(&mut workbook);

        assert_eq!(audits.len(), 2);
        assert_eq!(audits[0].raw_rows, 0);
        assert!(audits[0].error.as_deref().unwrap().contains("corrupt sheet xml"));
        assert_eq!(audits[1].header_row, Some(3));
    }

    #[test]
    fn test_missing_columns_leave_sheet_unclassified() {
        let grid = RawGrid::new(
            "Budget P&L 2022",
            vec![
                text_row(&["Code", "Description", "Jan", "Feb"]),
                vec!["4001".into(), "Core".into(), 1.into(), 2.into()],
            ],
        );
        let sheet = parse_sheet_name("Budget P&L 2022").unwrap();
        let outcome = Pipeline::default().process_sheet(&sheet, &grid).unwrap();

        assert!(outcome.facts.is_empty());
        assert!(outcome.report.row_counts.is_none());
        assert_eq!(outcome.report.extracted_rows, 1);
        match outcome.report.status {
            SheetStatus::Unclassified { reason } => assert!(reason.contains("Account")),
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[test]
    fn test_skip_list_from_config() {
        let config = ExtractionConfig {
            skip_sheets: vec!["Actual P&L 2024".to_string()],
            ..ExtractionConfig::default()
        };
        let mut workbook = MemoryWorkbook::new(vec![pnl_grid("Actual P&L 2024")]);
        let batch = Pipeline::new(config).run(&mut workbook);
        assert!(batch.reports.is_empty());
        assert!(batch.facts.is_empty());
    }

    #[test]
    fn test_audit_covers_every_sheet() {
        let mut workbook = MemoryWorkbook::new(vec![
            pnl_grid("Actual P&L 2024"),
            RawGrid::new("Notes", vec![text_row(&["free text"])]),
        ]);
        let audits = Pipeline::default().audit(&mut workbook);

        assert_eq!(audits.len(), 2);
        assert!(audits[0].pnl.is_some());
        assert_eq!(audits[0].header_row, Some(3));
        assert_eq!(audits[0].profile.len(), 5);
        assert_eq!((audits[0].extracted_rows, audits[0].extracted_columns), (4, 5));
        assert!(audits[1].pnl.is_none());
        assert!(audits[1].header_row.is_none());
        assert!(audits[1].error.is_some());
    }
}
