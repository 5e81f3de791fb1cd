//! Header row detection for grids whose header sits at an unknown offset
//!
//! Every leading row is scored on four independent signals:
//!
//! | Signal                               | Points      |
//! |--------------------------------------|-------------|
//! | a cell reading `ACCOUNT`             | 4           |
//! | a cell reading `LINE ITEM(S)`        | 4           |
//! | each cell reading `JAN` .. `DEC`     | 1 per cell  |
//! | a cell reading `TOTAL`               | 2           |
//!
//! The highest score wins; the earliest row wins a tie.

use serde::Serialize;

use super::lexicon::{alias_key, month_number, ACCOUNT_ALIASES, LINE_ITEM_ALIASES};
use crate::types::RawGrid;

/// Default number of leading rows inspected
pub const DEFAULT_SEARCH_DEPTH: usize = 60;

/// Default number of candidates kept for diagnostics
pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;

/// Cells kept per candidate preview
const PREVIEW_CELLS: usize = 15;

/// Which signals fired for a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HeaderSignals {
    pub account: bool,
    pub line_item: bool,
    pub month_cells: u32,
    pub total: bool,
}

impl HeaderSignals {
    /// Sum of the four contributions
    pub fn score(&self) -> u32 {
        let mut score = self.month_cells;
        if self.account {
            score += 4;
        }
        if self.line_item {
            score += 4;
        }
        if self.total {
            score += 2;
        }
        score
    }
}

/// A row that scored above zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCandidate {
    pub row_index: usize,
    pub score: u32,
    pub signals: HeaderSignals,
    /// First cells of the row, trimmed
    pub preview: Vec<String>,
}

/// Outcome of a header search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderSearch {
    pub best_row: Option<usize>,
    pub best_score: Option<u32>,
    /// Ranked best-first, ties in scan order
    pub candidates: Vec<HeaderCandidate>,
    pub searched_rows: usize,
}

/// Evaluate the header signals of one row of trimmed cell texts
pub fn score_header_row<S: AsRef<str>>(cells: &[S]) -> HeaderSignals {
    let mut signals = HeaderSignals::default();
    for cell in cells {
        let key = alias_key(cell.as_ref());
        if ACCOUNT_ALIASES.contains(&key.as_str()) {
            signals.account = true;
        }
        if LINE_ITEM_ALIASES.contains(&key.as_str()) {
            signals.line_item = true;
        }
        if month_number(cell.as_ref()).is_some() {
            signals.month_cells += 1;
        }
        if key == "total" {
            signals.total = true;
        }
    }
    signals
}

/// Score the first `search_depth` rows and rank them
pub fn locate_header(grid: &RawGrid, search_depth: usize) -> HeaderSearch {
    locate_header_with_limit(grid, search_depth, DEFAULT_CANDIDATE_LIMIT)
}

/// [`locate_header`] with a custom diagnostic candidate limit
pub fn locate_header_with_limit(
    grid: &RawGrid,
    search_depth: usize,
    candidate_limit: usize,
) -> HeaderSearch {
    let searched_rows = search_depth.min(grid.row_count());
    let mut candidates: Vec<HeaderCandidate> = (0..searched_rows)
        .filter_map(|row_index| {
            let cells = grid.row_text(row_index);
            let signals = score_header_row(&cells);
            let score = signals.score();
            (score > 0).then(|| HeaderCandidate {
                row_index,
                score,
                signals,
                preview: cells.into_iter().take(PREVIEW_CELLS).collect(),
            })
        })
        .collect();

    // sort_by is stable, so equal scores keep scan order
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    let best_row = candidates.first().map(|c| c.row_index);
    let best_score = candidates.first().map(|c| c.score);
    candidates.truncate(candidate_limit);

    HeaderSearch {
        best_row,
        best_score,
        candidates,
        searched_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn full_header() -> Vec<&'static str> {
        vec![
            "Account", "Line Item", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug",
            "Sep", "Oct", "Nov", "Dec", "Total",
        ]
    }

    fn text_row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    #[test]
    fn test_full_header_scores_22() {
        let signals = score_header_row(&full_header());
        assert_eq!(signals.month_cells, 12);
        assert_eq!(signals.score(), 22);
    }

    #[test]
    fn test_line_item_variants() {
        assert!(score_header_row(&["Line Item"]).line_item);
        assert!(score_header_row(&["LINEITEMS"]).line_item);
        assert!(score_header_row(&["line  items"]).line_item);
        assert!(!score_header_row(&["Line-Item"]).line_item);
    }

    #[test]
    fn test_scoring_agrees_with_column_resolution() {
        use crate::core::classify::SemanticColumns;
        use crate::core::extract::extract_table;

        let grid = RawGrid::new(
            "s",
            vec![
                text_row(&["ACCOUNT", "Line\tItem", "Jan", "Total\u{a0}"]),
                text_row(&["4001", "Core", "1", "1"]),
            ],
        );
        let search = locate_header(&grid, DEFAULT_SEARCH_DEPTH);
        assert_eq!(search.best_score, Some(4 + 4 + 1 + 2));

        let table = extract_table(&grid, 0).unwrap();
        let columns = SemanticColumns::resolve(&table).unwrap();
        assert_eq!((columns.account, columns.line_item), (0, 1));
    }

    #[test]
    fn test_signals_are_independent() {
        assert_eq!(score_header_row(&["account"]).score(), 4);
        assert_eq!(score_header_row(&[" TOTAL "]).score(), 2);
        assert_eq!(score_header_row(&["jan", "Jan"]).score(), 2);
        assert_eq!(score_header_row(&["Account", "Account"]).score(), 4);
        assert_eq!(score_header_row(&["Revenue", "4001", ""]).score(), 0);
    }

    #[test]
    fn test_adding_cells_never_lowers_score() {
        let mut row: Vec<&str> = vec!["Notes"];
        let mut last = score_header_row(&row).score();
        for cell in full_header() {
            row.push(cell);
            let now = score_header_row(&row).score();
            assert!(now >= last);
            last = now;
        }
        assert_eq!(last, 22);
    }

    #[test]
    fn test_best_row_regardless_of_position() {
        let grid = RawGrid::new(
            "s",
            vec![
                text_row(&["Acme Corp P&L"]),
                text_row(&["Jan", "Feb", "Total"]),
                text_row(&full_header()),
                text_row(&["4001", "Revenue"]),
            ],
        );
        let search = locate_header(&grid, DEFAULT_SEARCH_DEPTH);
        assert_eq!(search.best_row, Some(2));
        assert_eq!(search.best_score, Some(22));
        assert_eq!(search.candidates.len(), 2);
        assert_eq!(search.candidates[1].row_index, 1);
        assert_eq!(search.candidates[1].score, 4);
    }

    #[test]
    fn test_ties_go_to_earliest_row() {
        let grid = RawGrid::new(
            "s",
            vec![
                text_row(&[""]),
                text_row(&["Account", "Jan"]),
                text_row(&["Line Item", "Feb"]),
            ],
        );
        let search = locate_header(&grid, DEFAULT_SEARCH_DEPTH);
        assert_eq!(search.best_row, Some(1));
        assert_eq!(search.candidates[0].score, search.candidates[1].score);
    }

    #[test]
    fn test_no_header_found() {
        let grid = RawGrid::new("s", vec![text_row(&["hello"]), vec![CellValue::Number(1.0)]]);
        let search = locate_header(&grid, DEFAULT_SEARCH_DEPTH);
        assert_eq!(search.best_row, None);
        assert!(search.candidates.is_empty());
        assert_eq!(search.searched_rows, 2);
    }

    #[test]
    fn test_search_depth_limits_scan() {
        let mut rows: Vec<Vec<CellValue>> = (0..5).map(|_| text_row(&["filler"])).collect();
        rows.push(text_row(&full_header()));
        let grid = RawGrid::new("s", rows);
        assert_eq!(locate_header(&grid, 5).best_row, None);
        assert_eq!(locate_header(&grid, 6).best_row, Some(5));
    }

    #[test]
    fn test_candidate_list_is_capped() {
        let rows: Vec<Vec<CellValue>> = (0..15).map(|_| text_row(&["Jan"])).collect();
        let grid = RawGrid::new("s", rows);
        let search = locate_header(&grid, DEFAULT_SEARCH_DEPTH);
        assert_eq!(search.candidates.len(), DEFAULT_CANDIDATE_LIMIT);
        assert_eq!(search.best_row, Some(0));
        let order: Vec<usize> = search.candidates.iter().map(|c| c.row_index).collect();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }
}
