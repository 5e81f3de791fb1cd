//! Fixture workbooks shared by the integration tests

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::Path;
use tidyledger::{CellValue, RawGrid};

pub fn text_row(cells: &[&str]) -> Vec<CellValue> {
    cells.iter().map(|c| CellValue::from(*c)).collect()
}

/// Write each grid as one worksheet, grid cell (r, c) landing on sheet cell (r, c)
pub fn write_workbook(path: &Path, sheets: &[RawGrid]) {
    let mut workbook = Workbook::new();
    for grid in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(grid.name()).unwrap();
        for (r, row) in grid.rows().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    CellValue::Empty => {}
                    CellValue::Number(n) => {
                        worksheet.write_number(r as u32, c as u16, *n).unwrap();
                    }
                    CellValue::Text(s) => {
                        worksheet.write_string(r as u32, c as u16, s).unwrap();
                    }
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

/// A typical exported P&L: title block, blank rows, header on row 4
/// starting in column B, a section title, two accounts and a subtotal
pub fn messy_pnl(name: &str) -> RawGrid {
    let pad = |mut cells: Vec<CellValue>| {
        cells.insert(0, CellValue::Empty);
        cells
    };
    RawGrid::new(
        name,
        vec![
            pad(text_row(&["Acme Holdings"])),
            pad(text_row(&["Profit and Loss Statement (USD)"])),
            vec![],
            vec![],
            pad(text_row(&["Account", "Line Item", "Jan", "Feb", "Mar", "Total"])),
            pad(vec![CellValue::Empty, "REVENUE".into()]),
            pad(vec![
                "4001".into(),
                "Revenue - Core".into(),
                "12,345".into(),
                100.into(),
                "-".into(),
                "12,445".into(),
            ]),
            pad(vec![
                4002.into(),
                "Revenue - Services".into(),
                "(2,119,020)".into(),
                0.into(),
                5.5.into(),
                "(2,119,014.5)".into(),
            ]),
            vec![],
            pad(vec![
                CellValue::Empty,
                "Total Revenue".into(),
                "(2,106,675)".into(),
                100.into(),
                5.5.into(),
            ]),
        ],
    )
}
