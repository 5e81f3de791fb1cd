use crate::config::ExtractionConfig;
use crate::core::{BatchResult, Pipeline, SheetStatus};
use crate::error::{LedgerError, LedgerResult};
use crate::excel::ExcelImporter;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Load the config file (if any) and apply command-line overrides
pub fn load_config(
    config: Option<PathBuf>,
    search_depth: Option<usize>,
) -> LedgerResult<ExtractionConfig> {
    let mut loaded = match config {
        Some(path) => ExtractionConfig::load(&path)?,
        None => ExtractionConfig::default(),
    };
    if let Some(depth) = search_depth {
        loaded.header_search_depth = depth;
    }
    loaded.validate()?;
    Ok(loaded)
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> LedgerResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => fs::write(path, json)?,
        None => println!("{}", json),
    }
    Ok(())
}

/// Execute the sheets command - list the P&L sheets that would be processed
pub fn sheets(file: PathBuf, config: Option<PathBuf>) -> LedgerResult<()> {
    let config = load_config(config, None)?;
    let workbook = ExcelImporter::open(&file)?;
    let selected = Pipeline::new(config).select_sheets(&workbook);

    println!("{}", "📒 P&L sheets".bold().green());
    println!("   File: {}", file.display());
    if selected.is_empty() {
        println!("   {}", "No sheet named like 'Actual P&L 2024' / 'Budget P&L 2024'".yellow());
        return Ok(());
    }
    for sheet in &selected {
        println!(
            "   {}  {} {}",
            sheet.sheet_name.bright_blue(),
            sheet.scenario.to_string().cyan(),
            sheet.year
        );
    }
    Ok(())
}

/// Execute the extract command - P&L sheets to long fact rows as JSON
pub fn extract(
    file: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    search_depth: Option<usize>,
) -> LedgerResult<()> {
    let config = load_config(config, search_depth)?;
    let pipeline = Pipeline::new(config);
    let mut workbook = ExcelImporter::open(&file)?;

    if pipeline.select_sheets(&workbook).is_empty() {
        return Err(LedgerError::Validation(format!(
            "No sheets in '{}' matched a name like 'Actual P&L 2024' / 'Budget P&L 2024'",
            file.display()
        )));
    }

    let batch = pipeline.run(&mut workbook);
    print_summary(&batch);
    write_json(&batch, output.as_deref())?;

    if let Some(path) = output {
        eprintln!("   Written: {}", path.display().to_string().bold());
    }
    Ok(())
}

/// Execute the audit command - describe every sheet of a workbook as JSON
pub fn audit(file: PathBuf, output: Option<PathBuf>, config: Option<PathBuf>) -> LedgerResult<()> {
    let config = load_config(config, None)?;
    let mut workbook = ExcelImporter::open(&file)?;
    let audits = Pipeline::new(config).audit(&mut workbook);

    eprintln!("{}", "🔍 Workbook audit".bold().green());
    for audit in &audits {
        let header = audit
            .header_row
            .map(|r| format!("header at row {}", r))
            .unwrap_or_else(|| "no header".to_string());
        eprintln!("   {}: {}", audit.sheet_name.bright_blue(), header);
    }
    write_json(&audits, output.as_deref())
}

fn print_summary(batch: &BatchResult) {
    eprintln!("{}", "✅ Extraction summary".bold().green());
    for report in &batch.reports {
        match &report.status {
            SheetStatus::Processed => eprintln!(
                "   {} {}: {} fact rows",
                "✓".green(),
                report.sheet_name.bright_blue(),
                report.fact_rows
            ),
            SheetStatus::Unclassified { reason } => eprintln!(
                "   {} {}: unclassified ({})",
                "⚠".yellow(),
                report.sheet_name.bright_blue(),
                reason
            ),
            SheetStatus::Skipped { reason } => eprintln!(
                "   {} {}: skipped ({})",
                "✗".red(),
                report.sheet_name.bright_blue(),
                reason
            ),
        }
    }
    eprintln!("   Total fact rows: {}", batch.facts.len().to_string().bold());
}
