use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tidyledger::cli;
use tidyledger::error::LedgerResult;

#[derive(Parser)]
#[command(name = "tidyledger")]
#[command(about = "Turn messy Actual/Budget P&L sheets into tidy monthly fact rows.")]
#[command(long_about = "tidyledger - P&L workbook normalizer

Finds the real header row in each 'Actual P&L <year>' / 'Budget P&L <year>'
sheet, tags account, section and subtotal rows, cleans amounts like
'(2,119,020)' and unpivots the month columns into one row per account/month.

COMMANDS:
  sheets   - List the P&L sheets that would be processed
  extract  - Write fact rows + per-sheet diagnostics as JSON
  audit    - Describe the layout of every sheet as JSON

EXAMPLES:
  tidyledger sheets data/Financial_Raw_Data_2020_2024.xlsx
  tidyledger extract data/Financial_Raw_Data_2020_2024.xlsx -o facts.json
  tidyledger audit data/Financial_Raw_Data_2020_2024.xlsx --config tidyledger.yaml

Logging goes to stderr; set RUST_LOG=tidyledger=debug for stage details.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the P&L sheets that would be processed
    Sheets {
        /// Path to Excel workbook (.xlsx)
        file: PathBuf,

        /// YAML config file (skip list, search depth)
        #[arg(short, long, env = "TIDYLEDGER_CONFIG")]
        config: Option<PathBuf>,
    },

    #[command(long_about = "Extract long fact rows from every P&L sheet.

Each sheet named '<Actual|Budget> P&L <YYYY>' goes through header detection,
table extraction, row classification and unpivoting. Sheets that cannot be
parsed are reported as skipped with a reason; the rest of the batch continues.

OUTPUT:
  JSON object with 'facts' (one entry per account and month) and 'reports'
  (one diagnostic entry per sheet). Missing amounts are written as null.")]
    /// Extract fact rows and diagnostics as JSON
    Extract {
        /// Path to Excel workbook (.xlsx)
        file: PathBuf,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML config file (skip list, search depth)
        #[arg(short, long, env = "TIDYLEDGER_CONFIG")]
        config: Option<PathBuf>,

        /// Number of leading rows scanned for the header (overrides config)
        #[arg(long)]
        search_depth: Option<usize>,
    },

    /// Describe the layout of every sheet as JSON
    Audit {
        /// Path to Excel workbook (.xlsx)
        file: PathBuf,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML config file
        #[arg(short, long, env = "TIDYLEDGER_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn main() -> LedgerResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tidyledger=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sheets { file, config } => cli::sheets(file, config),

        Commands::Extract {
            file,
            output,
            config,
            search_depth,
        } => cli::extract(file, output, config, search_depth),

        Commands::Audit {
            file,
            output,
            config,
        } => cli::audit(file, output, config),
    }
}
