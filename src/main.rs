use clap::{Parser, Subcommand};
use pricebook::cli;
use pricebook::error::PricebookResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pricebook")]
#[command(about = "Extract the quoting tool's pricing configuration from the sales spreadsheet")]
#[command(long_about = "Pricebook - pricing-configuration extractor

Reads the semi-structured sales spreadsheet maintained by the sales team
and emits a canonical JSON artifact the quoting calculator consumes.

COMMANDS:
  extract  - Resolve the workbook, extract, write the artifact
  inspect  - Show sheets, headers and the resolved column roles
  watch    - Re-extract automatically whenever the workbook changes

EXAMPLES:
  pricebook extract                        # Use the first candidate workbook
  pricebook extract cennik.xlsx -o out.json
  pricebook inspect --verbose              # Dry-run with extraction counts
  pricebook watch                          # Re-extract on every save

Header wording drifts across spreadsheet revisions; columns are resolved
by known header synonyms first, with the historical column position as
fallback. Tune both via a pricebook.yaml profile override.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Run one extraction pass and write the artifact.

The workbook is resolved by trying the profile's ordered candidate
filenames against the working directory (first existing path wins), or
from the explicit path argument. A missing workbook aborts with a
non-zero exit and writes nothing.

Data anomalies never abort: a missing sheet, a blank key, a blank price
cell or an unresolved column role simply leave the corresponding entries
out of the artifact.")]
    /// Extract the pricing configuration and write the JSON artifact
    Extract {
        /// Path to the workbook (default: first existing profile candidate)
        workbook: Option<PathBuf>,

        /// Path to a YAML profile override (default: pricebook.yaml if present)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Artifact output path (default: from profile, data/pricebook.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show verbose extraction steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Inspect the workbook without writing anything.

Lists the sheets, the pricing-sheet headers with their column letters,
and the column-role assignment the extractor would use: which column was
matched by synonym, which fell back to its historical position, and
which roles stay unresolved.

Use --verbose to also run the extraction and print entry counts.")]
    /// Show sheets, pricing headers and resolved column roles
    Inspect {
        /// Path to the workbook (default: first existing profile candidate)
        workbook: Option<PathBuf>,

        /// Path to a YAML profile override (default: pricebook.yaml if present)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Also run the extraction and show entry counts
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Watch the workbook and re-extract on changes.

Monitors the workbook's directory, debounces save events, and re-runs
the full extraction pass on every relevant change. Extraction failures
are reported and the watch continues; the next save retries.

Press Ctrl+C to stop watching.")]
    /// Re-extract automatically whenever the workbook changes
    Watch {
        /// Path to the workbook (default: first existing profile candidate)
        workbook: Option<PathBuf>,

        /// Path to a YAML profile override (default: pricebook.yaml if present)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Artifact output path (default: from profile, data/pricebook.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show verbose extraction steps
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> PricebookResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pricebook=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            workbook,
            profile,
            output,
            verbose,
        } => cli::extract(workbook, profile, output, verbose),

        Commands::Inspect {
            workbook,
            profile,
            verbose,
        } => cli::inspect(workbook, profile, verbose),

        Commands::Watch {
            workbook,
            profile,
            output,
            verbose,
        } => cli::watch(workbook, profile, output, verbose),
    }
}
