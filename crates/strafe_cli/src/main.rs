//! STRAFE CLI
//!
//! Batch movement-input statistics from recorded demo files.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgGroup, Parser};
use color_eyre::eyre::bail;
use color_eyre::Result;
use console::style;
use tracing_subscriber::EnvFilter;

use strafe_analysis::AnalyzerConfig;
use strafe_batch::{BatchConfig, BatchDriver, BatchSummary, DEFAULT_MAX_CONCURRENT};
use strafe_demo::JournalBackend;

#[derive(Parser)]
#[command(name = "strafe")]
#[command(about = "Movement-input statistics from recorded demo files", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).multiple(false)))]
struct Cli {
    /// Analyze every demo file under this directory, recursively.
    #[arg(long, value_name = "PATH", group = "source")]
    dir: Option<PathBuf>,

    /// Analyze a single demo file.
    #[arg(long, value_name = "PATH", group = "source")]
    demo: Option<PathBuf>,

    /// Print a per-file summary for each successfully analyzed demo.
    #[arg(long = "v")]
    verbose: bool,

    /// Maximum number of demos analyzed at the same time.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CONCURRENT)]
    max_concurrent: usize,

    /// Credit a direction switch once when a single transition both closes
    /// a momentary overlap and reads as a direct reversal.
    #[arg(long)]
    dedup_switches: bool,

    /// Demo file extension matched during directory walks.
    #[arg(long, value_name = "EXT", default_value = "dem")]
    ext: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    println!("{}", style("strafe - movement input statistics").bold());
    println!("Overlap figures are tick-granular and do not reflect sub-tick input timing.");
    println!("----");

    let config = BatchConfig::default()
        .with_max_concurrent(cli.max_concurrent)
        .with_extension(cli.ext.clone())
        .with_verbose(cli.verbose)
        .with_analyzer(AnalyzerConfig::default().with_dedup_switches(cli.dedup_switches));
    let driver = BatchDriver::new(Arc::new(JournalBackend::new()), config);

    let summary = if let Some(demo) = cli.demo {
        println!("Parsing demo file: {}", demo.display());
        driver.run_file(demo).await
    } else if let Some(dir) = cli.dir {
        println!("Parsing dir {}", dir.display());
        driver.run_dir(&dir).await?
    } else {
        // The clap group guarantees one of the two is present.
        bail!("either --dir or --demo is required");
    };

    report_summary(&summary);
    Ok(())
}

fn report_summary(summary: &BatchSummary) {
    for outcome in summary.failures() {
        let error = outcome.error.as_deref().unwrap_or("unknown error");
        eprintln!(
            "{} {}: {}",
            style("failed").red().bold(),
            outcome.path.display(),
            error
        );
    }
    println!(
        "Parsing done. {} succeeded, {} failed.",
        summary.succeeded(),
        summary.failed()
    );
}
