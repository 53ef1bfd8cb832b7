use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use insight_search::config::{DEFAULT_CANDIDATE_FILES, DEFAULT_DATABASE_URL};
use insight_search::db;
use insight_search::services::{FileOutcome, ImportError, ImportSummary, InsightImportService};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "insight-import")]
#[command(about = "Import keyword insight CSV exports into the insight_search table", long_about = None)]
struct Cli {
    /// Database connection string (SQLite file is created if missing)
    #[arg(long, env, default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// CSV files to import, in order. Missing files are skipped.
    /// Defaults to insight_search01.csv .. insight_search05.csv
    files: Vec<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

async fn run_import(
    service: &InsightImportService,
    candidates: &[PathBuf],
) -> Result<ImportSummary, Box<dyn std::error::Error>> {
    service.ensure_schema().await?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Importing {} candidate files...", candidates.len()));
    pb.enable_steady_tick(Duration::from_millis(120));

    let result: Result<ImportSummary, ImportError> = service.import_all(candidates).await;
    match &result {
        Ok(summary) => pb.finish_with_message(format!(
            "✓ Imported {} rows",
            summary.imported_this_run
        )),
        Err(_) => pb.abandon_with_message("✗ Import failed"),
    }

    Ok(result?)
}

fn print_summary(summary: &ImportSummary, elapsed: Duration) {
    println!("\n{}", "=".repeat(60));
    println!("Import Summary");
    println!("{}", "=".repeat(60));
    for file in &summary.files {
        match file.outcome {
            FileOutcome::Imported { rows } => {
                println!("{:<40} {rows} rows", file.path.display());
            }
            FileOutcome::Skipped => {
                println!("{:<40} not found, skipped", file.path.display());
            }
        }
    }
    println!("{}", "-".repeat(60));
    println!("Imported This Run:  {}", summary.imported_this_run);
    println!("Total Records:      {}", summary.total_records);
    println!("{}", "-".repeat(60));
    println!("Records per file:");
    for count in &summary.per_file {
        println!("  {}: {}", count.file_source, count.count);
    }
    println!("{}", "-".repeat(60));
    println!("Total Time:         {:.2}s", elapsed.as_secs_f64());
    println!("{}", "=".repeat(60));
    println!();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if it exists (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let candidates: Vec<PathBuf> = if cli.files.is_empty() {
        DEFAULT_CANDIDATE_FILES.iter().map(PathBuf::from).collect()
    } else {
        cli.files
    };

    let start_time = Instant::now();
    info!("Connecting to database...");
    let pool = db::connect(&cli.database_url).await?;
    let service = InsightImportService::new(pool.clone());

    let result = run_import(&service, &candidates).await;
    // Release the connection whether or not the import succeeded
    pool.close().await;

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            error!("Import failed: {e}");
            std::process::exit(1);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, start_time.elapsed());
    }

    Ok(())
}
