//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initializes tracing
//! - loads the sales CSV (fatal on failure, before any socket is bound)
//! - starts the Tokio runtime and serves the dashboard
//! - or, for `inspect`, prints the ingest report and exits

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, DataArgs, ServeArgs, rewrite_args};
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::io::ingest::{IngestedData, load_sales_csv};
use crate::server::AppState;

/// Entry point for the `sales-dash` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `sales-dash` (and `sales-dash -d other.csv`) to behave
    // like `sales-dash serve ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the expected UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    match cli.command {
        Command::Serve(args) => handle_serve(args),
        Command::Inspect(args) => handle_inspect(args),
    }
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    init_tracing();

    let config = ServerConfig::from_env(args.port)?;
    let ingest = load_sales_csv(&args.data.data)?;
    log_ingest(&ingest, &args.data);

    let state = Arc::new(AppState {
        records: ingest.records,
        summary: ingest.summary,
    });

    // The engine itself is synchronous; the runtime exists only to serve HTTP.
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::Server(format!("Failed to start runtime: {e}")))?;
    runtime.block_on(crate::server::serve(config.listen_addr(), state))
}

fn handle_inspect(args: DataArgs) -> Result<(), AppError> {
    let ingest = load_sales_csv(&args.data)?;
    print!("{}", format_ingest_report(&ingest, &args));
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn log_ingest(ingest: &IngestedData, args: &DataArgs) {
    tracing::info!(
        path = %args.data.display(),
        rows_read = ingest.rows_read,
        rows_used = ingest.rows_used,
        products = ingest.summary.products.len(),
        regions = ingest.summary.regions.len(),
        "Dataset loaded."
    );
    for err in &ingest.row_errors {
        tracing::warn!(line = err.line, "Skipped row: {}", err.message);
    }
}

/// Human-readable ingest report for `sales-dash inspect`.
fn format_ingest_report(ingest: &IngestedData, args: &DataArgs) -> String {
    let mut out = String::new();
    let s = &ingest.summary;

    out.push_str(&format!("Dataset: {}\n", args.data.display()));
    out.push_str(&format!(
        "Rows:    {} read, {} used, {} skipped\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    out.push_str(&format!("Dates:   {} .. {}\n", s.date_min, s.date_max));
    out.push_str(&format!("Products ({}): {}\n", s.products.len(), s.products.join(", ")));
    out.push_str(&format!("Regions  ({}): {}\n", s.regions.len(), s.regions.join(", ")));

    if !ingest.row_errors.is_empty() {
        out.push_str("\nSkipped rows:\n");
        for err in &ingest.row_errors {
            out.push_str(&format!("  line {}: {}\n", err.line, err.message));
        }
    }

    out
}
