//! Command-line parsing for the sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the ingest/engine/server code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sales-dash", version, about = "Interactive sales analysis dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the dataset and serve the interactive dashboard (the default).
    Serve(ServeArgs),
    /// Load the dataset, print an ingest report, and exit.
    ///
    /// Useful for checking a CSV before deploying it: shows row counts,
    /// distinct products/regions, the date span, and any skipped rows.
    Inspect(DataArgs),
}

/// Options shared by every command that loads the dataset.
#[derive(Debug, Parser, Clone)]
pub struct DataArgs {
    /// Path to the sales CSV (columns: Date, Product, Region, Sales).
    #[arg(short = 'd', long = "data", default_value = "sales_data.csv")]
    pub data: PathBuf,
}

/// Options for `serve`.
#[derive(Debug, Parser, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Listen port (overrides the PORT environment variable; default 8050).
    #[arg(short = 'p', long)]
    pub port: Option<u16>,
}

/// Rewrite argv so a bare `sales-dash` serves.
///
/// Rules:
/// - `sales-dash`                      -> `sales-dash serve`
/// - `sales-dash -d data.csv ...`      -> `sales-dash serve -d data.csv ...`
/// - `sales-dash --help/--version/-h`  -> unchanged (show top-level help/version)
pub fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("serve".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "serve" | "inspect");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "serve flags".
    if arg1.starts_with('-') {
        argv.insert(1, "serve".to_string());
        return argv;
    }

    // Otherwise, leave as-is (clap will report the unknown subcommand).
    argv
}
