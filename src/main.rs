use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use csvappend::append_csv;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Merge two (Year, ISO3) keyed CSV files, summing duplicate keys.
#[derive(Parser, Debug)]
#[command(name = "csvappend", version)]
#[command(about = "Append two CSV datasets keyed by (Year, ISO3), summing duplicate keys")]
struct Cli {
    /// First input CSV
    file1: PathBuf,
    /// Second input CSV
    file2: PathBuf,
    /// Destination for the merged CSV
    output_file: PathBuf,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) parse arguments ──────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            println!(
                "Usage: csvappend <path to first csv file> <path to second csv file> <path to output csv file>"
            );
            std::process::exit(1);
        }
    };

    // ─── 3) run the merge ────────────────────────────────────────────
    info!(
        file1 = %cli.file1.display(),
        file2 = %cli.file2.display(),
        "startup"
    );
    append_csv(&cli.file1, &cli.file2, &cli.output_file)?;
    info!(output = %cli.output_file.display(), "done");

    Ok(())
}
