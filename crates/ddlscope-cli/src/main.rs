//! ddlscope CLI - CREATE TABLE to BigQuery schema converter

use ddlscope_cli::cli;
use ddlscope_cli::input;
use ddlscope_cli::output;

use anyhow::{Context, Result};
use clap::Parser;
use ddlscope_core::{Dialect, NameCase};
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use cli::{Args, OutputFormat};
use output::{format_fields, format_json, format_table, ConvertedTable};

/// At least one input failed to parse or map.
const EXIT_FAILURE: u8 = 1;
/// Configuration or I/O error.
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        init_logging();
    }

    match run(args) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("ddlscope: error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ddlscope_core=trace"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(not(feature = "tracing"))]
fn init_logging() {
    eprintln!("ddlscope: warning: built without the `tracing` feature; --verbose has no effect");
}

/// Converts every input. Returns `true` if any input failed.
fn run(args: Args) -> Result<bool> {
    let sources = input::read_input(&args.files)?;
    let dialect: Option<Dialect> = args.dialect.into();
    let case: NameCase = args.name_case.into();

    let mut has_errors = false;
    let mut converted = Vec::with_capacity(sources.len());
    for source in sources {
        match source.parse(dialect) {
            Ok(table) => converted.push(ConvertedTable {
                source: source.name,
                table,
            }),
            Err(e) => {
                has_errors = true;
                eprintln!("ddlscope: error: {e:#}");
            }
        }
    }

    if converted.is_empty() {
        return Ok(has_errors);
    }

    let output_str = match args.format {
        OutputFormat::Table => format_table(&converted, case, args.quiet, !args.quiet),
        OutputFormat::Json => format_json(&converted, args.compact),
        OutputFormat::Fields => match format_fields(&converted, case, args.compact) {
            Ok(fields) => fields,
            Err(e) => {
                eprintln!("ddlscope: error: {e:#}");
                return Ok(true);
            }
        },
        OutputFormat::Ddl => {
            let mut statements = Vec::with_capacity(converted.len());
            for item in &converted {
                match item.table.to_bigquery_ddl(case) {
                    Ok(ddl) => statements.push(ddl),
                    Err(e) => {
                        eprintln!("ddlscope: error: Failed to map {}: {e}", item.source);
                        return Ok(true);
                    }
                }
            }
            statements.join("\n\n")
        }
    };

    write_output(&args.output, &output_str)?;
    Ok(has_errors)
}

fn write_output(path: &Option<std::path::PathBuf>, content: &str) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    } else {
        io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        // Ensure newline at end for terminal output
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
