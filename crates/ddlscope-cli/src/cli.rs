//! CLI argument parsing using clap.

use clap::{Parser, ValueEnum};
use ddlscope_core::{Dialect, NameCase};
use std::path::PathBuf;

/// ddlscope - CREATE TABLE to BigQuery schema converter
#[derive(Parser, Debug)]
#[command(name = "ddlscope")]
#[command(about = "Convert CREATE TABLE statements to BigQuery schemas", long_about = None)]
#[command(version)]
pub struct Args {
    /// DDL files to convert, one CREATE TABLE each (`-` or none reads stdin)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Source SQL dialect
    #[arg(short, long, default_value = "generic", value_enum)]
    pub dialect: DialectArg,

    /// Output format
    #[arg(short, long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Case transform for schema, table and column names
    #[arg(short = 'n', long, default_value = "original", value_enum)]
    pub name_case: NameCaseArg,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Compact JSON output (no pretty-printing)
    #[arg(short, long)]
    pub compact: bool,

    /// Suppress warnings on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Log parser events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Source dialect options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    Generic,
    Mysql,
    Postgres,
    Oracle,
    Redshift,
}

impl From<DialectArg> for Option<Dialect> {
    fn from(d: DialectArg) -> Self {
        match d {
            DialectArg::Generic => None,
            DialectArg::Mysql => Some(Dialect::Mysql),
            DialectArg::Postgres => Some(Dialect::Postgresql),
            DialectArg::Oracle => Some(Dialect::Oracle),
            DialectArg::Redshift => Some(Dialect::Redshift),
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable column summary
    Table,
    /// BigQuery JSON field list
    Fields,
    /// BigQuery standard SQL CREATE TABLE
    Ddl,
    /// Parsed table model as JSON
    Json,
}

/// Name case options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NameCaseArg {
    Original,
    Lower,
    Upper,
}

impl From<NameCaseArg> for NameCase {
    fn from(case: NameCaseArg) -> Self {
        match case {
            NameCaseArg::Original => NameCase::Original,
            NameCaseArg::Lower => NameCase::Lower,
            NameCaseArg::Upper => NameCase::Upper,
        }
    }
}
