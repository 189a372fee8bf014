//! DDL sources: files named on the command line, or stdin.

use anyhow::{anyhow, Context, Result};
use ddlscope_core::{parse_ddl, DdlError, Dialect, Table};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const STDIN_NAME: &str = "<stdin>";

/// One `CREATE TABLE` input and where it came from.
#[derive(Debug, Clone)]
pub struct DdlSource {
    pub name: String,
    pub content: String,
}

impl DdlSource {
    fn new(name: impl Into<String>, mut content: String) -> Self {
        // Editors on Windows like to prepend a BOM to exported DDL.
        if content.starts_with('\u{feff}') {
            content.drain(..'\u{feff}'.len_utf8());
        }
        Self {
            name: name.into(),
            content,
        }
    }

    /// Parses the source, naming it in any error.
    pub fn parse(&self, dialect: Option<Dialect>) -> Result<Table> {
        match parse_ddl(&self.content, dialect) {
            Ok(table) => Ok(table),
            Err(DdlError::MissingInput) => {
                Err(anyhow!("{}: no CREATE TABLE statement (input is empty)", self.name))
            }
            Err(e) => Err(e).with_context(|| self.name.clone()),
        }
    }
}

/// Reads every input. No files, or a lone `-`, means stdin; stdin is read
/// at most once.
pub fn read_input(files: &[PathBuf]) -> Result<Vec<DdlSource>> {
    if files.is_empty() {
        return Ok(vec![read_stdin()?]);
    }

    let mut stdin_read = false;
    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        if path.as_os_str() == "-" {
            if stdin_read {
                continue;
            }
            stdin_read = true;
            sources.push(read_stdin()?);
        } else {
            sources.push(read_file(path)?);
        }
    }
    Ok(sources)
}

fn read_stdin() -> Result<DdlSource> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;
    Ok(DdlSource::new(STDIN_NAME, content))
}

fn read_file(path: &Path) -> Result<DdlSource> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(DdlSource::new(path.display().to_string(), content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_sql(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_reads_files_in_order() {
        let users = temp_sql("CREATE TABLE users (id int)");
        let orders = temp_sql("CREATE TABLE orders (id int)");

        let sources =
            read_input(&[users.path().to_path_buf(), orders.path().to_path_buf()]).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, users.path().display().to_string());
        assert_eq!(sources[1].parse(None).unwrap().name(), "orders");
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let file = temp_sql("\u{feff}CREATE TABLE t (a int)");
        let sources = read_input(&[file.path().to_path_buf()]).unwrap();
        assert!(sources[0].content.starts_with("CREATE"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_input(&[PathBuf::from("/nonexistent/table.sql")]).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read file: /nonexistent/table.sql"));
    }

    #[test]
    fn test_empty_source_names_the_file() {
        let source = DdlSource::new("empty.sql", " \n\t".to_string());
        let err = source.parse(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "empty.sql: no CREATE TABLE statement (input is empty)"
        );
    }

    #[test]
    fn test_parse_error_carries_source_name() {
        let source = DdlSource::new("bad.sql", "CREATE TABLE b (".to_string());
        let err = source.parse(Some(Dialect::Mysql)).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("bad.sql: "), "{message}");
        assert!(err.downcast_ref::<DdlError>().is_some());
    }
}
