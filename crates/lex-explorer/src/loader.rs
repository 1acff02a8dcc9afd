//! CSV loading.
//!
//! Files are read with a header row and a schema inferred from the first 100
//! rows. Dates are left as text; turning them into datetimes is an explicit
//! step (see [`crate::summary::DatasetSummary::coerce_to_datetime`]). When
//! the standard read fails, the loader retries without quote handling and
//! then on pre-cleaned content before giving up.

use crate::error::{ExplorerError, Result, ResultExt};
use crate::utils::normalize_column_name;
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const INFER_SCHEMA_ROWS: usize = 100;

/// Load a CSV file and normalize its column names.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    info!("Loading dataset from: {}", path.display());

    let mut df = read_with_fallbacks(path)?;
    normalize_column_names(&mut df)?;

    info!("Dataset loaded: {} rows x {} columns", df.height(), df.width());
    Ok(df)
}

/// Parse CSV text already held in memory.
pub fn load_csv_from_str(content: &str) -> Result<DataFrame> {
    let mut df = read_from_cursor(content.to_string())?;
    normalize_column_names(&mut df)?;
    Ok(df)
}

/// Display name of a dataset: the file name, or the whole path if it has none.
pub fn dataset_name(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_with_fallbacks(path: &Path) -> Result<DataFrame> {
    // 1. standard read with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Standard loading failed: {}", e),
    }

    // 2. without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Loading without quotes failed: {}", e),
    }

    // 3. pre-cleaned content
    warn!("Falling back to cleaned content for {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| {
        ExplorerError::from(e).with_context(format!("Could not read {}", path.display()))
    })?;
    read_from_cursor(clean_csv_content(&content))
}

fn read_from_cursor(content: String) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(content))
        .finish()
        .context("Failed to parse CSV content")
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_column_names(df: &mut DataFrame) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|n| normalize_column_name(n))
        .collect();

    df.set_column_names(names)
        .context("Normalized column names collide")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_from_str_normalizes_names() {
        let df =
            load_csv_from_str("order date,unit price\n2024-01-15,3.5\n2024-01-16,4\n").unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();

        assert_eq!(names, vec!["order_date", "unit_price"]);
        assert_eq!(df.height(), 2);
        // dates stay as text until coerced
        assert_eq!(df.column("order_date").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("unit_price").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_clean_csv_content() {
        let raw = "a,b\n\n\"\"x\"\",1\n   \ny,2";
        assert_eq!(clean_csv_content(raw), "a,b\n\"x\",1\ny,2");
    }

    #[test]
    fn test_dataset_name() {
        assert_eq!(dataset_name("data/sales.csv"), "sales.csv");
        assert_eq!(dataset_name("sales.csv"), "sales.csv");
    }

    #[test]
    fn test_missing_file() {
        assert!(load_csv("does/not/exist.csv").is_err());
    }
}
