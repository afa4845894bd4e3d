//! Batch comparison over tabular input.
//!
//! Parsing CSV text is left to the caller; this module takes the parsed
//! header and rows and drives one comparison per `ProductName` cell.

use tracing::warn;

use crate::compare::{normalize_product_name, Comparer};
use crate::config;
use crate::error::{ComparioError, Result};
use crate::models::ComparisonResult;

// ---------------------------------------------------------------------------
// CsvTable
// ---------------------------------------------------------------------------

/// A parsed CSV document: one header row plus data rows of equal width.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Build a table, rejecting rows whose width differs from the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != headers.len())
        {
            return Err(ComparioError::CsvSchema(format!(
                "Row {} has {} fields, expected {}",
                idx + 1,
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Position of a header, matched after trimming surrounding whitespace.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Values of a named column in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.column_index(name).ok_or_else(|| {
            ComparioError::CsvSchema(format!("Missing required column '{}'", name))
        })?;
        Ok(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }
}

/// Compare every product in the table's `ProductName` column.
///
/// A missing column, or an over-long name in any row, fails the whole batch
/// before any row runs. Blank names are skipped.
pub fn compare_table(comparer: &Comparer<'_>, table: &CsvTable) -> Result<Vec<ComparisonResult>> {
    let mut names = Vec::new();
    for (idx, raw) in table.column(config::PRODUCT_NAME_COLUMN)?.into_iter().enumerate() {
        let name = normalize_product_name(raw);
        if name.is_empty() {
            warn!(row = idx + 1, "skipping row with blank product name");
            continue;
        }
        if name.chars().count() > config::MAX_PRODUCT_NAME_LEN {
            return Err(ComparioError::InvalidArgument(format!(
                "Row {}: product name exceeds {} characters",
                idx + 1,
                config::MAX_PRODUCT_NAME_LEN
            )));
        }
        names.push(name);
    }

    names.iter().map(|name| comparer.compare(name)).collect()
}
