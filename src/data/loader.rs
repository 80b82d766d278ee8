//! CSV Data Loader Module
//! Loads one expression table into a Polars DataFrame.

use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Expression table for one cohort.
///
/// The first column is the row identifier. Every column is held as text
/// until [`crate::stats::annotate_significance`] coerces the numeric ones.
#[derive(Debug, Clone)]
pub struct ExpressionSet {
    df: DataFrame,
    index_column: String,
    source: Option<PathBuf>,
}

impl ExpressionSet {
    /// Wrap an existing frame. Its first column becomes the identifier.
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        let index_column = df
            .get_column_names()
            .first()
            .map(|name| name.to_string())
            .ok_or_else(|| PipelineError::EmptyDataset(PathBuf::new()))?;

        Ok(Self {
            df,
            index_column,
            source: None,
        })
    }

    /// Name of the identifier column.
    pub fn index_column(&self) -> &str {
        &self.index_column
    }

    /// Number of records.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub(crate) fn dataframe_mut(&mut self) -> &mut DataFrame {
        &mut self.df
    }

    /// File the set was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Look up a column, naming it in the error when absent.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.df
            .column(name)
            .map_err(|_| PipelineError::MissingColumn(name.to_string()))
    }
}

/// Cell values read as missing, the usual spreadsheet/R/pandas spellings.
pub const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Load a comma-separated file with a header row.
pub fn load_csv(path: impl AsRef<Path>) -> Result<ExpressionSet> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PipelineError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("'{}' does not exist", path.display()),
        )));
    }

    // Schema inference off: every column comes back as String.
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_null_values(Some(NullValues::AllColumns(
            MISSING_MARKERS.iter().map(|m| (*m).into()).collect(),
        )))
        .finish()?
        .collect()?;

    if df.width() == 0 {
        return Err(PipelineError::EmptyDataset(path.to_path_buf()));
    }

    let mut set = ExpressionSet::from_dataframe(df)?;
    set.source = Some(path.to_path_buf());

    debug!(
        path = %path.display(),
        rows = set.height(),
        index = %set.index_column(),
        "Loaded expression table"
    );
    Ok(set)
}
