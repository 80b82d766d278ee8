//! Significance Module
//! Numeric coercion of the expression columns and the per-gene significance flag.

use crate::data::ExpressionSet;
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use tracing::info;

/// Significance threshold for the p-value (strict)
pub const PVAL_THRESHOLD: f64 = 0.05;

/// Threshold for |log2 fold change| (strict)
pub const LOG2FC_THRESHOLD: f64 = 1.0;

pub const LOG2FC_COLUMN: &str = "log2fc";
pub const PVAL_COLUMN: &str = "pval";
pub const SIGNIFICANT_COLUMN: &str = "significant";
pub const GENE_NAME_COLUMN: &str = "gene_name";

/// Parse one cell; anything that is not a number is missing.
fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Coerce a column to numbers without failing.
///
/// Text cells that do not parse become `None`, as do NaN values.
pub fn coerce_numeric(column: &Column) -> Result<Vec<Option<f64>>> {
    let values = match column.dtype() {
        DataType::String => column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_numeric))
            .collect(),
        _ => {
            let cast = column.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect()
        }
    };
    Ok(values)
}

/// A gene is significant iff `pval < 0.05` and `|log2fc| > 1`.
/// Missing values never qualify.
pub fn is_significant(log2fc: Option<f64>, pval: Option<f64>) -> bool {
    match (log2fc, pval) {
        (Some(fc), Some(p)) => p < PVAL_THRESHOLD && fc.abs() > LOG2FC_THRESHOLD,
        _ => false,
    }
}

/// Replace `log2fc`/`pval` with their coerced values and add `significant`.
///
/// Mutates the set in place. Returns the number of significant rows.
pub fn annotate_significance(set: &mut ExpressionSet) -> Result<usize> {
    let log2fc = coerce_numeric(set.column(LOG2FC_COLUMN)?)?;
    let pval = coerce_numeric(set.column(PVAL_COLUMN)?)?;

    let flags: Vec<bool> = log2fc
        .iter()
        .zip(pval.iter())
        .map(|(&fc, &p)| is_significant(fc, p))
        .collect();
    let count = flags.iter().filter(|&&f| f).count();

    let df = set.dataframe_mut();
    df.with_column(Column::new(LOG2FC_COLUMN.into(), log2fc))?;
    df.with_column(Column::new(PVAL_COLUMN.into(), pval))?;
    df.with_column(Column::new(SIGNIFICANT_COLUMN.into(), flags))?;

    info!(
        rows = set.height(),
        significant = count,
        "Annotated significance (p < {}, |log2fc| > {})",
        PVAL_THRESHOLD,
        LOG2FC_THRESHOLD
    );
    Ok(count)
}

impl ExpressionSet {
    /// Coerced `(log2fc, pval, significant)` per row, in row order.
    ///
    /// Requires [`annotate_significance`] to have run.
    pub fn significance_rows(&self) -> Result<Vec<(Option<f64>, Option<f64>, bool)>> {
        let log2fc = self.column(LOG2FC_COLUMN)?.f64()?;
        let pval = self.column(PVAL_COLUMN)?.f64()?;
        let flags = self.column(SIGNIFICANT_COLUMN)?.bool()?;

        Ok(log2fc
            .into_iter()
            .zip(pval)
            .zip(flags)
            .map(|((fc, p), flag)| (fc, p, flag.unwrap_or(false)))
            .collect())
    }

    /// Gene names of significant rows, skipping missing names.
    pub fn significant_genes(&self) -> Result<Vec<String>> {
        let flags = self.column(SIGNIFICANT_COLUMN)?.bool()?;
        let name_column = self.column(GENE_NAME_COLUMN)?.cast(&DataType::String)?;
        let names = name_column.as_materialized_series().str()?;

        Ok(flags
            .into_iter()
            .zip(names)
            .filter_map(|(flag, name)| match (flag, name) {
                (Some(true), Some(name)) if !name.is_empty() => Some(name.to_string()),
                _ => None,
            })
            .collect())
    }
}

/// Reject a set whose `significant` column is missing, before plotting.
pub fn ensure_annotated(set: &ExpressionSet) -> Result<()> {
    match set.dataframe().column(SIGNIFICANT_COLUMN) {
        Ok(_) => Ok(()),
        Err(_) => Err(PipelineError::MissingColumn(SIGNIFICANT_COLUMN.to_string())),
    }
}
