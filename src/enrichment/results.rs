//! Enrichment result filtering, ranking and CSV export.

use super::EnrichmentTerm;
use crate::error::Result;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Bars drawn on the chart.
pub const TOP_TERMS: usize = 10;

/// Keep terms with `p_value < threshold`, in service order.
pub fn filter_by_p_value(terms: Vec<EnrichmentTerm>, threshold: f64) -> Vec<EnrichmentTerm> {
    terms.into_iter().filter(|t| t.p_value < threshold).collect()
}

/// The `n` smallest p-values, ascending. Ties keep service order.
pub fn top_terms(terms: &[EnrichmentTerm], n: usize) -> Vec<EnrichmentTerm> {
    let mut sorted = terms.to_vec();
    sorted.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));
    sorted.truncate(n);
    sorted
}

/// Results table with one column per [`EnrichmentTerm`] field.
/// `parents` is stored as a JSON array string.
pub fn results_frame(terms: &[EnrichmentTerm]) -> Result<DataFrame> {
    fn text(terms: &[EnrichmentTerm], f: impl Fn(&EnrichmentTerm) -> &str) -> Vec<String> {
        terms.iter().map(|t| f(t).to_string()).collect()
    }

    let parents = terms
        .iter()
        .map(|t| serde_json::to_string(&t.parents))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let df = DataFrame::new(vec![
        Column::new("source".into(), text(terms, |t| t.source.as_str())),
        Column::new("native".into(), text(terms, |t| t.native.as_str())),
        Column::new("name".into(), text(terms, |t| t.name.as_str())),
        Column::new(
            "p_value".into(),
            terms.iter().map(|t| t.p_value).collect::<Vec<f64>>(),
        ),
        Column::new(
            "significant".into(),
            terms.iter().map(|t| t.significant).collect::<Vec<bool>>(),
        ),
        Column::new("description".into(), text(terms, |t| t.description.as_str())),
        Column::new(
            "term_size".into(),
            terms.iter().map(|t| t.term_size).collect::<Vec<u64>>(),
        ),
        Column::new(
            "query_size".into(),
            terms.iter().map(|t| t.query_size).collect::<Vec<u64>>(),
        ),
        Column::new(
            "intersection_size".into(),
            terms.iter().map(|t| t.intersection_size).collect::<Vec<u64>>(),
        ),
        Column::new(
            "effective_domain_size".into(),
            terms
                .iter()
                .map(|t| t.effective_domain_size)
                .collect::<Vec<u64>>(),
        ),
        Column::new(
            "precision".into(),
            terms.iter().map(|t| t.precision).collect::<Vec<f64>>(),
        ),
        Column::new(
            "recall".into(),
            terms.iter().map(|t| t.recall).collect::<Vec<f64>>(),
        ),
        Column::new("query".into(), text(terms, |t| t.query.as_str())),
        Column::new("parents".into(), parents),
    ])?;

    Ok(df)
}

/// Write the results table with a header row and no index column.
/// An empty slice produces a header-only file.
pub fn write_results_csv(terms: &[EnrichmentTerm], path: &Path) -> Result<()> {
    let mut df = results_frame(terms)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    Ok(())
}
