//! Enrichment stage of one cohort: query, filter, export, chart.

use super::{
    filter_by_p_value, top_terms, write_results_csv, EnrichmentQuery, EnrichmentService,
    EnrichmentTerm, ENRICHMENT_PVAL_THRESHOLD, TOP_TERMS,
};
use crate::charts::{output_path, render_enrichment_bars};
use crate::data::ExpressionSet;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

pub const RESULTS_SUFFIX: &str = "go_pathway_results.csv";

/// What the enrichment stage produced for a cohort.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentOutcome {
    /// Nothing passed the significance filter; no service call, no files.
    NoSignificantGenes,
    Completed {
        csv: PathBuf,
        chart: PathBuf,
        /// Terms with p < 0.05, in service order (as written to the CSV)
        terms: Vec<EnrichmentTerm>,
    },
}

/// Run the enrichment stage on an annotated set.
pub fn run_enrichment<S: EnrichmentService + ?Sized>(
    set: &ExpressionSet,
    prefix: &str,
    dir: &Path,
    service: &S,
) -> Result<EnrichmentOutcome> {
    let genes = set.significant_genes()?;
    if genes.is_empty() {
        info!(prefix, "No significant genes found for {}.", prefix);
        return Ok(EnrichmentOutcome::NoSignificantGenes);
    }

    let query = EnrichmentQuery::mouse(genes);
    let terms = filter_by_p_value(service.profile(&query)?, ENRICHMENT_PVAL_THRESHOLD);

    let csv = output_path(dir, prefix, RESULTS_SUFFIX);
    write_results_csv(&terms, &csv)?;
    info!(path = %csv.display(), terms = terms.len(), "Saved enrichment results");

    let top = top_terms(&terms, TOP_TERMS);
    let chart = render_enrichment_bars(&top, prefix, dir)?;

    Ok(EnrichmentOutcome::Completed { csv, chart, terms })
}
