//! Enrichment module - GO / pathway over-representation of significant genes
//!
//! The remote service sits behind [`EnrichmentService`]; [`GProfilerClient`]
//! is the production implementation.

mod analysis;
mod client;
mod results;

pub use analysis::{run_enrichment, EnrichmentOutcome, RESULTS_SUFFIX};
pub use client::{parse_profile_response, GProfilerClient};
pub use results::{filter_by_p_value, results_frame, top_terms, write_results_csv, TOP_TERMS};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// g:Profiler organism id for Mus musculus.
pub const ORGANISM: &str = "mmusculus";

/// Term sources queried, in request order.
pub const SOURCES: [&str; 5] = ["GO:BP", "GO:MF", "GO:CC", "KEGG", "REAC"];

/// Terms at or above this p-value are dropped from the results.
pub const ENRICHMENT_PVAL_THRESHOLD: f64 = 0.05;

/// One enrichment request.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentQuery {
    pub organism: String,
    pub genes: Vec<String>,
    pub sources: Vec<String>,
}

impl EnrichmentQuery {
    /// Mouse query over GO, KEGG and Reactome.
    pub fn mouse(genes: Vec<String>) -> Self {
        Self {
            organism: ORGANISM.to_string(),
            genes,
            sources: SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// One enriched term as returned by g:Profiler.
///
/// Field order is the column order of the results CSV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentTerm {
    /// Source ontology, e.g. `GO:BP`
    pub source: String,
    /// Native term id, e.g. `GO:0006955`
    pub native: String,
    pub name: String,
    pub p_value: f64,
    pub significant: bool,
    pub description: String,
    pub term_size: u64,
    pub query_size: u64,
    pub intersection_size: u64,
    pub effective_domain_size: u64,
    pub precision: f64,
    pub recall: f64,
    pub query: String,
    pub parents: Vec<String>,
}

/// A remote over-representation service.
pub trait EnrichmentService {
    /// Run one blocking query and return every term the service reports.
    fn profile(&self, query: &EnrichmentQuery) -> Result<Vec<EnrichmentTerm>>;
}
