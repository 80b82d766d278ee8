//! Volcano Enrich - differential expression triage for GSE118523
//!
//! Downloads the old/young mouse expression tables, flags significant
//! genes, draws volcano plots and runs GO/pathway enrichment through
//! g:Profiler.

pub mod acquire;
pub mod charts;
pub mod config;
pub mod data;
pub mod enrichment;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod stats;

pub use config::Config;
pub use error::{PipelineError, Result};
pub use pipeline::{CohortReport, Pipeline};
