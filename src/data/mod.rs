//! Data module - cohorts and CSV loading

mod cohort;
mod loader;

pub use cohort::{Cohort, COHORTS, GEO_ACCESSION};
pub use loader::{load_csv, ExpressionSet};
