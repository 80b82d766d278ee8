//! Stats module - significance thresholds and annotation

mod significance;

pub use significance::{
    annotate_significance, coerce_numeric, ensure_annotated, is_significant, LOG2FC_THRESHOLD,
    PVAL_THRESHOLD,
};
