//! Fixed cohorts of the GSE118523 series.

/// GEO series accession the input tables belong to.
pub const GEO_ACCESSION: &str = "GSE118523";

/// One dataset of the run: where it comes from and how its outputs are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cohort {
    /// Prefix of every output file, e.g. `old_mice_volcano_plot.png`
    pub prefix: &'static str,
    /// Supplementary file name without `.csv.gz`
    pub file_stem: &'static str,
}

impl Cohort {
    /// Name of the compressed file on GEO.
    pub fn archive_name(&self) -> String {
        format!("{}.csv.gz", self.file_stem)
    }

    /// Name of the decompressed CSV on disk.
    pub fn csv_name(&self) -> String {
        format!("{}.csv", self.file_stem)
    }
}

/// Analysis order: old first, then young.
pub const COHORTS: [Cohort; 2] = [
    Cohort {
        prefix: "old_mice",
        file_stem: "GSE118523_20161109_old_wt_tg",
    },
    Cohort {
        prefix: "young_mice",
        file_stem: "GSE118523_20161109_young_wt_tg",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cohort_file_names() {
        let old = COHORTS[0];
        assert_eq!(old.prefix, "old_mice");
        assert_eq!(old.archive_name(), "GSE118523_20161109_old_wt_tg.csv.gz");
        assert_eq!(old.csv_name(), "GSE118523_20161109_old_wt_tg.csv");
        assert_eq!(COHORTS[1].prefix, "young_mice");
    }
}
