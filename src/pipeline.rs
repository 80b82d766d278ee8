//! Pipeline orchestration
//!
//! Acquire both tables, then per cohort: load, annotate, volcano plot,
//! enrichment. Strictly sequential; the first error stops the run.

use crate::acquire::Downloader;
use crate::charts::render_volcano;
use crate::config::Config;
use crate::data::{load_csv, Cohort, COHORTS};
use crate::enrichment::{run_enrichment, EnrichmentOutcome, EnrichmentService};
use crate::error::Result;
use crate::stats::annotate_significance;
use std::path::{Path, PathBuf};
use tracing::{info, info_span};

/// Summary of one analysed cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortReport {
    pub prefix: String,
    pub rows: usize,
    pub significant: usize,
    pub volcano: PathBuf,
    pub enrichment: EnrichmentOutcome,
}

pub struct Pipeline<S: EnrichmentService> {
    config: Config,
    service: S,
}

impl<S: EnrichmentService> Pipeline<S> {
    pub fn new(config: Config, service: S) -> Self {
        Self { config, service }
    }

    pub fn work_dir(&self) -> &Path {
        &self.config.work_dir
    }

    /// Download both tables, then analyse the cohorts in order.
    pub fn run(&self, downloader: &Downloader) -> Result<Vec<CohortReport>> {
        let csv_paths = downloader.fetch_all(self.work_dir())?;

        let mut reports = Vec::with_capacity(COHORTS.len());
        for (cohort, csv_path) in COHORTS.iter().zip(&csv_paths) {
            reports.push(self.analyze_cohort(cohort, csv_path)?);
        }
        Ok(reports)
    }

    /// Load one table and produce its plots and enrichment results.
    pub fn analyze_cohort(&self, cohort: &Cohort, csv_path: &Path) -> Result<CohortReport> {
        let span = info_span!("cohort", prefix = cohort.prefix);
        let _guard = span.enter();

        let mut set = load_csv(csv_path)?;
        let significant = annotate_significance(&mut set)?;
        let volcano = render_volcano(&set, cohort.prefix, self.work_dir())?;
        let enrichment = run_enrichment(&set, cohort.prefix, self.work_dir(), &self.service)?;

        info!(rows = set.height(), significant, "Cohort done");
        Ok(CohortReport {
            prefix: cohort.prefix.to_string(),
            rows: set.height(),
            significant,
            volcano,
            enrichment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::{EnrichmentQuery, EnrichmentTerm};
    use crate::error::PipelineError;
    use std::fs;

    struct NeverCalled;

    impl EnrichmentService for NeverCalled {
        fn profile(&self, _query: &EnrichmentQuery) -> Result<Vec<EnrichmentTerm>> {
            panic!("enrichment service must not be called");
        }
    }

    /// Answers every query with a fixed term list.
    struct CannedService(Vec<EnrichmentTerm>);

    impl EnrichmentService for CannedService {
        fn profile(&self, _query: &EnrichmentQuery) -> Result<Vec<EnrichmentTerm>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_missing_input_stops_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(Config::default().with_work_dir(dir.path()), NeverCalled);

        let err = pipeline
            .analyze_cohort(&COHORTS[0], &dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
        assert!(!dir.path().join("old_mice_volcano_plot.png").exists());
    }

    #[test]
    fn test_missing_column_is_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("table.csv");
        fs::write(&csv, "gene_id,gene_name,log2fc\nENSMUSG01,Actb,2.0\n").unwrap();
        let pipeline = Pipeline::new(Config::default().with_work_dir(dir.path()), NeverCalled);

        let err = pipeline.analyze_cohort(&COHORTS[1], &csv).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn(name) if name == "pval"));
    }

    #[test]
    fn test_cohort_without_significant_genes() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("table.csv");
        fs::write(
            &csv,
            "gene_id,gene_name,log2fc,pval\nENSMUSG01,Actb,0.3,0.01\nENSMUSG02,Gapdh,2.0,0.4\n",
        )
        .unwrap();
        let pipeline = Pipeline::new(Config::default().with_work_dir(dir.path()), NeverCalled);

        let report = pipeline.analyze_cohort(&COHORTS[0], &csv).unwrap();
        assert_eq!(report.rows, 2);
        assert_eq!(report.significant, 0);
        assert!(report.volcano.exists());
        assert_eq!(report.enrichment, EnrichmentOutcome::NoSignificantGenes);
        assert!(!dir.path().join("old_mice_go_terms.png").exists());
    }

    #[test]
    fn test_cohort_with_enrichment_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("table.csv");
        fs::write(
            &csv,
            "gene_id,gene_name,log2fc,pval\n\
             ENSMUSG01,Trem2,2.5,0.001\n\
             ENSMUSG02,Apoe,-1.8,0.02\n\
             ENSMUSG03,Actb,0.3,0.01\n\
             ENSMUSG04,Gapdh,2.0,0.4\n",
        )
        .unwrap();

        let mut terms: Vec<EnrichmentTerm> = (0..12)
            .map(|i| EnrichmentTerm {
                source: "GO:BP".to_string(),
                native: format!("GO:{:07}", i),
                name: format!("process {}", i),
                p_value: 0.001 * (i + 1) as f64,
                ..EnrichmentTerm::default()
            })
            .collect();
        terms.push(EnrichmentTerm {
            native: "GO:0000099".to_string(),
            name: "unrelated".to_string(),
            p_value: 0.9,
            ..EnrichmentTerm::default()
        });
        let pipeline = Pipeline::new(
            Config::default().with_work_dir(dir.path()),
            CannedService(terms),
        );

        let report = pipeline.analyze_cohort(&COHORTS[0], &csv).unwrap();
        assert_eq!((report.rows, report.significant), (4, 2));
        assert!(report.volcano.exists());

        match report.enrichment {
            EnrichmentOutcome::Completed { csv, chart, terms } => {
                assert_eq!(terms.len(), 12);
                assert!(terms.iter().all(|t| t.p_value < 0.05));
                assert_eq!(fs::read_to_string(&csv).unwrap().lines().count(), 13);
                assert_eq!(chart, dir.path().join("old_mice_go_terms.png"));
                assert!(chart.exists());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
