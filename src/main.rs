//! Volcano Enrich - runs the full pipeline in the working directory.

use std::process;
use tracing::{error, info};
use volcano_enrich::acquire::Downloader;
use volcano_enrich::enrichment::GProfilerClient;
use volcano_enrich::logging::init_logging;
use volcano_enrich::{Config, Pipeline};

fn run() -> volcano_enrich::Result<()> {
    let config = Config::from_env();
    let downloader = Downloader::new(&config)?;
    let service = GProfilerClient::new(&config)?;

    let reports = Pipeline::new(config, service).run(&downloader)?;
    for report in &reports {
        info!(
            prefix = %report.prefix,
            rows = report.rows,
            significant = report.significant,
            "Analysis complete"
        );
    }
    Ok(())
}

fn main() {
    // The pipeline works without logging.
    let _ = init_logging();

    if let Err(e) = run() {
        error!(error = %e, "Pipeline failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
