//! GEO downloader
//!
//! Fetches the gzip-compressed supplementary tables and unpacks them next
//! to where they were saved, removing the archive afterwards.

use crate::config::Config;
use crate::data::{Cohort, COHORTS, GEO_ACCESSION};
use crate::error::{PipelineError, Result};
use flate2::read::MultiGzDecoder;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Blocking HTTP client for GEO supplementary files
pub struct Downloader {
    client: Client,
    base_url: String,
}

impl Downloader {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.geo_url.clone(),
        })
    }

    /// Download one cohort's archive into `dir` and unpack it.
    ///
    /// Returns the path of the decompressed CSV.
    pub fn fetch(&self, cohort: &Cohort, dir: &Path) -> Result<PathBuf> {
        let archive_name = cohort.archive_name();
        let archive_path = dir.join(&archive_name);
        let csv_path = dir.join(cohort.csv_name());

        info!(file = %archive_name, "Downloading");
        let mut response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("acc", GEO_ACCESSION),
                ("format", "file"),
                ("file", archive_name.as_str()),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| PipelineError::download(&archive_name, e))?;

        let mut out = BufWriter::new(File::create(&archive_path)?);
        let bytes = response
            .copy_to(&mut out)
            .map_err(|e| PipelineError::download(&archive_name, e))?;
        out.flush()?;
        drop(out);

        let unpacked = decompress_gz(&archive_path, &csv_path)?;
        fs::remove_file(&archive_path)?;

        info!(
            file = %csv_path.display(),
            compressed = bytes,
            decompressed = unpacked,
            "Dataset ready"
        );
        Ok(csv_path)
    }

    /// Fetch every cohort in order. The first failure aborts.
    pub fn fetch_all(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        COHORTS.iter().map(|cohort| self.fetch(cohort, dir)).collect()
    }
}

/// Decode a gzip file, all members, into `dst`. Returns the number of bytes written.
pub fn decompress_gz(src: &Path, dst: &Path) -> Result<u64> {
    let file = File::open(src).map_err(|e| PipelineError::decompress(src, e))?;
    let mut decoder = MultiGzDecoder::new(BufReader::new(file));
    let mut out = BufWriter::new(File::create(dst)?);

    let written = io::copy(&mut decoder, &mut out).map_err(|e| PipelineError::decompress(src, e))?;
    out.flush()?;
    Ok(written)
}
