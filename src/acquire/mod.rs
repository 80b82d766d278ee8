//! Acquisition module - fetch and unpack the GEO expression tables

mod downloader;

pub use downloader::{decompress_gz, Downloader};
