pub mod address;
pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod importer;
pub mod logging;
pub mod stats;
pub mod storage;
