//! Pipeline orchestrator: ties loader → scraper → export together.
//!
//! ## Stages
//!
//! 1. Discover `zem*.html` pages in the input dir (name order).
//! 2. Extract records from each page, one file after another.
//! 3. Rank by units sold, keep the best-selling listing per product name,
//!    write the spreadsheet (and optional CSV).
//!
//! Nothing past setup is fatal: bad nodes, bad files, bad images and a failed
//! save are logged. No input files or no records stops the run before any
//! output is written.

use crate::config::AppConfig;
use crate::export::csv_export::write_csv;
use crate::export::thumbnail::{HttpThumbnails, ThumbnailSource};
use crate::export::SpreadsheetExporter;
use crate::loader::discover_input_files;
use crate::models::ProductRecord;
use crate::scraper::ProductExtractor;
use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{error, info};

/// Stable sort by units sold (descending), then drop every later record whose
/// name was already kept. Ties keep discovery order.
pub fn rank_and_dedup(mut records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    records.sort_by(|a, b| b.units_sold.cmp(&a.units_sold));
    let mut seen = HashSet::new();
    records.retain(|r| seen.insert(r.name.clone()));
    records
}

/// Output of the ingest + extract + dedup stages.
#[derive(Debug, Default)]
pub struct Harvest {
    pub files: Vec<PathBuf>,
    pub records_extracted: usize,
    pub products: Vec<ProductRecord>,
}

pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Read every input page and return the deduplicated products.
    /// An empty `products` means there is nothing to export; the reason has
    /// already been logged.
    pub fn collect(&self) -> Result<Harvest> {
        let extractor = ProductExtractor::new(&self.config.extractor)?;
        let input = &self.config.input;

        let files = discover_input_files(input).unwrap_or_else(|e| {
            error!("Could not scan {:?}: {:#}", input.dir, e);
            Vec::new()
        });
        if files.is_empty() {
            error!(
                "No HTML files matching '{}*.{}' in {:?}",
                input.file_prefix, input.file_extension, input.dir
            );
            return Ok(Harvest::default());
        }
        info!("Found {} input files", files.len());

        let mut all = Vec::new();
        for path in &files {
            all.extend(extractor.process_file(path));
        }

        let records_extracted = all.len();
        if records_extracted == 0 {
            error!("No products found in the input files");
            return Ok(Harvest {
                files,
                ..Harvest::default()
            });
        }

        let products = rank_and_dedup(all);
        info!(
            "{} records extracted, {} unique products",
            records_extracted,
            products.len()
        );

        Ok(Harvest {
            files,
            records_extracted,
            products,
        })
    }

    pub async fn run(&self) -> Result<PipelineStats> {
        let http = if self.config.export.embed_images {
            Some(HttpThumbnails::new(&self.config.export)?)
        } else {
            None
        };
        self.run_with(http.as_ref().map(|h| h as &dyn ThumbnailSource))
            .await
    }

    pub async fn run_with(&self, thumbnails: Option<&dyn ThumbnailSource>) -> Result<PipelineStats> {
        let harvest = self.collect()?;
        let mut stats = PipelineStats {
            files_found: harvest.files.len(),
            records_extracted: harvest.records_extracted,
            unique_products: harvest.products.len(),
            ..PipelineStats::default()
        };
        if harvest.products.is_empty() {
            return Ok(stats);
        }

        let exporter = SpreadsheetExporter::new(&self.config.export);
        match exporter.write(&harvest.products, thumbnails).await {
            Ok(report) => {
                info!("{} rows written", report.rows);
                stats.images_embedded = report.images_embedded;
                stats.image_failures = report.image_failures;
                stats.output = Some(exporter.output_path().to_path_buf());
            }
            Err(e) => error!("Failed to write spreadsheet: {:#}", e),
        }

        if let Some(csv_path) = &self.config.export.csv_path {
            match write_csv(csv_path, &harvest.products) {
                Ok(n) => info!("{} rows written to {}", n, csv_path.display()),
                Err(e) => error!("Failed to write CSV: {:#}", e),
            }
        }

        info!("Total of {} unique products exported", stats.unique_products);
        info!("Duplicates removed, keeping the listing with the most sales");
        Ok(stats)
    }
}

#[derive(Debug, Default)]
pub struct PipelineStats {
    pub files_found: usize,
    pub records_extracted: usize,
    pub unique_products: usize,
    pub images_embedded: usize,
    pub image_failures: usize,
    /// Set only when the spreadsheet was saved.
    pub output: Option<PathBuf>,
}
