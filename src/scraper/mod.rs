//! Product extraction from saved search-result pages.
//!
//! `parsers` pulls raw strings out of the DOM, `cleaner` turns them into
//! typed [`ProductRecord`]s. A bad node only costs that node; a bad file
//! only costs that file.

pub mod cleaner;
pub mod error;
pub mod parsers;

use crate::config::ExtractorConfig;
use crate::models::ProductRecord;
use crate::utils::preview;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};

use self::cleaner::card_to_record;
use self::parsers::{parse_result_page, ProductSelectors};

pub struct ProductExtractor {
    selectors: ProductSelectors,
    site_origin: String,
}

impl ProductExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        Ok(Self {
            selectors: ProductSelectors::compile(&config.selectors)
                .context("Failed to compile product selectors")?,
            site_origin: config.site_origin.trim_end_matches('/').to_string(),
        })
    }

    /// Records for every well-formed product node on the page, in page order.
    pub fn extract_page(&self, html: &str) -> Vec<ProductRecord> {
        let cards = parse_result_page(html, &self.selectors);
        debug!("{} product nodes on page", cards.len());

        let mut records = Vec::with_capacity(cards.len());
        for card in &cards {
            match card_to_record(card, &self.site_origin) {
                Ok(record) => {
                    info!("Extracted: {}...", preview(&record.name, 30));
                    records.push(record);
                }
                Err(e) => {
                    error!(
                        "Skipping product #{} ({}): {}",
                        card.position,
                        card.href.as_deref().unwrap_or("no href"),
                        e
                    );
                }
            }
        }
        records
    }

    pub fn extract_file(&self, path: &Path) -> Result<Vec<ProductRecord>> {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {:?} as UTF-8", path))?;
        Ok(self.extract_page(&html))
    }

    /// Like [`extract_file`](Self::extract_file), but a failing file is logged
    /// and contributes nothing.
    pub fn process_file(&self, path: &Path) -> Vec<ProductRecord> {
        info!("Processing file {}", path.display());
        match self.extract_file(path) {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to process {}: {:#}", path.display(), e);
                Vec::new()
            }
        }
    }
}
