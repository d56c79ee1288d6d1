// src/crawl.rs

use std::{io::Write, ops::RangeInclusive};

use chrono::Local;
use futures::{future::join_all, stream, StreamExt};
use tokio::time::{timeout, Instant};
use tracing::{error, info, instrument};

use crate::config::CrawlConfig;
use crate::error::{ErrorReport, ExtractError};
use crate::fetch::{table_url, PageSource};
use crate::process::{extract_page, merge_languages, PageExtraction};
use crate::schema::{Language, Table};

/// Table indices published on the site.
pub const SUPPORTED_INDICES: RangeInclusive<u32> = 1..=12;

/// Merged tables plus every non-fatal error met while producing them.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    pub tables: Vec<Table>,
    pub errors: ErrorReport,
}

/// Drives fetch → extract → merge for each table index.
pub struct Crawler<S> {
    source: S,
    config: CrawlConfig,
}

impl<S: PageSource> Crawler<S> {
    pub fn new(source: S, config: CrawlConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Fetch every configured language of `index` concurrently, then merge them.
    ///
    /// Unsupported indices fail before anything is fetched.
    #[instrument(level = "info", skip(self))]
    pub async fn crawl_index(&self, index: u32) -> Result<CrawlOutcome, ExtractError> {
        if !SUPPORTED_INDICES.contains(&index) {
            return Err(ExtractError::UnsupportedIndex { index });
        }

        let pages: Vec<PageExtraction> = join_all(
            self.config
                .languages
                .iter()
                .map(|&language| self.fetch_page(index, language)),
        )
        .await;

        let (tables, merge_errors) = merge_languages(index, &pages);
        let mut errors = ErrorReport::new();
        for page in pages {
            errors.extend(page.errors);
        }
        errors.extend(merge_errors);

        info!(index, tables = tables.len(), errors = errors.len(), "index done");
        Ok(CrawlOutcome { tables, errors })
    }

    /// Every configured index, up to `concurrency` at a time, concatenated in index order.
    #[instrument(level = "info", skip(self))]
    pub async fn crawl_all(&self) -> CrawlOutcome {
        let start = Instant::now();
        let results: Vec<Result<CrawlOutcome, ExtractError>> =
            stream::iter(self.config.indices.iter().copied())
                .map(|index| self.crawl_index(index))
                .buffered(self.config.concurrency.max(1))
                .collect()
                .await;

        let mut outcome = CrawlOutcome::default();
        for result in results {
            match result {
                Ok(CrawlOutcome { tables, errors }) => {
                    outcome.tables.extend(tables);
                    outcome.errors.append(errors);
                }
                Err(err) => {
                    error!(error = %err, "index rejected");
                    outcome.errors.push(err);
                }
            }
        }

        info!(
            tables = outcome.tables.len(),
            errors = outcome.errors.len(),
            elapsed = ?start.elapsed(),
            "crawl finished"
        );
        outcome
    }

    async fn fetch_page(&self, index: u32, language: Language) -> PageExtraction {
        let url = match table_url(&self.config.base_url, index, language) {
            Ok(url) => url,
            Err(e) => {
                return PageExtraction::failed(
                    index,
                    language,
                    ExtractError::Fetch {
                        index,
                        language,
                        url: self.config.base_url.to_string(),
                        message: format!("{:#}", e),
                    },
                )
            }
        };

        info!(index, %language, %url, at = %Local::now(), "visiting");
        let fetched = match self.config.request_timeout {
            Some(limit) => match timeout(limit, self.source.fetch(&url)).await {
                Ok(res) => res,
                Err(_) => Err(anyhow::anyhow!("timed out after {:?}", limit)),
            },
            None => self.source.fetch(&url).await,
        };

        match fetched {
            Ok(html) => {
                info!(index, %language, %url, bytes = html.len(), at = %Local::now(), "visited");
                let page = extract_page(index, language, &html);
                info!(
                    index,
                    %language,
                    %url,
                    tables = page.tables.len(),
                    at = %Local::now(),
                    "finished"
                );
                page
            }
            Err(e) => {
                let message = format!("{:#}", e);
                error!(index, %language, %url, error = %message, "fetch failed");
                PageExtraction::failed(
                    index,
                    language,
                    ExtractError::Fetch {
                        index,
                        language,
                        url: url.to_string(),
                        message,
                    },
                )
            }
        }
    }
}

/// Serialise `tables` as one JSON document.
pub fn write_tables<W: Write>(writer: W, tables: &[Table]) -> Result<(), ExtractError> {
    serde_json::to_writer(writer, tables)?;
    Ok(())
}
