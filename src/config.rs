// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use url::Url;

use crate::crawl::SUPPORTED_INDICES;
use crate::fetch::DEFAULT_BASE_URL;
use crate::schema::{Language, LANGUAGES};

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_CONCURRENCY: usize = 3;
const DEFAULT_OUTPUT: &str = "tables.json";

/// Runtime settings for one extraction run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: Url,
    /// Table indices to extract, in output order.
    pub indices: Vec<u32>,
    /// Languages to fetch, in merge order.
    pub languages: Vec<Language>,
    /// Per-page fetch timeout; `None` waits forever.
    pub request_timeout: Option<Duration>,
    /// How many table indices run at once.
    pub concurrency: usize,
    pub output_path: PathBuf,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL should parse"),
            indices: SUPPORTED_INDICES.collect(),
            languages: LANGUAGES.to_vec(),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            concurrency: DEFAULT_CONCURRENCY,
            output_path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl CrawlConfig {
    /// Defaults overridden by `ISIN_BASE_URL`, `ISIN_INDICES`, `ISIN_TIMEOUT_SECS`,
    /// `ISIN_CONCURRENCY` and `ISIN_OUTPUT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("ISIN_BASE_URL") {
            cfg.base_url = Url::parse(v.trim()).with_context(|| format!("ISIN_BASE_URL={}", v))?;
        }
        if let Some(v) = get("ISIN_INDICES") {
            cfg.indices = v
                .split(',')
                .map(|s| s.trim().parse::<u32>())
                .collect::<Result<_, _>>()
                .with_context(|| format!("ISIN_INDICES={}", v))?;
        }
        if let Some(v) = get("ISIN_TIMEOUT_SECS") {
            let secs: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("ISIN_TIMEOUT_SECS={}", v))?;
            cfg.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(v) = get("ISIN_CONCURRENCY") {
            cfg.concurrency = v
                .trim()
                .parse()
                .with_context(|| format!("ISIN_CONCURRENCY={}", v))?;
        }
        if let Some(v) = get("ISIN_OUTPUT") {
            cfg.output_path = PathBuf::from(v.trim());
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = CrawlConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.indices, (1..=12).collect::<Vec<_>>());
        assert_eq!(cfg.languages, [Language::English, Language::Chinese]);
        assert_eq!(cfg.request_timeout, Some(Duration::from_secs(60)));
        assert_eq!(cfg.output_path, PathBuf::from("tables.json"));
    }

    #[test]
    fn test_overrides() {
        let cfg = CrawlConfig::from_lookup(lookup(&[
            ("ISIN_INDICES", "2, 4,13"),
            ("ISIN_TIMEOUT_SECS", "0"),
            ("ISIN_CONCURRENCY", "1"),
            ("ISIN_OUTPUT", "out/t.json"),
            ("ISIN_BASE_URL", "http://localhost:8080/isin/"),
        ]))
        .unwrap();
        // range checks happen when crawling
        assert_eq!(cfg.indices, [2, 4, 13]);
        assert_eq!(cfg.request_timeout, None);
        assert_eq!(cfg.concurrency, 1);
        assert_eq!(cfg.base_url.host_str(), Some("localhost"));
    }

    #[test]
    fn test_malformed_value_names_variable() {
        let err = CrawlConfig::from_lookup(lookup(&[("ISIN_INDICES", "1,x")])).unwrap_err();
        assert!(format!("{:#}", err).contains("ISIN_INDICES"));
    }
}
