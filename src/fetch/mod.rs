// src/fetch/mod.rs
pub mod urls;

use std::future::Future;

use anyhow::{bail, Context, Result};
use encoding_rs::BIG5;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

pub use urls::{table_url, DEFAULT_BASE_URL};

/// Where table pages come from. Implementations return the page already decoded to text.
pub trait PageSource {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String>>;
}

/// Fetches pages from the live site over HTTP.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    allowed_host: Option<String>,
}

impl HttpSource {
    /// Only URLs on the same host as `base` will be fetched.
    pub fn new(client: Client, base: &Url) -> Self {
        Self {
            client,
            allowed_host: base.host_str().map(str::to_owned),
        }
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, url: &Url) -> Result<String> {
        if let Some(host) = &self.allowed_host {
            if url.host_str() != Some(host.as_str()) {
                bail!("{} is outside the allowed host {}", url, host);
            }
        }

        let bytes = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .bytes()
            .await
            .with_context(|| format!("Reading body from {}", url))?;
        debug!(%url, bytes = bytes.len(), "received body");

        Ok(decode_big5(&bytes))
    }
}

/// The site serves Big5; undecodable bytes become U+FFFD rather than failing the page.
pub fn decode_big5(bytes: &[u8]) -> String {
    let (text, _, had_errors) = BIG5.decode(bytes);
    if had_errors {
        warn!(bytes = bytes.len(), "malformed Big5 sequences replaced");
    }
    text.into_owned()
}
