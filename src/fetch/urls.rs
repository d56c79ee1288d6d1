// src/fetch/urls.rs
use anyhow::{Context, Result};
use url::Url;

use crate::schema::Language;

pub const DEFAULT_BASE_URL: &str = "https://isin.twse.com.tw/isin/";

fn page_name(language: Language) -> &'static str {
    match language {
        Language::English => "e_C_public.jsp",
        Language::Chinese => "C_public.jsp",
    }
}

/// URL of table `index` in `language`, relative to `base`.
pub fn table_url(base: &Url, index: u32, language: Language) -> Result<Url> {
    let relative = format!("{}?strMode={}", page_name(language), index);
    base.join(&relative)
        .with_context(|| format!("joining {} onto {}", relative, base))
}
