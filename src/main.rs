use anyhow::{Context, Result};
use isin_tables::{
    config::CrawlConfig,
    crawl::{write_tables, Crawler},
    fetch::HttpSource,
};
use reqwest::Client;
use std::{fs::File, io::BufWriter};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let config = CrawlConfig::from_env()?;
    info!(
        base = %config.base_url,
        indices = ?config.indices,
        timeout = ?config.request_timeout,
        output = %config.output_path.display(),
        "configured"
    );
    let output_path = config.output_path.clone();
    let source = HttpSource::new(Client::new(), &config.base_url);

    // ─── 3) fetch, extract & merge every index ───────────────────────
    let outcome = Crawler::new(source, config).crawl_all().await;

    // ─── 4) all or nothing ───────────────────────────────────────────
    if !outcome.errors.is_empty() {
        for err in outcome.errors.iter() {
            error!("{}", err);
        }
        error!(count = outcome.errors.len(), "not writing output");
        return Err(outcome.errors.into());
    }

    // ─── 5) write JSON ───────────────────────────────────────────────
    let file = File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    write_tables(BufWriter::new(file), &outcome.tables)
        .with_context(|| format!("writing {}", output_path.display()))?;

    info!(
        tables = outcome.tables.len(),
        path = %output_path.display(),
        "all done"
    );
    Ok(())
}
