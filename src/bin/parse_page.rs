// Parse a saved table page offline and print what the extractor makes of it.
//
//   parse_page <HTML_FILE> <INDEX> <english|chinese> [--utf8]

use anyhow::{Context, Result};
use isin_tables::{
    fetch::decode_big5,
    process::{extract_page, FillEmpty},
    schema::Language,
};
use std::{env, fs, path::Path, process::exit};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 || args.len() > 5 || (args.len() == 5 && args[4] != "--utf8") {
        eprintln!(
            "Usage: {} <HTML_FILE> <INDEX> <english|chinese> [--utf8]",
            args[0]
        );
        exit(1);
    }
    if let Err(e) = run(Path::new(&args[1]), &args[2], &args[3], args.len() == 5) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn run(path: &Path, index: &str, language: &str, utf8: bool) -> Result<()> {
    let index: u32 = index
        .parse()
        .with_context(|| format!("bad index {:?}", index))?;
    let language: Language = language.parse()?;

    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let html = if utf8 {
        String::from_utf8(bytes).with_context(|| format!("{} is not UTF-8", path.display()))?
    } else {
        decode_big5(&bytes)
    };

    let page = extract_page(index, language, &html);
    for err in &page.errors {
        eprintln!("row error: {}", err);
    }

    let mut tables = page.tables;
    for table in &mut tables {
        table.fill_empty(&page.template);
    }
    println!("{}", serde_json::to_string_pretty(&tables)?);
    Ok(())
}
