pub mod config;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod process;
pub mod schema;

pub use crawl::{CrawlOutcome, Crawler};
pub use error::{ErrorReport, ExtractError};
