//! Link preview cards from pasted text.
//!
//! Each `http://` / `https://` line becomes one [`Card`]. Lines starting with
//! `!title `, `!desc ` or `!image ` directly under a URL override the value that
//! would otherwise be scraped from the page's Open Graph / Twitter Card tags.

mod directives;
mod error;
mod extractor;
mod fetcher;
#[cfg(feature = "logging")]
mod logging;
mod resolver;
mod service;
mod utils;

pub use directives::{is_url_line, parse_entries, Directive, Override, ParsedEntry};
pub use error::PreviewError;
pub use extractor::{MetadataExtractor, PageMetadata};
pub use fetcher::{
    default_headers, FetchedPage, Fetcher, FetcherConfig, PageFetcher, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT,
};
#[cfg(feature = "logging")]
pub use logging::{log_card, log_error_card, setup_logging, LogConfig, LogLevelGuard};
pub use resolver::{
    Card, MetadataResolver, MANUAL_DESCRIPTION, PARTIAL_DESCRIPTION, UNAVAILABLE_DESCRIPTION,
};
pub use service::CardService;
pub use utils::site_host;

/// Parse `input` and resolve every entry with the default HTTP fetcher.
pub async fn render_cards(input: &str) -> (String, Vec<Card>) {
    CardService::new().render_cards(input).await
}
