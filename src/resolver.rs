use crate::extractor::{MetadataExtractor, PageMetadata};
use crate::fetcher::{Fetcher, PageFetcher};
use crate::utils;
use crate::{Override, PreviewError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub const MANUAL_DESCRIPTION: &str = "Manually added preview.";
pub const PARTIAL_DESCRIPTION: &str = "Partially manually added preview.";
pub const UNAVAILABLE_DESCRIPTION: &str = "Preview unavailable.";

/// A fully resolved, render-ready link preview. Every field is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub url: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub site_name: String,
}

/// Where the non-overridden fields of a card come from.
#[derive(Debug)]
enum Resolution {
    /// Every field was overridden; no request was made.
    Manual,
    Fetched(PageMetadata),
    Unavailable,
}

/// Turns a URL plus overrides into a [`Card`], fetching only when some field is missing.
#[derive(Clone)]
pub struct MetadataResolver<F = Fetcher> {
    fetcher: F,
    extractor: MetadataExtractor,
}

impl Default for MetadataResolver<Fetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataResolver<Fetcher> {
    pub fn new() -> Self {
        Self::with_fetcher(Fetcher::new())
    }
}

impl<F: PageFetcher> MetadataResolver<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            extractor: MetadataExtractor::new(),
        }
    }

    /// Resolve one entry. Never fails: fetch errors degrade into fallback text.
    #[instrument(level = "debug", skip(self))]
    pub async fn resolve(&self, url: &str, overrides: &Override) -> Card {
        let resolution = if overrides.is_complete() {
            debug!(url = %url, "All fields overridden, skipping fetch");
            Resolution::Manual
        } else {
            match self.fetch_metadata(url).await {
                Ok(metadata) => Resolution::Fetched(metadata),
                Err(e) => {
                    e.log();
                    Resolution::Unavailable
                }
            }
        };

        build_card(url, overrides, resolution)
    }

    async fn fetch_metadata(&self, url: &str) -> Result<PageMetadata, PreviewError> {
        let page = self.fetcher.fetch_page(url).await?;
        Ok(self.extractor.extract(&page.html, &page.url))
    }
}

fn build_card(url: &str, overrides: &Override, resolution: Resolution) -> Card {
    let fetched = match &resolution {
        Resolution::Fetched(metadata) => Some(metadata),
        Resolution::Manual | Resolution::Unavailable => None,
    };

    let title = overrides
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| fetched.and_then(|m| m.title.clone()))
        .unwrap_or_else(|| url.to_string());

    let description = match &overrides.description {
        Some(d) if !d.trim().is_empty() => d.trim().to_string(),
        Some(_) | None => fallback_description(overrides, &resolution),
    };

    let image = overrides
        .image
        .clone()
        .or_else(|| fetched.and_then(|m| m.image.clone()))
        .unwrap_or_default();

    let site_name = fetched
        .and_then(|m| m.site_name.clone())
        .unwrap_or_else(|| utils::site_host(url));

    Card {
        url: url.to_string(),
        title,
        description,
        image,
        site_name,
    }
}

/// Description used when no non-empty override exists. Only a page that was
/// actually fetched may leave it blank; otherwise the text names the card's provenance.
fn fallback_description(overrides: &Override, resolution: &Resolution) -> String {
    match resolution {
        Resolution::Fetched(metadata) => metadata.description.clone().unwrap_or_default(),
        Resolution::Manual => MANUAL_DESCRIPTION.to_string(),
        Resolution::Unavailable if overrides.is_empty() => UNAVAILABLE_DESCRIPTION.to_string(),
        Resolution::Unavailable => PARTIAL_DESCRIPTION.to_string(),
    }
}
