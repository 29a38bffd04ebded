use scraper::{Html, Selector};
use tracing::debug;

use crate::utils;

const TITLE_TAGS: &[&str] = &["og:title", "twitter:title", "title"];
const DESCRIPTION_TAGS: &[&str] = &["og:description", "twitter:description", "description"];
const IMAGE_TAGS: &[&str] = &["og:image", "twitter:image"];
const SITE_NAME_TAGS: &[&str] = &["og:site_name", "twitter:site"];

/// Social metadata scraped from one page. Absent fields were not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub site_name: Option<String>,
}

/// Metadata extractor, responsible for pulling Open Graph / Twitter Card fields out of a page
#[derive(Clone)]
pub struct MetadataExtractor;

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract metadata from `html`; relative image references are resolved against `page_url`.
    pub fn extract(&self, html: &str, page_url: &str) -> PageMetadata {
        let document = Html::parse_document(html);

        let title = self
            .first_meta(&document, TITLE_TAGS)
            .or_else(|| self.extract_title_element(&document));
        let description = self.first_meta(&document, DESCRIPTION_TAGS);
        let image = self
            .first_meta(&document, IMAGE_TAGS)
            .map(|image| utils::absolutize(&image, page_url));
        let site_name = self.first_meta(&document, SITE_NAME_TAGS);

        debug!(
            url = %page_url,
            title = ?title,
            description = ?description,
            image = ?image,
            site_name = ?site_name,
            "Extracted page metadata"
        );

        PageMetadata {
            title,
            description,
            image,
            site_name,
        }
    }

    /// First non-empty `content` among `candidates`, in order.
    fn first_meta(&self, document: &Html, candidates: &[&str]) -> Option<String> {
        candidates
            .iter()
            .find_map(|id| self.meta_content(document, id))
    }

    /// A `<meta>` keyed by `property` is preferred over one keyed by `name`.
    fn meta_content(&self, document: &Html, id: &str) -> Option<String> {
        ["property", "name"].iter().find_map(|attr| {
            let selector = Selector::parse(&format!(r#"meta[{attr}="{id}"]"#)).ok()?;
            document
                .select(&selector)
                .next()
                .and_then(|el| el.value().attr("content"))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
    }

    fn extract_title_element(&self, document: &Html) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;

        document
            .select(&title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
