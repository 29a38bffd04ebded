use crate::directives::parse_entries;
use crate::fetcher::{Fetcher, PageFetcher};
use crate::resolver::{Card, MetadataResolver};
use tracing::{debug, instrument};

/// CardService is the entry point a host (web form, CLI) calls with pasted text
#[derive(Clone)]
pub struct CardService<F = Fetcher> {
    resolver: MetadataResolver<F>,
}

impl Default for CardService<Fetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl CardService<Fetcher> {
    pub fn new() -> Self {
        Self::with_fetcher(Fetcher::new())
    }
}

impl<F: PageFetcher> CardService<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            resolver: MetadataResolver::with_fetcher(fetcher),
        }
    }

    pub fn resolver(&self) -> &MetadataResolver<F> {
        &self.resolver
    }

    /// Parse `input` and resolve every entry, one fetch at a time, in input order.
    ///
    /// Returns the trimmed input for re-display alongside the cards.
    #[instrument(level = "debug", skip_all, fields(input_len = input.len()))]
    pub async fn render_cards(&self, input: &str) -> (String, Vec<Card>) {
        let echoed = input.trim().to_string();
        let entries = parse_entries(&echoed);
        debug!(entries = entries.len(), "Parsed input");

        let mut cards = Vec::with_capacity(entries.len());
        for entry in &entries {
            cards.push(self.resolver.resolve(&entry.url, &entry.overrides).await);
        }

        (echoed, cards)
    }
}
