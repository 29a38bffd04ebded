#![allow(dead_code)]

use async_trait::async_trait;
use link_cards::{FetchedPage, PageFetcher, PreviewError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory fetcher: serves canned HTML per URL and counts every call.
/// URLs without a page fail like an unreachable host.
#[derive(Clone, Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    calls: Arc<AtomicUsize>,
    requested: Arc<std::sync::Mutex<Vec<String>>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, PreviewError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());

        match self.pages.get(url) {
            Some(html) => Ok(FetchedPage {
                url: url.to_string(),
                html: html.clone(),
            }),
            None => Err(PreviewError::ConnectionError(format!(
                "{url}: connection refused"
            ))),
        }
    }
}

pub const FULL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Document Title</title>
    <meta property="og:title" content="Fetched">
    <meta property="og:description" content="Fetched description">
    <meta property="og:image" content="/img/a.png">
    <meta property="og:site_name" content="Site Name">
</head>
<body><h1>Hello</h1></body>
</html>"#;

pub const BARE_PAGE: &str = "<html><head></head><body><p>nothing here</p></body></html>";
