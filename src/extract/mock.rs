use super::ContentExtractor;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory extractor serving canned page text keyed by URL.
///
/// Unknown URLs fail like an unreachable page would; pages registered with
/// empty text fail with [`Error::EmptyContent`].
#[derive(Clone)]
pub struct MockContentExtractor {
    pages: HashMap<String, String>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockContentExtractor {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_page(mut self, url: &str, text: &str) -> Self {
        self.pages.insert(url.to_string(), text.to_string());
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Default for MockContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentExtractor for MockContentExtractor {
    async fn extract(&self, url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_string());

        match self.pages.get(url) {
            Some(text) if text.is_empty() => Err(Error::EmptyContent),
            Some(text) => Ok(text.clone()),
            None => Err(Error::Generic(format!("No mock page for {}", url))),
        }
    }
}
