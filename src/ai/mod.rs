//! Generative model integration
//!
//! Defines the provider-neutral shape the inference gateway works with: a
//! prompt, the augmentation tools to enable, and a [`Generation`] whose
//! optional metadata is modelled explicitly rather than probed for.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiModel;
pub use mock::MockGenerativeModel;

use crate::models::GroundingSource;
use crate::Result;
use async_trait::async_trait;
use std::fmt;

/// Augmentation capabilities the model may use while answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Fetch and read URLs mentioned in the prompt.
    UrlContext,
    /// Ground the answer with a web search.
    GoogleSearch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Text(String),
    Image {
        data: Vec<u8>,
        mime_type: String,
        instruction: String,
    },
}

/// One page the model fetched while answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedUrl {
    pub url: String,
    pub status: Option<String>,
}

impl fmt::Display for FetchedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Some(status) => write!(f, "{} ({})", self.url, status),
            None => f.write_str(&self.url),
        }
    }
}

/// Page-fetch metadata. Providers report either one descriptor or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlContext {
    Single(FetchedUrl),
    Many(Vec<FetchedUrl>),
}

impl UrlContext {
    pub fn urls(&self) -> &[FetchedUrl] {
        match self {
            UrlContext::Single(url) => std::slice::from_ref(url),
            UrlContext::Many(urls) => urls,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grounding {
    pub sources: Vec<GroundingSource>,
}

/// Model output for a single prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// Text segments in the order the model returned them.
    pub parts: Vec<String>,
    pub url_context: Option<UrlContext>,
    pub grounding: Option<Grounding>,
}

impl Generation {
    pub fn from_text(text: &str) -> Self {
        Self {
            parts: vec![text.to_string()],
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: Prompt, tools: &[Tool]) -> Result<Generation>;
}
