//! Data models and structures
//!
//! Request-scoped analysis types shared by the extractor, the inference
//! gateway and the HTTP layer, plus process configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Coarse label attached to every analysis result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    Credible,
    Suspicious,
    Error,
}

impl Verdict {
    /// Keyword check over the whole text: any "fake" (case-insensitive) is suspicious.
    pub fn from_explanation(explanation: &str) -> Self {
        if explanation.to_lowercase().contains("fake") {
            Verdict::Suspicious
        } else {
            Verdict::Credible
        }
    }

    /// Same keyword check, limited to the text before the first period.
    pub fn from_first_sentence(explanation: &str) -> Self {
        let first = explanation
            .split_once('.')
            .map_or(explanation, |(head, _)| head);
        Self::from_explanation(first)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Credible => "Credible",
            Verdict::Suspicious => "Suspicious",
            Verdict::Error => "Error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// A validated submission. Each variant carries exactly the payload its mode needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Text(String),
    Url(String),
    Image(ImageUpload),
}

impl AnalysisRequest {
    pub fn mode(&self) -> &'static str {
        match self {
            AnalysisRequest::Text(_) => "text",
            AnalysisRequest::Url(_) => "url",
            AnalysisRequest::Image(_) => "image",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    #[serde(rename = "result")]
    pub verdict: Verdict,
    pub explanation: String,
}

impl AnalysisResult {
    pub fn new(verdict: Verdict, explanation: String) -> Self {
        Self {
            verdict,
            explanation,
        }
    }

    pub fn error(explanation: String) -> Self {
        Self::new(Verdict::Error, explanation)
    }
}

/// A citation surfaced by the model when it used search or page fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingSource {
    pub title: Option<String>,
    pub uri: String,
}

impl GroundingSource {
    /// Markdown bullet, falling back to the URI when no title was supplied.
    pub fn to_markdown(&self) -> String {
        let title = self.title.as_deref().unwrap_or(&self.uri);
        format!("- **{}** ([🔗]({}))\n", title, self.uri)
    }
}

// Configuration
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout: Option<Duration>,
    pub fetch_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = var("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| crate::Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let gemini_timeout = parse_var::<u64>(&var, "GEMINI_TIMEOUT_SECS")?.map(Duration::from_secs);
        let fetch_timeout = Duration::from_secs(
            parse_var(&var, "FETCH_TIMEOUT_SECS")?.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
        );
        let max_upload_bytes =
            parse_var(&var, "MAX_UPLOAD_BYTES")?.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Ok(Self {
            gemini_api_key,
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: var("GEMINI_BASE_URL")
                .unwrap_or_else(|| crate::ai::gemini::client::DEFAULT_BASE_URL.to_string()),
            gemini_timeout,
            fetch_timeout,
            max_upload_bytes,
        })
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> crate::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match var(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| crate::Error::Config(format!("Invalid {} '{}': {}", key, raw, e))),
    }
}
