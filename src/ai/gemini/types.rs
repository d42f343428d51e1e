//! Gemini `generateContent` payload types.
//!
//! Response fields the API may omit are `Option`/defaulted here so the rest of
//! the crate only ever sees a converted [`Generation`].

use crate::ai::{FetchedUrl, Generation, Grounding, Tool, UrlContext};
use crate::models::GroundingSource;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Serializes as `{"urlContext": {}}` / `{"googleSearch": {}}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolSpec {
    UrlContext {},
    GoogleSearch {},
}

impl From<Tool> for ToolSpec {
    fn from(tool: Tool) -> Self {
        match tool {
            Tool::UrlContext => ToolSpec::UrlContext {},
            Tool::GoogleSearch => ToolSpec::GoogleSearch {},
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Untagged union of content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding: anything that is
/// neither text nor inline data (function calls, executable code) lands in
/// `Other`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Other(serde_json::Value),
}

/// Base64 inline payload used for image requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub grounding_metadata: Option<GroundingMetadata>,
    pub url_context_metadata: Option<UrlContextMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
pub struct WebChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlContextMetadata {
    pub url_metadata: Option<UrlMetadataField>,
}

/// `urlMetadata` has been seen both as a list and as a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UrlMetadataField {
    Many(Vec<UrlMetadata>),
    One(UrlMetadata),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMetadata {
    pub retrieved_url: Option<String>,
    pub url_retrieval_status: Option<String>,
}

impl UrlMetadata {
    fn into_fetched(self) -> Option<FetchedUrl> {
        self.retrieved_url.map(|url| FetchedUrl {
            url,
            status: self.url_retrieval_status,
        })
    }
}

impl UrlMetadataField {
    fn into_url_context(self) -> Option<UrlContext> {
        match self {
            UrlMetadataField::One(one) => one.into_fetched().map(UrlContext::Single),
            UrlMetadataField::Many(many) => Some(UrlContext::Many(
                many.into_iter().filter_map(UrlMetadata::into_fetched).collect(),
            )),
        }
    }
}

impl GroundingMetadata {
    /// Web citations with a URI. May be empty when the model searched but
    /// cited nothing.
    fn into_grounding(self) -> Grounding {
        let sources: Vec<GroundingSource> = self
            .grounding_chunks
            .into_iter()
            .filter_map(|chunk| chunk.web)
            .filter_map(|web| {
                web.uri.map(|uri| GroundingSource {
                    title: web.title.filter(|t| !t.is_empty()),
                    uri,
                })
            })
            .collect();

        Grounding { sources }
    }
}

impl TryFrom<GenerateContentResponse> for Generation {
    type Error = Error;

    fn try_from(response: GenerateContentResponse) -> Result<Self> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::AiProvider("No candidates in Gemini response".to_string()))?;

        let parts: Vec<String> = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| match part {
                        Part::Text { text } => Some(text),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Generation {
            parts,
            url_context: candidate
                .url_context_metadata
                .and_then(|meta| meta.url_metadata)
                .and_then(UrlMetadataField::into_url_context),
            grounding: candidate
                .grounding_metadata
                .map(GroundingMetadata::into_grounding),
        })
    }
}
