//! Application orchestration for credibility analysis.

use crate::ai::{GeminiModel, GenerativeModel};
use crate::extract::{ContentExtractor, PageExtractor};
use crate::gateway::InferenceGateway;
use crate::models::{AnalysisRequest, AnalysisResult, Config};
use crate::Result;
use tracing::{info, warn};

/// Dispatches validated requests to the extractor and inference gateway.
pub struct App {
    gateway: InferenceGateway,
    extractor: Box<dyn ContentExtractor>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub model: Box<dyn GenerativeModel>,
    pub extractor: Box<dyn ContentExtractor>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            gateway: InferenceGateway::new(services.model),
            extractor: services.extractor,
        }
    }

    /// Construct an app talking to Gemini and the open web.
    pub fn from_config(config: &Config) -> Result<Self> {
        let model = GeminiModel::new_with_client(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_timeout,
            reqwest::Client::new(),
        )
        .with_base_url(config.gemini_base_url.clone());
        info!("Inference provider: Gemini (model: {})", model.model());

        let extractor = PageExtractor::new(config.fetch_timeout)?;

        Ok(Self::with_services(AppServices {
            model: Box::new(model),
            extractor: Box::new(extractor),
        }))
    }

    /// Run one analysis. Never fails: downstream errors come back as an
    /// `Error` verdict.
    pub async fn analyze(&self, request: AnalysisRequest) -> AnalysisResult {
        match request {
            AnalysisRequest::Text(text) => self.gateway.analyze_text(&text).await,
            AnalysisRequest::Url(url) => self.analyze_url(&url).await,
            AnalysisRequest::Image(image) => self.gateway.analyze_image(image).await,
        }
    }

    async fn analyze_url(&self, url: &str) -> AnalysisResult {
        match self.extractor.extract(url).await {
            Ok(text) => self.gateway.analyze_text(&text).await,
            Err(e) => {
                warn!("Could not extract {}: {}", url, e);
                AnalysisResult::error(e.to_string())
            }
        }
    }
}
