use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
    ThinkingConfig,
};
use crate::ai::{Generation, GenerativeModel, Prompt, Tool};
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

/// [`GenerativeModel`] backed by Gemini's `generateContent` with thinking disabled.
pub struct GeminiModel {
    http: GeminiHttpClient,
}

impl GeminiModel {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, None, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Option<Duration>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    fn build_request(prompt: Prompt, tools: &[Tool]) -> GenerateContentRequest {
        let parts = match prompt {
            Prompt::Text(text) => vec![Part::Text { text }],
            Prompt::Image {
                data,
                mime_type,
                instruction,
            } => {
                use base64::Engine as _;
                vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: base64::engine::general_purpose::STANDARD.encode(data),
                        },
                    },
                    Part::Text { text: instruction },
                ]
            }
        };

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            tools: tools.iter().copied().map(Into::into).collect(),
            generation_config: Some(GenerationConfig {
                thinking_config: Some(ThinkingConfig { thinking_budget: 0 }),
            }),
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate(&self, prompt: Prompt, tools: &[Tool]) -> Result<Generation> {
        tracing::debug!(
            "Sending generateContent to {} with tools {:?}",
            self.model(),
            tools
        );

        let request = Self::build_request(prompt, tools);
        let response: GenerateContentResponse = self.http.generate_content(&request).await?;
        let generation = Generation::try_from(response)?;

        tracing::debug!(
            "Gemini returned {} text parts, grounded: {}, url context: {}",
            generation.parts.len(),
            generation.grounding.is_some(),
            generation.url_context.is_some()
        );
        Ok(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::UrlContext;
    use crate::Error;
    use wiremock::matchers::{body_partial_json, method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_CONTENT_PATH_REGEX: &str = r"/v1beta/models/.+:generateContent";

    fn make_model(server: &MockServer) -> GeminiModel {
        GeminiModel::new("test-key".to_string(), "gemini-2.5-flash".to_string())
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_text_prompt_enables_tools_and_disables_thinking() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(GENERATE_CONTENT_PATH_REGEX))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Is the moon made of cheese?" }] }],
                "tools": [{ "urlContext": {} }, { "googleSearch": {} }],
                "generationConfig": { "thinkingConfig": { "thinkingBudget": 0 } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "No." }, { "text": "It is rock." }] },
                    "urlContextMetadata": { "urlMetadata": [{ "retrievedUrl": "https://nasa.test" }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generation = make_model(&server)
            .generate(
                Prompt::Text("Is the moon made of cheese?".to_string()),
                &[Tool::UrlContext, Tool::GoogleSearch],
            )
            .await
            .unwrap();

        assert_eq!(generation.parts, vec!["No.", "It is rock."]);
        assert!(matches!(generation.url_context, Some(UrlContext::Many(_))));
    }

    #[tokio::test]
    async fn test_image_prompt_sends_inline_data_before_instruction() {
        let server = MockServer::start().await;

        use base64::Engine as _;
        let b64 = base64::engine::general_purpose::STANDARD.encode([0x89, 0x50, 0x4E, 0x47]);

        Mock::given(method("POST"))
            .and(path_regex(GENERATE_CONTENT_PATH_REGEX))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": b64 } },
                    { "text": "describe" }
                ]}],
                "tools": [{ "googleSearch": {} }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "Looks genuine." }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generation = make_model(&server)
            .generate(
                Prompt::Image {
                    data: vec![0x89, 0x50, 0x4E, 0x47],
                    mime_type: "image/png".to_string(),
                    instruction: "describe".to_string(),
                },
                &[Tool::GoogleSearch],
            )
            .await
            .unwrap();

        assert_eq!(generation.parts, vec!["Looks genuine."]);
    }

    #[test]
    fn test_request_lists_only_requested_tools() {
        let request = GeminiModel::build_request(
            Prompt::Image {
                data: vec![1, 2, 3],
                mime_type: "image/jpeg".to_string(),
                instruction: "x".to_string(),
            },
            &[Tool::GoogleSearch],
        );
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"googleSearch\":{}"));
        assert!(!json.contains("urlContext"));
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(GENERATE_CONTENT_PATH_REGEX))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = make_model(&server)
            .generate(Prompt::Text("x".to_string()), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
        assert!(err.to_string().contains("403"));
    }
}
