//! Inference gateway
//!
//! Turns model generations into [`AnalysisResult`]s. Both entry points are
//! fail-soft: any provider error becomes an `Error` verdict instead of
//! propagating to the caller.

use crate::ai::{Generation, GenerativeModel, Prompt, Tool};
use crate::models::{AnalysisResult, ImageUpload, Verdict};
use crate::{prompts, Result};

pub const NO_SOURCES_NOTE: &str = "(Note: No external sources found.)";

const TEXT_TOOLS: [Tool; 2] = [Tool::UrlContext, Tool::GoogleSearch];
const IMAGE_TOOLS: [Tool; 1] = [Tool::GoogleSearch];

pub struct InferenceGateway {
    model: Box<dyn GenerativeModel>,
}

impl InferenceGateway {
    pub fn new(model: Box<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub async fn analyze_text(&self, text: &str) -> AnalysisResult {
        settle(
            "text",
            self.model
                .generate(Prompt::Text(text.to_string()), &TEXT_TOOLS)
                .await
                .map(text_result),
        )
    }

    pub async fn analyze_image(&self, image: ImageUpload) -> AnalysisResult {
        let prompt = Prompt::Image {
            data: image.bytes,
            mime_type: image.mime_type,
            instruction: prompts::IMAGE_ANALYSIS.to_string(),
        };

        settle(
            "image",
            self.model
                .generate(prompt, &IMAGE_TOOLS)
                .await
                .map(image_result),
        )
    }
}

/// Fold an outbound call's outcome into a result the caller can always return.
fn settle(path: &str, outcome: Result<AnalysisResult>) -> AnalysisResult {
    match outcome {
        Ok(result) => {
            tracing::info!("{} analysis verdict: {}", path, result.verdict);
            result
        }
        Err(e) => {
            tracing::error!("{} analysis failed: {}", path, e);
            AnalysisResult::error(format!("Error: {}", e))
        }
    }
}

fn text_result(generation: Generation) -> AnalysisResult {
    let mut explanation: String = generation
        .parts
        .iter()
        .map(|part| format!("{}\n", part))
        .collect();

    if let Some(url_context) = &generation.url_context {
        explanation.push_str("\n\n**URL Context:**\n");
        for url in url_context.urls() {
            explanation.push_str(&format!("- {}\n", url));
        }
    }

    // Citations are appended after the verdict so source titles never sway it.
    let verdict = Verdict::from_explanation(&explanation);

    match generation.grounding {
        None => {
            explanation.push_str("\n\n");
            explanation.push_str(NO_SOURCES_NOTE);
        }
        Some(grounding) => {
            let sources: Vec<String> = grounding
                .sources
                .iter()
                .map(|source| source.to_markdown())
                .collect();
            explanation.push_str("\n\n**Sources:**\n");
            explanation.push_str(&sources.join("\n"));
        }
    }

    AnalysisResult::new(verdict, explanation)
}

fn image_result(generation: Generation) -> AnalysisResult {
    let explanation = generation.parts.concat();
    let verdict = Verdict::from_first_sentence(&explanation);
    AnalysisResult::new(verdict, explanation)
}
