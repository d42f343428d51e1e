//! Route handlers.

use super::error::ApiError;
use super::form::AnalysisForm;
use crate::app::App;
use crate::models::AnalysisResult;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use std::sync::Arc;
use tracing::{info, warn, Span};
use uuid::Uuid;

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Validate the submission and run the matching analysis. Once a request is
/// valid the response is always 200, whatever the verdict.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4(), mode = tracing::field::Empty))]
pub async fn analyze(
    State(app): State<Arc<App>>,
    form: AnalysisForm,
) -> Result<Json<AnalysisResult>, ApiError> {
    let request = form.into_request().inspect_err(|e| {
        warn!("Rejected submission: {}", e.message);
    })?;
    Span::current().record("mode", request.mode());
    info!("Received analysis request");

    Ok(Json(app.analyze(request).await))
}
