//! `/analyze` submission parsing and validation.
//!
//! Accepts both url-encoded and multipart bodies. A body of any other content
//! type is read as an empty form, which fails validation with "Invalid mode".
//! Body-level failures such as an oversized payload keep their own status.

use super::error::ApiError;
use crate::ai::mime::upload_mime;
use crate::models::{AnalysisRequest, ImageUpload};
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Raw submission fields, before mode validation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnalysisForm {
    pub mode: Option<String>,
    pub text: Option<String>,
    pub url: Option<String>,
    pub image: Option<UploadedFile>,
}

impl AnalysisForm {
    fn from_fields(mut fields: HashMap<String, String>) -> Self {
        Self {
            mode: fields.remove("mode"),
            text: fields.remove("text"),
            url: fields.remove("url"),
            image: None,
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);

            match (name.as_str(), file_name) {
                ("image", Some(file_name)) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                    // Browsers send an unnamed empty part when no file was chosen.
                    if !file_name.is_empty() {
                        form.image = Some(UploadedFile {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                ("mode" | "text" | "url", None) => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                    match name.as_str() {
                        "mode" => form.mode = Some(value),
                        "text" => form.text = Some(value),
                        _ => form.url = Some(value),
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Check the mode and its required input, in that order.
    pub fn into_request(self) -> Result<AnalysisRequest, ApiError> {
        match self.mode.as_deref() {
            Some("text") => self
                .text
                .filter(|text| !text.is_empty())
                .map(AnalysisRequest::Text)
                .ok_or_else(|| ApiError::bad_request("Text input is required")),
            Some("url") => self
                .url
                .filter(|url| !url.is_empty())
                .map(AnalysisRequest::Url)
                .ok_or_else(|| ApiError::bad_request("URL input is required")),
            Some("image") => {
                let file = self
                    .image
                    .ok_or_else(|| ApiError::bad_request("Image file is required"))?;
                let mime_type = upload_mime(file.content_type.as_deref(), &file.bytes);
                tracing::debug!(
                    "Image upload {} ({} bytes, {})",
                    file.file_name,
                    file.bytes.len(),
                    mime_type
                );
                Ok(AnalysisRequest::Image(ImageUpload {
                    bytes: file.bytes,
                    mime_type,
                }))
            }
            _ => Err(ApiError::bad_request("Invalid mode")),
        }
    }
}

impl<S> FromRequest<S> for AnalysisForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        match Form::<HashMap<String, String>>::from_request(req, state).await {
            Ok(Form(fields)) => Ok(Self::from_fields(fields)),
            Err(FormRejection::InvalidFormContentType(e)) => {
                tracing::debug!("Reading body as empty form: {}", e.body_text());
                Ok(Self::default())
            }
            Err(e) => Err(ApiError::new(e.status(), e.body_text())),
        }
    }
}
