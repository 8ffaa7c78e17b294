//! Google Generative Language API backend.
//!
//! Text-to-image goes through an Imagen model's `:predict` endpoint;
//! edit/compose goes through a Gemini image model's `:generateContent`
//! endpoint with inline image parts.

use crate::error::{sanitize_error_message, ImgForgeError, Result};
use crate::image::ImageData;
use crate::request::{Part, PartsRequest, TextRequest};
use crate::service::GenerationService;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
const DEFAULT_EDIT_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Builder for [`GeminiService`].
#[derive(Debug, Clone, Default)]
pub struct GeminiServiceBuilder {
    api_key: Option<String>,
    image_model: Option<String>,
    edit_model: Option<String>,
}

impl GeminiServiceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `GOOGLE_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the text-to-image model.
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }

    /// Overrides the edit/compose model.
    pub fn edit_model(mut self, model: impl Into<String>) -> Self {
        self.edit_model = Some(model.into());
        self
    }

    /// Builds the service, resolving the API key.
    pub fn build(self) -> Result<GeminiService> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or_else(|| {
                ImgForgeError::Auth("GOOGLE_API_KEY not set and no API key provided".into())
            })?;

        Ok(GeminiService {
            client: reqwest::Client::new(),
            api_key,
            image_model: self
                .image_model
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            edit_model: self
                .edit_model
                .unwrap_or_else(|| DEFAULT_EDIT_MODEL.to_string()),
        })
    }
}

/// Generation backend talking to Google's Generative Language API.
pub struct GeminiService {
    client: reqwest::Client,
    api_key: String,
    image_model: String,
    edit_model: String,
}

impl GeminiService {
    /// Creates a new [`GeminiServiceBuilder`].
    pub fn builder() -> GeminiServiceBuilder {
        GeminiServiceBuilder::new()
    }

    async fn post(&self, url: &str, body: &impl Serialize) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text));
        }

        Ok(response)
    }
}

fn parse_error(status: u16, text: &str) -> ImgForgeError {
    let text = sanitize_error_message(text);
    if status == 401 || status == 403 {
        return ImgForgeError::Auth(text);
    }
    let lower = text.to_lowercase();
    if lower.contains("safety")
        || lower.contains("blocked")
        || lower.contains("content_policy")
        || lower.contains("prohibited")
    {
        return ImgForgeError::ContentBlocked(text);
    }
    ImgForgeError::Api {
        status,
        message: text,
    }
}

fn decode_inline(data: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| ImgForgeError::Decode(e.to_string()))
}

#[async_trait]
impl GenerationService for GeminiService {
    async fn generate_from_text(&self, request: &TextRequest) -> Result<Vec<ImageData>> {
        let start = Instant::now();
        let url = format!("{API_BASE}/models/{}:predict", self.image_model);
        let body = ImagenRequest::from_text_request(request);

        tracing::debug!(model = %self.image_model, "submitted text-to-image request");
        let response = self.post(&url, &body).await?;
        let imagen_response: ImagenResponse = response.json().await?;

        let mut images = Vec::with_capacity(imagen_response.predictions.len());
        for prediction in imagen_response.predictions {
            let Some(encoded) = prediction.bytes_base64_encoded else {
                continue;
            };
            let data = decode_inline(&encoded)?;
            let mime_type = prediction
                .mime_type
                .unwrap_or_else(|| request.format.mime_type().to_string());
            images.push(ImageData::new(data, mime_type));
        }

        tracing::debug!(
            model = %self.image_model,
            images = images.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "text-to-image generation complete"
        );
        Ok(images)
    }

    async fn generate_from_parts(&self, request: &PartsRequest) -> Result<Vec<Part>> {
        let start = Instant::now();
        let url = format!("{API_BASE}/models/{}:generateContent", self.edit_model);
        let body = GeminiRequest::from_parts_request(request);

        tracing::debug!(model = %self.edit_model, "submitted edit request");
        let response = self.post(&url, &body).await?;
        let gemini_response: GeminiResponse = response.json().await?;

        // Blocks come back as HTTP 200 with feedback attached.
        if let Some(ref feedback) = gemini_response.prompt_feedback {
            if let Some(ref reason) = feedback.block_reason {
                let msg = feedback
                    .block_reason_message
                    .clone()
                    .unwrap_or_else(|| format!("Prompt blocked: {}", reason));
                return Err(ImgForgeError::ContentBlocked(msg));
            }
        }

        let candidate = gemini_response.candidates.into_iter().next();

        if let Some(finish_reason) = candidate.as_ref().and_then(|c| c.finish_reason.as_deref()) {
            match finish_reason {
                "SAFETY"
                | "IMAGE_SAFETY"
                | "IMAGE_PROHIBITED_CONTENT"
                | "IMAGE_RECITATION"
                | "RECITATION"
                | "PROHIBITED_CONTENT"
                | "BLOCKLIST" => {
                    return Err(ImgForgeError::ContentBlocked(format!(
                        "Content blocked by Gemini safety filter: {}",
                        finish_reason
                    )));
                }
                _ => {} // STOP, MAX_TOKENS, etc. are normal
            }
        }

        let mut parts = Vec::new();
        if let Some(content) = candidate.and_then(|c| c.content) {
            for part in content.parts {
                if let Some(inline) = part.inline_data {
                    let data = decode_inline(&inline.data)?;
                    parts.push(Part::Image(ImageData::new(data, inline.mime_type)));
                } else if let Some(text) = part.text {
                    parts.push(Part::Text(text));
                }
            }
        }

        tracing::debug!(
            model = %self.edit_model,
            parts = parts.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "edit request complete"
        );
        Ok(parts)
    }
}

// Imagen request/response types (`:predict`)
#[derive(Debug, Serialize)]
struct ImagenRequest {
    instances: Vec<ImagenInstance>,
    parameters: ImagenParameters,
}

#[derive(Debug, Serialize)]
struct ImagenInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImagenParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_mime_type: String,
}

impl ImagenRequest {
    fn from_text_request(request: &TextRequest) -> Self {
        Self {
            instances: vec![ImagenInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: ImagenParameters {
                sample_count: request.count,
                aspect_ratio: request.aspect_ratio.as_str().to_string(),
                output_mime_type: request.format.mime_type().to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImagenResponse {
    #[serde(default)]
    predictions: Vec<ImagenPrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImagenPrediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
}

// Gemini request/response types (`:generateContent`)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiRequestPart>,
}

/// A part in a Gemini request - either text or inline image data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiRequestPart {
    Text { text: String },
    InlineData { inline_data: GeminiInlineData },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiConfig {
    response_modalities: Vec<String>,
}

impl GeminiRequest {
    fn from_parts_request(request: &PartsRequest) -> Self {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                Part::Image(image) => GeminiRequestPart::InlineData {
                    inline_data: GeminiInlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.to_base64(),
                    },
                },
                Part::Text(text) => GeminiRequestPart::Text { text: text.clone() },
            })
            .collect();

        Self {
            contents: vec![GeminiContent { parts }],
            generation_config: GeminiConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContentResponse>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    block_reason_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPartResponse {
    #[serde(default)]
    inline_data: Option<InlineData>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageFormat;
    use crate::session::AspectRatio;

    fn text_request() -> TextRequest {
        TextRequest {
            prompt: "a red bicycle".into(),
            count: 1,
            format: ImageFormat::Png,
            aspect_ratio: AspectRatio::Landscape,
        }
    }

    #[test]
    fn test_builder_with_explicit_key() {
        let service = GeminiServiceBuilder::new().api_key("test-key").build();
        assert!(service.is_ok());
    }

    #[test]
    fn test_builder_overrides_models() {
        let service = GeminiService::builder()
            .api_key("test-key")
            .image_model("imagen-next")
            .edit_model("gemini-next")
            .build()
            .unwrap();
        assert_eq!(service.image_model, "imagen-next");
        assert_eq!(service.edit_model, "gemini-next");
    }

    #[test]
    fn test_imagen_request_serialization() {
        let body = ImagenRequest::from_text_request(&text_request());
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["instances"][0]["prompt"], "a red bicycle");
        assert_eq!(json["parameters"]["sampleCount"], 1);
        assert_eq!(json["parameters"]["aspectRatio"], "16:9");
        assert_eq!(json["parameters"]["outputMimeType"], "image/png");
    }

    #[test]
    fn test_imagen_response_deserialization() {
        let json = r#"{
            "predictions": [{
                "bytesBase64Encoded": "AQID",
                "mimeType": "image/png"
            }]
        }"#;
        let response: ImagenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.predictions.len(), 1);
        assert_eq!(
            response.predictions[0].bytes_base64_encoded.as_deref(),
            Some("AQID")
        );
    }

    #[test]
    fn test_gemini_request_preserves_part_order() {
        let request = PartsRequest {
            parts: vec![
                Part::Image(ImageData::new(vec![1, 2, 3], "image/jpeg")),
                Part::Image(ImageData::new(vec![4, 5, 6], "image/png")),
                Part::Text("merge these".into()),
            ],
        };
        let body = GeminiRequest::from_parts_request(&request);
        let json = serde_json::to_value(&body).unwrap();

        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["inline_data"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inline_data"]["data"], "AQID");
        assert_eq!(parts[1]["inline_data"]["mimeType"], "image/png");
        assert_eq!(parts[2]["text"], "merge these");

        assert_eq!(
            json["generationConfig"]["responseModalities"],
            serde_json::json!(["IMAGE", "TEXT"])
        );
    }

    #[test]
    fn test_gemini_response_deserialization() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"inlineData": {"mimeType": "image/png", "data": "AQID"}},
                        {"text": "here you go"}
                    ]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let content = response.candidates[0].content.as_ref().unwrap();
        assert_eq!(content.parts.len(), 2);
        assert_eq!(
            content.parts[0].inline_data.as_ref().unwrap().mime_type,
            "image/png"
        );
        assert_eq!(content.parts[1].text.as_deref(), Some("here you go"));
    }

    #[test]
    fn test_gemini_response_with_prompt_feedback_block() {
        let json = r#"{
            "candidates": [],
            "promptFeedback": {
                "blockReason": "SAFETY",
                "blockReasonMessage": "Prompt was blocked due to safety"
            }
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.candidates.is_empty());
        let feedback = response.prompt_feedback.unwrap();
        assert_eq!(feedback.block_reason.as_deref(), Some("SAFETY"));
    }

    #[test]
    fn test_parse_error_maps_auth_statuses() {
        assert!(matches!(
            parse_error(401, "bad key"),
            ImgForgeError::Auth(_)
        ));
        assert!(matches!(
            parse_error(403, "forbidden"),
            ImgForgeError::Auth(_)
        ));
    }

    #[test]
    fn test_parse_error_detects_safety_blocks() {
        assert!(matches!(
            parse_error(400, "request blocked by safety system"),
            ImgForgeError::ContentBlocked(_)
        ));
    }

    #[test]
    fn test_parse_error_defaults_to_api() {
        let err = parse_error(500, "internal");
        assert!(matches!(err, ImgForgeError::Api { status: 500, .. }));
    }
}
