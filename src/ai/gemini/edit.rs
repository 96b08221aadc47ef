use super::client::GeminiHttpClient;
use super::types::{
    Content, EditRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use crate::ai::EditService;
use crate::error::RequestError;
use crate::models::{Config, EditResult, EncodedImage};
use async_trait::async_trait;

/// Sends subtitle-removal edits to a Gemini image model.
pub struct GeminiEditClient {
    http: GeminiHttpClient,
    api_key: Option<String>,
}

impl GeminiEditClient {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: Option<String>,
        model: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(model, client),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut client = Self::new(config.api_key.clone(), config.model.clone());
        client.http = client
            .http
            .with_base_url(config.base_url.clone())
            .with_timeout(config.request_timeout);
        client
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    fn build_request(image: EncodedImage, instruction: &str) -> EditRequest {
        EditRequest {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.media_type,
                            data: image.data,
                        },
                    },
                    Part::Text {
                        text: instruction.to_string(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        }
    }

    /// Pick the first inline image of the first candidate, or explain why
    /// there is none.
    fn interpret_response(response: GenerateContentResponse) -> EditResult {
        let block_reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);
        let (parts, finish_reason) = match response.candidates.into_iter().next() {
            Some(candidate) => (
                candidate.content.map(|c| c.parts).unwrap_or_default(),
                candidate.finish_reason,
            ),
            None => (Vec::new(), None),
        };

        let mut texts = Vec::new();
        for part in parts {
            if let Some(inline_data) = part.inline_data.filter(|d| !d.data.is_empty()) {
                tracing::info!(
                    "Gemini returned edited image ({}, {} base64 chars)",
                    inline_data.mime_type,
                    inline_data.data.len()
                );
                return EditResult::Success {
                    image_data: inline_data.data,
                };
            }
            if let Some(text) = part.text {
                texts.push(text);
            }
        }

        let text = texts
            .iter()
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let explanation = if !text.is_empty() {
            Some(text)
        } else if let Some(reason) = block_reason {
            Some(format!("request blocked ({})", reason))
        } else {
            finish_reason
                .filter(|reason| reason != "STOP")
                .map(|reason| format!("finish reason {}", reason))
        };

        let err = RequestError::NoImageReturned { explanation };
        tracing::warn!("{}", err);
        err.into()
    }
}

#[async_trait]
impl EditService for GeminiEditClient {
    async fn submit_edit_request(
        &self,
        image: EncodedImage,
        instruction: &str,
    ) -> Result<EditResult, RequestError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("Refusing to submit edit: no API key configured");
            RequestError::MissingCredential
        })?;

        tracing::debug!(
            "Submitting {} image ({} base64 chars) to {}",
            image.media_type,
            image.data.len(),
            self.http.model()
        );

        let request = Self::build_request(image, instruction);
        match self
            .http
            .generate_content::<_, GenerateContentResponse>(api_key, &request)
            .await
        {
            Ok(response) => Ok(Self::interpret_response(response)),
            Err(e) => Ok(e.into()),
        }
    }
}
