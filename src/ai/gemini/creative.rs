use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::CreativeService;
use crate::encoding::{self, ReferenceImage};
use crate::models::Language;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct CreativeRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: CreativeGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreativeGenerationConfig {
    response_modalities: Vec<String>,
}

pub struct GeminiCreativeClient {
    http: GeminiHttpClient,
}

impl GeminiCreativeClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }

    /// The reference image, when present, is the style anchor and goes
    /// before the instruction text.
    fn build_contents(
        briefing: &str,
        language: Language,
        reference: Option<&ReferenceImage>,
    ) -> Vec<Content> {
        let mut parts = Vec::new();

        if let Some(reference) = reference {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: reference.mime_type.clone(),
                    data: reference.to_base64(),
                },
            });
        }

        parts.push(Part::Text {
            text: prompts::creative_instruction(language, briefing, reference.is_some()),
        });

        vec![Content {
            role: Some("user".to_string()),
            parts,
        }]
    }

    fn first_inline_image(response: &GenerateContentResponse) -> Option<&InlineData> {
        response.candidates.first().and_then(|c| {
            c.content.parts.iter().find_map(|p| match p {
                Part::InlineData { inline_data } => Some(inline_data),
                _ => None,
            })
        })
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiCreativeClient);

#[async_trait]
impl CreativeService for GeminiCreativeClient {
    async fn generate_creative(
        &self,
        briefing: &str,
        language: Language,
        reference: Option<&ReferenceImage>,
    ) -> Result<String> {
        let request = CreativeRequest {
            contents: Self::build_contents(briefing, language, reference),
            generation_config: CreativeGenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let image_data = Self::first_inline_image(&response)
            .ok_or_else(|| Error::AiProvider("No image data in Gemini response".to_string()))?;

        tracing::debug!(
            "Gemini returned creative with mime_type: {}",
            image_data.mime_type
        );

        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD
            .decode(&image_data.data)
            .map_err(|e| {
                Error::AiProvider(format!("Failed to decode Gemini creative payload: {}", e))
            })?;

        Ok(encoding::to_data_url(&image_data.mime_type, &image_data.data))
    }
}
