use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::CaptionService;
use crate::encoding::ReferenceImage;
use crate::models::Language;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct CaptionRequest {
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: Option<CaptionGenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CaptionGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

pub struct GeminiCaptionClient {
    http: GeminiHttpClient,
}

impl GeminiCaptionClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(30),
                client,
            ),
        }
    }

    /// The reference image part, when present, goes before the text
    /// instruction; some multimodal backends weight leading parts higher.
    fn build_contents(
        reference: Option<&ReferenceImage>,
        briefing: &str,
        language: Language,
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
            text: prompts::caption_user(language, briefing),
        });

        vec![Content {
            role: Some("user".to_string()),
            parts,
        }]
    }

    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        response.candidates.first().and_then(|c| {
            c.content.parts.iter().find_map(|p| match p {
                Part::Text { text } => Some(text.clone()),
                Part::InlineData { .. } => None,
            })
        })
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiCaptionClient);

#[async_trait]
impl CaptionService for GeminiCaptionClient {
    async fn generate_caption(
        &self,
        reference: Option<&ReferenceImage>,
        briefing: &str,
        language: Language,
    ) -> Result<String> {
        let request = CaptionRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::Text {
                    text: prompts::caption_system(language).to_string(),
                }],
            }),
            contents: Self::build_contents(reference, briefing, language),
            generation_config: Some(CaptionGenerationConfig {
                temperature: Some(0.7),
            }),
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        Self::extract_text(&response)
            .ok_or_else(|| Error::AiProvider("No caption text in Gemini response".to_string()))
    }
}
