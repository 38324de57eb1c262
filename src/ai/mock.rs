use super::{CaptionService, CreativeService};
use crate::encoding::{self, ReferenceImage};
use crate::models::Language;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::sync::{Arc, Mutex};

// Tiny valid 1x1 PNG used as the default creative payload.
const DEFAULT_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 pixel
    0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49,
    0x44, 0x41, // IDAT chunk
    0x54, 0x08, 0x99, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0xE2, 0x25,
    0x00, 0xBC, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND chunk
    0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[derive(Debug, Clone)]
enum MockResponse {
    Value(String),
    Failure(String),
}

impl MockResponse {
    fn settle(&self) -> Result<String> {
        match self {
            MockResponse::Value(value) => Ok(value.clone()),
            MockResponse::Failure(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}

/// One recorded call to a mock generation service.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub briefing: String,
    pub language: Language,
    pub has_reference: bool,
}

#[derive(Clone)]
pub struct MockCaptionClient {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockCaptionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_caption_response(self, response: String) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockResponse::Value(response));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockResponse::Failure(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockCaptionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionService for MockCaptionClient {
    async fn generate_caption(
        &self,
        reference: Option<&ReferenceImage>,
        briefing: &str,
        language: Language,
    ) -> Result<String> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                briefing: briefing.to_string(),
                language,
                has_reference: reference.is_some(),
            });
            calls.len() - 1
        };

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            Ok(format!("A caption about: {}", briefing))
        } else {
            responses[index % responses.len()].settle()
        }
    }
}

#[derive(Clone)]
pub struct MockCreativeClient {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockCreativeClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_creative_response(self, data_url: String) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockResponse::Value(data_url));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockResponse::Failure(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Data URL of the default 1x1 PNG payload.
    pub fn default_data_url() -> String {
        encoding::to_data_url("image/png", &STANDARD.encode(DEFAULT_PNG))
    }
}

impl Default for MockCreativeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CreativeService for MockCreativeClient {
    async fn generate_creative(
        &self,
        briefing: &str,
        language: Language,
        reference: Option<&ReferenceImage>,
    ) -> Result<String> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                briefing: briefing.to_string(),
                language,
                has_reference: reference.is_some(),
            });
            calls.len() - 1
        };

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Self::default_data_url())
        } else {
            responses[index % responses.len()].settle()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_caption_default_echoes_briefing() {
        let client = MockCaptionClient::new();

        let caption = client
            .generate_caption(None, "new coffee blend", Language::En)
            .await
            .unwrap();
        assert!(caption.contains("new coffee blend"));
    }

    #[tokio::test]
    async fn test_mock_caption_cycles_custom_responses() {
        let client = MockCaptionClient::new()
            .with_caption_response("First caption".to_string())
            .with_caption_response("Second caption".to_string());

        assert_eq!(
            client
                .generate_caption(None, "b", Language::En)
                .await
                .unwrap(),
            "First caption"
        );
        assert_eq!(
            client
                .generate_caption(None, "b", Language::En)
                .await
                .unwrap(),
            "Second caption"
        );

        // Should cycle back
        assert_eq!(
            client
                .generate_caption(None, "b", Language::En)
                .await
                .unwrap(),
            "First caption"
        );
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_caption_failure_injection() {
        let client = MockCaptionClient::new().with_failure("quota exceeded");

        let err = client
            .generate_caption(None, "b", Language::En)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_mock_records_call_details() {
        let client = MockCreativeClient::new();
        let reference =
            ReferenceImage::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png".to_string());

        client
            .generate_creative("wooden table", Language::Pt, Some(&reference))
            .await
            .unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].briefing, "wooden table");
        assert_eq!(calls[0].language, Language::Pt);
        assert!(calls[0].has_reference);
    }

    #[tokio::test]
    async fn test_mock_creative_default_is_valid_data_url() {
        let client = MockCreativeClient::new();

        let data_url = client
            .generate_creative("b", Language::En, None)
            .await
            .unwrap();
        let (mime_type, bytes) = encoding::decode_data_url(&data_url).unwrap();
        assert_eq!(mime_type, "image/png");
        assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }
}
