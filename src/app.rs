//! Application orchestration: wires configuration into the Gemini clients,
//! runs a submission, and surfaces its results.

use crate::ai::{GeminiCaptionClient, GeminiCreativeClient};
use crate::encoding;
use crate::models::{Config, SessionInput};
use crate::session::{GenerationServices, Phase, Session};
use crate::{Error, Result};
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// User-facing status lines, localized to the session language.
mod messages {
    use crate::models::Language;

    pub fn error_line(language: Language) -> &'static str {
        match language {
            Language::Pt => "Algo deu errado. Tente novamente.",
            Language::En => "Something went wrong. Try again.",
        }
    }

    pub fn success_line(language: Language) -> &'static str {
        match language {
            Language::Pt => "Conteúdo gerado.",
            Language::En => "Content generated.",
        }
    }
}

/// Coordinates caption and creative generation for one invocation.
pub struct App {
    services: GenerationServices,
    output_dir: PathBuf,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses
    /// that need to inject mocks.
    pub fn with_services(services: GenerationServices, output_dir: PathBuf) -> Self {
        Self {
            services,
            output_dir,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        let config = Config::from_env()?;

        fs::create_dir_all(&output_dir)?;

        // Reuse one HTTP connection pool across both Gemini clients.
        let http_client = reqwest::Client::new();

        info!(
            "Caption model: {}, creative model: {}",
            config.caption_model, config.creative_model
        );

        let services = GenerationServices {
            caption: Box::new(GeminiCaptionClient::new_with_client(
                config.gemini_api_key.clone(),
                config.caption_model,
                http_client.clone(),
            )),
            creative: Box::new(GeminiCreativeClient::new_with_client(
                config.gemini_api_key,
                config.creative_model,
                http_client,
            )),
        };

        Ok(Self::with_services(services, output_dir))
    }

    /// Run one submission and surface whatever it produced.
    ///
    /// The caption goes to stdout; the creative is decoded from its data
    /// URL and written next to a timestamped filename. On a failed
    /// submission any branch that did succeed is still surfaced before the
    /// generic failure is reported.
    pub async fn run(&self, input: SessionInput) -> Result<()> {
        let mut session = Session::new();

        if !session.can_submit(&input) {
            warn!("Both briefings are empty; nothing to generate");
            return Ok(());
        }

        info!("Generating content (language: {})", input.language);
        let phase = session.submit(&self.services, &input).await;

        if let Some(caption) = session.caption().value() {
            println!("{}", caption);
        }

        if let Some(data_url) = session.creative().value() {
            let path = self.save_creative(data_url)?;
            info!("Saved creative to {}", path.display());
        }

        match phase {
            Phase::Error => Err(Error::Generation(
                messages::error_line(input.language).to_string(),
            )),
            _ => {
                info!("{}", messages::success_line(input.language));
                Ok(())
            }
        }
    }

    fn save_creative(&self, data_url: &str) -> Result<PathBuf> {
        let (mime_type, bytes) = encoding::decode_data_url(data_url)?;

        let filename = format!(
            "social-creative-{}.{}",
            Local::now().format("%Y%m%d%H%M%S"),
            encoding::extension_for_mime(&mime_type)
        );
        let path = self.output_dir.join(filename);
        fs::write(&path, bytes)?;

        Ok(path)
    }
}
