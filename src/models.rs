//! Data models and structures
//!
//! Defines the session input, the supported output languages, and the
//! process-level configuration for the Gemini clients.

use crate::encoding::ReferenceImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output language for captions, creative instructions, and CLI messages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Pt,
    En,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Pt => write!(f, "pt"),
            Language::En => write!(f, "en"),
        }
    }
}

impl FromStr for Language {
    type Err = crate::Error;

    fn from_str(input: &str) -> crate::Result<Self> {
        match input.to_ascii_lowercase().as_str() {
            "pt" => Ok(Language::Pt),
            "en" => Ok(Language::En),
            other => Err(crate::Error::Config(format!(
                "Unsupported language '{}'. Expected 'pt' or 'en'",
                other
            ))),
        }
    }
}

/// User input for one submission. Rebuilt fresh per invocation; nothing
/// persists beyond the process.
#[derive(Debug, Clone)]
pub struct SessionInput {
    pub reference_image: Option<ReferenceImage>,
    pub caption_briefing: String,
    pub creative_briefing: String,
    pub language: Language,
}

impl SessionInput {
    /// A submission needs at least one non-whitespace briefing.
    pub fn has_briefing(&self) -> bool {
        !self.caption_briefing.trim().is_empty() || !self.creative_briefing.trim().is_empty()
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub caption_model: String,
    pub creative_model: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .map_err(|_| crate::Error::Config("GEMINI_API_KEY not set".to_string()))?,
            caption_model: std::env::var("CAPTION_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            creative_model: std::env::var("CREATIVE_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-image".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parses_case_insensitively() {
        assert_eq!("pt".parse::<Language>().unwrap(), Language::Pt);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
    }

    #[test]
    fn test_language_rejects_unknown_code() {
        let err = "fr".parse::<Language>().unwrap_err();
        assert!(err.to_string().contains("Unsupported language"));
    }

    #[test]
    fn test_language_display_round_trips() {
        for language in [Language::Pt, Language::En] {
            assert_eq!(language.to_string().parse::<Language>().unwrap(), language);
        }
    }

    #[test]
    fn test_has_briefing_ignores_whitespace() {
        let input = SessionInput {
            reference_image: None,
            caption_briefing: "   ".to_string(),
            creative_briefing: "\t\n".to_string(),
            language: Language::En,
        };
        assert!(!input.has_briefing());

        let input = SessionInput {
            creative_briefing: "a cup of coffee".to_string(),
            ..input
        };
        assert!(input.has_briefing());
    }
}
