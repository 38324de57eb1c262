use anyhow::Result;
use clap::Parser;
use socialcaption::app::App;
use socialcaption::encoding::ReferenceImage;
use socialcaption::models::{Language, SessionInput};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "socialcaption")]
#[command(about = "Generate social media captions and creatives with Gemini")]
struct CliArgs {
    /// Caption briefing text. When empty, a language default is used.
    #[arg(long, default_value = "")]
    briefing: String,

    /// Creative briefing; when non-empty an image is generated too.
    #[arg(long, default_value = "")]
    creative_briefing: String,

    /// Output language.
    #[arg(long, value_name = "pt|en", value_parser = parse_language_arg, default_value = "pt")]
    language: Language,

    /// Optional reference image, forwarded to the caption request and used
    /// as the creative's style anchor.
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,

    /// Directory where generated creatives are written.
    #[arg(long, value_name = "DIR", default_value = "output")]
    output_dir: PathBuf,
}

fn parse_language_arg(input: &str) -> std::result::Result<Language, String> {
    input.parse::<Language>().map_err(|e| format!("{}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "socialcaption=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting socialcaption");

    let args = CliArgs::parse();

    let reference_image = match &args.image {
        Some(path) => match ReferenceImage::from_file(path).await {
            Ok(image) => Some(image),
            Err(e) => {
                error!("Failed to read reference image {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let input = SessionInput {
        reference_image,
        caption_briefing: args.briefing,
        creative_briefing: args.creative_briefing,
        language: args.language,
    };

    match App::new(args.output_dir) {
        Ok(app) => match app.run(input).await {
            Ok(_) => {
                info!("Done");
                Ok(())
            }
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_language_arg;
    use socialcaption::models::Language;

    #[test]
    fn test_parse_language_arg_valid() {
        assert_eq!(parse_language_arg("pt").unwrap(), Language::Pt);
        assert_eq!(parse_language_arg("en").unwrap(), Language::En);
    }

    #[test]
    fn test_parse_language_arg_invalid() {
        let err = parse_language_arg("de").unwrap_err();
        assert!(err.contains("Unsupported language"));
    }
}
