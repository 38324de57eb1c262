//! Prompt templates and selection.
//!
//! Templates live under `data/prompts/` and are compiled in. The creative
//! instruction is a tagged variant keyed by language and by whether a
//! reference image accompanies the briefing: with a reference, the template
//! pins the generation to the reference's lighting, palette, texture, angle,
//! and mood; without one it falls back to a static style descriptor.

use crate::models::Language;

pub const CAPTION_SYSTEM_PT: &str = include_str!("../data/prompts/caption_system_pt.txt");
pub const CAPTION_SYSTEM_EN: &str = include_str!("../data/prompts/caption_system_en.txt");
pub const CAPTION_USER_PT: &str = include_str!("../data/prompts/caption_user_pt.txt");
pub const CAPTION_USER_EN: &str = include_str!("../data/prompts/caption_user_en.txt");
pub const CREATIVE_REFERENCE_PT: &str = include_str!("../data/prompts/creative_reference_pt.txt");
pub const CREATIVE_REFERENCE_EN: &str = include_str!("../data/prompts/creative_reference_en.txt");
pub const CREATIVE_FALLBACK_PT: &str = include_str!("../data/prompts/creative_fallback_pt.txt");
pub const CREATIVE_FALLBACK_EN: &str = include_str!("../data/prompts/creative_fallback_en.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Static system instruction governing caption tone and structure.
pub fn caption_system(language: Language) -> &'static str {
    match language {
        Language::Pt => CAPTION_SYSTEM_PT,
        Language::En => CAPTION_SYSTEM_EN,
    }
}

/// Dynamic caption instruction: language lead-in followed by the briefing.
pub fn caption_user(language: Language, briefing: &str) -> String {
    let template = match language {
        Language::Pt => CAPTION_USER_PT,
        Language::En => CAPTION_USER_EN,
    };
    render(template, &[("briefing", briefing)])
}

/// Creative instruction for the given language and reference presence.
pub fn creative_instruction(language: Language, briefing: &str, has_reference: bool) -> String {
    let template = match (language, has_reference) {
        (Language::Pt, true) => CREATIVE_REFERENCE_PT,
        (Language::Pt, false) => CREATIVE_FALLBACK_PT,
        (Language::En, true) => CREATIVE_REFERENCE_EN,
        (Language::En, false) => CREATIVE_FALLBACK_EN,
    };
    render(template, &[("briefing", briefing)])
}

/// Substituted for an empty caption briefing before dispatch.
pub fn default_caption_briefing(language: Language) -> &'static str {
    match language {
        Language::Pt => "Uma postagem incrível.",
        Language::En => "An amazing post.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_templates_are_non_empty() {
        assert!(!CAPTION_SYSTEM_PT.is_empty());
        assert!(!CAPTION_SYSTEM_EN.is_empty());
        assert!(!CAPTION_USER_PT.is_empty());
        assert!(!CAPTION_USER_EN.is_empty());
        assert!(!CREATIVE_REFERENCE_PT.is_empty());
        assert!(!CREATIVE_REFERENCE_EN.is_empty());
        assert!(!CREATIVE_FALLBACK_PT.is_empty());
        assert!(!CREATIVE_FALLBACK_EN.is_empty());
    }

    #[test]
    fn test_caption_user_templates_have_briefing_placeholder() {
        assert!(CAPTION_USER_PT.contains("{{briefing}}"));
        assert!(CAPTION_USER_EN.contains("{{briefing}}"));
    }

    #[test]
    fn test_creative_templates_have_briefing_placeholder() {
        assert!(CREATIVE_REFERENCE_PT.contains("{{briefing}}"));
        assert!(CREATIVE_REFERENCE_EN.contains("{{briefing}}"));
        assert!(CREATIVE_FALLBACK_PT.contains("{{briefing}}"));
        assert!(CREATIVE_FALLBACK_EN.contains("{{briefing}}"));
    }

    #[test]
    fn test_caption_user_prepends_lead_in() {
        assert_eq!(
            caption_user(Language::En, "our new coffee blend"),
            "Generate a post about: our new coffee blend"
        );
        assert_eq!(
            caption_user(Language::Pt, "nosso novo blend de café"),
            "Gere uma postagem sobre: nosso novo blend de café"
        );
    }

    #[test]
    fn test_caption_system_mandates_five_hashtags() {
        assert!(caption_system(Language::En).contains("exactly 5"));
        assert!(caption_system(Language::Pt).contains("exatamente 5 hashtags"));
    }

    #[test]
    fn test_creative_reference_variant_carries_style_anchor() {
        let prompt = creative_instruction(Language::En, "a cup of coffee", true);
        assert!(prompt.contains("MANDATORY VISUAL REFERENCE"));
        assert!(prompt.contains("a cup of coffee"));

        let prompt = creative_instruction(Language::Pt, "uma xícara de café", true);
        assert!(prompt.contains("REFERÊNCIA VISUAL OBRIGATÓRIA"));
        assert!(prompt.contains("uma xícara de café"));
    }

    #[test]
    fn test_creative_fallback_variant_has_no_style_anchor() {
        let prompt = creative_instruction(Language::En, "a cup of coffee", false);
        assert!(!prompt.contains("MANDATORY VISUAL REFERENCE"));
        assert!(prompt.contains("hyper-realistic"));

        let prompt = creative_instruction(Language::Pt, "uma xícara de café", false);
        assert!(!prompt.contains("REFERÊNCIA VISUAL OBRIGATÓRIA"));
        assert!(prompt.contains("hiper-realista"));
    }

    #[test]
    fn test_default_caption_briefing_per_language() {
        assert_eq!(
            default_caption_briefing(Language::Pt),
            "Uma postagem incrível."
        );
        assert_eq!(default_caption_briefing(Language::En), "An amazing post.");
    }
}
