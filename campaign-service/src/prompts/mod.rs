//! Prompt construction for the two provider calls.
//!
//! Pure functions over the closed enums in `models`; no side effects.

use crate::models::{AdLanguage, ImageStyle};

/// Prompt for the summarize step: instructs the model to browse the site
/// (the Google Search tool is enabled on the call), identify the business
/// type and services, and answer in the requested language while keeping
/// proper nouns intact.
pub fn summary_prompt(url: &str, language: AdLanguage) -> String {
    format!(
        "Analyze the website at {url}. \
         Identify the business type and the main services they offer. \
         Keep website, products, and services names in the output. \
         The output should be in the following language: {}",
        language.as_str()
    )
}

/// Composite prompt for the image-generation step: business summary,
/// style instruction, then the language directive for on-image text.
/// This string is also returned to the client as the ad description.
pub fn ad_image_prompt(summary: &str, style: ImageStyle, language: AdLanguage) -> String {
    format!(
        "{summary}\n\n{}\n\nThe text/font on the image should be in the following language: {}",
        style.instruction(),
        language.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prompt_names_url_and_language() {
        let prompt = summary_prompt("https://example-bakery.com", AdLanguage::English);
        assert!(prompt.contains("https://example-bakery.com"));
        assert!(prompt.contains("English"));
    }

    #[test]
    fn ad_image_prompt_interpolates_summary_and_style() {
        let prompt = ad_image_prompt(
            "A family bakery in Sofia.",
            ImageStyle::Standard,
            AdLanguage::Bulgarian,
        );
        assert!(prompt.starts_with("A family bakery in Sofia."));
        assert!(prompt.contains(ImageStyle::Standard.instruction()));
        assert!(prompt.contains("Bulgarian"));
    }
}
