//! Value types for a single campaign-generation request.
//!
//! All enums are closed sets parsed from the integer discriminants the
//! browser form submits. The style/ratio lookup tables are immutable
//! static data.

use crate::services::storage::ImageHandle;
use thiserror::Error;

/// A form field carried a discriminant outside the closed enum.
#[derive(Debug, Error)]
#[error("unknown value {value} for {field}")]
pub struct InvalidChoice {
    pub field: &'static str,
    pub value: u8,
}

/// Language the generated summary and ad copy should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdLanguage {
    English,
    Bulgarian,
}

impl AdLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdLanguage::English => "English",
            AdLanguage::Bulgarian => "Bulgarian",
        }
    }
}

impl TryFrom<u8> for AdLanguage {
    type Error = InvalidChoice;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AdLanguage::English),
            1 => Ok(AdLanguage::Bulgarian),
            _ => Err(InvalidChoice {
                field: "countryAdLanguage",
                value,
            }),
        }
    }
}

/// Visual tone of the generated ad image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStyle {
    Standard,
    HyperRealistic,
}

impl ImageStyle {
    /// Fixed natural-language instruction describing the desired visual tone.
    pub fn instruction(&self) -> &'static str {
        match self {
            ImageStyle::Standard => {
                "Create a modern, eye-catching social media post image summarizing the \
                 business and its services with bold typography, clean layout, and \
                 professional visuals. Make it ready to upload to Instagram or Facebook. \
                 Keep text on the image in the language provided by the user. \
                 [IMPORTANT] **If using a logo or products make sure they look exactly \
                 the same as the original.**"
            }
            ImageStyle::HyperRealistic => {
                "Create a hyperrealistic, ultra-premium 4K social media post \
                 (Instagram/Facebook ready) that visually represents the business and its \
                 core services. The design must feel like it was created by a top-tier \
                 professional designer: clean, luxurious, modern, and visually striking. \
                 Use bold but minimal typography (very little text), strong hierarchy, \
                 perfect spacing, and a high-end aesthetic. Focus on realism, cinematic \
                 lighting, sharp details, depth, subtle shadows, and refined composition. \
                 Full HD / 4K quality, crisp, polished, and scroll-stopping. \
                 Text on the image must be in the language provided by the user. \
                 [IMPORTANT] **If using a logo or products make sure they look exactly \
                 the same as the original.** \
                 The final result must look premium, sophisticated, and ready for \
                 immediate upload, with no clutter and no generic template feel."
            }
        }
    }
}

impl TryFrom<u8> for ImageStyle {
    type Error = InvalidChoice;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ImageStyle::Standard),
            1 => Ok(ImageStyle::HyperRealistic),
            _ => Err(InvalidChoice {
                field: "imageType",
                value,
            }),
        }
    }
}

/// Output image proportions requested from the image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Square,
    Portrait,
    Vertical,
    Landscape,
}

impl AspectRatio {
    /// Short ratio token passed to the image-generation call.
    pub fn code(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "4:5",
            AspectRatio::Vertical => "9:16",
            AspectRatio::Landscape => "16:9",
        }
    }
}

impl TryFrom<u8> for AspectRatio {
    type Error = InvalidChoice;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AspectRatio::Square),
            1 => Ok(AspectRatio::Portrait),
            2 => Ok(AspectRatio::Vertical),
            3 => Ok(AspectRatio::Landscape),
            _ => Err(InvalidChoice {
                field: "imageAspectRatio",
                value,
            }),
        }
    }
}

/// An uploaded reference image forwarded to the image model as an inline
/// binary part (e.g. a logo the generated ad should reproduce faithfully).
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Output of the summarize step, consumed immediately by image generation.
#[derive(Debug, Clone)]
pub struct BusinessSummary {
    pub text: String,
    pub language: AdLanguage,
    pub style: ImageStyle,
    pub aspect_ratio: AspectRatio,
}

/// A generated ad image sitting in the transient store, plus the prompt
/// that produced it. The file is deleted once its bytes have been served.
#[derive(Debug)]
pub struct GeneratedAd {
    pub handle: ImageHandle,
    pub prompt: String,
}
