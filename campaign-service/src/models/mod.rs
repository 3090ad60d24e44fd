pub mod campaign;

pub use campaign::{
    AdLanguage, AspectRatio, BusinessSummary, GeneratedAd, ImageStyle, InvalidChoice,
    ReferenceImage,
};
