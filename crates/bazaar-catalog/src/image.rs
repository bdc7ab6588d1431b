//! Image reference types.
//!
//! Catalog documents carry images in several historical shapes: plain URL
//! strings, legacy `{full, thumb}` pairs, corrupted partial records with
//! nothing but an identifier, and the canonical structured record. Instead
//! of sniffing shapes at every call site, the heterogeneity is decoded once
//! at the store boundary into the [`ImageRef`] tagged union; repair logic
//! becomes a single pattern match.

use serde::{Deserialize, Serialize};

/// Size-tier URLs for a canonical image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageVariants {
    /// 16x16 crop, used for list placeholders.
    pub micro: String,
    /// 150x150 crop.
    pub thumb: String,
    /// 300x300 crop.
    pub small: String,
    /// 600x600 crop.
    pub medium: String,
    /// 1200x1200 crop.
    pub large: String,
    /// Unsized original.
    pub original: String,
}

/// Format-alternative URLs for a canonical image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageFormats {
    pub avif: String,
    pub webp: String,
    pub jpg: String,
}

/// Dimensions and derived aspect ratio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeta {
    /// Width in pixels, if known.
    pub width: Option<u32>,
    /// Height in pixels, if known.
    pub height: Option<u32>,
    /// `width / height`; absent when either dimension is unknown.
    pub aspect_ratio: Option<f64>,
}

impl ImageMeta {
    /// Build metadata from known dimensions, deriving the aspect ratio.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        let aspect_ratio = if height == 0 {
            None
        } else {
            Some(width as f64 / height as f64)
        };
        Self {
            width: Some(width),
            height: Some(height),
            aspect_ratio,
        }
    }
}

/// The canonical, fully-populated image representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Opaque reference into the media host.
    pub public_id: String,
    /// Size-tier URLs.
    pub variants: ImageVariants,
    /// Format-alternative URLs.
    pub formats: ImageFormats,
    /// Dimensions, when known.
    #[serde(default)]
    pub metadata: ImageMeta,
}

/// A legacy two-size image pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegacyImage {
    /// Full-size URL.
    pub full: String,
    /// Thumbnail URL, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

/// A corrupted partial record: an object whose only recoverable field is an
/// identifier. Carries no image data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorruptedImage {
    /// The stray identifier.
    #[serde(rename = "_id")]
    pub id: String,
}

/// One entry of a catalog item's `images` array.
///
/// Variant order matters: `serde(untagged)` tries each shape in turn, so the
/// richest shapes are listed first and [`ImageRef::Unknown`] absorbs anything
/// unrecognized instead of failing the document decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ImageRef {
    /// Already-canonical structured record.
    Canonical(ImageRecord),
    /// Legacy `{full, thumb}` pair.
    Legacy(LegacyImage),
    /// Corrupted record with no recoverable image data.
    Corrupted(CorruptedImage),
    /// Plain URL string.
    Url(String),
    /// Unrecognized shape, passed through untouched.
    Unknown(serde_json::Value),
}

impl ImageRef {
    /// Create a plain-URL reference.
    pub fn url(url: impl Into<String>) -> Self {
        ImageRef::Url(url.into())
    }

    /// Create a legacy pair reference.
    pub fn legacy(full: impl Into<String>, thumb: Option<String>) -> Self {
        ImageRef::Legacy(LegacyImage {
            full: full.into(),
            thumb,
        })
    }

    /// Whether this reference is already in canonical form.
    pub fn is_canonical(&self) -> bool {
        matches!(self, ImageRef::Canonical(_))
    }
}
