//! Media host URL construction.
//!
//! Pure and deterministic: given a public ID, every variant and format URL
//! is produced by string-templating fixed transformation parameters into the
//! host's URL syntax. No I/O happens here.

use bazaar_catalog::{ImageFormats, ImageMeta, ImageRecord, ImageVariants};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// URL markers identifying placeholder/demo images that carry no real
/// product photography.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "via.placeholder.com",
    "placehold.co",
    "example.com",
    "/demo/",
];

/// Media host connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaHostConfig {
    /// Host base URL, without trailing slash.
    pub base_url: String,
    /// Account/cloud name segment.
    pub cloud_name: String,
}

impl Default for MediaHostConfig {
    fn default() -> Self {
        Self {
            base_url: "https://res.cloudinary.com".to_string(),
            cloud_name: "bazaar".to_string(),
        }
    }
}

/// Builds transformation URLs for the media host.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    config: MediaHostConfig,
    upload_pattern: Regex,
}

impl UrlBuilder {
    /// Create a builder for a host configuration.
    pub fn new(config: MediaHostConfig) -> Self {
        // Any cloud name on this host counts as "our" upload URL; documents
        // migrated between accounts keep their extractable public IDs.
        let pattern = format!(
            r"^{}/[^/]+/image/upload/(?:v\d+/)?(.+)\.(?:jpe?g|png|gif|webp|avif)$",
            regex::escape(config.base_url.trim_end_matches('/')),
        );
        let upload_pattern = Regex::new(&pattern).expect("upload pattern is statically valid");
        Self {
            config,
            upload_pattern,
        }
    }

    /// The `.../image/upload` prefix for this account.
    fn upload_prefix(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name
        )
    }

    /// URL with a transformation segment.
    fn transform_url(&self, transform: &str, public_id: &str, ext: &str) -> String {
        format!("{}/{}/{}.{}", self.upload_prefix(), transform, public_id, ext)
    }

    /// URL without any transformation (the unsized original).
    fn plain_url(&self, public_id: &str, ext: &str) -> String {
        format!("{}/{}.{}", self.upload_prefix(), public_id, ext)
    }

    /// Size-tier URLs for a public ID.
    pub fn variants(&self, public_id: &str) -> ImageVariants {
        ImageVariants {
            micro: self.transform_url("c_fill,w_16,h_16", public_id, "jpg"),
            thumb: self.transform_url("c_fill,w_150,h_150", public_id, "jpg"),
            small: self.transform_url("c_fill,w_300,h_300", public_id, "jpg"),
            medium: self.transform_url("c_fill,w_600,h_600", public_id, "jpg"),
            large: self.transform_url("c_fill,w_1200,h_1200", public_id, "jpg"),
            original: self.plain_url(public_id, "jpg"),
        }
    }

    /// Format-alternative URLs for a public ID.
    pub fn formats(&self, public_id: &str) -> ImageFormats {
        ImageFormats {
            avif: self.transform_url("f_avif,q_auto", public_id, "avif"),
            webp: self.transform_url("f_webp,q_auto", public_id, "webp"),
            jpg: self.transform_url("f_jpg,q_auto", public_id, "jpg"),
        }
    }

    /// Assemble a full canonical record for a public ID.
    pub fn build_record(&self, public_id: &str, metadata: ImageMeta) -> ImageRecord {
        ImageRecord {
            public_id: public_id.to_string(),
            variants: self.variants(public_id),
            formats: self.formats(public_id),
            metadata,
        }
    }

    /// Extract the public ID from one of the host's own upload URLs.
    ///
    /// Matches `.../image/upload/[v<version>/]<publicId>.<ext>`; returns
    /// `None` for URLs hosted elsewhere.
    pub fn extract_public_id(&self, url: &str) -> Option<String> {
        self.upload_pattern
            .captures(url)
            .map(|c| c[1].to_string())
    }

    /// Whether a URL is a known placeholder/demo image.
    pub fn is_placeholder(url: &str) -> bool {
        PLACEHOLDER_MARKERS.iter().any(|m| url.contains(m))
    }
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new(MediaHostConfig::default())
    }
}
