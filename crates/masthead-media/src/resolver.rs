//! The image presentation resolver.
//!
//! Resolution steps, in order:
//!
//! 1. No candidates: [`ResolvedImage::NoImage`].
//! 2. Only the first candidate is considered.
//! 3. Focal point: the asset's `focalPoint`, else the constraints' default.
//! 4. Build the [`TransformRequest`] from the constraints and focal point.
//! 5. Hand the request to the [`ImageTransformer`]. An asset without a usable
//!    binary location resolves to `NoImage`.
//! 6. Alt text: `description`, else `title`, else the fallback text.

use masthead_core::FieldSource;
use serde::{Deserialize, Serialize};

use crate::asset::ImageAsset;
use crate::constraints::PresentationConstraints;
use crate::fallback::{ALT_CHAIN, FOCAL_CHAIN, first_present_or};
use crate::transform::{ImageTransformer, QueryTransformer, TransformRequest};

/// Alt text used when an asset has neither description nor title.
pub const FALLBACK_ALT: &str = "Article featured image";

/// A resolved, ready-to-render image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Transform-applied delivery URL.
    pub url: String,
    /// Accessibility text, never empty.
    pub alt: String,
}

/// Outcome of resolving an image.
///
/// `NoImage` is an expected state (no image chosen yet), not an error;
/// callers render a placeholder for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedImage {
    /// An image to render.
    Image(ImageDescriptor),
    /// Nothing to render; show a placeholder.
    NoImage,
}

impl ResolvedImage {
    /// Returns true if an image was resolved.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }

    /// Borrow the descriptor, if any.
    pub fn as_image(&self) -> Option<&ImageDescriptor> {
        match self {
            Self::Image(image) => Some(image),
            Self::NoImage => None,
        }
    }

    /// Take the descriptor, if any.
    pub fn into_image(self) -> Option<ImageDescriptor> {
        match self {
            Self::Image(image) => Some(image),
            Self::NoImage => None,
        }
    }
}

/// Build the transform request for `asset` under `constraints`.
pub fn transform_request(
    asset: &dyn FieldSource,
    constraints: &PresentationConstraints,
) -> TransformRequest {
    TransformRequest {
        width: constraints.target_width,
        height: constraints.target_height,
        fit: constraints.fit,
        focal: first_present_or(asset, FOCAL_CHAIN, &constraints.default_focal),
    }
}

/// Resolves candidate assets into an [`ImageDescriptor`] or `NoImage`.
///
/// Holds no mutable state; the same inputs always give the same output.
#[derive(Debug, Clone)]
pub struct ImageResolver<T = QueryTransformer> {
    transformer: T,
    fallback_alt: String,
}

impl Default for ImageResolver<QueryTransformer> {
    fn default() -> Self {
        Self::new(QueryTransformer::new())
    }
}

impl<T: ImageTransformer> ImageResolver<T> {
    /// Create a resolver around `transformer`.
    pub fn new(transformer: T) -> Self {
        Self {
            transformer,
            fallback_alt: FALLBACK_ALT.to_string(),
        }
    }

    /// Override the fallback alt text. Blank values are ignored.
    pub fn with_fallback_alt(mut self, alt: impl Into<String>) -> Self {
        let alt = alt.into();
        if !alt.trim().is_empty() {
            self.fallback_alt = alt;
        }
        self
    }

    /// The alt text used when an asset has neither description nor title.
    pub fn fallback_alt(&self) -> &str {
        &self.fallback_alt
    }

    /// The underlying transformer.
    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    /// Alt text for `asset`.
    pub fn alt_text(&self, asset: &dyn FieldSource) -> String {
        first_present_or(asset, ALT_CHAIN, &self.fallback_alt)
    }

    /// Resolve the first of `candidates` under `constraints`.
    pub fn resolve<A: ImageAsset>(
        &self,
        candidates: &[A],
        constraints: &PresentationConstraints,
    ) -> ResolvedImage {
        let Some(asset) = candidates.first() else {
            log::debug!("No image candidates supplied");
            return ResolvedImage::NoImage;
        };

        let request = transform_request(asset, constraints);
        let url = asset
            .binary_location()
            .and_then(|location| self.transformer.url(location, &request));

        match url {
            Some(url) => ResolvedImage::Image(ImageDescriptor {
                url,
                alt: self.alt_text(asset),
            }),
            None => {
                log::debug!("Image asset has no usable binary location");
                ResolvedImage::NoImage
            }
        }
    }
}
