//! Transform requests and the URL builders that apply them.
//!
//! The resolver's responsibility ends at building a [`TransformRequest`].
//! Turning it into a delivery URL belongs to an [`ImageTransformer`];
//! [`QueryTransformer`] is the bundled query-string implementation.

use std::num::NonZeroU32;

use masthead_core::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constraints::Fit;

/// Query parameter carrying the width.
pub const WIDTH_PARAM: &str = "w";
/// Query parameter carrying the height.
pub const HEIGHT_PARAM: &str = "h";
/// Query parameter carrying the fit strategy.
pub const FIT_PARAM: &str = "fit";
/// Query parameter carrying the focal point.
pub const FOCAL_PARAM: &str = "f";

const TRANSFORM_PARAMS: [&str; 4] = [WIDTH_PARAM, HEIGHT_PARAM, FIT_PARAM, FOCAL_PARAM];

/// Parameters sent to the image transform service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransformRequest {
    /// Output width in pixels.
    pub width: NonZeroU32,
    /// Output height in pixels.
    pub height: NonZeroU32,
    /// Cropping strategy.
    pub fit: Fit,
    /// Focal point hint.
    pub focal: String,
}

impl TransformRequest {
    /// Request parameters as `(name, value)` query pairs.
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            (WIDTH_PARAM, self.width.to_string()),
            (HEIGHT_PARAM, self.height.to_string()),
            (FIT_PARAM, self.fit.to_string()),
            (FOCAL_PARAM, self.focal.clone()),
        ]
    }
}

/// Applies a transform request to an asset's binary location.
pub trait ImageTransformer: Send + Sync {
    /// Build the delivery URL, or `None` if `location` is unusable.
    fn url(&self, location: &str, request: &TransformRequest) -> Option<String>;
}

impl<T: ImageTransformer + ?Sized> ImageTransformer for Box<T> {
    fn url(&self, location: &str, request: &TransformRequest) -> Option<String> {
        (**self).url(location, request)
    }
}

/// Appends transform parameters to the asset URL's query string.
///
/// Locations may be absolute `http(s)` URLs, protocol-relative (`//host/…`,
/// served over https), or relative paths joined onto the base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTransformer {
    base: Option<Url>,
}

impl QueryTransformer {
    /// Transformer that only accepts absolute locations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transformer that resolves relative locations against `base`.
    pub fn with_base_url(base: &str) -> Result<Self> {
        let base = Url::parse(base)
            .map_err(|e| Error::config(format!("Invalid image base URL '{base}': {e}")))?;
        if !is_web_url(&base) {
            return Err(Error::config(format!(
                "Image base URL must be http or https: {base}"
            )));
        }
        Ok(Self { base: Some(base) })
    }

    /// The configured base URL, if any.
    pub fn base_url(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    fn locate(&self, location: &str) -> Option<Url> {
        let location = location.trim();
        if location.is_empty() {
            return None;
        }

        let parsed = match location.strip_prefix("//") {
            Some(rest) => Url::parse(&format!("https://{rest}")),
            None => Url::parse(location),
        };

        let url = match parsed {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => self.base.as_ref()?.join(location).ok()?,
            Err(_) => return None,
        };

        is_web_url(&url).then_some(url)
    }
}

impl ImageTransformer for QueryTransformer {
    fn url(&self, location: &str, request: &TransformRequest) -> Option<String> {
        let mut url = self.locate(location)?;

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !TRANSFORM_PARAMS.contains(&key.as_ref()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .extend_pairs(request.query_pairs());

        Some(url.into())
    }
}

fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.has_host()
}
