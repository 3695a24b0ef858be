//! Presentation constraints fixed per rendering context.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use masthead_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Width of the article hero image.
pub const HERO_WIDTH: NonZeroU32 = NonZeroU32::new(1200).unwrap();

/// Height of the article hero image as built.
///
/// Design material specifies [`HERO_DESIGN_HEIGHT`] (1200:630) but the
/// header has always been built at 1200:600. Kept as-is pending product
/// clarification.
pub const HERO_HEIGHT: NonZeroU32 = NonZeroU32::new(600).unwrap();

/// Height from the design material. Not applied anywhere.
pub const HERO_DESIGN_HEIGHT: NonZeroU32 = NonZeroU32::new(630).unwrap();

/// Focal point used when an asset supplies none.
pub const DEFAULT_FOCAL: &str = "center";

/// Cropping strategy passed through to the transform service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    /// Fill the box, cropping overflow.
    #[default]
    Cover,
    /// Fit inside the box, letterboxing.
    Contain,
    /// Stretch to the box.
    Fill,
    /// Shrink to fit inside the box, never enlarge.
    Inside,
    /// Cover the box, never shrink below it.
    Outside,
    /// Crop to the box around the focal point.
    Crop,
    /// Scale without preserving aspect ratio.
    Scale,
}

impl Fit {
    /// All fit strategies, in declaration order.
    pub const ALL: [Fit; 7] = [
        Fit::Cover,
        Fit::Contain,
        Fit::Fill,
        Fit::Inside,
        Fit::Outside,
        Fit::Crop,
        Fit::Scale,
    ];

    /// Wire name of this strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            Fit::Cover => "cover",
            Fit::Contain => "contain",
            Fit::Fill => "fill",
            Fit::Inside => "inside",
            Fit::Outside => "outside",
            Fit::Crop => "crop",
            Fit::Scale => "scale",
        }
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Fit::ALL
            .into_iter()
            .find(|fit| fit.as_str() == wanted)
            .ok_or_else(|| Error::invalid_data(format!("Unknown fit strategy: {s}")))
    }
}

/// Caller-supplied constraints, fixed per call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresentationConstraints {
    /// Target width in pixels.
    pub target_width: NonZeroU32,
    /// Target height in pixels.
    pub target_height: NonZeroU32,
    /// Cropping strategy.
    pub fit: Fit,
    /// Focal point used when the asset has none.
    pub default_focal: String,
}

impl PresentationConstraints {
    /// Build constraints, rejecting zero dimensions.
    pub fn new(width: u32, height: u32, fit: Fit, default_focal: impl Into<String>) -> Result<Self> {
        let target_width = NonZeroU32::new(width)
            .ok_or_else(|| Error::invalid_data("Target width must be positive"))?;
        let target_height = NonZeroU32::new(height)
            .ok_or_else(|| Error::invalid_data("Target height must be positive"))?;
        Ok(Self {
            target_width,
            target_height,
            fit,
            default_focal: default_focal.into(),
        })
    }

    /// Constraints used by the article header hero image.
    pub fn article_hero() -> Self {
        Self {
            target_width: HERO_WIDTH,
            target_height: HERO_HEIGHT,
            fit: Fit::Cover,
            default_focal: DEFAULT_FOCAL.to_string(),
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.target_width.get()) / f64::from(self.target_height.get())
    }
}

impl Default for PresentationConstraints {
    fn default() -> Self {
        Self::article_hero()
    }
}
