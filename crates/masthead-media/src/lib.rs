//! Image presentation resolution.
//!
//! Given candidate asset references and fixed presentation constraints,
//! [`ImageResolver::resolve`] deterministically produces either an
//! [`ImageDescriptor`] or [`ResolvedImage::NoImage`]. Resolution is pure:
//! no I/O, no caching, no shared state.
//!
//! # Modules
//!
//! - [`asset`]: CMS asset references and the [`ImageAsset`] trait
//! - [`constraints`]: Target dimensions, fit strategy, default focal point
//! - [`fallback`]: Ordered accessor chains for focal point and alt text
//! - [`transform`]: Transform requests and URL builders
//! - [`resolver`]: The resolver itself

#![doc = include_str!("../README.md")]

pub mod asset;
pub mod constraints;
pub mod fallback;
pub mod resolver;
pub mod transform;

pub use asset::{AssetReference, FieldValue, ImageAsset};
pub use constraints::{Fit, PresentationConstraints};
pub use resolver::{FALLBACK_ALT, ImageDescriptor, ImageResolver, ResolvedImage};
pub use transform::{ImageTransformer, QueryTransformer, TransformRequest};
