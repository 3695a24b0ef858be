//! Article header content handling.
//!
//! # Modules
//!
//! - [`header`]: Article fields and the header view model
//! - [`registry`]: Component definitions and registration
//! - [`sync`]: Local mirror configuration for CMS entries

#![doc = include_str!("../README.md")]

pub mod header;
pub mod registry;
pub mod sync;

pub use header::{ArticleFields, ArticleHeader, HeaderOptions, Placeholders, Slot};
pub use registry::{
    ARTICLE_HEADER, ComponentDefinition, ComponentRegistry, InputKind, InputSpec,
    article_header_definition,
};
pub use sync::{ModelSync, SyncConfig, SyncFormat};
