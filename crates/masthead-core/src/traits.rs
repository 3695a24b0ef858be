//! Core traits for Masthead.
//!
//! [`FieldSource`] is the narrow adapter between content-source data shapes
//! and the presentation logic. [`ConfigProvider`] abstracts where local
//! content lives.

use std::path::PathBuf;

use crate::Result;

/// Read-only access to named content fields.
///
/// Presentation code asks for a field by name and gets back a usable string
/// or nothing. How the content source wraps its values is the implementor's
/// concern, so upstream schema changes stay behind this trait.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use masthead_core::FieldSource;
///
/// struct Flat(HashMap<&'static str, &'static str>);
///
/// impl FieldSource for Flat {
///     fn get_field(&self, name: &str) -> Option<String> {
///         self.0.get(name).map(|v| v.to_string())
///     }
/// }
///
/// let src = Flat(HashMap::from([("title", "Hello")]));
/// assert_eq!(src.get_field("title").as_deref(), Some("Hello"));
/// assert_eq!(src.get_field("description"), None);
/// ```
pub trait FieldSource {
    /// Return the field's value, or `None` if it is absent or unusable.
    fn get_field(&self, name: &str) -> Option<String>;

    /// Return the field's value only when it has visible content.
    fn get_non_empty(&self, name: &str) -> Option<String> {
        self.get_field(name).filter(|v| !v.trim().is_empty())
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn get_field(&self, name: &str) -> Option<String> {
        (**self).get_field(name)
    }
}

/// Trait for application configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path for a specific content type (for example a CMS model name).
    ///
    /// # Errors
    ///
    /// Returns an error if the content type is unknown or the path
    /// cannot be resolved.
    fn content_path(&self, content_type: &str) -> Result<PathBuf>;
}
