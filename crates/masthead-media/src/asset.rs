//! CMS asset references.
//!
//! Content sources hand over images as `{ "fields": { name: { "value": T } },
//! "src": "..." }`. [`AssetReference`] mirrors that shape for deserialization
//! and exposes it only through [`FieldSource`] and [`ImageAsset`].

use std::collections::BTreeMap;

use masthead_core::FieldSource;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Field carrying the crop focal point hint.
pub const FOCAL_POINT_FIELD: &str = "focalPoint";

/// Field carrying the long-form image description.
pub const DESCRIPTION_FIELD: &str = "description";

/// Field carrying the image title.
pub const TITLE_FIELD: &str = "title";

/// An image that can be resolved for presentation.
pub trait ImageAsset: FieldSource {
    /// Location of the underlying binary, if the asset has a usable one.
    fn binary_location(&self) -> Option<&str>;
}

/// The `{ "value": T }` wrapper around every CMS field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    /// Raw field value.
    #[serde(default)]
    pub value: Value,
}

impl FieldValue {
    /// Wrap a value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Textual form of the value.
    ///
    /// Strings are returned as-is, numbers and booleans are rendered.
    /// Null, arrays and objects have no textual form.
    pub fn as_text(&self) -> Option<String> {
        match &self.value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// One candidate image as supplied by the content source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetReference {
    /// Descriptive metadata fields. Any field may be absent.
    #[serde(
        default,
        deserialize_with = "lenient_fields",
        skip_serializing_if = "Option::is_none"
    )]
    pub fields: Option<BTreeMap<String, FieldValue>>,

    /// Location of the binary this asset points at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl AssetReference {
    /// Create an asset pointing at `src` with no fields.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            fields: None,
            src: Some(src.into()),
        }
    }

    /// Add or replace a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), FieldValue::new(value));
        self
    }
}

/// Accept any shape for `fields`.
///
/// A `fields` value that is not an object yields no fields. Entries that are
/// not `{ "value": T }` wrappers (null, bare scalars, arrays) are dropped so
/// the remaining fields stay readable.
fn lenient_fields<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, FieldValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(raw) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let fields = raw
        .into_iter()
        .filter_map(|(name, wrapper)| match wrapper {
            Value::Object(mut wrapper) => {
                let value = wrapper.remove("value").unwrap_or(Value::Null);
                Some((name, FieldValue { value }))
            }
            _ => None,
        })
        .collect();
    Ok(Some(fields))
}

impl FieldSource for AssetReference {
    fn get_field(&self, name: &str) -> Option<String> {
        self.fields.as_ref()?.get(name)?.as_text()
    }
}

impl ImageAsset for AssetReference {
    fn binary_location(&self) -> Option<&str> {
        self.src.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
