//! Component definitions and explicit registration.
//!
//! Components do not register themselves. The application's composition
//! root builds a [`ComponentRegistry`] and registers what it uses.

use std::collections::BTreeMap;

use masthead_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::header::Placeholders;

/// Registered name of the article header component.
pub const ARTICLE_HEADER: &str = "ArticleHeader";

/// Editor input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    LongText,
    /// Calendar date.
    Date,
    /// Number.
    Number,
    /// Uploaded file (image).
    File,
}

/// One editable input a component declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    /// Field name.
    pub name: String,
    /// Editor input kind.
    pub kind: InputKind,
    /// Default value offered to editors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl InputSpec {
    /// Input without a default.
    pub fn new(name: impl Into<String>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A component's name and declared inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    /// Registered name.
    pub name: String,
    /// Declared inputs, in editor order.
    pub inputs: Vec<InputSpec>,
}

impl ComponentDefinition {
    /// Look up a declared input by name.
    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.inputs.iter().find(|input| input.name == name)
    }
}

/// The article header's definition.
pub fn article_header_definition() -> ComponentDefinition {
    let placeholders = Placeholders::default();
    ComponentDefinition {
        name: ARTICLE_HEADER.to_string(),
        inputs: vec![
            InputSpec::new("title", InputKind::Text).with_default(placeholders.title),
            InputSpec::new("category", InputKind::Text).with_default(placeholders.category),
            InputSpec::new("publishDate", InputKind::Date),
            InputSpec::new("readingTime", InputKind::Text).with_default(json!("5 min read")),
            InputSpec::new("image", InputKind::File),
            InputSpec::new("excerpt", InputKind::LongText).with_default(placeholders.excerpt),
        ],
    }
}

/// Components known to the application, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, ComponentDefinition>,
}

impl ComponentRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a blank name or a name that is
    /// already registered.
    pub fn register(&mut self, definition: ComponentDefinition) -> Result<()> {
        if definition.name.trim().is_empty() {
            return Err(Error::invalid_data("Component name must not be empty"));
        }
        if self.components.contains_key(&definition.name) {
            return Err(Error::invalid_data(format!(
                "Component '{}' is already registered",
                definition.name
            )));
        }
        log::debug!("Registered component {}", definition.name);
        self.components.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<&ComponentDefinition> {
        self.components.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Registered definitions, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.components.values()
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
