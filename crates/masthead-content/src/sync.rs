//! Local mirror configuration for CMS entries.
//!
//! Declares which content models an external CMS CLI mirrors to local
//! files, and where each entry lands.

use std::path::{Component, Path, PathBuf};

use masthead_core::util::paths::{expand_tilde, is_safe_segment};
use masthead_core::{ConfigProvider, Error, Result};
use serde::{Deserialize, Serialize};

/// File format of mirrored entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncFormat {
    /// `.json` files.
    #[default]
    Json,
    /// `.yaml` files.
    Yaml,
}

impl SyncFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Mirror settings for one content model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSync {
    /// CMS model name.
    pub model: String,
    /// Directory under the output root; defaults to the model name.
    pub directory: Option<String>,
    /// Whether the model is mirrored at all.
    pub include: bool,
}

impl Default for ModelSync {
    fn default() -> Self {
        Self {
            model: String::new(),
            directory: None,
            include: true,
        }
    }
}

impl ModelSync {
    /// Included model mirrored to a directory named after it.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Directory name used for this model's entries.
    pub fn directory(&self) -> &str {
        self.directory.as_deref().unwrap_or(&self.model)
    }
}

/// How content entries are mirrored to local files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Output root. When unset, the config provider's content path is used.
    pub output_dir: Option<String>,
    /// Entry file format.
    pub format: SyncFormat,
    /// Per-model settings.
    pub models: Vec<ModelSync>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            format: SyncFormat::Json,
            models: vec![ModelSync::new("article"), ModelSync::new("category")],
        }
    }
}

impl SyncConfig {
    /// Models that are mirrored.
    pub fn enabled_models(&self) -> impl Iterator<Item = &ModelSync> {
        self.models.iter().filter(|m| m.include)
    }

    /// Local file path for entry `entry_id` of `model`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if `model` is not configured
    /// - [`Error::InvalidData`] if the model is excluded, its directory
    ///   escapes the output root, or `entry_id` is not a plain file name
    pub fn path_for<C: ConfigProvider>(
        &self,
        model: &str,
        entry_id: &str,
        config: &C,
    ) -> Result<PathBuf> {
        let sync = self
            .models
            .iter()
            .find(|m| m.model == model)
            .ok_or_else(|| Error::not_found(format!("Sync model '{model}'")))?;

        if !sync.include {
            return Err(Error::invalid_data(format!(
                "Sync model '{model}' is excluded"
            )));
        }
        if !is_safe_segment(entry_id) {
            return Err(Error::invalid_data(format!(
                "Entry id '{entry_id}' is not a valid file name"
            )));
        }

        let directory = sync.directory();
        if !is_relative_subpath(directory) {
            return Err(Error::invalid_data(format!(
                "Sync directory '{directory}' must be a relative path inside the output root"
            )));
        }

        let root = match &self.output_dir {
            Some(dir) => expand_tilde(dir).join(directory),
            None => config.content_path(directory)?,
        };

        Ok(root.join(format!("{entry_id}.{}", self.format.extension())))
    }
}

fn is_relative_subpath(dir: &str) -> bool {
    !dir.is_empty()
        && Path::new(dir)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestConfig {
        base: PathBuf,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            "test"
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.base.clone())
        }

        fn content_path(&self, content_type: &str) -> Result<PathBuf> {
            Ok(self.base.join("content").join(content_type))
        }
    }

    fn config() -> TestConfig {
        TestConfig {
            base: PathBuf::from("/site"),
        }
    }

    #[test]
    fn test_default_models() {
        let sync = SyncConfig::default();
        let models: Vec<&str> = sync.enabled_models().map(|m| m.model.as_str()).collect();
        assert_eq!(models, vec!["article", "category"]);
    }

    #[test]
    fn test_path_for_uses_content_path() {
        let sync = SyncConfig::default();
        let path = sync.path_for("article", "abc123", &config()).unwrap();
        assert_eq!(path, PathBuf::from("/site/content/article/abc123.json"));
    }

    #[test]
    fn test_path_for_output_dir_and_directory() {
        let sync = SyncConfig {
            output_dir: Some("/mirror".into()),
            format: SyncFormat::Yaml,
            models: vec![ModelSync {
                model: "article".into(),
                directory: Some("posts/articles".into()),
                include: true,
            }],
        };
        let path = sync.path_for("article", "launch", &config()).unwrap();
        assert_eq!(path, PathBuf::from("/mirror/posts/articles/launch.yaml"));
    }

    #[test]
    fn test_path_for_unknown_model() {
        let err = SyncConfig::default()
            .path_for("author", "x", &config())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_path_for_excluded_model() {
        let mut sync = SyncConfig::default();
        sync.models[1].include = false;
        assert_eq!(sync.enabled_models().count(), 1);
        assert!(sync.path_for("category", "x", &config()).is_err());
    }

    #[test]
    fn test_path_for_rejects_bad_ids() {
        let sync = SyncConfig::default();
        for id in ["", "..", "../secrets", "a/b"] {
            assert!(sync.path_for("article", id, &config()).is_err(), "{id}");
        }
    }

    #[test]
    fn test_path_for_rejects_escaping_directory() {
        let sync = SyncConfig {
            models: vec![ModelSync {
                model: "article".into(),
                directory: Some("../outside".into()),
                include: true,
            }],
            ..Default::default()
        };
        assert!(sync.path_for("article", "x", &config()).is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let sync: SyncConfig = serde_json::from_str(
            r#"{ "format": "yaml", "models": [{ "model": "page" }] }"#,
        )
        .unwrap();
        assert_eq!(sync.format, SyncFormat::Yaml);
        assert_eq!(sync.models.len(), 1);
        assert!(sync.models[0].include);
        assert_eq!(sync.models[0].directory(), "page");
    }
}
