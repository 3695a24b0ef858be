//! Configuration for the Masthead CLI.
//!
//! Provides the [`MastheadConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `MASTHEAD_CONFIG` environment variable
//! 3. XDG default: `~/.config/masthead/config.toml`
//! 4. Built-in defaults

use std::path::PathBuf;

use confyg::{Confygery, env};
use masthead_content::{HeaderOptions, Placeholders, SyncConfig};
use masthead_core::util::paths::expand_tilde;
use masthead_core::{ConfigProvider, Error, Result};
use masthead_media::constraints::{DEFAULT_FOCAL, HERO_HEIGHT, HERO_WIDTH};
use masthead_media::{FALLBACK_ALT, Fit, ImageResolver, PresentationConstraints, QueryTransformer};
use serde::{Deserialize, Deserializer, Serialize};

/// Prefix for environment variables and the config env override.
pub const ENV_PREFIX: &str = "MASTHEAD";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Masthead CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MastheadConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Base path for local content.
    pub base_path: Option<String>,

    /// Local content configuration.
    pub content: ContentConfig,

    /// Hero image settings.
    pub image: ImageConfig,

    /// Placeholder text for empty header fields.
    pub placeholders: Placeholders,

    /// CMS mirror settings.
    pub sync: SyncConfig,
}

/// Local content configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Root directory for content; overrides `base_path`.
    pub path: Option<String>,
}

/// Hero image settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Base URL that relative asset locations are resolved against.
    pub base_url: Option<String>,

    /// Target width in pixels.
    #[serde(deserialize_with = "u32_or_string")]
    pub width: u32,

    /// Target height in pixels.
    #[serde(deserialize_with = "u32_or_string")]
    pub height: u32,

    /// Cropping strategy.
    pub fit: Fit,

    /// Focal point used when an asset has none.
    pub default_focal: String,

    /// Alt text used when an asset has neither description nor title.
    pub fallback_alt: String,
}

/// Accept a pixel count as a number or a numeric string.
///
/// Environment overrides reach the deserializer as strings.
fn u32_or_string<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Pixels {
        Number(u32),
        Text(String),
    }

    match Pixels::deserialize(deserializer)? {
        Pixels::Number(n) => Ok(n),
        Pixels::Text(s) => s.trim().parse().map_err(|e| {
            serde::de::Error::custom(format!("expected a pixel count, got '{s}': {e}"))
        }),
    }
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for MastheadConfig {
    fn default() -> Self {
        Self {
            project_name: "masthead".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            image: ImageConfig::default(),
            placeholders: Placeholders::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            width: HERO_WIDTH.get(),
            height: HERO_HEIGHT.get(),
            fit: Fit::Cover,
            default_focal: DEFAULT_FOCAL.to_string(),
            fallback_alt: FALLBACK_ALT.to_string(),
        }
    }
}

impl ImageConfig {
    /// Presentation constraints described by this section.
    pub fn constraints(&self) -> Result<PresentationConstraints> {
        PresentationConstraints::new(self.width, self.height, self.fit, self.default_focal.clone())
            .map_err(|e| Error::config(format!("[image] {e}")))
    }

    /// Resolver configured from this section.
    pub fn resolver(&self) -> Result<ImageResolver<QueryTransformer>> {
        let transformer = match &self.base_url {
            Some(base) => QueryTransformer::with_base_url(base)?,
            None => QueryTransformer::new(),
        };
        Ok(ImageResolver::new(transformer).with_fallback_alt(self.fallback_alt.clone()))
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl MastheadConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Self::load_with_env_prefix(config_path, ENV_PREFIX)
    }

    fn load_with_env_prefix(config_path: Option<&str>, env_prefix: &str) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                tracing::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(env_prefix);
        env_opts.add_section("content");
        env_opts.add_section("image");
        env_opts.add_section("placeholders");
        env_opts.add_section("sync");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(format!("{ENV_PREFIX}_CONFIG")) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("masthead").join("config.toml"))
    }

    /// Header options (constraints and placeholders) from this config.
    pub fn header_options(&self) -> Result<HeaderOptions> {
        Ok(HeaderOptions {
            constraints: self.image.constraints()?,
            placeholders: self.placeholders.clone(),
        })
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into `MASTHEAD_`-prefixed environment variable pairs.
    ///
    /// Every emitted pair is read back by [`MastheadConfig::load`]. Lists
    /// (`sync.models`) have no env form and are left to the config file.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        self.env_vars_with_prefix(ENV_PREFIX)
    }

    fn env_vars_with_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, prefix, &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for MastheadConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_path(&self, content_type: &str) -> Result<PathBuf> {
        let root = match &self.content.path {
            Some(p) => expand_tilde(p),
            None => self.base_path()?,
        };
        Ok(root.join(content_type))
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
///
/// Arrays are skipped.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                flatten_toml_value(val, &format!("{prefix}_{}", key.to_uppercase()), out);
            }
        }
        toml::Value::Array(_) => {}
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
