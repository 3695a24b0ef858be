//! Handlers for content commands.
//!
//! Each handler returns the text to print so dispatch stays thin and the
//! output is testable.

use masthead_content::{ArticleFields, ArticleHeader, ComponentRegistry, SyncConfig};
use masthead_core::{ConfigProvider, Error, Result};
use masthead_format::{ReadingTime, format_date, format_reading_time};
use masthead_media::{AssetReference, Fit, PresentationConstraints};
use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncReadExt;

use crate::cli::STDIN;
use crate::config::MastheadConfig;

/// Command-line overrides for the configured image constraints.
#[derive(Debug, Clone, Default)]
pub struct ConstraintOverrides {
    /// Target width.
    pub width: Option<u32>,
    /// Target height.
    pub height: Option<u32>,
    /// Fit strategy.
    pub fit: Option<Fit>,
    /// Default focal point.
    pub focal: Option<String>,
}

impl ConstraintOverrides {
    /// Apply these overrides on top of `config`'s image section.
    pub fn apply(&self, config: &MastheadConfig) -> Result<PresentationConstraints> {
        let image = &config.image;
        PresentationConstraints::new(
            self.width.unwrap_or(image.width),
            self.height.unwrap_or(image.height),
            self.fit.unwrap_or(image.fit),
            self.focal
                .clone()
                .unwrap_or_else(|| image.default_focal.clone()),
        )
    }
}

// ============================================================================
// Input
// ============================================================================

/// Read command input from a file, or stdin for `-`.
pub async fn read_input(input: &str) -> Result<String> {
    if input == STDIN {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(input)
        .await
        .map_err(|e| Error::io_with_path(e, input))
}

/// Parse an asset list.
///
/// A single asset object is accepted as a list of one; `null` is an empty
/// list.
pub fn parse_assets(json: &str) -> Result<Vec<AssetReference>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::invalid_data(format!("Asset JSON: {e}")))?;
    let value = match value {
        Value::Array(_) => value,
        Value::Null => Value::Array(Vec::new()),
        single => Value::Array(vec![single]),
    };
    serde_json::from_value(value).map_err(|e| Error::invalid_data(format!("Asset JSON: {e}")))
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::serialization(e.to_string()))
}

// ============================================================================
// Handlers
// ============================================================================

/// Resolve the hero image for `json` and render the result as JSON.
pub fn resolve_image(
    config: &MastheadConfig,
    json: &str,
    overrides: &ConstraintOverrides,
) -> Result<String> {
    let assets = parse_assets(json)?;
    let constraints = overrides.apply(config)?;
    let resolver = config.image.resolver()?;
    tracing::debug!(candidates = assets.len(), "Resolving hero image");
    to_pretty_json(&resolver.resolve(&assets, &constraints))
}

/// Build the article header view for `json` and render it as JSON.
pub fn build_header(config: &MastheadConfig, json: &str) -> Result<String> {
    let fields: ArticleFields = serde_json::from_str(json)
        .map_err(|e| Error::invalid_data(format!("Article JSON: {e}")))?;
    let options = config.header_options()?;
    let resolver = config.image.resolver()?;
    let header = ArticleHeader::build(&fields, &options, &resolver);
    tracing::debug!(
        placeholders = header.placeholder_count(),
        "Built article header"
    );
    to_pretty_json(&header)
}

/// Format a publish date.
pub fn format_date_value(date: &str) -> String {
    format_date(date)
}

/// Format a reading time given on the command line.
///
/// Input that parses as a number is treated as minutes; anything else is
/// preformatted text.
pub fn format_reading_time_value(value: &str) -> String {
    let reading_time = match value.trim().parse::<f64>() {
        Ok(minutes) if minutes.is_finite() => ReadingTime::Minutes(minutes),
        _ => ReadingTime::Text(value.to_string()),
    };
    format_reading_time(Some(&reading_time))
}

/// Local mirror path of an entry.
pub fn sync_path<C: ConfigProvider>(
    sync: &SyncConfig,
    provider: &C,
    model: &str,
    entry_id: &str,
) -> Result<String> {
    let path = sync.path_for(model, entry_id, provider)?;
    Ok(path.display().to_string())
}

/// One line per component: name followed by its inputs.
pub fn list_components(registry: &ComponentRegistry) -> String {
    registry
        .iter()
        .map(|def| {
            let inputs: Vec<String> = def
                .inputs
                .iter()
                .map(|input| format!("{}:{}", input.name, input_kind_name(input.kind)))
                .collect();
            format!("{} ({})", def.name, inputs.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn input_kind_name(kind: masthead_content::InputKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use masthead_content::article_header_definition;

    fn parse(output: &str) -> Value {
        serde_json::from_str(output).unwrap()
    }

    #[test]
    fn test_parse_assets_single_and_list() {
        let single = parse_assets(r#"{ "src": "https://x.example/a.jpg" }"#).unwrap();
        assert_eq!(single.len(), 1);

        let list = parse_assets(r#"[{ "src": "a" }, { "src": "b" }]"#).unwrap();
        assert_eq!(list.len(), 2);

        let empty = parse_assets("[]").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_assets_invalid() {
        assert!(parse_assets("not json").is_err());
        assert!(parse_assets("[3]").is_err());
    }

    #[test]
    fn test_parse_assets_null_is_empty() {
        assert!(parse_assets("null").unwrap().is_empty());
    }

    #[test]
    fn test_parse_assets_malformed_fields_kept() {
        let assets = parse_assets(r#"[{ "src": "a.jpg", "fields": 3 }]"#).unwrap();
        assert_eq!(assets.len(), 1);
        assert!(assets[0].fields.is_none());
    }

    #[test]
    fn test_resolve_image_null_input() {
        let config = MastheadConfig::default();
        let out = parse(&resolve_image(&config, "null", &ConstraintOverrides::default()).unwrap());
        assert_eq!(out["kind"], "no_image");
    }

    #[test]
    fn test_resolve_image_null_field_wrapper() {
        let config = MastheadConfig::default();
        let json = r#"[{
            "src": "https://x.example/a.jpg",
            "fields": { "title": null, "description": { "value": "D" } }
        }]"#;
        let out = parse(&resolve_image(&config, json, &ConstraintOverrides::default()).unwrap());
        assert_eq!(out["kind"], "image");
        assert_eq!(out["alt"], "D");
    }

    #[test]
    fn test_resolve_image_scenario() {
        let config = MastheadConfig::default();
        let json = r#"[{
            "src": "https://images.example.com/hero.jpg",
            "fields": { "focalPoint": { "value": "top" } }
        }]"#;
        let out = parse(&resolve_image(&config, json, &ConstraintOverrides::default()).unwrap());
        assert_eq!(out["kind"], "image");
        assert_eq!(
            out["url"],
            "https://images.example.com/hero.jpg?w=1200&h=600&fit=cover&f=top"
        );
        assert_eq!(out["alt"], "Article featured image");
    }

    #[test]
    fn test_resolve_image_empty_list() {
        let config = MastheadConfig::default();
        let out = parse(&resolve_image(&config, "[]", &ConstraintOverrides::default()).unwrap());
        assert_eq!(out["kind"], "no_image");
    }

    #[test]
    fn test_resolve_image_overrides() {
        let config = MastheadConfig::default();
        let overrides = ConstraintOverrides {
            width: Some(400),
            height: Some(400),
            fit: Some(Fit::Crop),
            focal: Some("face".into()),
        };
        let out = parse(
            &resolve_image(&config, r#"{ "src": "https://x.example/a.jpg" }"#, &overrides)
                .unwrap(),
        );
        assert_eq!(out["url"], "https://x.example/a.jpg?w=400&h=400&fit=crop&f=face");
    }

    #[test]
    fn test_resolve_image_zero_override_rejected() {
        let config = MastheadConfig::default();
        let overrides = ConstraintOverrides {
            width: Some(0),
            ..Default::default()
        };
        assert!(resolve_image(&config, "[]", &overrides).is_err());
    }

    #[test]
    fn test_build_header_placeholders() {
        let config = MastheadConfig::default();
        let out = parse(&build_header(&config, "{}").unwrap());
        assert_eq!(out["title"]["state"], "placeholder");
        assert_eq!(out["title"]["text"], "Article Title");
        assert_eq!(out["image"]["kind"], "no_image");
        assert_eq!(out["image_placeholder"], "Featured image");
        assert_eq!(out["date"], "");
    }

    #[test]
    fn test_build_header_null_image() {
        let config = MastheadConfig::default();
        let out = parse(&build_header(&config, r#"{ "title": "Hi", "image": null }"#).unwrap());
        assert_eq!(out["title"]["text"], "Hi");
        assert_eq!(out["image"]["kind"], "no_image");
    }

    #[test]
    fn test_build_header_filled() {
        let config = MastheadConfig::default();
        let json = r#"{
            "title": "Hello",
            "publishDate": "2024-03-15",
            "readingTime": "7 min read"
        }"#;
        let out = parse(&build_header(&config, json).unwrap());
        assert_eq!(out["title"]["text"], "Hello");
        assert_eq!(out["date"], "March 15, 2024");
        assert_eq!(out["reading_time"], "7 min read");
    }

    #[test]
    fn test_format_values() {
        assert_eq!(format_date_value(""), "");
        assert_eq!(format_date_value("2024-03-15"), "March 15, 2024");
        assert_eq!(format_reading_time_value("5"), "5 min read");
        assert_eq!(format_reading_time_value("0"), "");
        assert_eq!(format_reading_time_value("7 min read"), "7 min read");
    }

    #[test]
    fn test_sync_path() {
        let config = MastheadConfig {
            base_path: Some("/site".into()),
            ..Default::default()
        };
        let path = sync_path(&config.sync, &config, "article", "abc").unwrap();
        assert_eq!(path, "/site/article/abc.json");
        assert!(sync_path(&config.sync, &config, "author", "abc").is_err());
    }

    #[test]
    fn test_list_components() {
        let mut registry = ComponentRegistry::new();
        registry.register(article_header_definition()).unwrap();
        let listing = list_components(&registry);
        assert!(listing.starts_with("ArticleHeader ("));
        assert!(listing.contains("image:file"));
        assert!(listing.contains("excerpt:longText"));
    }

    #[tokio::test]
    async fn test_read_input_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("assets.json");
        std::fs::write(&path, "[]").unwrap();
        let text = read_input(path.to_str().unwrap()).await.unwrap();
        assert_eq!(text, "[]");
    }

    #[tokio::test]
    async fn test_read_input_missing_file() {
        let err = read_input("/nonexistent/assets.json").await.unwrap_err();
        assert!(matches!(err, Error::IoPath { .. }));
    }
}
