//! The article header view model.
//!
//! [`ArticleHeader::build`] turns raw CMS fields into everything the
//! template layer needs: text slots that are either filled or carry
//! placeholder text, formatted date and reading time, and the resolved hero
//! image.

use masthead_core::FieldSource;
use masthead_format::{ReadingTime, format_date, format_reading_time};
use masthead_media::{
    AssetReference, ImageResolver, ImageTransformer, PresentationConstraints, ResolvedImage,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Field name of the article title.
pub const TITLE_FIELD: &str = "title";
/// Field name of the category badge.
pub const CATEGORY_FIELD: &str = "category";
/// Field name of the excerpt.
pub const EXCERPT_FIELD: &str = "excerpt";
/// Field name of the publish date.
pub const PUBLISH_DATE_FIELD: &str = "publishDate";

/// Raw article fields as delivered by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleFields {
    /// Headline.
    pub title: Option<String>,
    /// Category badge text.
    pub category: Option<String>,
    /// Publish date, usually `YYYY-MM-DD`.
    pub publish_date: Option<String>,
    /// Minutes or preformatted text.
    pub reading_time: Option<ReadingTime>,
    /// Candidate hero images; only the first is used. `null` means none.
    #[serde(deserialize_with = "null_as_empty")]
    pub image: Vec<AssetReference>,
    /// Short summary.
    pub excerpt: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<AssetReference>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<AssetReference>>::deserialize(deserializer)?.unwrap_or_default())
}

impl FieldSource for ArticleFields {
    fn get_field(&self, name: &str) -> Option<String> {
        match name {
            TITLE_FIELD => self.title.clone(),
            CATEGORY_FIELD => self.category.clone(),
            EXCERPT_FIELD => self.excerpt.clone(),
            PUBLISH_DATE_FIELD => self.publish_date.clone(),
            _ => None,
        }
    }
}

/// Text shown in place of empty fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    /// Shown when the title is empty.
    pub title: String,
    /// Shown when the category is empty.
    pub category: String,
    /// Shown when the excerpt is empty.
    pub excerpt: String,
    /// Shown when no hero image resolves.
    pub image: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            title: "Article Title".to_string(),
            category: "Category".to_string(),
            excerpt: "Article excerpt will appear here.".to_string(),
            image: "Featured image".to_string(),
        }
    }
}

/// Per-context settings for building headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOptions {
    /// Hero image constraints.
    pub constraints: PresentationConstraints,
    /// Placeholder text.
    pub placeholders: Placeholders,
}

/// A text slot: real content, or placeholder text to render in its place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum Slot {
    /// Content from the CMS.
    Filled(String),
    /// Placeholder text.
    Placeholder(String),
}

impl Slot {
    /// Fill from `source`'s `field`, or fall back to `placeholder`.
    pub fn from_field(source: &dyn FieldSource, field: &str, placeholder: &str) -> Self {
        match source.get_non_empty(field) {
            Some(text) => Self::Filled(text),
            None => Self::Placeholder(placeholder.to_string()),
        }
    }

    /// The text to render.
    pub fn text(&self) -> &str {
        match self {
            Self::Filled(text) | Self::Placeholder(text) => text,
        }
    }

    /// Returns true if this slot holds placeholder text.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Everything the article header template renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleHeader {
    /// Headline.
    pub title: Slot,
    /// Category badge.
    pub category: Slot,
    /// Formatted publish date; empty when absent.
    pub date: String,
    /// Formatted reading time; empty when absent.
    pub reading_time: String,
    /// Hero image.
    pub image: ResolvedImage,
    /// Placeholder text for the image block, set only when there is no image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_placeholder: Option<String>,
    /// Summary.
    pub excerpt: Slot,
}

impl ArticleHeader {
    /// Build the header view for `fields`.
    pub fn build<T: ImageTransformer>(
        fields: &ArticleFields,
        options: &HeaderOptions,
        resolver: &ImageResolver<T>,
    ) -> Self {
        let placeholders = &options.placeholders;
        let image = resolver.resolve(&fields.image, &options.constraints);
        let image_placeholder = (!image.is_image()).then(|| placeholders.image.clone());

        Self {
            title: Slot::from_field(fields, TITLE_FIELD, &placeholders.title),
            category: Slot::from_field(fields, CATEGORY_FIELD, &placeholders.category),
            date: format_date(fields.publish_date.as_deref().unwrap_or_default()),
            reading_time: format_reading_time(fields.reading_time.as_ref()),
            image,
            image_placeholder,
            excerpt: Slot::from_field(fields, EXCERPT_FIELD, &placeholders.excerpt),
        }
    }

    /// Number of slots showing placeholder content, the image included.
    pub fn placeholder_count(&self) -> usize {
        [&self.title, &self.category, &self.excerpt]
            .into_iter()
            .filter(|slot| slot.is_placeholder())
            .count()
            + usize::from(self.image_placeholder.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(fields: &ArticleFields) -> ArticleHeader {
        ArticleHeader::build(fields, &HeaderOptions::default(), &ImageResolver::default())
    }

    #[test]
    fn test_empty_fields_use_placeholders() {
        let header = build(&ArticleFields::default());

        assert_eq!(header.title, Slot::Placeholder("Article Title".into()));
        assert_eq!(header.category, Slot::Placeholder("Category".into()));
        assert!(header.excerpt.is_placeholder());
        assert_eq!(header.date, "");
        assert_eq!(header.reading_time, "");
        assert_eq!(header.image, ResolvedImage::NoImage);
        assert_eq!(header.image_placeholder.as_deref(), Some("Featured image"));
        assert_eq!(header.placeholder_count(), 4);
    }

    #[test]
    fn test_full_article_from_cms_json() {
        let fields: ArticleFields = serde_json::from_value(json!({
            "title": "Shipping faster with smaller batches",
            "category": "Engineering",
            "publishDate": "2024-03-15",
            "readingTime": 6,
            "excerpt": "What we learned from a year of tiny releases.",
            "image": [{
                "src": "https://images.example.com/batches.jpg",
                "fields": {
                    "focalPoint": { "value": "top" },
                    "description": { "value": "Stacked shipping containers" }
                }
            }]
        }))
        .unwrap();

        let header = build(&fields);
        assert_eq!(header.title.text(), "Shipping faster with smaller batches");
        assert_eq!(header.category, Slot::Filled("Engineering".into()));
        assert_eq!(header.date, "March 15, 2024");
        assert_eq!(header.reading_time, "6 min read");
        assert!(header.image_placeholder.is_none());
        assert_eq!(header.placeholder_count(), 0);

        let image = header.image.as_image().unwrap();
        assert_eq!(image.alt, "Stacked shipping containers");
        assert_eq!(
            image.url,
            "https://images.example.com/batches.jpg?w=1200&h=600&fit=cover&f=top"
        );
    }

    #[test]
    fn test_null_image_list_is_no_image() {
        let fields: ArticleFields =
            serde_json::from_value(json!({ "title": "Hi", "image": null })).unwrap();
        assert!(fields.image.is_empty());

        let header = build(&fields);
        assert_eq!(header.title.text(), "Hi");
        assert_eq!(header.image, ResolvedImage::NoImage);
        assert_eq!(header.image_placeholder.as_deref(), Some("Featured image"));
    }

    #[test]
    fn test_blank_title_is_placeholder() {
        let fields = ArticleFields {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert!(build(&fields).title.is_placeholder());
    }

    #[test]
    fn test_reading_time_text_passes_through() {
        let fields = ArticleFields {
            reading_time: Some(ReadingTime::from("7 min read")),
            ..Default::default()
        };
        assert_eq!(build(&fields).reading_time, "7 min read");
    }

    #[test]
    fn test_custom_placeholders() {
        let options = HeaderOptions {
            placeholders: Placeholders {
                title: "Untitled".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let header =
            ArticleHeader::build(&ArticleFields::default(), &options, &ImageResolver::default());
        assert_eq!(header.title.text(), "Untitled");
    }

    #[test]
    fn test_slot_json_shape() {
        let json = serde_json::to_value(Slot::Filled("News".into())).unwrap();
        assert_eq!(json, json!({ "state": "filled", "text": "News" }));
    }

    #[test]
    fn test_article_fields_field_source() {
        let fields = ArticleFields {
            publish_date: Some("2024-01-01".into()),
            ..Default::default()
        };
        assert_eq!(
            fields.get_field(PUBLISH_DATE_FIELD).as_deref(),
            Some("2024-01-01")
        );
        assert!(fields.get_field("author").is_none());
    }
}
