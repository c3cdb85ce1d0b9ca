//! Content trees produced by the generative API, one module per schema variant.
//!
//! Every field is optional on the wire. Missing or `null` values fall back to
//! `""` / `[]` so a model that under-produces still renders.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub mod blog;
pub mod landing;

pub use blog::BlogContent;
pub use landing::LandingContent;

/// Which document shape a request asks the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    /// Long-form blog post with typed subsections.
    Blog,
    /// Marketing landing page with services, stats, FAQ and testimonials.
    Landing,
}

impl SchemaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::Blog => "blog",
            SchemaVariant::Landing => "landing",
        }
    }
}

/// A parsed document, tagged by the variant that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentTree {
    Blog(BlogContent),
    Landing(LandingContent),
}

impl ContentTree {
    pub fn variant(&self) -> SchemaVariant {
        match self {
            ContentTree::Blog(_) => SchemaVariant::Blog,
            ContentTree::Landing(_) => SchemaVariant::Landing,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ContentTree::Blog(blog) => &blog.meta.title,
            ContentTree::Landing(page) => &page.meta.title,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub keywords: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default, deserialize_with = "lenient_text")]
    pub heading: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub subheading: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub question: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub answer: String,
}

// The model is told the schema but not held to it. These deserializers accept
// whatever shape arrives and fall back to the default for anything unusable,
// so one odd field never costs the whole document.

/// Plain text from any JSON value: strings as-is, string arrays joined with
/// `", "`, numbers and booleans printed, everything else empty.
pub(crate) fn text_from_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Object(_) => String::new(),
    }
}

/// Elements that fail to parse are dropped; a non-array becomes empty.
pub(crate) fn list_from_value<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_from_value(Value::deserialize(deserializer)?))
}

pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(list_from_value(Value::deserialize(deserializer)?))
}

/// Nested blocks: `null` or a wrong shape become `T::default()`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}
