use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{
    lenient, lenient_list, lenient_text, list_from_value, text_from_value, Banner, FaqItem, Meta,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogContent {
    #[serde(default, deserialize_with = "lenient")]
    pub meta: Meta,
    #[serde(default, deserialize_with = "lenient")]
    pub banner: Banner,
    #[serde(default, deserialize_with = "lenient_list")]
    pub sections: Vec<BlogSection>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub faq: Vec<FaqItem>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub conclusion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogSection {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub subsections: Vec<Subsection>,
}

/// One typed block inside a section.
///
/// A missing or unrecognised `type` parses as `Unknown` and renders as
/// nothing, so one odd block does not sink the whole post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Subsection {
    Paragraph { content: String },
    Heading { content: String },
    Subheading { content: String },
    List { items: Vec<String> },
    Example { content: String },
    Unknown,
}

impl<'de> Deserialize<'de> for Subsection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Object(mut block) = Value::deserialize(deserializer)? else {
            return Ok(Subsection::Unknown);
        };
        let kind = block
            .get("type")
            .and_then(Value::as_str)
            .map(|t| t.trim().to_ascii_lowercase())
            .unwrap_or_default();
        let content = text_from_value(block.remove("content").unwrap_or(Value::Null));

        Ok(match kind.as_str() {
            "paragraph" => Subsection::Paragraph { content },
            "heading" => Subsection::Heading { content },
            "subheading" => Subsection::Subheading { content },
            "example" => Subsection::Example { content },
            "list" => Subsection::List {
                items: list_from_value(block.remove("items").unwrap_or(Value::Null)),
            },
            _ => Subsection::Unknown,
        })
    }
}

impl Subsection {
    /// Body prose that the humanizer may rewrite. Headings and lists are left alone.
    pub fn prose(&self) -> Option<&str> {
        match self {
            Subsection::Paragraph { content } | Subsection::Example { content } => Some(content),
            _ => None,
        }
    }

    pub fn prose_mut(&mut self) -> Option<&mut String> {
        match self {
            Subsection::Paragraph { content } | Subsection::Example { content } => Some(content),
            _ => None,
        }
    }
}
