//! Documents stored by the viewer and the admin console

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const USERS: &str = "users";
pub const THOUGHTS: &str = "thoughts";
pub const APP_INFO: &str = "app_info";
pub const APP_INFO_KEY: &str = "details";
pub const DAILY_CONTENT: &str = "daily_content";
pub const DAILY_CONTENT_KEY: &str = "today";

/// Thought category whose content is an image URL
pub const IMAGES_CATEGORY: &str = "images";
/// Thought category whose content is plain text
pub const TEXT_CATEGORY: &str = "text";

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+\.){2}[0-9]+$").unwrap());

/// Someone who registered through the viewer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub name: String,
    pub email: String,
}

/// How a thought's content is interpreted.
///
/// Anything other than `"image"`, including a missing or non-string
/// value, reads back as text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThoughtKind {
    #[default]
    Text,
    Image,
}

impl<'de> Deserialize<'de> for ThoughtKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(kind) if kind == "image" => ThoughtKind::Image,
            _ => ThoughtKind::Text,
        })
    }
}

impl ThoughtKind {
    /// `images` holds image URLs; every other category is text.
    pub fn for_category(category: &str) -> Self {
        if category == IMAGES_CATEGORY {
            ThoughtKind::Image
        } else {
            ThoughtKind::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThoughtKind::Text => "text",
            ThoughtKind::Image => "image",
        }
    }
}

/// A single displayable unit of content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thought {
    #[serde(rename = "type")]
    pub kind: ThoughtKind,
    #[serde(deserialize_with = "loose_string")]
    pub category: String,
    #[serde(deserialize_with = "loose_string")]
    pub content: String,
    /// Read by truthiness: `"yes"` or `1` count as set, `0` or `""` do not.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "truthy")]
    pub downloadable: Option<bool>,
}

impl Thought {
    pub fn new(category: &str, content: &str) -> Self {
        Self {
            kind: ThoughtKind::for_category(category),
            category: category.to_string(),
            content: content.to_string(),
            downloadable: None,
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == ThoughtKind::Image
    }

    pub fn is_downloadable(&self) -> bool {
        self.downloadable.unwrap_or(false)
    }
}

/// Strings as-is, numbers and booleans in their text form, anything else empty.
fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan())),
        Value::String(text) => Some(!text.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    })
}

/// Static metadata about the app, stored at `app_info/details`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    pub developer: String,
    #[serde(rename = "minOS")]
    pub min_os: String,
    #[serde(rename = "buildNumber")]
    pub build_number: String,
    pub version: String,
}

/// `true` for three dot-separated runs of ASCII digits, e.g. `1.2.3` or `10.0.12`.
pub fn is_valid_version(version: &str) -> bool {
    VERSION_PATTERN.is_match(version)
}

/// The daily quote/tip/achievement bundle, stored at `daily_content/today`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyContent {
    pub quote: String,
    pub quote_author: String,
    pub tip: String,
    pub theme: String,
    pub custom_theme_url: String,
    pub achievement: String,
    pub milestone: String,
    pub updated_at: String,
}

/// Visual themes for the daily toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Soft,
    Dark,
    Ocean,
    Sunset,
    Forest,
    Custom,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Soft,
        Theme::Dark,
        Theme::Ocean,
        Theme::Sunset,
        Theme::Forest,
        Theme::Custom,
    ];

    /// `None` for the empty selection and for unrecognized names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Soft => "soft",
            Theme::Dark => "dark",
            Theme::Ocean => "ocean",
            Theme::Sunset => "sunset",
            Theme::Forest => "forest",
            Theme::Custom => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_thought_wire_format() {
        let thought = Thought::new("images", "https://example.com/a.jpg");
        assert_eq!(
            serde_json::to_value(&thought).unwrap(),
            json!({ "type": "image", "category": "images", "content": "https://example.com/a.jpg" })
        );
    }

    #[test]
    fn test_unknown_kind_and_missing_fields_read_as_text() {
        let thought: Thought = serde_json::from_value(json!({ "type": "video", "category": "misc" })).unwrap();
        assert_eq!(thought.kind, ThoughtKind::Text);
        assert_eq!(thought.content, "");
        assert!(!thought.is_downloadable());
    }

    #[test]
    fn test_malformed_fields_decode_leniently() {
        let thought: Thought = serde_json::from_value(json!({
            "type": null,
            "category": 7,
            "content": null,
            "downloadable": "yes"
        }))
        .unwrap();
        assert_eq!(thought.kind, ThoughtKind::Text);
        assert_eq!(thought.category, "7");
        assert_eq!(thought.content, "");
        assert!(thought.is_downloadable());

        for (raw, expected) in [(json!(0), Some(false)), (json!(""), Some(false)), (json!(null), None)] {
            let thought: Thought = serde_json::from_value(json!({ "downloadable": raw })).unwrap();
            assert_eq!(thought.downloadable, expected);
        }
    }

    #[test]
    fn test_app_info_field_names() {
        let info = AppInfo {
            developer: "Team".into(),
            min_os: "Android 8".into(),
            build_number: "42".into(),
            version: "1.2.3".into(),
        };
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({ "developer": "Team", "minOS": "Android 8", "buildNumber": "42", "version": "1.2.3" })
        );
    }

    #[test]
    fn test_daily_content_field_names() {
        let value = serde_json::to_value(DailyContent {
            quote_author: "Seneca".into(),
            custom_theme_url: "https://x/bg.png".into(),
            updated_at: "2024-05-01T10:00:00.000Z".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value["quoteAuthor"], "Seneca");
        assert_eq!(value["customThemeUrl"], "https://x/bg.png");
        assert_eq!(value["updatedAt"], "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_version_pattern() {
        assert!(is_valid_version("1.2.3"));
        assert!(is_valid_version("10.20.300"));
        assert!(!is_valid_version("1.0"));
        assert!(!is_valid_version("1.0.0.0"));
        assert!(!is_valid_version("1.a.3"));
        assert!(!is_valid_version(""));
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!(Theme::parse("ocean"), Some(Theme::Ocean));
        assert_eq!(Theme::parse(""), None);
        assert_eq!(Theme::parse("neon"), None);
    }
}
