//! Admin form state and the checks each form runs before writing.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};
use crate::models::{
    is_valid_version, AppInfo, DailyContent, Thought, Theme, IMAGES_CATEGORY, TEXT_CATEGORY,
};
use crate::ui::escape_html;

pub const FILL_ALL_FIELDS: &str = "❌ Please fill all fields.";
pub const ALL_FIELDS_REQUIRED: &str = "❌ All fields are required!";
pub const VERSION_FORMAT: &str = "❌ Version must be in format: 1.0.0";
pub const CUSTOM_URL_REQUIRED: &str = "❌ Please provide a Custom Image URL.";

/// The content widget shown for the selected category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentInput {
    None,
    TextArea,
    UrlInput,
}

impl ContentInput {
    pub fn for_category(category: &str) -> Self {
        match category {
            TEXT_CATEGORY => ContentInput::TextArea,
            IMAGES_CATEGORY => ContentInput::UrlInput,
            _ => ContentInput::None,
        }
    }

    pub fn to_html(&self, value: &str) -> String {
        match self {
            ContentInput::None => String::new(),
            ContentInput::TextArea => format!(
                r#"<textarea id="content" placeholder="Enter your thought" rows="4" required>{}</textarea>"#,
                escape_html(value)
            ),
            ContentInput::UrlInput => format!(
                r#"<input type="url" id="content" placeholder="https://example.com/image.jpg" value="{}" required />"#,
                escape_html(value)
            ),
        }
    }
}

/// "Add thought" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThoughtForm {
    pub category: String,
    /// `None` while no content widget is rendered
    pub content: Option<String>,
    pub downloadable: bool,
}

impl ThoughtForm {
    /// Select a category, replacing the content widget with a fresh one.
    pub fn select_category(&mut self, category: &str) {
        self.category = category.to_string();
        self.content = match ContentInput::for_category(category) {
            ContentInput::None => None,
            _ => Some(String::new()),
        };
    }

    /// Type into the content widget; ignored when none is rendered.
    pub fn set_content(&mut self, content: &str) {
        if let Some(current) = self.content.as_mut() {
            *current = content.to_string();
        }
    }

    pub fn input(&self) -> ContentInput {
        ContentInput::for_category(&self.category)
    }

    pub fn trimmed_content(&self) -> &str {
        self.content.as_deref().map(str::trim).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<Thought> {
        let content = self.trimmed_content();
        if self.category.is_empty() || content.is_empty() {
            return Err(Error::validation(FILL_ALL_FIELDS));
        }

        let mut thought = Thought::new(&self.category, content);
        if self.downloadable {
            thought.downloadable = Some(true);
        }
        Ok(thought)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// App info editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppInfoForm {
    pub developer: String,
    pub min_os: String,
    pub build_number: String,
    pub version: String,
}

impl AppInfoForm {
    pub fn validate(&self) -> Result<AppInfo> {
        let info = AppInfo {
            developer: self.developer.trim().to_string(),
            min_os: self.min_os.trim().to_string(),
            build_number: self.build_number.trim().to_string(),
            version: self.version.trim().to_string(),
        };

        if info.developer.is_empty()
            || info.min_os.is_empty()
            || info.build_number.is_empty()
            || info.version.is_empty()
        {
            return Err(Error::validation(ALL_FIELDS_REQUIRED));
        }
        if !is_valid_version(&info.version) {
            return Err(Error::validation(VERSION_FORMAT));
        }
        Ok(info)
    }

    pub fn populate(&mut self, info: AppInfo) {
        self.developer = info.developer;
        self.min_os = info.min_os;
        self.build_number = info.build_number;
        self.version = info.version;
    }
}

/// Daily content editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyContentForm {
    pub quote: String,
    pub quote_author: String,
    pub tip: String,
    pub achievement: String,
    pub milestone: String,
    pub theme: String,
    pub custom_theme_url: String,
}

impl DailyContentForm {
    pub fn is_custom_theme(&self) -> bool {
        Theme::parse(&self.theme) == Some(Theme::Custom)
    }

    /// The custom image URL input is only shown for the custom theme.
    pub fn custom_url_visible(&self) -> bool {
        self.is_custom_theme()
    }

    /// Build the document to publish, stamped with `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<DailyContent> {
        let content = DailyContent {
            quote: self.quote.trim().to_string(),
            quote_author: self.quote_author.trim().to_string(),
            tip: self.tip.trim().to_string(),
            theme: self.theme.clone(),
            custom_theme_url: if self.is_custom_theme() {
                self.custom_theme_url.trim().to_string()
            } else {
                String::new()
            },
            achievement: self.achievement.trim().to_string(),
            milestone: self.milestone.trim().to_string(),
            updated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        if self.is_custom_theme() && content.custom_theme_url.is_empty() {
            return Err(Error::validation(CUSTOM_URL_REQUIRED));
        }
        Ok(content)
    }

    /// Fill the form from a stored document; the URL is only kept for the
    /// custom theme.
    pub fn populate(&mut self, content: DailyContent) {
        self.quote = content.quote;
        self.quote_author = content.quote_author;
        self.tip = content.tip;
        self.theme = content.theme;
        self.custom_theme_url = if self.is_custom_theme() {
            content.custom_theme_url
        } else {
            String::new()
        };
        self.achievement = content.achievement;
        self.milestone = content.milestone;
    }
}
