//! Live previews, recomputed from form state on every input event.

use crate::models::{Theme, IMAGES_CATEGORY, TEXT_CATEGORY};
use crate::ui::escape_html;

use super::forms::{DailyContentForm, ThoughtForm};

pub const THOUGHT_PLACEHOLDER: &str = "Preview will appear here...";
pub const NO_DAILY_CONTENT: &str = "No content to preview.";

const PREVIEW_BOX_STYLE: &str =
    " padding: 15px; border-radius: 12px; font-size: 0.85rem; line-height: 1.4; border: 1px solid rgba(255,255,255,0.1);";
const DEFAULT_TOAST_STYLE: &str = "background: rgba(25, 24, 24, 0.95); color: white;";

/// What the thought preview box shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThoughtPreview {
    Placeholder,
    Text(String),
    Image(String),
    InvalidUrl,
}

impl ThoughtPreview {
    pub fn from_form(form: &ThoughtForm) -> Self {
        let content = form.trimmed_content();
        if form.category.is_empty() || content.is_empty() {
            return ThoughtPreview::Placeholder;
        }

        match form.category.as_str() {
            TEXT_CATEGORY => ThoughtPreview::Text(content.to_string()),
            IMAGES_CATEGORY if content.starts_with("http") => ThoughtPreview::Image(content.to_string()),
            IMAGES_CATEGORY => ThoughtPreview::InvalidUrl,
            _ => ThoughtPreview::Placeholder,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            ThoughtPreview::Placeholder => {
                format!(r#"<p class="preview-placeholder">{}</p>"#, THOUGHT_PLACEHOLDER)
            }
            ThoughtPreview::Text(text) => {
                format!(r#"<div class="preview-card"><p>{}</p></div>"#, escape_html(text))
            }
            ThoughtPreview::Image(src) => format!(
                r#"<div class="preview-card"><img src="{}" alt="Preview Image" style="max-width:100%; max-height: 150px; border-radius: 8px;"></div>"#,
                escape_html(src)
            ),
            ThoughtPreview::InvalidUrl => {
                r#"<div class="preview-card"><p style="color: #e74c3c;">Invalid URL format</p></div>"#
                    .to_string()
            }
        }
    }
}

/// One labeled line of the toast preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewLine {
    Quote { quote: String, author: Option<String> },
    Tip(String),
    Achievement(String),
}

impl PreviewLine {
    pub fn to_html(&self) -> String {
        match self {
            PreviewLine::Quote { quote, author } => {
                let full_quote = match author {
                    Some(author) => format!("\"{}\" — {}", quote, author),
                    None => format!("\"{}\"", quote),
                };
                format!(
                    r#"<p><i class="fas fa-quote-left" style="color: #f1c40f;"></i> <strong>Quote:</strong> {}</p>"#,
                    escape_html(&full_quote)
                )
            }
            PreviewLine::Tip(tip) => format!(
                r#"<p><i class="fas fa-lightbulb" style="color: #2ecc71;"></i> <strong>Tip:</strong> {}</p>"#,
                escape_html(tip)
            ),
            PreviewLine::Achievement(achievement) => format!(
                r#"<p><i class="fas fa-certificate" style="color: #e74c3c;"></i> <strong>Achievement:</strong> {}</p>"#,
                escape_html(achievement)
            ),
        }
    }
}

/// The daily toast preview: lines plus the theme's box style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPreview {
    pub lines: Vec<PreviewLine>,
    pub theme: Option<Theme>,
}

impl DailyPreview {
    /// Milestones are left out of the toast.
    pub fn from_form(form: &DailyContentForm) -> Self {
        let mut lines = Vec::new();

        let quote = form.quote.trim();
        if !quote.is_empty() {
            let author = form.quote_author.trim();
            lines.push(PreviewLine::Quote {
                quote: quote.to_string(),
                author: (!author.is_empty()).then(|| author.to_string()),
            });
        }
        let tip = form.tip.trim();
        if !tip.is_empty() {
            lines.push(PreviewLine::Tip(tip.to_string()));
        }
        let achievement = form.achievement.trim();
        if !achievement.is_empty() {
            lines.push(PreviewLine::Achievement(achievement.to_string()));
        }

        Self {
            lines,
            theme: Theme::parse(&form.theme),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Inline style for the preview container.
    pub fn style(&self) -> String {
        format!("{}{}", theme_style(self.theme), PREVIEW_BOX_STYLE)
    }

    pub fn to_html(&self) -> String {
        let body: String = if self.lines.is_empty() {
            format!(
                r#"<p style="color: #95a5a6; font-style: italic;">{}</p>"#,
                NO_DAILY_CONTENT
            )
        } else {
            self.lines.iter().map(PreviewLine::to_html).collect()
        };
        format!(r#"<div class="toast-preview">{}</div>"#, body)
    }
}

/// Background/foreground for a theme; custom and unset themes share the
/// default dark toast.
pub fn theme_style(theme: Option<Theme>) -> &'static str {
    match theme {
        Some(Theme::Soft) => {
            "background: linear-gradient(135deg, #f5f7fa 0%, #e4edf5 100%); color: #2c3e50;"
        }
        Some(Theme::Dark) => "background: #1a1a2e; color: white;",
        Some(Theme::Ocean) => {
            "background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white;"
        }
        Some(Theme::Sunset) => {
            "background: linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%); color: #2c3e50;"
        }
        Some(Theme::Forest) => {
            "background: linear-gradient(135deg, #1d976c 0%, #93f9b9 100%); color: white;"
        }
        Some(Theme::Custom) | None => DEFAULT_TOAST_STYLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thought_form(category: &str, content: &str) -> ThoughtForm {
        let mut form = ThoughtForm::default();
        form.select_category(category);
        form.set_content(content);
        form
    }

    #[test]
    fn test_thought_preview_cases() {
        assert_eq!(ThoughtPreview::from_form(&ThoughtForm::default()), ThoughtPreview::Placeholder);
        assert_eq!(ThoughtPreview::from_form(&thought_form("text", "")), ThoughtPreview::Placeholder);
        assert_eq!(
            ThoughtPreview::from_form(&thought_form("text", " Hi ")),
            ThoughtPreview::Text("Hi".to_string())
        );
        assert_eq!(
            ThoughtPreview::from_form(&thought_form("images", "https://x/a.jpg")),
            ThoughtPreview::Image("https://x/a.jpg".to_string())
        );
    }

    #[test]
    fn test_non_http_image_shows_invalid_url() {
        let preview = ThoughtPreview::from_form(&thought_form("images", "ftp://x.jpg"));
        assert_eq!(preview, ThoughtPreview::InvalidUrl);

        let html = preview.to_html();
        assert!(html.contains("Invalid URL format"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_daily_preview_lines_skip_milestone() {
        let form = DailyContentForm {
            quote: "Stay hungry".into(),
            quote_author: "Jobs".into(),
            achievement: "7 day streak".into(),
            milestone: "100 thoughts".into(),
            theme: "sunset".into(),
            ..Default::default()
        };
        let preview = DailyPreview::from_form(&form);

        assert_eq!(
            preview.lines,
            vec![
                PreviewLine::Quote {
                    quote: "Stay hungry".into(),
                    author: Some("Jobs".into())
                },
                PreviewLine::Achievement("7 day streak".into()),
            ]
        );
        let html = preview.to_html();
        assert!(html.contains("&quot;Stay hungry&quot; — Jobs"));
        assert!(!html.contains("100 thoughts"));
        assert!(preview.style().starts_with("background: linear-gradient(135deg, #ff9a9e"));
    }

    #[test]
    fn test_daily_preview_defaults_to_dark_toast() {
        for theme in ["", "custom", "neon"] {
            let form = DailyContentForm {
                theme: theme.into(),
                ..Default::default()
            };
            let preview = DailyPreview::from_form(&form);
            assert!(preview.is_empty());
            assert!(preview.to_html().contains(NO_DAILY_CONTENT));
            assert!(preview.style().starts_with(DEFAULT_TOAST_STYLE), "theme {:?}", theme);
        }
    }

    #[test]
    fn test_anonymous_quote() {
        let form = DailyContentForm {
            quote: "Begin.".into(),
            ..Default::default()
        };
        assert_eq!(
            DailyPreview::from_form(&form).lines[0].to_html(),
            r#"<p><i class="fas fa-quote-left" style="color: #f1c40f;"></i> <strong>Quote:</strong> &quot;Begin.&quot;</p>"#
        );
    }
}
