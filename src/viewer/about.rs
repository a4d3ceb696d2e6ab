use crate::models::AppInfo;
use crate::ui::{escape_html, or_not_available};

/// The about tab's app details, with `N/A` for empty fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutPanel {
    pub developer: String,
    pub version: String,
    pub build_number: String,
    pub min_os: String,
}

impl From<AppInfo> for AboutPanel {
    fn from(info: AppInfo) -> Self {
        Self {
            developer: or_not_available(info.developer),
            version: or_not_available(info.version),
            build_number: or_not_available(info.build_number),
            min_os: or_not_available(info.min_os),
        }
    }
}

impl AboutPanel {
    /// `(element id, text)` pairs for the panel's fields.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("devDetail", self.developer.as_str()),
            ("version", self.version.as_str()),
            ("buildNumber", self.build_number.as_str()),
            ("minOS", self.min_os.as_str()),
        ]
    }

    pub fn to_html(&self) -> String {
        self.fields()
            .iter()
            .map(|(id, text)| format!(r#"<span id="{}">{}</span>"#, id, escape_html(text)))
            .collect()
    }
}
