use crate::models::Thought;
use crate::store::StoredDocument;
use crate::ui::escape_html;

pub const EMPTY_MESSAGE: &str = "No thoughts available.";

/// Thoughts whose category equals `category`, in their original order.
/// An empty selection keeps everything.
pub fn filter_thoughts<'a>(
    thoughts: &'a [StoredDocument<Thought>],
    category: &str,
) -> Vec<&'a StoredDocument<Thought>> {
    thoughts
        .iter()
        .filter(|doc| category.is_empty() || doc.data.category == category)
        .collect()
}

/// Contents of the category tab's list.
#[derive(Debug, Clone, PartialEq)]
pub enum FilteredView {
    Empty,
    Cards(Vec<StoredDocument<Thought>>),
}

impl FilteredView {
    pub fn build(thoughts: &[StoredDocument<Thought>], category: &str) -> Self {
        let filtered = filter_thoughts(thoughts, category);
        if filtered.is_empty() {
            FilteredView::Empty
        } else {
            FilteredView::Cards(filtered.into_iter().cloned().collect())
        }
    }

    pub fn cards(&self) -> &[StoredDocument<Thought>] {
        match self {
            FilteredView::Empty => &[],
            FilteredView::Cards(cards) => cards,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            FilteredView::Empty => format!("<p>{}</p>", EMPTY_MESSAGE),
            FilteredView::Cards(cards) => cards.iter().map(render_card).collect(),
        }
    }
}

fn render_card(doc: &StoredDocument<Thought>) -> String {
    let thought = &doc.data;
    let body = if thought.is_image() {
        format!(
            r#"<img src="{}" style="max-width: 100%; max-height: 200px;">"#,
            escape_html(&thought.content)
        )
    } else {
        format!("<p>{}</p>", escape_html(&thought.content))
    };
    let download = if thought.is_downloadable() {
        format!(r#"<button data-id="{}">Download</button>"#, escape_html(&doc.id))
    } else {
        String::new()
    };

    format!(
        r#"<div style="margin: 15px 0; padding: 10px; border: 1px solid #eee; border-radius: 8px;">{}{}</div>"#,
        body, download
    )
}
