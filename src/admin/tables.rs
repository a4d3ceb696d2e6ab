//! Management tables for users and thoughts.

use crate::models::{Thought, User};
use crate::store::StoredDocument;
use crate::ui::{escape_html, or_not_available};

const ID_PREVIEW_CHARS: usize = 6;
const TEXT_PREVIEW_CHARS: usize = 50;

/// Which table a row (and its delete action) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    User,
    Thought,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowKind::User => "user",
            RowKind::Thought => "thought",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            RowKind::User => "No users found.",
            RowKind::Thought => "No thoughts found.",
        }
    }

    pub fn failed_message(&self) -> &'static str {
        match self {
            RowKind::User => "Failed to load users.",
            RowKind::Thought => "Failed to load thoughts.",
        }
    }
}

/// A delete button bound to one row's document id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAction {
    pub kind: RowKind,
    pub id: String,
}

impl DeleteAction {
    fn to_html(&self) -> String {
        format!(
            r#"<button class="delete-btn" data-id="{}" data-type="{}"><i class="fas fa-trash"></i></button>"#,
            escape_html(&self.id),
            self.kind.as_str()
        )
    }
}

pub trait TableRow {
    const KIND: RowKind;

    fn delete_action(&self) -> &DeleteAction;

    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub short_id: String,
    pub name: String,
    pub email: String,
    pub delete: DeleteAction,
}

impl From<StoredDocument<User>> for UserRow {
    fn from(doc: StoredDocument<User>) -> Self {
        let short_id: String = doc.id.chars().take(ID_PREVIEW_CHARS).collect();
        Self {
            short_id: format!("{}...", short_id),
            name: or_not_available(doc.data.name),
            email: or_not_available(doc.data.email),
            delete: DeleteAction {
                kind: RowKind::User,
                id: doc.id,
            },
        }
    }
}

impl TableRow for UserRow {
    const KIND: RowKind = RowKind::User;

    fn delete_action(&self) -> &DeleteAction {
        &self.delete
    }

    fn cells(&self) -> Vec<String> {
        vec![
            escape_html(&self.short_id),
            escape_html(&self.name),
            escape_html(&self.email),
        ]
    }
}

/// The content column of the thoughts table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentCell {
    Thumbnail(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtRow {
    pub kind: String,
    pub category: String,
    pub content: ContentCell,
    pub delete: DeleteAction,
}

impl From<StoredDocument<Thought>> for ThoughtRow {
    fn from(doc: StoredDocument<Thought>) -> Self {
        let thought = doc.data;
        let content = if thought.is_image() {
            ContentCell::Thumbnail(thought.content)
        } else {
            ContentCell::Text(truncate(&thought.content, TEXT_PREVIEW_CHARS))
        };

        Self {
            kind: thought.kind.as_str().to_string(),
            category: thought.category,
            content,
            delete: DeleteAction {
                kind: RowKind::Thought,
                id: doc.id,
            },
        }
    }
}

impl TableRow for ThoughtRow {
    const KIND: RowKind = RowKind::Thought;

    fn delete_action(&self) -> &DeleteAction {
        &self.delete
    }

    fn cells(&self) -> Vec<String> {
        let content = match &self.content {
            ContentCell::Thumbnail(src) => format!(
                r#"<img src="{}" alt="Thought Image" style="max-height: 50px; border-radius: 4px;">"#,
                escape_html(src)
            ),
            ContentCell::Text(text) => escape_html(text),
        };
        vec![escape_html(&self.kind), escape_html(&self.category), content]
    }
}

/// A table body, re-rendered wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState<R> {
    /// Before the first load has finished
    Loading,
    Empty,
    Failed,
    Rows(Vec<R>),
}

impl<R> Default for TableState<R> {
    fn default() -> Self {
        TableState::Loading
    }
}

impl<R: TableRow> TableState<R> {
    pub fn from_rows(rows: Vec<R>) -> Self {
        if rows.is_empty() {
            TableState::Empty
        } else {
            TableState::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[R] {
        match self {
            TableState::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// The delete actions bound by the latest render, one per row.
    pub fn delete_actions(&self) -> Vec<&DeleteAction> {
        self.rows().iter().map(TableRow::delete_action).collect()
    }

    /// Text of the single status row shown instead of data rows.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            TableState::Loading => Some("Loading..."),
            TableState::Empty => Some(R::KIND.empty_message()),
            TableState::Failed => Some(R::KIND.failed_message()),
            TableState::Rows(_) => None,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            TableState::Loading | TableState::Failed => {
                format!(r#"<tr><td colspan="4">{}</td></tr>"#, self.message().unwrap_or_default())
            }
            TableState::Empty => format!(
                r#"<tr><td colspan="4" style="text-align:center;">{}</td></tr>"#,
                R::KIND.empty_message()
            ),
            TableState::Rows(rows) => rows
                .iter()
                .map(|row| {
                    let cells: String = row
                        .cells()
                        .into_iter()
                        .map(|cell| format!("<td>{}</td>", cell))
                        .collect();
                    format!("<tr>{}<td>{}</td></tr>", cells, row.delete_action().to_html())
                })
                .collect(),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
