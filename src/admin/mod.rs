//! Admin console: thought creation, the two singleton editors, live
//! previews and the users/thoughts management tables.

mod forms;
mod preview;
mod tables;

pub use forms::{
    AppInfoForm, ContentInput, DailyContentForm, ThoughtForm, ALL_FIELDS_REQUIRED,
    CUSTOM_URL_REQUIRED, FILL_ALL_FIELDS, VERSION_FORMAT,
};
pub use preview::{theme_style, DailyPreview, PreviewLine, ThoughtPreview};
pub use tables::{ContentCell, DeleteAction, RowKind, TableRow, TableState, ThoughtRow, UserRow};

use chrono::Utc;
use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::error::Error;
use crate::models::{
    AppInfo, DailyContent, Thought, User, APP_INFO, APP_INFO_KEY, DAILY_CONTENT, DAILY_CONTENT_KEY,
    THOUGHTS, USERS,
};
use crate::store::{DocumentStore, DocumentStoreExt};
use crate::ui::Dialogs;

pub struct AdminConsole {
    store: Arc<dyn DocumentStore>,
    dialogs: Arc<dyn Dialogs>,
    thought_form: ThoughtForm,
    info_form: AppInfoForm,
    daily_form: DailyContentForm,
    users: TableState<UserRow>,
    thoughts: TableState<ThoughtRow>,
}

impl AdminConsole {
    pub fn new(store: Arc<dyn DocumentStore>, dialogs: Arc<dyn Dialogs>) -> Self {
        Self {
            store,
            dialogs,
            thought_form: ThoughtForm::default(),
            info_form: AppInfoForm::default(),
            daily_form: DailyContentForm::default(),
            users: TableState::default(),
            thoughts: TableState::default(),
        }
    }

    /// Page load: users, app info, daily content, then thoughts.
    pub async fn load(&mut self) {
        self.refresh_users().await;
        self.load_app_info().await;
        self.load_daily_content().await;
        self.refresh_thoughts().await;
    }

    pub fn select_thought_category(&mut self, category: &str) {
        self.thought_form.select_category(category);
    }

    pub fn set_thought_content(&mut self, content: &str) {
        self.thought_form.set_content(content);
    }

    pub fn set_thought_downloadable(&mut self, downloadable: bool) {
        self.thought_form.downloadable = downloadable;
    }

    /// "Add thought" submit. Returns `true` once the thought is stored.
    pub async fn submit_thought(&mut self) -> bool {
        let thought = match self.thought_form.validate() {
            Ok(thought) => thought,
            Err(e) => {
                self.dialogs.alert(&e.to_string());
                return false;
            }
        };

        match self.store.add_typed(THOUGHTS, &thought).await {
            Ok(id) => {
                info!("added thought {} to {}", id, thought.category);
                self.dialogs.alert("✅ Thought added successfully!");
                self.thought_form.reset();
                self.refresh_thoughts().await;
                true
            }
            Err(e) => {
                error!("adding thought failed: {}", e);
                self.dialogs.alert(&format!("❌ Save failed: {}", e));
                false
            }
        }
    }

    pub fn app_info_form_mut(&mut self) -> &mut AppInfoForm {
        &mut self.info_form
    }

    pub async fn submit_app_info(&mut self) -> bool {
        let info = match self.info_form.validate() {
            Ok(info) => info,
            Err(e) => {
                self.dialogs.alert(&e.to_string());
                return false;
            }
        };

        match self.store.set_typed(APP_INFO, APP_INFO_KEY, &info).await {
            Ok(()) => {
                self.dialogs.alert("✅ App Info saved successfully!");
                true
            }
            Err(e) => {
                error!("saving app info failed: {}", e);
                self.dialogs.alert(&format!("❌ Failed: {}", e));
                false
            }
        }
    }

    /// Edit the daily content form; the preview follows from the new state.
    pub fn edit_daily_content<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut DailyContentForm),
    {
        edit(&mut self.daily_form);
    }

    pub async fn submit_daily_content(&mut self) -> bool {
        let content = match self.daily_form.validate(Utc::now()) {
            Ok(content) => content,
            Err(e) => {
                self.dialogs.alert(&e.to_string());
                return false;
            }
        };

        match self.store.set_typed(DAILY_CONTENT, DAILY_CONTENT_KEY, &content).await {
            Ok(()) => {
                info!("published daily content at {}", content.updated_at);
                self.dialogs.alert("✨ Daily Experience Published!");
                true
            }
            Err(e) => {
                error!("publishing daily content failed: {}", e);
                self.dialogs.alert(&format!("❌ Failed: {}", e));
                false
            }
        }
    }

    async fn load_app_info(&mut self) {
        match self.store.get_typed::<AppInfo>(APP_INFO, APP_INFO_KEY).await {
            Ok(Some(info)) => self.info_form.populate(info),
            Ok(None) => debug!("no app info stored yet"),
            Err(e) => warn!("loading app info failed: {}", e),
        }
    }

    async fn load_daily_content(&mut self) {
        match self
            .store
            .get_typed::<DailyContent>(DAILY_CONTENT, DAILY_CONTENT_KEY)
            .await
        {
            Ok(Some(content)) => self.daily_form.populate(content),
            Ok(None) => {
                debug!("no daily content stored yet");
                self.daily_form.theme.clear();
            }
            Err(e) => {
                warn!("loading daily content failed: {}", e);
                self.daily_form.theme.clear();
            }
        }
    }

    /// Re-read the users collection and re-render its table.
    pub async fn refresh_users(&mut self) {
        self.users = match self.store.list_typed::<User>(USERS, Some("name")).await {
            Ok(docs) => TableState::from_rows(docs.into_iter().map(UserRow::from).collect()),
            Err(e) => {
                error!("loading users failed: {}", e);
                TableState::Failed
            }
        };
    }

    /// Re-read the thoughts collection and re-render its table.
    pub async fn refresh_thoughts(&mut self) {
        self.thoughts = match self.store.list_typed::<Thought>(THOUGHTS, Some("category")).await {
            Ok(docs) => TableState::from_rows(docs.into_iter().map(ThoughtRow::from).collect()),
            Err(e) => {
                error!("loading thoughts failed: {}", e);
                TableState::Failed
            }
        };
    }

    /// A delete button press. Returns `true` when the document was removed.
    pub async fn delete(&mut self, action: &DeleteAction) -> bool {
        match action.kind {
            RowKind::User => self.delete_user(&action.id).await,
            RowKind::Thought => self.delete_thought(&action.id).await,
        }
    }

    pub async fn delete_user(&mut self, id: &str) -> bool {
        if !self
            .dialogs
            .confirm("Are you sure you want to delete this user? This action cannot be undone.")
        {
            return false;
        }

        match self.store.delete(USERS, id).await {
            Ok(()) => {
                info!("deleted user {}", id);
                self.dialogs.alert("✅ User deleted.");
                self.refresh_users().await;
                true
            }
            Err(e) => {
                self.delete_failed(e);
                false
            }
        }
    }

    pub async fn delete_thought(&mut self, id: &str) -> bool {
        if !self.dialogs.confirm("Are you sure you want to delete this thought?") {
            return false;
        }

        match self.store.delete(THOUGHTS, id).await {
            Ok(()) => {
                info!("deleted thought {}", id);
                self.dialogs.alert("✅ Thought deleted.");
                self.refresh_thoughts().await;
                true
            }
            Err(e) => {
                self.delete_failed(e);
                false
            }
        }
    }

    fn delete_failed(&self, e: Error) {
        error!("delete failed: {}", e);
        self.dialogs.alert(&format!("❌ Delete failed: {}", e));
    }

    pub fn thought_form(&self) -> &ThoughtForm {
        &self.thought_form
    }

    pub fn thought_preview(&self) -> ThoughtPreview {
        ThoughtPreview::from_form(&self.thought_form)
    }

    pub fn app_info_form(&self) -> &AppInfoForm {
        &self.info_form
    }

    pub fn daily_form(&self) -> &DailyContentForm {
        &self.daily_form
    }

    pub fn daily_preview(&self) -> DailyPreview {
        DailyPreview::from_form(&self.daily_form)
    }

    pub fn users(&self) -> &TableState<UserRow> {
        &self.users
    }

    pub fn thoughts(&self) -> &TableState<ThoughtRow> {
        &self.thoughts
    }
}
