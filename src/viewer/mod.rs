//! End-user viewer: registration gate, thought carousel, category tab and
//! about panel.

mod about;
mod carousel;
mod filter;

pub use about::AboutPanel;
pub use carousel::Carousel;
pub use filter::{filter_thoughts, FilteredView};

use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::download::Download;
use crate::models::{AppInfo, Thought, User, APP_INFO, APP_INFO_KEY, THOUGHTS, USERS};
use crate::store::{DocumentStore, DocumentStoreExt, StoredDocument};
use crate::ui::{Dialogs, FlagStorage};

/// Local flag that hides the registration modal once set
pub const USER_SUBMITTED_KEY: &str = "userSubmitted";

/// Bottom navigation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Category,
    About,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home 🏠",
            Tab::Category => "Category 📁",
            Tab::About => "About ℹ️",
        }
    }

    /// Id of the tab's content element
    pub fn content_id(&self) -> &'static str {
        match self {
            Tab::Home => "homeTab",
            Tab::Category => "categoryTab",
            Tab::About => "aboutTab",
        }
    }
}

pub struct Viewer {
    store: Arc<dyn DocumentStore>,
    dialogs: Arc<dyn Dialogs>,
    storage: Box<dyn FlagStorage>,
    modal_visible: bool,
    carousel: Carousel,
    active_tab: Tab,
    category_filter: String,
    filtered: Option<FilteredView>,
    about: Option<AboutPanel>,
}

impl Viewer {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        dialogs: Arc<dyn Dialogs>,
        storage: Box<dyn FlagStorage>,
    ) -> Self {
        Self {
            store,
            dialogs,
            storage,
            modal_visible: false,
            carousel: Carousel::new(),
            active_tab: Tab::default(),
            category_filter: String::new(),
            filtered: None,
            about: None,
        }
    }

    /// Page load. Shows the registration modal when the local flag is
    /// missing, otherwise loads content straight away.
    pub async fn start(&mut self) {
        if self.is_registered() {
            self.load_content().await;
        } else {
            self.modal_visible = true;
        }
    }

    pub fn is_registered(&self) -> bool {
        self.storage.get_item(USER_SUBMITTED_KEY).is_some()
    }

    /// Registration form submit. Returns `true` once the user is saved.
    pub async fn submit_registration(&mut self, name: &str, email: &str) -> bool {
        if name.is_empty() || email.is_empty() {
            self.dialogs.alert("Please enter your name and email.");
            return false;
        }

        let user = User {
            name: name.to_string(),
            email: email.to_string(),
        };
        let saved = match self.store.add_typed(USERS, &user).await {
            Ok(id) => {
                info!("registered user {}", id);
                self.storage.set_item(USER_SUBMITTED_KEY, "true")
            }
            Err(e) => Err(e),
        };

        match saved {
            Ok(()) => {
                self.modal_visible = false;
                self.load_content().await;
                true
            }
            Err(e) => {
                warn!("saving user failed: {}", e);
                self.dialogs.alert(&format!("Error saving user: {}", e));
                false
            }
        }
    }

    /// Fetch thoughts, show the first one, then read the app details.
    pub async fn load_content(&mut self) {
        self.load_thoughts().await;
        self.carousel.show_current();
        self.load_app_info().await;
    }

    async fn load_thoughts(&mut self) {
        let thoughts = match self.store.list_typed::<Thought>(THOUGHTS, None).await {
            Ok(thoughts) => thoughts,
            Err(e) => {
                warn!("loading thoughts failed: {}", e);
                Vec::new()
            }
        };
        info!("loaded {} thoughts", thoughts.len());
        self.carousel.replace(thoughts);
    }

    async fn load_app_info(&mut self) {
        match self.store.get_typed::<AppInfo>(APP_INFO, APP_INFO_KEY).await {
            Ok(Some(info)) => self.about = Some(AboutPanel::from(info)),
            Ok(None) => {}
            Err(e) => warn!("loading app info failed: {}", e),
        }
    }

    /// The "next" button.
    pub fn next(&mut self) {
        self.carousel.next();
    }

    /// Activate a tab; the category tab re-renders its list.
    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        if tab == Tab::Category {
            self.render_filtered();
        }
    }

    /// Change the category selection and re-render the list.
    pub fn set_category_filter(&mut self, category: &str) {
        self.category_filter = category.to_string();
        self.render_filtered();
    }

    fn render_filtered(&mut self) {
        self.filtered = Some(FilteredView::build(
            self.carousel.thoughts(),
            &self.category_filter,
        ));
    }

    /// Download for the thought on screen, if it is downloadable.
    pub fn download_current(&self) -> Option<Download> {
        self.carousel
            .displayed()
            .filter(|doc| doc.data.is_downloadable())
            .map(|doc| Download::for_thought(&doc.data, Utc::now()))
    }

    /// Download for a downloadable card in the category list.
    pub fn download(&self, id: &str) -> Option<Download> {
        self.carousel
            .thoughts()
            .iter()
            .find(|doc| doc.id == id && doc.data.is_downloadable())
            .map(|doc| Download::for_thought(&doc.data, Utc::now()))
    }

    pub fn modal_visible(&self) -> bool {
        self.modal_visible
    }

    pub fn thoughts(&self) -> &[StoredDocument<Thought>] {
        self.carousel.thoughts()
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn page_title(&self) -> &'static str {
        self.active_tab.title()
    }

    pub fn category_filter(&self) -> &str {
        &self.category_filter
    }

    /// `None` until the list has been rendered once.
    pub fn filtered(&self) -> Option<&FilteredView> {
        self.filtered.as_ref()
    }

    /// `None` while the panel still shows its default markup.
    pub fn about(&self) -> Option<&AboutPanel> {
        self.about.as_ref()
    }
}
