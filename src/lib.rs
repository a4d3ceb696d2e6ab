//! Daily Thoughts
//!
//! Client library behind the daily motivation app: an end-user viewer that
//! shows a carousel of thoughts, and an admin console that curates them,
//! both backed by a Cloud Firestore database.

pub mod admin;
pub mod config;
pub mod download;
pub mod error;
pub mod models;
pub mod store;
pub mod ui;
pub mod viewer;

use reqwest::Client;
use std::sync::Arc;

use crate::admin::AdminConsole;
use crate::config::{ClientOptions, FirebaseConfig};
use crate::error::Result;
use crate::store::DocumentStore;
use crate::ui::{Dialogs, FlagStorage};
use crate::viewer::Viewer;
use daily_thoughts_firestore::FirestoreClient;

/// The main entry point: one configured store shared by the apps built from it
pub struct DailyThoughts {
    /// Firebase app configuration
    pub config: FirebaseConfig,
    /// HTTP client used for store requests and downloads
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    store: Arc<dyn DocumentStore>,
}

impl DailyThoughts {
    /// Create a client for the Firestore database named by `config`
    ///
    /// # Example
    ///
    /// ```
    /// use daily_thoughts::{DailyThoughts, config::{ClientOptions, FirebaseConfig}};
    ///
    /// let config = FirebaseConfig::new("your-api-key", "your-project").unwrap();
    /// let app = DailyThoughts::new(config, ClientOptions::default()).unwrap();
    /// ```
    pub fn new(config: FirebaseConfig, options: ClientOptions) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let store = FirestoreClient::new(
            &options.base_url,
            &config.project_id,
            &config.api_key,
            http_client.clone(),
        )
        .with_database(&options.database_id)
        .with_page_size(options.page_size);

        Ok(Self {
            config,
            http_client,
            options,
            store: Arc::new(store),
        })
    }

    /// Build from `FIREBASE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(FirebaseConfig::from_env()?, ClientOptions::from_env())
    }

    /// Run against another store, e.g. [`store::MemoryStore`]
    pub fn with_store(config: FirebaseConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config,
            http_client: Client::new(),
            options: ClientOptions::default(),
            store,
        }
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store)
    }

    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// A viewer that keeps its registration flag in `storage`
    pub fn viewer(&self, dialogs: Arc<dyn Dialogs>, storage: Box<dyn FlagStorage>) -> Viewer {
        Viewer::new(self.store(), dialogs, storage)
    }

    pub fn admin(&self, dialogs: Arc<dyn Dialogs>) -> AdminConsole {
        AdminConsole::new(self.store(), dialogs)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::admin::AdminConsole;
    pub use crate::config::{ClientOptions, FirebaseConfig};
    pub use crate::error::Error;
    pub use crate::models::{AppInfo, DailyContent, Thought, User};
    pub use crate::store::{DocumentStore, DocumentStoreExt, MemoryStore};
    pub use crate::ui::{Dialogs, FlagStorage};
    pub use crate::viewer::Viewer;
    pub use crate::DailyThoughts;
}
