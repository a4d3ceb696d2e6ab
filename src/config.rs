//! Configuration for connecting to the hosted document database

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};
use daily_thoughts_firestore::{DEFAULT_BASE_URL, DEFAULT_DATABASE, DEFAULT_PAGE_SIZE};

/// The Firebase web app configuration.
///
/// Field names match the snippet the Firebase console hands out, so that
/// object can be pasted into a JSON file and parsed with [`FirebaseConfig::from_json`].
/// Only `apiKey` and `projectId` are used to reach Firestore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_domain: Option<String>,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_sender_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
}

impl FirebaseConfig {
    /// Creates a new configuration, rejecting empty credentials.
    pub fn new(api_key: &str, project_id: &str) -> Result<Self> {
        let config = Self {
            api_key: api_key.to_string(),
            auth_domain: None,
            project_id: project_id.to_string(),
            storage_bucket: None,
            messaging_sender_id: None,
            app_id: None,
            measurement_id: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses the console's JSON config object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `FIREBASE_API_KEY` and `FIREBASE_PROJECT_ID`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FIREBASE_API_KEY")
            .map_err(|_| Error::config("FIREBASE_API_KEY environment variable not found"))?;
        let project_id = std::env::var("FIREBASE_PROJECT_ID")
            .map_err(|_| Error::config("FIREBASE_PROJECT_ID environment variable not found"))?;
        Self::new(&api_key, &project_id)
    }

    fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::config("apiKey cannot be empty"));
        }
        if self.project_id.trim().is_empty() {
            return Err(Error::config("projectId cannot be empty"));
        }
        Ok(())
    }
}

/// Configuration options for the client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// The Firestore database id
    pub database_id: String,

    /// Documents requested per page while reading a whole collection
    pub page_size: u32,

    /// Firestore REST endpoint
    pub base_url: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            database_id: DEFAULT_DATABASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientOptions {
    /// Start from the defaults and apply `FIREBASE_DATABASE_ID` and
    /// `FIRESTORE_BASE_URL` when set.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(database_id) = std::env::var("FIREBASE_DATABASE_ID") {
            options = options.with_database_id(&database_id);
        }
        if let Ok(base_url) = std::env::var("FIRESTORE_BASE_URL") {
            options = options.with_base_url(&base_url);
        }
        options
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the database id
    pub fn with_database_id(mut self, value: &str) -> Self {
        self.database_id = value.to_string();
        self
    }

    /// Set the list page size
    pub fn with_page_size(mut self, value: u32) -> Self {
        self.page_size = value;
        self
    }

    /// Point at an emulator or a mock server
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.to_string();
        self
    }
}
