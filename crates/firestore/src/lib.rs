//! Cloud Firestore REST client for Rust
//!
//! This crate covers the document operations the daily-thoughts apps need:
//! creating a document with a generated id, reading one document, listing a
//! whole collection, overwriting a document at a known key, and deleting.
//!
//! ```no_run
//! # async fn demo() -> Result<(), daily_thoughts_firestore::FirestoreError> {
//! use daily_thoughts_firestore::FirestoreClient;
//! use serde_json::json;
//!
//! let client = FirestoreClient::new(
//!     "https://firestore.googleapis.com",
//!     "my-project",
//!     "my-api-key",
//!     reqwest::Client::new(),
//! );
//! let id = client.collection("thoughts").add(&json!({ "content": "Keep going" })).await?;
//! let all = client.collection("thoughts").order_by("category").list().await?;
//! # Ok(()) }
//! ```

pub mod value;

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use url::Url;

pub use value::Value;

/// Default REST endpoint for Cloud Firestore
pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";

/// Database id used when none is configured
pub const DEFAULT_DATABASE: &str = "(default)";

/// Page size requested while listing a collection
pub const DEFAULT_PAGE_SIZE: u32 = 300;

/// Error payload Google APIs put under the `error` key.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FirestoreApiErrorDetails {
    pub code: Option<i32>,
    pub message: Option<String>,
    pub status: Option<String>,
}

impl fmt::Display for FirestoreApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(status) = &self.status {
            parts.push(status.clone());
        }
        if let Some(message) = &self.message {
            parts.push(message.clone());
        }
        if parts.is_empty() {
            if let Some(code) = self.code {
                parts.push(format!("code {}", code));
            }
        }
        write!(f, "{}", parts.join(": "))
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: FirestoreApiErrorDetails,
}

#[derive(Error, Debug)]
pub enum FirestoreError {
    #[error("API error: {details} (Status: {status})")]
    ApiError {
        details: FirestoreApiErrorDetails,
        status: StatusCode,
    },

    #[error("API error (unparsed): {message} (Status: {status})")]
    UnparsedApiError { message: String, status: StatusCode },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl FirestoreError {
    /// HTTP status of an API failure, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FirestoreError::ApiError { status, .. } => Some(*status),
            FirestoreError::UnparsedApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FirestoreError>;

/// A document as returned by the REST API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, `projects/{p}/databases/{d}/documents/{collection}/{id}`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Document {
    /// The document id, i.e. the last segment of its resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// Fields decoded into a plain JSON object.
    pub fn data(&self) -> serde_json::Value {
        serde_json::Value::Object(value::fields_into_json(self.fields.clone()))
    }

    /// Fields decoded into a typed model.
    pub fn to<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.data())
            .map_err(|e| FirestoreError::DeserializationError(format!("{}: {}", self.name, e)))
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Serialize)]
struct WriteBody {
    fields: BTreeMap<String, Value>,
}

/// Firestore client bound to one project and database
#[derive(Clone)]
pub struct FirestoreClient {
    base_url: String,
    project_id: String,
    database_id: String,
    api_key: String,
    http_client: Client,
    headers: HeaderMap,
    page_size: u32,
}

impl FirestoreClient {
    pub fn new(base_url: &str, project_id: &str, api_key: &str, http_client: Client) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            database_id: DEFAULT_DATABASE.to_string(),
            api_key: api_key.to_string(),
            http_client,
            headers,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Target a named database instead of `(default)`.
    pub fn with_database(mut self, database_id: &str) -> Self {
        self.database_id = database_id.to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Result<Self> {
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            FirestoreError::InvalidParameters(format!("Invalid header value: {}", value))
        })?;
        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
            FirestoreError::InvalidParameters(format!("Invalid header name: {}", key))
        })?;

        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Send a Firebase ID token along with the API key.
    pub fn with_auth(self, token: &str) -> Result<Self> {
        self.with_header("Authorization", &format!("Bearer {}", token))
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// Reference a top-level collection.
    pub fn collection(&self, name: &str) -> CollectionRef<'_> {
        CollectionRef {
            client: self,
            name: name.to_string(),
            order_by: None,
        }
    }

    fn documents_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| FirestoreError::UrlParseError(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            path.pop_if_empty()
                .extend([
                    "v1",
                    "projects",
                    self.project_id.as_str(),
                    "databases",
                    self.database_id.as_str(),
                    "documents",
                ])
                .extend(segments);
        }
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&WriteBody>) -> Result<reqwest::Response> {
        debug!("firestore {} {}", method, url.path());

        let mut request = self
            .http_client
            .request(method, url)
            .headers(self.headers.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(response).await);
        }

        let body_text = response.text().await.map_err(|e| {
            FirestoreError::DeserializationError(format!("Failed to read response body: {}", e))
        })?;
        let body_text = if body_text.trim().is_empty() { "{}" } else { body_text.as_str() };
        serde_json::from_str::<T>(body_text)
            .map_err(|e| FirestoreError::DeserializationError(e.to_string()))
    }

    async fn api_error(response: reqwest::Response) -> FirestoreError {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error response".to_string());

        let err = match serde_json::from_str::<ErrorEnvelope>(&error_text) {
            Ok(envelope) => FirestoreError::ApiError {
                details: envelope.error,
                status,
            },
            Err(_) => FirestoreError::UnparsedApiError {
                message: error_text,
                status,
            },
        };
        warn!("firestore request failed: {}", err);
        err
    }
}

/// A top-level collection, optionally ordered for listing.
pub struct CollectionRef<'a> {
    client: &'a FirestoreClient,
    name: String,
    order_by: Option<String>,
}

impl<'a> CollectionRef<'a> {
    /// Order `list` results ascending by a field.
    pub fn order_by(mut self, field: &str) -> Self {
        self.order_by = Some(field.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a document with a server-generated id and return the id.
    pub async fn add<T: Serialize>(&self, data: &T) -> Result<String> {
        let body = WriteBody {
            fields: value::encode_fields(&serde_json::to_value(data)?)?,
        };
        let url = self.client.documents_url(&[&self.name])?;
        let response = self.client.send(Method::POST, url, Some(&body)).await?;
        let document: Document = FirestoreClient::read_json(response).await?;
        Ok(document.id().to_string())
    }

    /// Fetch one document; `None` when it does not exist.
    pub async fn get(&self, id: &str) -> Result<Option<Document>> {
        let url = self.client.documents_url(&[&self.name, id])?;
        let response = self.client.send(Method::GET, url, None).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("firestore document {}/{} not found", self.name, id);
            return Ok(None);
        }
        FirestoreClient::read_json(response).await.map(Some)
    }

    /// Every document in the collection, following page tokens to the end.
    pub async fn list(&self) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.client.documents_url(&[&self.name])?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("pageSize", &self.client.page_size.to_string());
                if let Some(field) = &self.order_by {
                    query.append_pair("orderBy", field);
                }
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let response = self.client.send(Method::GET, url, None).await?;
            let page: ListDocumentsResponse = FirestoreClient::read_json(response).await?;
            documents.extend(page.documents);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("firestore listed {} documents from {}", documents.len(), self.name);
        Ok(documents)
    }

    /// Replace the document at `id` wholesale, creating it if missing.
    pub async fn set<T: Serialize>(&self, id: &str, data: &T) -> Result<Document> {
        let body = WriteBody {
            fields: value::encode_fields(&serde_json::to_value(data)?)?,
        };
        let url = self.client.documents_url(&[&self.name, id])?;
        let response = self.client.send(Method::PATCH, url, Some(&body)).await?;
        FirestoreClient::read_json(response).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let url = self.client.documents_url(&[&self.name, id])?;
        let response = self.client.send(Method::DELETE, url, None).await?;
        if !response.status().is_success() {
            return Err(FirestoreClient::api_error(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_document_id_is_last_name_segment() {
        let doc = Document {
            name: "projects/demo/databases/(default)/documents/users/abc123".to_string(),
            ..Default::default()
        };
        assert_eq!(doc.id(), "abc123");
    }

    #[test]
    fn test_documents_url_layout() {
        let client = FirestoreClient::new("http://localhost:8080/", "demo", "k", Client::new())
            .with_database("motivation");
        let url = client.documents_url(&["app_info", "details"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v1/projects/demo/databases/motivation/documents/app_info/details?key=k"
        );
    }

    #[tokio::test]
    async fn test_get_missing_document_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/projects/demo/databases/(default)/documents/app_info/details"))
            .and(query_param("key", "fake-key"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": { "code": 404, "message": "Document not found", "status": "NOT_FOUND" }
            })))
            .mount(&mock_server)
            .await;

        let client = FirestoreClient::new(&mock_server.uri(), "demo", "fake-key", Client::new());
        let result = client.collection("app_info").get("details").await;

        assert!(matches!(result, Ok(None)));
    }
}
