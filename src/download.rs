//! Saving downloadable thoughts to disk.

use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::Client;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::Thought;

/// What the saved file is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadSource {
    /// In-memory bytes with their MIME type (text thoughts)
    Blob { bytes: Vec<u8>, mime: &'static str },
    /// A remote resource fetched as-is (image thoughts)
    Url(String),
}

/// A pending browser-style save of one thought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub source: DownloadSource,
}

impl Download {
    /// Text thoughts become a `text/plain` blob, image thoughts point at their URL.
    /// The filename carries the Unix time in milliseconds.
    pub fn for_thought(thought: &Thought, now: DateTime<Utc>) -> Self {
        let extension = if thought.is_image() { "jpg" } else { "txt" };
        let source = if thought.is_image() {
            DownloadSource::Url(thought.content.clone())
        } else {
            DownloadSource::Blob {
                bytes: thought.content.as_bytes().to_vec(),
                mime: "text/plain",
            }
        };

        Self {
            filename: format!("thought-{}.{}", now.timestamp_millis(), extension),
            source,
        }
    }

    /// Write the file into `dir` and return its path.
    pub async fn save_into(&self, dir: &Path, http_client: &Client) -> Result<PathBuf> {
        let bytes = match &self.source {
            DownloadSource::Blob { bytes, .. } => bytes.clone(),
            DownloadSource::Url(url) => {
                debug!("fetching {} for download", url);
                let response = http_client.get(url.as_str()).send().await?;
                if !response.status().is_success() {
                    return Err(Error::general(format!(
                        "Download failed with status {}",
                        response.status()
                    )));
                }
                response.bytes().await?.to_vec()
            }
        };

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.filename);
        tokio::fs::write(&path, bytes).await?;
        info!("saved {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn at_millis(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_text_thought_is_a_plain_text_blob() {
        let download = Download::for_thought(&Thought::new("text", "Breathe."), at_millis(1_700_000_000_123));

        assert_eq!(download.filename, "thought-1700000000123.txt");
        assert_eq!(
            download.source,
            DownloadSource::Blob {
                bytes: b"Breathe.".to_vec(),
                mime: "text/plain"
            }
        );
    }

    #[test]
    fn test_image_thought_uses_its_url() {
        let thought = Thought::new("images", "https://cdn.example.com/sun.jpg");
        let download = Download::for_thought(&thought, at_millis(5));

        assert_eq!(download.filename, "thought-5.jpg");
        assert_eq!(
            download.source,
            DownloadSource::Url("https://cdn.example.com/sun.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn test_save_fetches_image_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sun.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let thought = Thought::new("images", &format!("{}/sun.jpg", server.uri()));
        let saved = Download::for_thought(&thought, at_millis(42))
            .save_into(dir.path(), &Client::new())
            .await
            .unwrap();

        assert_eq!(saved, dir.path().join("thought-42.jpg"));
        assert_eq!(std::fs::read(saved).unwrap(), vec![0xFF, 0xD8, 0xFF]);
    }

    #[tokio::test]
    async fn test_save_writes_text_blob() {
        let dir = tempfile::tempdir().unwrap();
        let saved = Download::for_thought(&Thought::new("text", "Keep going"), at_millis(7))
            .save_into(dir.path(), &Client::new())
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(saved).unwrap(), "Keep going");
    }
}
