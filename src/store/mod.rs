//! Document store abstraction.
//!
//! Every operation the apps perform is one call on a [`DocumentStore`]:
//! create with a generated id, read one, read a whole collection, overwrite
//! at a fixed key, or delete by id.

mod firestore;
mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use log::warn;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A document read back from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument<T = Value> {
    pub id: String,
    pub data: T,
}

impl StoredDocument {
    /// Decode the raw JSON data into a model.
    pub fn decode<T: DeserializeOwned>(self) -> Result<StoredDocument<T>> {
        Ok(StoredDocument {
            id: self.id,
            data: serde_json::from_value(self.data)?,
        })
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document under a store-generated id and return that id.
    async fn add(&self, collection: &str, data: Value) -> Result<String>;

    /// Read one document, `None` when absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Read the whole collection, optionally ordered ascending by `order_by`.
    async fn list(&self, collection: &str, order_by: Option<&str>) -> Result<Vec<StoredDocument>>;

    /// Overwrite the document at `id` wholesale, creating it if absent.
    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()>;

    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}

/// Typed helpers over any [`DocumentStore`].
#[async_trait]
pub trait DocumentStoreExt: DocumentStore {
    async fn add_typed<T: Serialize + Sync>(&self, collection: &str, data: &T) -> Result<String> {
        self.add(collection, to_object(data)?).await
    }

    async fn get_typed<T: DeserializeOwned + Send>(&self, collection: &str, id: &str) -> Result<Option<T>> {
        match self.get(collection, id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Documents that do not decode into `T` are logged and left out.
    async fn list_typed<T: DeserializeOwned + Send>(
        &self,
        collection: &str,
        order_by: Option<&str>,
    ) -> Result<Vec<StoredDocument<T>>> {
        let documents = self.list(collection, order_by).await?;
        Ok(documents
            .into_iter()
            .filter_map(|doc| {
                let id = doc.id.clone();
                match doc.decode() {
                    Ok(decoded) => Some(decoded),
                    Err(e) => {
                        warn!("skipping {}/{}: {}", collection, id, e);
                        None
                    }
                }
            })
            .collect())
    }

    async fn set_typed<T: Serialize + Sync>(&self, collection: &str, id: &str, data: &T) -> Result<()> {
        self.set(collection, id, to_object(data)?).await
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}

fn to_object<T: Serialize>(data: &T) -> Result<Value> {
    match serde_json::to_value(data)? {
        value @ Value::Object(_) => Ok(value),
        other => Err(Error::general(format!("documents must be JSON objects, got {}", other))),
    }
}
