use async_trait::async_trait;
use serde_json::Value;

use super::{DocumentStore, StoredDocument};
use crate::error::Result;
use daily_thoughts_firestore::FirestoreClient;

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn add(&self, collection: &str, data: Value) -> Result<String> {
        Ok(self.collection(collection).add(&data).await?)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let document = self.collection(collection).get(id).await?;
        Ok(document.map(|doc| doc.data()))
    }

    async fn list(&self, collection: &str, order_by: Option<&str>) -> Result<Vec<StoredDocument>> {
        let mut reference = self.collection(collection);
        if let Some(field) = order_by {
            reference = reference.order_by(field);
        }

        let documents = reference.list().await?;
        Ok(documents
            .into_iter()
            .map(|doc| StoredDocument {
                id: doc.id().to_string(),
                data: doc.data(),
            })
            .collect())
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        self.collection(collection).set(id, &data).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        Ok(self.collection(collection).delete(id).await?)
    }
}
