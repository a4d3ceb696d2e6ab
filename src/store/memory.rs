use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use super::{DocumentStore, StoredDocument};
use crate::error::{Error, Result};

type Collections = HashMap<String, BTreeMap<String, Value>>;

/// Process-local document store.
///
/// Unordered reads come back by ascending document id, and ordered reads
/// skip documents that lack the ordering field, as Firestore does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a collection by ascending id.
    pub fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        self.lock()
            .map(|collections| {
                collections
                    .get(collection)
                    .map(|docs| {
                        docs.iter()
                            .map(|(id, data)| StoredDocument {
                                id: id.clone(),
                                data: data.clone(),
                            })
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>> {
        self.collections
            .lock()
            .map_err(|_| Error::database("memory store lock poisoned"))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn add(&self, collection: &str, data: Value) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), data);
        debug!("memory store added {}/{}", collection, id);
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        Ok(self
            .lock()?
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn list(&self, collection: &str, order_by: Option<&str>) -> Result<Vec<StoredDocument>> {
        let mut docs: Vec<StoredDocument> = self
            .documents(collection)
            .into_iter()
            .filter(|doc| order_by.map_or(true, |field| doc.data.get(field).is_some()))
            .collect();

        if let Some(field) = order_by {
            // stable sort keeps id order among equal keys
            docs.sort_by(|a, b| compare_values(&a.data[field], &b.data[field]));
        }
        Ok(docs)
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        if let Some(docs) = self.lock()?.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}

/// Firestore's cross-type ordering: null < bool < number < string < array < map.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or_default(), y.as_f64().unwrap_or_default());
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_crud_round_trip() {
        let store = MemoryStore::new();

        let id = store.add("users", json!({ "name": "Ada" })).await.unwrap();
        assert_eq!(store.get("users", &id).await.unwrap(), Some(json!({ "name": "Ada" })));

        store.set("users", &id, json!({ "email": "a@x" })).await.unwrap();
        assert_eq!(store.get("users", &id).await.unwrap(), Some(json!({ "email": "a@x" })));

        store.delete("users", &id).await.unwrap();
        assert_eq!(store.get("users", &id).await.unwrap(), None);
        // deleting again is not an error
        store.delete("users", &id).await.unwrap();
    }

    #[tokio::test]
    async fn test_ordered_list_skips_documents_without_the_field() {
        let store = MemoryStore::new();
        store.set("users", "1", json!({ "name": "Zoe" })).await.unwrap();
        store.set("users", "2", json!({ "email": "nobody@x" })).await.unwrap();
        store.set("users", "3", json!({ "name": "Ann" })).await.unwrap();

        let ordered = store.list("users", Some("name")).await.unwrap();
        let ids: Vec<&str> = ordered.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);

        let unordered = store.list("users", None).await.unwrap();
        assert_eq!(unordered.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_collection_lists_empty() {
        let store = MemoryStore::new();
        assert!(store.list("thoughts", Some("category")).await.unwrap().is_empty());
    }
}
