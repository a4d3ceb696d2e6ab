#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use daily_thoughts::error::{Error, Result};
use daily_thoughts::store::{DocumentStore, MemoryStore, StoredDocument};
use daily_thoughts::ui::Dialogs;

/// Records alerts and answers confirms from a script (default: accept).
#[derive(Default)]
pub struct ScriptedDialogs {
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
    answers: Mutex<VecDeque<bool>>,
}

impl ScriptedDialogs {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            ..Default::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.alerts.lock().unwrap().last().cloned()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(true)
    }
}

/// One call made against a [`RecordingStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Add(String),
    Get(String, String),
    List(String, Option<String>),
    Set(String, String),
    Delete(String, String),
}

/// A [`MemoryStore`] that logs every call and can be told to fail
/// operations on chosen collections.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    /// Make every following call on `collection` fail.
    pub fn fail(&self, collection: &str) {
        self.failing.lock().unwrap().push(collection.to_string());
    }

    pub fn recover(&self) {
        self.failing.lock().unwrap().clear();
    }

    fn record(&self, call: Call, collection: &str) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().iter().any(|c| c == collection) {
            return Err(Error::database("permission denied"));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn add(&self, collection: &str, data: Value) -> Result<String> {
        self.record(Call::Add(collection.into()), collection)?;
        self.inner.add(collection, data).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        self.record(Call::Get(collection.into(), id.into()), collection)?;
        self.inner.get(collection, id).await
    }

    async fn list(&self, collection: &str, order_by: Option<&str>) -> Result<Vec<StoredDocument>> {
        self.record(
            Call::List(collection.into(), order_by.map(str::to_string)),
            collection,
        )?;
        self.inner.list(collection, order_by).await
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        self.record(Call::Set(collection.into(), id.into()), collection)?;
        self.inner.set(collection, id, data).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.record(Call::Delete(collection.into(), id.into()), collection)?;
        self.inner.delete(collection, id).await
    }
}
