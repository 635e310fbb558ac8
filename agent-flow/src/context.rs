use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{FlowError, Result};

/// Context for sharing data between stages of a pipeline run.
///
/// Values are stored as JSON, so anything `Serialize`/`Deserialize` can be
/// passed between stages. Cloning is cheap: clones share the same underlying
/// map, which is how a stage's output becomes visible to the stages after it.
#[derive(Clone, Debug)]
pub struct Context {
    data: Arc<DashMap<String, Value>>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    pub async fn set(&self, key: impl Into<String>, value: impl serde::Serialize) {
        let value = serde_json::to_value(value).expect("Failed to serialize value");
        self.data.insert(key.into(), value);
    }

    pub async fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Like [`Context::get`], but a missing or undeserializable key is an
    /// error. Stages use this for inputs an earlier stage must have produced.
    pub async fn get_required<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.get(key)
            .await
            .ok_or_else(|| FlowError::ContextError(format!("{key} not found in context")))
    }

}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
