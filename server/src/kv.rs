//! Key-Value Store Clients
//!
//! The hosted store is treated as an opaque get/set service, at-least-once
//! durable, no transactions across keys. `RestKv` speaks the
//! Upstash-compatible REST protocol; `MemoryKv` backs tests and
//! store-less local runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Deserialize;

pub type KvResult<T> = Result<T, String>;

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch a value; `None` when the key has never been written
    async fn get(&self, key: &str) -> KvResult<Option<String>>;

    /// Store a value, overwriting any previous one
    async fn set(&self, key: &str, value: &str) -> KvResult<()>;
}

/// REST client for an Upstash-compatible store: `GET {base}/get/{key}` and
/// `POST {base}/set/{key}` with the value as the request body.
pub struct RestKv {
    base: String,
    token: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct RestResult {
    result: Option<String>,
}

impl RestKv {
    pub fn new(base: String, token: String) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            token,
            http,
        })
    }
}

#[async_trait]
impl KvStore for RestKv {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        let url = format!("{}/get/{}", self.base, key);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| format!("kv get failed: {}", e))?;
        if !response.status().is_success() {
            return Err(format!("kv get status {}", response.status()));
        }
        let body: RestResult = response
            .json()
            .await
            .map_err(|e| format!("kv get decode failed: {}", e))?;
        Ok(body.result)
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let url = format!("{}/set/{}", self.base, key);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .body(value.to_string())
            .send()
            .await
            .map_err(|e| format!("kv set failed: {}", e))?;
        if !response.status().is_success() {
            return Err(format!("kv set status {}", response.status()));
        }
        Ok(())
    }
}

/// In-memory store for tests and local runs without a configured backend
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn seeded(entries: &[(&str, &str)]) -> Self {
        let map = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_kv_round_trip() {
        let kv = MemoryKv::default();
        assert_eq!(kv.get("missing").await.unwrap(), None);
        kv.set("k", "v").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("v"));
        kv.set("k", "v2").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("v2"));
    }
}
