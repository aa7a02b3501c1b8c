//! Shared test fixtures: a tempfile-backed store, a fixed clock, and a
//! capturing channel.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::Mutex;

use crate::state::SqliteStore;
use crate::traits::{Channel, Clock};

/// A store backed by a throwaway SQLite file. Keep the temp file handle
/// alive for the duration of the test.
pub async fn test_store() -> (Arc<SqliteStore>, tempfile::NamedTempFile) {
    let db_file = tempfile::NamedTempFile::new().unwrap();
    let store = SqliteStore::new(db_file.path().to_str().unwrap())
        .await
        .unwrap();
    (Arc::new(store), db_file)
}

/// A clock frozen at a chosen instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// A channel that records every message instead of sending it. Optionally
/// fails sends to one chat ID to exercise error isolation.
pub struct CapturingChannel {
    messages: Mutex<Vec<(i64, String)>>,
    failing_chat: Option<i64>,
}

impl CapturingChannel {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            failing_chat: None,
        }
    }

    pub fn failing_for(chat_id: i64) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            failing_chat: Some(chat_id),
        }
    }

    pub async fn sent(&self) -> Vec<(i64, String)> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl Channel for CapturingChannel {
    fn name(&self) -> String {
        "capturing".to_string()
    }

    async fn send_text(&self, chat_id: i64, text: &str) -> anyhow::Result<()> {
        if self.failing_chat == Some(chat_id) {
            anyhow::bail!("send refused for chat {}", chat_id);
        }
        self.messages
            .lock()
            .await
            .push((chat_id, text.to_string()));
        Ok(())
    }
}
