//! Per-user dialog state machine.
//!
//! Five linear flows, one active at most per user. A new entry point
//! replaces whatever was in progress; /cancel discards it. Sessions live
//! only in memory; a restart drops all in-flight dialogs.

mod parse;

pub use parse::{parse_event_date, parse_qa_submission, EVENT_DATE_FORMAT};

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::Mutex;
use tracing::debug;

use crate::traits::Store;

/// The flow an entry-point command begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    AskQuestion,
    AddQa,
    AddContact,
    AddEvent,
    AddDigest,
}

/// One step of a flow, carrying the fields collected so far.
#[derive(Debug, Clone, PartialEq)]
enum DialogState {
    AwaitQuestion,
    AwaitQaText,
    AwaitContactName,
    AwaitContactInfo {
        name: String,
    },
    AwaitEventName,
    AwaitEventDate {
        name: String,
    },
    AwaitEventDescription {
        name: String,
        date: NaiveDateTime,
    },
    AwaitDigestContent,
}

pub struct DialogEngine {
    store: Arc<dyn Store>,
    sessions: Mutex<HashMap<i64, DialogState>>,
}

impl DialogEngine {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub async fn is_active(&self, chat_id: i64) -> bool {
        self.sessions.lock().await.contains_key(&chat_id)
    }

    /// Begin a flow, replacing any session already in progress for this user.
    /// Returns the first prompt of the flow.
    pub async fn start(&self, chat_id: i64, flow: Flow) -> String {
        let (state, prompt) = match flow {
            Flow::AskQuestion => (
                DialogState::AwaitQuestion,
                "What do you want to know about the company or the project?",
            ),
            Flow::AddQa => (
                DialogState::AwaitQaText,
                "Send the question and answer in one message:\n\
                 Question: <your question>\n\
                 Answer: <your answer>",
            ),
            Flow::AddContact => (DialogState::AwaitContactName, "Colleague's name:"),
            Flow::AddEvent => (DialogState::AwaitEventName, "Event name:"),
            Flow::AddDigest => (DialogState::AwaitDigestContent, "Digest content:"),
        };

        let mut sessions = self.sessions.lock().await;
        if let Some(previous) = sessions.insert(chat_id, state) {
            debug!(chat_id, ?previous, "Replacing in-progress dialog");
        }
        prompt.to_string()
    }

    /// Discard the active session, if any. Returns whether one existed.
    pub async fn cancel(&self, chat_id: i64) -> bool {
        self.sessions.lock().await.remove(&chat_id).is_some()
    }

    /// Advance the active session with a plain-text message.
    ///
    /// Returns None when no session is active (the message is not for us).
    /// The session state is taken out of the map before any store write, so
    /// a failed write still leaves the user idle; the caller reports the
    /// error generically.
    pub async fn handle_text(&self, chat_id: i64, text: &str) -> anyhow::Result<Option<String>> {
        let Some(state) = self.sessions.lock().await.remove(&chat_id) else {
            return Ok(None);
        };

        let reply = match state {
            DialogState::AwaitQuestion => match self.store.lookup_qa(text).await? {
                Some(answer) => format!("Answer:\n{}", answer),
                None => "I don't know the answer to that yet. \
                         Use /answer to teach me."
                    .to_string(),
            },

            DialogState::AwaitQaText => match parse_qa_submission(text) {
                Ok((question, answer)) => {
                    self.store.upsert_qa(&question, &answer).await?;
                    "Answer saved.".to_string()
                }
                Err(e) => format!(
                    "Couldn't read that ({}). Expected:\n\
                     Question: <your question>\n\
                     Answer: <your answer>\n\
                     Use /answer to try again.",
                    e
                ),
            },

            DialogState::AwaitContactName => {
                let name = text.trim();
                if name.is_empty() {
                    "A contact needs a name. Use /add_contact to try again.".to_string()
                } else {
                    let prompt = "Contact details (phone, email, role):";
                    self.put(chat_id, DialogState::AwaitContactInfo {
                        name: name.to_string(),
                    })
                    .await;
                    prompt.to_string()
                }
            }

            DialogState::AwaitContactInfo { name } => {
                self.store.add_contact(&name, Some(text)).await?;
                format!("Contact {} added.", name)
            }

            DialogState::AwaitEventName => {
                let name = text.trim();
                if name.is_empty() {
                    "An event needs a name. Use /add_event to try again.".to_string()
                } else {
                    self.put(chat_id, DialogState::AwaitEventDate {
                        name: name.to_string(),
                    })
                    .await;
                    "Date and time as DD.MM.YYYY HH:MM, e.g. 25.12.2026 15:00:".to_string()
                }
            }

            DialogState::AwaitEventDate { name } => match parse_event_date(text) {
                Ok(date) => {
                    self.put(chat_id, DialogState::AwaitEventDescription { name, date })
                        .await;
                    "Description (or '-' to skip):".to_string()
                }
                Err(_) => {
                    // The one retryable step: stay in the same state.
                    self.put(chat_id, DialogState::AwaitEventDate { name }).await;
                    "Invalid date format. Use DD.MM.YYYY HH:MM".to_string()
                }
            },

            DialogState::AwaitEventDescription { name, date } => {
                let description = if text == "-" { "" } else { text };
                self.store.add_event(&name, date, description).await?;
                format!("Event '{}' added.", name)
            }

            DialogState::AwaitDigestContent => {
                self.store.add_digest(text).await?;
                "Digest saved.".to_string()
            }
        };

        Ok(Some(reply))
    }

    async fn put(&self, chat_id: i64, state: DialogState) {
        self.sessions.lock().await.insert(chat_id, state);
    }
}
