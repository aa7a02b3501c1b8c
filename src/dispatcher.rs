//! Routes incoming messages to stateless command handlers or the active
//! dialog session, serialized per user.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::channels::formatting::build_help_text;
use crate::dialog::{DialogEngine, Flow, EVENT_DATE_FORMAT};
use crate::traits::{Channel, Clock, Store};
use crate::types::{Command, Incoming};

const GENERIC_FAILURE: &str = "Something went wrong on my side. Please try again later.";

pub struct Dispatcher {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    engine: DialogEngine,
    outbox: Arc<dyn Channel>,
    /// Per-chat lanes. Handling holds the lane for its whole duration, so two
    /// messages from the same user never interleave; distinct users run in
    /// parallel.
    lanes: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, outbox: Arc<dyn Channel>) -> Self {
        Self {
            engine: DialogEngine::new(store.clone()),
            store,
            clock,
            outbox,
            lanes: Mutex::new(HashMap::new()),
        }
    }

    /// Handle one incoming message to completion.
    ///
    /// This is the error-mapping boundary: any store failure below becomes
    /// one generic reply, and a failure for one user never affects others.
    pub async fn handle(&self, incoming: Incoming) {
        let lane = {
            let mut lanes = self.lanes.lock().await;
            lanes
                .entry(incoming.chat_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let _serialized = lane.lock().await;

        let reply = match self.dispatch(&incoming).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(chat_id = incoming.chat_id, "Message handling failed: {:#}", e);
                Some(GENERIC_FAILURE.to_string())
            }
        };

        if let Some(text) = reply {
            if let Err(e) = self.outbox.send_text(incoming.chat_id, &text).await {
                warn!(
                    chat_id = incoming.chat_id,
                    channel = %self.outbox.name(),
                    "Failed to send reply: {}",
                    e
                );
            }
        }
    }

    async fn dispatch(&self, incoming: &Incoming) -> anyhow::Result<Option<String>> {
        let chat_id = incoming.chat_id;

        if let Some(command) = &incoming.command {
            return self.handle_command(chat_id, command).await;
        }

        // Plain text: deliver into the active session. Free text while idle
        // is not for us.
        let reply = self.engine.handle_text(chat_id, &incoming.text).await?;
        if reply.is_none() {
            debug!(chat_id, "Ignoring free text with no active dialog");
        }
        Ok(reply)
    }

    async fn handle_command(
        &self,
        chat_id: i64,
        command: &Command,
    ) -> anyhow::Result<Option<String>> {
        let reply = match command {
            // Dialog entry points: replace whatever flow was active.
            Command::Question => self.engine.start(chat_id, Flow::AskQuestion).await,
            Command::Answer => self.engine.start(chat_id, Flow::AddQa).await,
            Command::AddContact => self.engine.start(chat_id, Flow::AddContact).await,
            Command::AddEvent => self.engine.start(chat_id, Flow::AddEvent).await,
            Command::AddDigest => self.engine.start(chat_id, Flow::AddDigest).await,

            Command::Cancel => {
                if self.engine.cancel(chat_id).await {
                    "Cancelled.".to_string()
                } else {
                    "Nothing to cancel.".to_string()
                }
            }

            // Stateless commands leave any active dialog untouched.
            Command::Start | Command::Help => build_help_text(),
            Command::Contacts => self.handle_contacts().await?,
            Command::FindContact(arg) => self.handle_find_contact(arg).await?,
            Command::Events => self.handle_events().await?,
            Command::Digest => self.handle_digest().await?,

            Command::Unknown(token) => format!(
                "Unknown command: {}\nType /help for available commands.",
                token
            ),
        };
        Ok(Some(reply))
    }

    async fn handle_contacts(&self) -> anyhow::Result<String> {
        let contacts = self.store.list_contacts().await?;
        if contacts.is_empty() {
            return Ok("No contacts yet. Use /add_contact to add one.".to_string());
        }

        let mut message = String::from("Contacts:\n");
        for contact in &contacts {
            message.push_str(&format!("\n• {}", contact.name));
            if let Some(info) = contact.info.as_deref().filter(|i| !i.is_empty()) {
                message.push_str(&format!("\n  {}", info));
            }
        }
        Ok(message)
    }

    async fn handle_find_contact(&self, needle: &str) -> anyhow::Result<String> {
        if needle.is_empty() {
            return Ok("Usage: /find_contact <name>".to_string());
        }
        match self.store.find_contact(needle).await? {
            Some(contact) => {
                let mut message = contact.name.clone();
                if let Some(info) = contact.info.as_deref().filter(|i| !i.is_empty()) {
                    message.push_str(&format!("\n{}", info));
                }
                Ok(message)
            }
            None => Ok(format!("Contact '{}' not found.", needle)),
        }
    }

    async fn handle_events(&self) -> anyhow::Result<String> {
        let events = self.store.due_events(self.clock.now(), None).await?;
        if events.is_empty() {
            return Ok("No upcoming events.".to_string());
        }

        let mut message = String::from("Upcoming events:\n");
        for event in &events {
            message.push_str(&format!(
                "\n• {} — {}",
                event.name,
                event.date.format(EVENT_DATE_FORMAT)
            ));
            if !event.description.is_empty() {
                message.push_str(&format!("\n  {}", event.description));
            }
        }
        Ok(message)
    }

    async fn handle_digest(&self) -> anyhow::Result<String> {
        let digests = self.store.recent_digests(5).await?;
        if digests.is_empty() {
            return Ok("No digests yet. Use /add_digest to add one.".to_string());
        }

        let mut message = String::from("Recent digests:\n");
        for (i, digest) in digests.iter().enumerate() {
            message.push_str(&format!("\n{}. {}", i + 1, digest));
        }
        Ok(message)
    }
}
