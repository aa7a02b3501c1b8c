use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, Message, Update};
use teloxide::Bot;
use tracing::{info, warn};

use super::formatting::split_message;
use crate::dispatcher::Dispatcher;
use crate::traits::Channel;
use crate::types::Incoming;

/// Telegram message limit, in characters.
const MAX_MESSAGE_LEN: usize = 4096;

/// Outbound side of the Telegram transport. `Bot` is cheap to clone, so the
/// sink and the inbound channel share one.
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Channel for TelegramSink {
    fn name(&self) -> String {
        "telegram".to_string()
    }

    async fn send_text(&self, chat_id: i64, text: &str) -> anyhow::Result<()> {
        for chunk in split_message(text, MAX_MESSAGE_LEN) {
            self.bot.send_message(ChatId(chat_id), chunk).await?;
        }
        Ok(())
    }
}

/// Inbound side: receives Telegram updates and feeds them to the dispatcher.
pub struct TelegramChannel {
    bot: Bot,
    allowed_user_ids: Vec<u64>,
    dispatcher: Arc<Dispatcher>,
}

impl TelegramChannel {
    pub fn new(bot: Bot, allowed_user_ids: Vec<u64>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            bot,
            allowed_user_ids,
            dispatcher,
        }
    }

    /// Run the update loop, restarting on crash with exponential backoff:
    /// 5s doubling to a 60s cap, reset after a stable (60s+) run.
    pub async fn start_with_retry(self: Arc<Self>) {
        let initial_backoff = Duration::from_secs(5);
        let max_backoff = Duration::from_secs(60);
        let stable_threshold = Duration::from_secs(60);
        let mut backoff = initial_backoff;

        loop {
            info!("Starting Telegram update loop");
            let started = tokio::time::Instant::now();
            self.clone().start().await;
            let ran_for = started.elapsed();

            if ran_for >= stable_threshold {
                backoff = initial_backoff;
            }

            warn!(
                backoff_secs = backoff.as_secs(),
                ran_for_secs = ran_for.as_secs(),
                "Telegram update loop stopped, restarting"
            );
            tokio::time::sleep(backoff).await;
            backoff = std::cmp::min(backoff * 2, max_backoff);
        }
    }

    pub async fn start(self: Arc<Self>) {
        let handler = teloxide::dptree::entry().branch(Update::filter_message().endpoint({
            let channel = Arc::clone(&self);
            move |msg: Message| {
                let channel = Arc::clone(&channel);
                async move {
                    channel.handle_message(msg).await;
                    teloxide::respond(())
                }
            }
        }));

        teloxide::dispatching::Dispatcher::builder(self.bot.clone(), handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }

    async fn handle_message(&self, msg: Message) {
        let user_id = msg.from.as_ref().map(|u| u.id.0).unwrap_or(0);

        // An empty allow-list means the bot is open to the whole team.
        if !self.allowed_user_ids.is_empty() && !self.allowed_user_ids.contains(&user_id) {
            warn!(user_id, "Unauthorized user attempted access");
            let _ = self
                .bot
                .send_message(
                    msg.chat.id,
                    format!(
                        "Unauthorized. Your Telegram user ID is {}.\n\
                         Ask an admin to add it to allowed_user_ids in config.toml.",
                        user_id
                    ),
                )
                .await;
            return;
        }

        let Some(text) = msg.text() else {
            let _ = self
                .bot
                .send_message(msg.chat.id, "I can only process text messages.")
                .await;
            return;
        };

        let incoming = Incoming::from_text(msg.chat.id.0, text);
        self.dispatcher.handle(incoming).await;
    }
}
