//! Periodic digest broadcast.
//!
//! Each run composes one message from the latest digest and the events due
//! within the next day, hands it to the outgoing sink for every configured
//! recipient, and marks the surfaced events notified. Runs never overlap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use tracing::{error, info, warn};

use crate::traits::{Channel, Clock, Event, Store};

pub struct Notifier {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    channel: Arc<dyn Channel>,
    recipients: Vec<i64>,
    /// Guards against overlapping runs.
    running: AtomicBool,
}

impl Notifier {
    pub fn new(
        store: Arc<dyn Store>,
        clock: Arc<dyn Clock>,
        channel: Arc<dyn Channel>,
        recipients: Vec<i64>,
    ) -> Self {
        Self {
            store,
            clock,
            channel,
            recipients,
            running: AtomicBool::new(false),
        }
    }

    /// Spawn the periodic tick loop as a background task. The interval is
    /// owned by the wiring layer; this type only implements run-once.
    pub fn spawn(self: Arc<Self>, interval: Duration) {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if let Err(e) = self.run_once().await {
                    error!("Digest broadcast failed: {:#}", e);
                }
            }
        });
        info!(interval_secs = interval.as_secs(), "Notifier spawned");
    }

    /// One broadcast run. Skips (without error) if a previous run is still
    /// in progress.
    pub async fn run_once(&self) -> anyhow::Result<()> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Previous digest broadcast still running, skipping this tick");
            return Ok(());
        }
        let result = self.broadcast().await;
        self.running.store(false, Ordering::SeqCst);
        result
    }

    async fn broadcast(&self) -> anyhow::Result<()> {
        let digest = self.store.recent_digests(1).await?.into_iter().next();

        // "Today" is approximated as a 1-day forward window, not a calendar
        // day.
        let now = self.clock.now();
        let events = self
            .store
            .due_events(now, Some(now + ChronoDuration::days(1)))
            .await?;

        let message = compose_broadcast(digest.as_deref(), &events);

        if self.recipients.is_empty() {
            info!("No digest recipients configured; composed message:\n{}", message);
        }
        for chat_id in &self.recipients {
            if let Err(e) = self.channel.send_text(*chat_id, &message).await {
                warn!(
                    chat_id,
                    channel = %self.channel.name(),
                    "Failed to deliver digest broadcast: {}",
                    e
                );
            }
        }

        // The message has been handed to the sink; these events are surfaced.
        for event in &events {
            if let Err(e) = self.store.mark_notified(&event.name, event.date).await {
                warn!(name = %event.name, "Failed to mark event notified: {}", e);
            }
        }

        info!(
            events = events.len(),
            recipients = self.recipients.len(),
            "Digest broadcast complete"
        );
        Ok(())
    }
}

/// Compose the broadcast text: digest content (or a placeholder) plus a
/// bulleted list of today's event names. The events section is omitted
/// when empty.
fn compose_broadcast(digest: Option<&str>, events: &[Event]) -> String {
    let mut message = String::from("Daily digest:\n\n");
    match digest {
        Some(content) => message.push_str(content),
        None => message.push_str("No new digests today."),
    }

    if !events.is_empty() {
        message.push_str("\n\nToday's events:");
        for event in events {
            message.push_str(&format!("\n• {}", event.name));
        }
    }
    message
}
