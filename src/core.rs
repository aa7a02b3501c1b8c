use std::sync::Arc;
use std::time::Duration;

use teloxide::Bot;
use tracing::info;

use crate::channels::{TelegramChannel, TelegramSink};
use crate::config::AppConfig;
use crate::dispatcher::Dispatcher;
use crate::notifier::Notifier;
use crate::state::SqliteStore;
use crate::traits::{Channel, Clock, Store, SystemClock};

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    // 1. Store
    let store: Arc<dyn Store> = Arc::new(SqliteStore::new(&config.state.db_path).await?);
    info!("Store initialized ({})", config.state.db_path);

    // 2. Clock
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 3. Outgoing sink
    let bot = Bot::new(config.telegram.bot_token.clone());
    let sink: Arc<dyn Channel> = Arc::new(TelegramSink::new(bot.clone()));

    // 4. Dispatcher (owns the dialog engine)
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&store),
        Arc::clone(&clock),
        Arc::clone(&sink),
    ));

    // 5. Notifier
    let notifier = Arc::new(Notifier::new(
        store,
        clock,
        sink,
        config.notifier.recipients.clone(),
    ));
    notifier.spawn(Duration::from_secs(config.notifier.interval_secs));

    // 6. Telegram channel
    let telegram = Arc::new(TelegramChannel::new(
        bot,
        config.telegram.allowed_user_ids.clone(),
        dispatcher,
    ));
    info!("teambot ready");
    telegram.start_with_retry().await;

    Ok(())
}
