use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Telegram user IDs allowed to talk to the bot.
    /// An empty list means the bot is open to everyone (team-internal bots
    /// typically restrict at the chat level instead).
    #[serde(default)]
    pub allowed_user_ids: Vec<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StateConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    "teambot.db".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotifierConfig {
    /// Seconds between digest broadcast runs.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Chat IDs that receive the periodic digest broadcast.
    #[serde(default)]
    pub recipients: Vec<i64>,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            recipients: Vec::new(),
        }
    }
}

fn default_interval_secs() -> u64 {
    86_400
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        Ok(config)
    }
}
