use async_trait::async_trait;

/// Outgoing-message sink. Delivery is fire-and-forget from the core's
/// perspective; transport-level failure handling lives behind this seam.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel identifier for logs.
    fn name(&self) -> String;

    /// Send a text message to a chat.
    async fn send_text(&self, chat_id: i64, text: &str) -> anyhow::Result<()>;
}
