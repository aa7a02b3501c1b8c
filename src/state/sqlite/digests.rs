use super::*;

use async_trait::async_trait;
use sqlx::Row;

#[async_trait]
impl crate::traits::DigestStore for SqliteStore {
    async fn add_digest(&self, content: &str) -> anyhow::Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query("INSERT INTO digests (content, created_at) VALUES (?, ?)")
            .bind(content)
            .bind(&now)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn recent_digests(&self, limit: i64) -> anyhow::Result<Vec<String>> {
        // id DESC breaks ties between digests created in the same second.
        let rows = sqlx::query(
            "SELECT content FROM digests ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(|r| r.get("content")).collect())
    }
}
