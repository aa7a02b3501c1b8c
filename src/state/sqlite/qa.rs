use super::*;

use async_trait::async_trait;
use sqlx::Row;

#[async_trait]
impl crate::traits::QaStore for SqliteStore {
    async fn upsert_qa(&self, question: &str, answer: &str) -> anyhow::Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO qa_entries (question, answer, created_at) VALUES (?, ?, ?)
             ON CONFLICT(question) DO UPDATE SET answer = excluded.answer",
        )
        .bind(question.to_lowercase())
        .bind(answer)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn lookup_qa(&self, question: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query("SELECT answer FROM qa_entries WHERE question = ?")
            .bind(question.to_lowercase())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("answer")))
    }
}
